/// Implement [`Inspect`](crate::Inspect) for a named-field struct.
///
/// List the fields that take part in comparison, optionally renamed with
/// `as "Name"`, then any fields that should stay out of the walk under
/// `hidden { .. }`. A struct whose fields are all hidden is compared as a
/// single opaque value.
///
/// ```
/// use fieldcmp_inspect::inspect_struct;
///
/// struct Account {
///     id: u64,
///     owner: String,
///     cache: Vec<u8>,
/// }
///
/// inspect_struct!(Account { id as "ID", owner } hidden { cache });
/// ```
#[macro_export]
macro_rules! inspect_struct {
    (@name $field:ident) => {
        stringify!($field)
    };
    (@name $field:ident $rename:literal) => {
        $rename
    };
    (@count) => {
        0usize
    };
    (@count $head:ident $($tail:ident)*) => {
        1usize + $crate::inspect_struct!(@count $($tail)*)
    };
    (
        $ty:ident { $($field:ident $(as $rename:literal)?),* $(,)? }
        $(hidden { $($hidden:ident),* $(,)? })?
    ) => {
        impl $crate::Inspect for $ty {
            fn static_type() -> $crate::TypeDescriptor {
                $crate::TypeDescriptor::structure(
                    stringify!($ty),
                    $crate::inspect_struct!(@count $($field)*),
                )
            }

            fn declared_type(&self) -> $crate::TypeDescriptor {
                <Self as $crate::Inspect>::static_type()
            }

            fn accept(&self, visitor: &mut dyn $crate::Visitor) {
                let fields: &[$crate::Field<'_>] = &[
                    $(
                        $crate::Field::exported(
                            $crate::inspect_struct!(@name $field $($rename)?),
                            &self.$field,
                        ),
                    )*
                    $($(
                        $crate::Field::hidden(stringify!($hidden), &self.$hidden),
                    )*)?
                ];
                visitor.visit_struct(stringify!($ty), fields);
            }
        }
    };
}

/// Implement [`Inspect`](crate::Inspect) for field-less enums (or any
/// `Debug` type that should compare by its debug form).
#[macro_export]
macro_rules! inspect_enum {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl $crate::Inspect for $ty {
                fn static_type() -> $crate::TypeDescriptor {
                    $crate::TypeDescriptor::enumeration(stringify!($ty))
                }

                fn declared_type(&self) -> $crate::TypeDescriptor {
                    <Self as $crate::Inspect>::static_type()
                }

                fn accept(&self, visitor: &mut dyn $crate::Visitor) {
                    visitor.visit_leaf($crate::Value::Opaque(format!("{:?}", self)));
                }
            }
        )+
    };
}

/// Implement [`Inspect`](crate::Inspect) for value types that compare by
/// their `Display` form (decimal newtypes, identifiers, ...).
#[macro_export]
macro_rules! inspect_opaque {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl $crate::Inspect for $ty {
                fn static_type() -> $crate::TypeDescriptor {
                    $crate::TypeDescriptor::opaque(stringify!($ty))
                }

                fn declared_type(&self) -> $crate::TypeDescriptor {
                    <Self as $crate::Inspect>::static_type()
                }

                fn accept(&self, visitor: &mut dyn $crate::Visitor) {
                    visitor.visit_leaf($crate::Value::Opaque(self.to_string()));
                }
            }
        )+
    };
}

#[cfg(test)]
mod tests {
    use crate::{materialize, Inspect, TypeDescriptor, Value};

    #[derive(Debug)]
    enum Status {
        Open,
        Closed,
    }

    struct Invoice {
        number: u32,
        status: Status,
        memo: String,
        checksum: u64,
    }

    crate::inspect_enum!(Status);
    crate::inspect_struct!(Invoice { number as "Number", status, memo } hidden { checksum });

    struct Code(&'static str);

    impl std::fmt::Display for Code {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "code:{}", self.0)
        }
    }

    crate::inspect_opaque!(Code);

    #[test]
    fn struct_counts_only_visible_fields() {
        assert_eq!(Invoice::static_type(), TypeDescriptor::structure("Invoice", 3));
    }

    #[test]
    fn renamed_and_hidden_fields_materialize() {
        let invoice = Invoice {
            number: 9,
            status: Status::Closed,
            memo: String::new(),
            checksum: 77,
        };
        let names: Vec<String> = match materialize(&invoice) {
            Value::Record { fields, .. } => fields.into_iter().map(|(n, _)| n).collect(),
            other => panic!("expected Record, got {:?}", other),
        };
        assert_eq!(names, vec!["Number", "status", "memo", "checksum"]);
    }

    #[test]
    fn enum_compares_by_variant() {
        assert_eq!(materialize(&Status::Open), Value::Opaque("Open".into()));
        assert_eq!(Status::Open.declared_type().to_string(), "Status");
    }

    #[test]
    fn opaque_uses_display() {
        assert_eq!(materialize(&Code("x")), Value::Opaque("code:x".into()));
    }
}
