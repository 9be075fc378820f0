use fieldcmp_types::{TypeDescriptor, Value};

/// A value whose shape can be discovered at runtime.
///
/// Implementors describe their declared type and hand themselves to a
/// [`Visitor`] through exactly one `visit_*` call per [`accept`](Self::accept).
/// Containers forward their children as `&dyn Inspect`, so visitors can
/// recurse without knowing any concrete type.
///
/// Use [`inspect_struct!`](crate::inspect_struct) and
/// [`inspect_enum!`](crate::inspect_enum) to implement this for your own
/// types.
pub trait Inspect {
    /// Declared type of `Self` without needing a value.
    ///
    /// Containers use this to describe their element type when empty and
    /// optionals when absent.
    fn static_type() -> TypeDescriptor
    where
        Self: Sized;

    /// Declared type of this value.
    fn declared_type(&self) -> TypeDescriptor;

    /// Present this value to `visitor`.
    fn accept(&self, visitor: &mut dyn Visitor);
}

/// Receiver of one shape variant per [`Inspect::accept`] call.
pub trait Visitor {
    /// A scalar or opaque value.
    fn visit_leaf(&mut self, value: Value);

    /// A struct. Hidden fields are included with `exported == false`.
    fn visit_struct(&mut self, name: &str, fields: &[Field<'_>]);

    /// An ordered sequence of elements.
    fn visit_sequence(&mut self, elements: &[&dyn Inspect]);

    /// A map, keys already rendered to strings and sorted.
    fn visit_map(&mut self, entries: &[(String, &dyn Inspect)]);

    /// An optional value, `None` when absent.
    fn visit_optional(&mut self, inner: Option<&dyn Inspect>);

    /// A reference-counted value. `identity` is stable for the lifetime of
    /// the allocation and equal for every handle to it.
    fn visit_shared(&mut self, identity: usize, target: &dyn Inspect);
}

/// One named field of a struct.
#[derive(Clone, Copy)]
pub struct Field<'a> {
    pub name: &'a str,
    pub value: &'a dyn Inspect,
    /// Hidden fields never appear in a walk but do take part in
    /// materialization of the enclosing struct.
    pub exported: bool,
}

impl<'a> Field<'a> {
    pub fn exported(name: &'a str, value: &'a dyn Inspect) -> Self {
        Self {
            name,
            value,
            exported: true,
        }
    }

    pub fn hidden(name: &'a str, value: &'a dyn Inspect) -> Self {
        Self {
            name,
            value,
            exported: false,
        }
    }
}

impl std::fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("declared_type", &self.value.declared_type())
            .field("exported", &self.exported)
            .finish()
    }
}
