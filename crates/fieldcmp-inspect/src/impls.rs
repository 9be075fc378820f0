//! [`Inspect`] for standard library types.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::rc::{self, Rc};
use std::sync::{self, Arc};

use fieldcmp_types::{ScalarKind, TypeDescriptor, Value};

use crate::inspect::{Inspect, Visitor};
use crate::materialize::materialize;

/// Marker materialized for a `RefCell` that is mutably borrowed elsewhere.
pub const BORROWED_MARKER: &str = "<borrowed>";

macro_rules! scalar {
    ($($ty:ty => $kind:ident, $variant:ident as $repr:ty;)*) => {
        $(
            impl Inspect for $ty {
                fn static_type() -> TypeDescriptor {
                    TypeDescriptor::Scalar(ScalarKind::$kind)
                }

                fn declared_type(&self) -> TypeDescriptor {
                    Self::static_type()
                }

                fn accept(&self, visitor: &mut dyn Visitor) {
                    visitor.visit_leaf(Value::$variant(*self as $repr));
                }
            }
        )*
    };
}

scalar! {
    i8 => I8, Int as i64;
    i16 => I16, Int as i64;
    i32 => I32, Int as i64;
    i64 => I64, Int as i64;
    isize => Isize, Int as i64;
    u8 => U8, UInt as u64;
    u16 => U16, UInt as u64;
    u32 => U32, UInt as u64;
    u64 => U64, UInt as u64;
    usize => Usize, UInt as u64;
    f32 => F32, Float as f64;
    f64 => F64, Float as f64;
}

impl Inspect for bool {
    fn static_type() -> TypeDescriptor {
        TypeDescriptor::Scalar(ScalarKind::Bool)
    }

    fn declared_type(&self) -> TypeDescriptor {
        Self::static_type()
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_leaf(Value::Bool(*self));
    }
}

impl Inspect for char {
    fn static_type() -> TypeDescriptor {
        TypeDescriptor::Scalar(ScalarKind::Char)
    }

    fn declared_type(&self) -> TypeDescriptor {
        Self::static_type()
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_leaf(Value::Char(*self));
    }
}

impl Inspect for String {
    fn static_type() -> TypeDescriptor {
        TypeDescriptor::Scalar(ScalarKind::String)
    }

    fn declared_type(&self) -> TypeDescriptor {
        Self::static_type()
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_leaf(Value::Str(self.clone()));
    }
}

impl Inspect for &str {
    fn static_type() -> TypeDescriptor {
        TypeDescriptor::Scalar(ScalarKind::String)
    }

    fn declared_type(&self) -> TypeDescriptor {
        Self::static_type()
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_leaf(Value::Str((*self).to_string()));
    }
}

impl Inspect for () {
    fn static_type() -> TypeDescriptor {
        TypeDescriptor::Scalar(ScalarKind::Unit)
    }

    fn declared_type(&self) -> TypeDescriptor {
        Self::static_type()
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_leaf(Value::Null);
    }
}

// ---------------------------------------------------------------------------
// Optionals and sequences
// ---------------------------------------------------------------------------

impl<T: Inspect> Inspect for Option<T> {
    fn static_type() -> TypeDescriptor {
        TypeDescriptor::optional(T::static_type())
    }

    fn declared_type(&self) -> TypeDescriptor {
        Self::static_type()
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_optional(self.as_ref().map(|inner| inner as &dyn Inspect));
    }
}

fn visit_elements<'a, T: Inspect + 'a>(
    items: impl Iterator<Item = &'a T>,
    visitor: &mut dyn Visitor,
) {
    let elements: Vec<&dyn Inspect> = items.map(|item| item as &dyn Inspect).collect();
    visitor.visit_sequence(&elements);
}

macro_rules! sequence {
    ($($container:ident),*) => {
        $(
            impl<T: Inspect> Inspect for $container<T> {
                fn static_type() -> TypeDescriptor {
                    TypeDescriptor::sequence(T::static_type())
                }

                fn declared_type(&self) -> TypeDescriptor {
                    Self::static_type()
                }

                fn accept(&self, visitor: &mut dyn Visitor) {
                    visit_elements(self.iter(), visitor);
                }
            }
        )*
    };
}

sequence!(Vec, VecDeque, BTreeSet);

impl<T: Inspect, const N: usize> Inspect for [T; N] {
    fn static_type() -> TypeDescriptor {
        TypeDescriptor::sequence(T::static_type())
    }

    fn declared_type(&self) -> TypeDescriptor {
        Self::static_type()
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visit_elements(self.iter(), visitor);
    }
}

// ---------------------------------------------------------------------------
// Maps
// ---------------------------------------------------------------------------

fn visit_entries<'a, K: Inspect + 'a, V: Inspect + 'a>(
    entries: impl Iterator<Item = (&'a K, &'a V)>,
    visitor: &mut dyn Visitor,
) {
    let mut rendered: Vec<(String, &dyn Inspect)> = entries
        .map(|(key, value)| (materialize(key).to_plain_string(), value as &dyn Inspect))
        .collect();
    rendered.sort_by(|a, b| a.0.cmp(&b.0));
    visitor.visit_map(&rendered);
}

impl<K: Inspect, V: Inspect, S> Inspect for HashMap<K, V, S> {
    fn static_type() -> TypeDescriptor {
        TypeDescriptor::map(K::static_type(), V::static_type())
    }

    fn declared_type(&self) -> TypeDescriptor {
        Self::static_type()
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visit_entries(self.iter(), visitor);
    }
}

impl<K: Inspect, V: Inspect> Inspect for BTreeMap<K, V> {
    fn static_type() -> TypeDescriptor {
        TypeDescriptor::map(K::static_type(), V::static_type())
    }

    fn declared_type(&self) -> TypeDescriptor {
        Self::static_type()
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visit_entries(self.iter(), visitor);
    }
}

// ---------------------------------------------------------------------------
// Indirection
// ---------------------------------------------------------------------------

impl<T: Inspect> Inspect for Box<T> {
    fn static_type() -> TypeDescriptor {
        T::static_type()
    }

    fn declared_type(&self) -> TypeDescriptor {
        (**self).declared_type()
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        (**self).accept(visitor);
    }
}

impl<T: Inspect> Inspect for Rc<T> {
    fn static_type() -> TypeDescriptor {
        T::static_type()
    }

    fn declared_type(&self) -> TypeDescriptor {
        (**self).declared_type()
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_shared(Rc::as_ptr(self) as *const () as usize, &**self);
    }
}

impl<T: Inspect> Inspect for Arc<T> {
    fn static_type() -> TypeDescriptor {
        T::static_type()
    }

    fn declared_type(&self) -> TypeDescriptor {
        (**self).declared_type()
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_shared(Arc::as_ptr(self) as *const () as usize, &**self);
    }
}

impl<T: Inspect> Inspect for rc::Weak<T> {
    fn static_type() -> TypeDescriptor {
        TypeDescriptor::optional(T::static_type())
    }

    fn declared_type(&self) -> TypeDescriptor {
        Self::static_type()
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        let upgraded = self.upgrade();
        visitor.visit_optional(upgraded.as_ref().map(|rc| rc as &dyn Inspect));
    }
}

impl<T: Inspect> Inspect for sync::Weak<T> {
    fn static_type() -> TypeDescriptor {
        TypeDescriptor::optional(T::static_type())
    }

    fn declared_type(&self) -> TypeDescriptor {
        Self::static_type()
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        let upgraded = self.upgrade();
        visitor.visit_optional(upgraded.as_ref().map(|arc| arc as &dyn Inspect));
    }
}

impl<T: Inspect> Inspect for RefCell<T> {
    fn static_type() -> TypeDescriptor {
        T::static_type()
    }

    fn declared_type(&self) -> TypeDescriptor {
        match self.try_borrow() {
            Ok(inner) => inner.declared_type(),
            Err(_) => T::static_type(),
        }
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        match self.try_borrow() {
            Ok(inner) => inner.accept(visitor),
            Err(_) => visitor.visit_leaf(Value::Opaque(BORROWED_MARKER.to_string())),
        }
    }
}
