use std::borrow::Cow;
use std::fmt;

use serde::{Serialize, Serializer};

/// Primitive value kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    Char,
    String,
    Unit,
}

impl ScalarKind {
    /// Rust spelling of the kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Char => "char",
            Self::String => "String",
            Self::Unit => "()",
        }
    }

    pub fn is_numeric(self) -> bool {
        !matches!(self, Self::Bool | Self::Char | Self::String | Self::Unit)
    }
}

/// Declared type of a field.
///
/// Descriptors are shapes, not values: `Optional` is kept even when the
/// field is absent, and a `Sequence` keeps its element type even when empty.
/// Struct descriptors carry only the name and the number of visible fields,
/// so recursive types produce finite descriptors.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    Scalar(ScalarKind),
    /// A field-less enum, compared by variant.
    Enum(Cow<'static, str>),
    /// A value type with no walkable structure (timestamps, UUIDs, ...).
    Opaque(Cow<'static, str>),
    Struct {
        name: Cow<'static, str>,
        visible_fields: usize,
    },
    Sequence(Box<TypeDescriptor>),
    Map {
        key: Box<TypeDescriptor>,
        value: Box<TypeDescriptor>,
    },
    Optional(Box<TypeDescriptor>),
    /// Shape known only at runtime (e.g. `serde_json::Value`).
    Dynamic,
}

impl TypeDescriptor {
    pub fn structure(name: impl Into<Cow<'static, str>>, visible_fields: usize) -> Self {
        Self::Struct {
            name: name.into(),
            visible_fields,
        }
    }

    pub fn sequence(element: TypeDescriptor) -> Self {
        Self::Sequence(Box::new(element))
    }

    pub fn map(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn optional(inner: TypeDescriptor) -> Self {
        Self::Optional(Box::new(inner))
    }

    pub fn opaque(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Opaque(name.into())
    }

    pub fn enumeration(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Enum(name.into())
    }

    /// The type with every `Optional` layer removed.
    pub fn base(&self) -> &TypeDescriptor {
        let mut current = self;
        while let Self::Optional(inner) = current {
            current = inner;
        }
        current
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }

    /// Returns `true` when exactly one side is `Option<T>` and the other
    /// is `T`, ignoring further optional layers.
    pub fn is_optional_pair(&self, other: &TypeDescriptor) -> bool {
        self.is_optional() != other.is_optional() && self.base() == other.base()
    }

    /// Returns `true` if `Dynamic` appears anywhere in the shape.
    pub fn contains_dynamic(&self) -> bool {
        match self {
            Self::Dynamic => true,
            Self::Sequence(inner) | Self::Optional(inner) => inner.contains_dynamic(),
            Self::Map { key, value } => key.contains_dynamic() || value.contains_dynamic(),
            _ => false,
        }
    }

    /// Element type of a sequence, looking through optionals.
    pub fn element(&self) -> Option<&TypeDescriptor> {
        match self.base() {
            Self::Sequence(inner) => Some(inner),
            _ => None,
        }
    }

    /// Display name with every `Option<…>` layer removed.
    ///
    /// This is the name custom comparers are registered under.
    pub fn base_name(&self) -> String {
        self.base().to_string()
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => f.write_str(kind.name()),
            Self::Enum(name) | Self::Opaque(name) => f.write_str(name),
            Self::Struct { name, .. } => f.write_str(name),
            Self::Sequence(inner) => write!(f, "Vec<{inner}>"),
            Self::Map { key, value } => write!(f, "Map<{key}, {value}>"),
            Self::Optional(inner) => write!(f, "Option<{inner}>"),
            Self::Dynamic => f.write_str("Dynamic"),
        }
    }
}

impl Serialize for TypeDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
