use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// Marker rendered in place of a value that would re-enter an object already
/// on the current traversal path.
pub const CIRCULAR_REFERENCE: &str = "<circular_reference>";

/// Owned runtime value of a field.
///
/// Equality is structural (`Int(1) != UInt(1)`); callers that want
/// cross-width numeric equality register a comparer for it.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Absent: an empty optional, an empty sequence or an empty map.
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Char(char),
    Str(String),
    /// An instant in time, normalized to UTC.
    Timestamp(DateTime<Utc>),
    /// String form of an opaque value type (UUIDs, durations, ...).
    Opaque(String),
    List(Vec<Value>),
    /// String-keyed map, sorted by key.
    Map(BTreeMap<String, Value>),
    /// A struct materialized as a whole, fields in declaration order.
    Record {
        name: String,
        fields: Vec<(String, Value)>,
    },
    /// Element count of a non-empty sequence whose elements are walked
    /// individually.
    Elements(usize),
    /// Sentinel for a truncated circular reference.
    Circular,
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if this is the zero value of its kind.
    ///
    /// Timestamps are zero at the UNIX epoch. A record is zero when every
    /// field is zero. The circular sentinel is never zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(b) => !*b,
            Self::Int(n) => *n == 0,
            Self::UInt(n) => *n == 0,
            Self::Float(n) => *n == 0.0,
            Self::Char(c) => *c == '\0',
            Self::Str(s) | Self::Opaque(s) => s.is_empty(),
            Self::Timestamp(t) => t.timestamp() == 0 && t.timestamp_subsec_nanos() == 0,
            Self::List(items) => items.is_empty(),
            Self::Map(entries) => entries.is_empty(),
            Self::Record { fields, .. } => fields.iter().all(|(_, v)| v.is_zero()),
            Self::Elements(n) => *n == 0,
            Self::Circular => false,
        }
    }

    /// Rust-like name of the runtime kind, used to name dynamically typed
    /// values.
    pub fn kind_name(&self) -> String {
        match self {
            Self::Null => "()".into(),
            Self::Bool(_) => "bool".into(),
            Self::Int(_) => "i64".into(),
            Self::UInt(_) => "u64".into(),
            Self::Float(_) => "f64".into(),
            Self::Char(_) => "char".into(),
            Self::Str(_) => "String".into(),
            Self::Timestamp(_) => "DateTime<Utc>".into(),
            Self::Opaque(_) => "Opaque".into(),
            Self::List(_) | Self::Elements(_) => "Vec<Dynamic>".into(),
            Self::Map(_) => "Map<String, Dynamic>".into(),
            Self::Record { name, .. } => name.clone(),
            Self::Circular => CIRCULAR_REFERENCE.into(),
        }
    }

    /// Numeric view of integer and float values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::UInt(n) => Some(*n as f64),
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::Timestamp(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) | Self::Opaque(s) => Some(s),
            _ => None,
        }
    }

    /// Unquoted string form, used for map keys and string-form comparison.
    pub fn to_plain_string(&self) -> String {
        match self {
            Self::Str(s) | Self::Opaque(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::UInt(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Char(c) => write!(f, "{c:?}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Timestamp(t) => write!(f, "{}", t.to_rfc3339()),
            Self::Opaque(s) => f.write_str(s),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key:?}: {value}")?;
                }
                f.write_str("}")
            }
            Self::Record { name, fields } => {
                write!(f, "{name} {{")?;
                for (i, (field, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, " {field}: {value}")?;
                }
                f.write_str(" }")
            }
            Self::Elements(n) => write!(f, "[{n} elements]"),
            Self::Circular => f.write_str(CIRCULAR_REFERENCE),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(n) => serializer.serialize_i64(*n),
            Self::UInt(n) => serializer.serialize_u64(*n),
            Self::Float(n) => serializer.serialize_f64(*n),
            Self::Char(c) => serializer.serialize_char(*c),
            Self::Str(s) | Self::Opaque(s) => serializer.serialize_str(s),
            Self::Timestamp(t) => serializer.serialize_str(&t.to_rfc3339()),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Self::Record { fields, .. } => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (key, value) in fields {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Self::Elements(n) => serializer.serialize_u64(*n as u64),
            Self::Circular => serializer.serialize_str(CIRCULAR_REFERENCE),
        }
    }
}
