//! [`Inspect`] for third-party value types: `chrono`, `uuid`, and
//! `serde_json::Value` as the dynamically shaped case.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use fieldcmp_types::{TypeDescriptor, Value};
use uuid::Uuid;

use crate::inspect::{Field, Inspect, Visitor};

/// Struct name given to JSON objects.
pub const JSON_OBJECT: &str = "Object";

macro_rules! opaque {
    ($($ty:ty => $name:literal, |$this:ident| $value:expr;)*) => {
        $(
            impl Inspect for $ty {
                fn static_type() -> TypeDescriptor {
                    TypeDescriptor::opaque($name)
                }

                fn declared_type(&self) -> TypeDescriptor {
                    Self::static_type()
                }

                fn accept(&self, visitor: &mut dyn Visitor) {
                    let $this = self;
                    visitor.visit_leaf($value);
                }
            }
        )*
    };
}

opaque! {
    DateTime<Utc> => "DateTime<Utc>", |t| Value::Timestamp(*t);
    DateTime<FixedOffset> => "DateTime<FixedOffset>", |t| Value::Timestamp(t.with_timezone(&Utc));
    NaiveDateTime => "NaiveDateTime", |t| Value::Timestamp(t.and_utc());
    NaiveDate => "NaiveDate", |d| Value::Opaque(d.to_string());
    TimeDelta => "Duration", |d| Value::Opaque(d.to_string());
    std::time::Duration => "std::time::Duration", |d| Value::Opaque(format!("{:?}", d));
    Uuid => "Uuid", |id| Value::Opaque(id.to_string());
}

impl Inspect for serde_json::Value {
    fn static_type() -> TypeDescriptor {
        TypeDescriptor::Dynamic
    }

    fn declared_type(&self) -> TypeDescriptor {
        TypeDescriptor::Dynamic
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        use serde_json::Value as Json;

        match self {
            Json::Null => visitor.visit_leaf(Value::Null),
            Json::Bool(b) => visitor.visit_leaf(Value::Bool(*b)),
            Json::Number(n) => {
                let value = if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::UInt(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                };
                visitor.visit_leaf(value);
            }
            Json::String(s) => visitor.visit_leaf(Value::Str(s.clone())),
            Json::Array(items) => {
                let elements: Vec<&dyn Inspect> =
                    items.iter().map(|item| item as &dyn Inspect).collect();
                visitor.visit_sequence(&elements);
            }
            Json::Object(object) => {
                let fields: Vec<Field<'_>> = object
                    .iter()
                    .map(|(key, value)| Field::exported(key.as_str(), value))
                    .collect();
                visitor.visit_struct(JSON_OBJECT, &fields);
            }
        }
    }
}
