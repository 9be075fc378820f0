//! Leaf/composite classification.
//!
//! A leaf is compared as a whole value; a composite is descended into by
//! the walker and compared field by field.

use crate::descriptor::TypeDescriptor;
use crate::value::Value;

/// Decide whether a field of the given declared type is a leaf.
///
/// Optionals are stripped first. Structs are leaves only when they expose no
/// visible fields, sequences are leaves when their element type is, and maps
/// are always composite. `Dynamic` types are classified from `sample`, the
/// runtime value, and default to leaf when no sample is available; a
/// sequence of dynamic elements is classified from its sampled items.
pub fn is_leaf(declared: &TypeDescriptor, sample: Option<&Value>) -> bool {
    match declared.base() {
        TypeDescriptor::Struct { visible_fields, .. } => *visible_fields == 0,
        TypeDescriptor::Sequence(element) => match sample {
            Some(Value::List(items)) if element.contains_dynamic() => {
                items.iter().all(|item| is_leaf(element, Some(item)))
            }
            _ => is_leaf(element, None),
        },
        TypeDescriptor::Map { .. } => false,
        TypeDescriptor::Dynamic => sample.map_or(true, is_leaf_value),
        TypeDescriptor::Scalar(_) | TypeDescriptor::Enum(_) | TypeDescriptor::Opaque(_) => true,
        // `base()` never returns an optional.
        TypeDescriptor::Optional(_) => true,
    }
}

fn is_leaf_value(value: &Value) -> bool {
    match value {
        Value::List(items) => items.iter().all(is_leaf_value),
        Value::Map(_) => false,
        Value::Record { fields, .. } => fields.is_empty(),
        _ => true,
    }
}
