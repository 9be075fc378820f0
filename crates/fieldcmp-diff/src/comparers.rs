//! Built-in custom comparers.

use std::time::Duration;

use chrono::{DateTime, Utc};
use fieldcmp_types::Value;

use crate::registry::{CustomTypeComparer, Verdict};

/// Timestamps are equal when no more than `tolerance` apart.
///
/// RFC 3339 strings are accepted as timestamps, so the comparer can also
/// match a `String` field against a `DateTime<Utc>` one when cross-type
/// comparison is enabled (it is by default). List the timestamp type first:
/// it is the anchor, and plain `String` pairs keep default equality.
pub fn time_tolerance<I, S>(types: I, tolerance: Duration) -> CustomTypeComparer
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    CustomTypeComparer::new(types, move |left, right| {
        match (as_instant(left), as_instant(right)) {
            (Some(a), Some(b)) => {
                let delta = if a > b { a - b } else { b - a };
                match delta.to_std() {
                    Ok(d) if d <= tolerance => Verdict::Equal,
                    _ => Verdict::Differ(format!(
                        "{} and {} are {}s apart, tolerance is {}s",
                        a.to_rfc3339(),
                        b.to_rfc3339(),
                        delta.num_milliseconds() as f64 / 1000.0,
                        tolerance.as_secs_f64()
                    )),
                }
            }
            _ if left == right => Verdict::Equal,
            _ => Verdict::Differ(format!("expected two timestamps, got {left} and {right}")),
        }
    })
    .with_cross_type(true)
}

/// Numbers are equal when they denote the same quantity, regardless of
/// width or signedness (`i32` 5, `u64` 5 and `f64` 5.0 are all equal).
pub fn numeric<I, S>(types: I) -> CustomTypeComparer
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    CustomTypeComparer::new(types, |left, right| {
        if numbers_equal(left, right) || (left.is_null() && right.is_null()) {
            Verdict::Equal
        } else {
            Verdict::Differ(format!("{left} != {right}"))
        }
    })
    .with_cross_type(true)
}

/// Values are equal when their plain string forms are equal, e.g. a `Uuid`
/// against its `String` rendering.
pub fn string_form<I, S>(types: I) -> CustomTypeComparer
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    CustomTypeComparer::new(types, |left, right| {
        let (a, b) = (left.to_plain_string(), right.to_plain_string());
        if a == b {
            Verdict::Equal
        } else {
            Verdict::Differ(format!("{a:?} != {b:?}"))
        }
    })
    .with_cross_type(true)
}

/// Quantity equality across numeric kinds. Integers compare exactly,
/// anything involving a float compares as `f64`.
pub fn numbers_equal(left: &Value, right: &Value) -> bool {
    match (as_integer(left), as_integer(right)) {
        (Some(a), Some(b)) => a == b,
        _ => match (left.as_f64(), right.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
    }
}

fn as_integer(value: &Value) -> Option<i128> {
    match value {
        Value::Int(n) => Some(i128::from(*n)),
        Value::UInt(n) => Some(i128::from(*n)),
        _ => None,
    }
}

fn as_instant(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Timestamp(t) => Some(*t),
        Value::Str(s) | Value::Opaque(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|t| t.with_timezone(&Utc)),
        _ => None,
    }
}
