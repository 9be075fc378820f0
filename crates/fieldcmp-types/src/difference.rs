use std::fmt;

use serde::Serialize;

use crate::descriptor::TypeDescriptor;
use crate::path::{ArrayIndex, FieldPath};
use crate::value::Value;

/// Category of a single difference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffKind {
    /// Field present only on the left.
    ExtraLeft,
    /// Field present only on the right.
    ExtraRight,
    /// Same path and compatible type, unequal values.
    ValueDiff,
    /// Same path, incompatible declared types.
    TypeDiff,
    /// A custom comparer reported a difference.
    CustomDiff,
}

impl DiffKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ExtraLeft => "extra_left",
            Self::ExtraRight => "extra_right",
            Self::ValueDiff => "value_diff",
            Self::TypeDiff => "type_diff",
            Self::CustomDiff => "custom_diff",
        }
    }
}

impl fmt::Display for DiffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One observed difference between the two sides.
///
/// Side-specific fields are `None` for the side the field is missing from.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Difference {
    pub kind: DiffKind,
    pub left_path: Option<FieldPath>,
    pub right_path: Option<FieldPath>,
    pub left_value: Option<Value>,
    pub right_value: Option<Value>,
    pub left_type: Option<TypeDescriptor>,
    pub right_type: Option<TypeDescriptor>,
    pub array_indices: Vec<ArrayIndex>,
    pub message: String,
}

impl Difference {
    /// The path this difference is reported under (left when present).
    pub fn path(&self) -> Option<&FieldPath> {
        self.left_path.as_ref().or(self.right_path.as_ref())
    }
}

/// Outcome of comparing two values.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub case_name: String,
    pub differences: Vec<Difference>,
    /// `true` iff `differences` is non-empty.
    pub has_diff: bool,
}

impl ComparisonResult {
    pub fn new(case_name: impl Into<String>, differences: Vec<Difference>) -> Self {
        let has_diff = !differences.is_empty();
        Self {
            case_name: case_name.into(),
            differences,
            has_diff,
        }
    }

    /// Returns `true` if there are no differences.
    pub fn is_empty(&self) -> bool {
        self.differences.is_empty()
    }

    /// Number of differences.
    pub fn len(&self) -> usize {
        self.differences.len()
    }

    /// Number of differences of the given kind.
    pub fn count(&self, kind: DiffKind) -> usize {
        self.of_kind(kind).count()
    }

    pub fn of_kind(&self, kind: DiffKind) -> impl Iterator<Item = &Difference> {
        self.differences.iter().filter(move |d| d.kind == kind)
    }

    /// Differences reported at `path` on either side.
    pub fn at_path<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a Difference> + 'a {
        self.differences.iter().filter(move |d| {
            d.left_path.as_ref().is_some_and(|p| p.as_str() == path)
                || d.right_path.as_ref().is_some_and(|p| p.as_str() == path)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diff(kind: DiffKind, path: &str) -> Difference {
        Difference {
            kind,
            left_path: Some(FieldPath::from(path)),
            right_path: None,
            left_value: Some(Value::Int(1)),
            right_value: None,
            left_type: None,
            right_type: None,
            array_indices: Vec::new(),
            message: String::new(),
        }
    }

    #[test]
    fn has_diff_tracks_differences() {
        assert!(!ComparisonResult::new("empty", Vec::new()).has_diff);
        let result = ComparisonResult::new("one", vec![diff(DiffKind::ValueDiff, "a")]);
        assert!(result.has_diff);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn filters_by_kind_and_path() {
        let result = ComparisonResult::new(
            "mixed",
            vec![
                diff(DiffKind::ValueDiff, "a"),
                diff(DiffKind::ExtraLeft, "b"),
                diff(DiffKind::ValueDiff, "c"),
            ],
        );
        assert_eq!(result.count(DiffKind::ValueDiff), 2);
        assert_eq!(result.count(DiffKind::TypeDiff), 0);
        assert_eq!(result.at_path("b").count(), 1);
        assert_eq!(result.at_path("z").count(), 0);
    }

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&DiffKind::ExtraRight).unwrap();
        assert_eq!(json, "\"extra_right\"");
    }
}
