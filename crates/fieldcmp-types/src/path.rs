use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical location of a field inside a nested value.
///
/// Field names are joined with `.`; sequence indices are appended in brackets
/// directly after the name of the sequence field, e.g. `A.B[0].C[1].D`. The
/// root of a walk is the empty path.
///
/// Ordering is plain lexicographic ordering of the string form, which keeps
/// a [`FieldMap`](crate::FieldMap) iteration stable across runs.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(String);

impl FieldPath {
    /// The empty path (root of a walk).
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Wrap an already-formatted path string.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Returns `true` for the empty path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path of a named field below this one (`parent.name`, or `name` at the root).
    pub fn child(&self, name: &str) -> Self {
        if self.0.is_empty() {
            Self(name.to_string())
        } else {
            Self(format!("{}.{}", self.0, name))
        }
    }

    /// Path of a sequence element below this one (`parent[index]`).
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}[{}]", self.0, index))
    }

    /// Name of the last field segment with any trailing indices removed.
    ///
    /// `A.B[0].C` → `C`, `Items[3]` → `Items`, root → `""`.
    pub fn leaf_name(&self) -> &str {
        let last = self.0.rsplit('.').next().unwrap_or("");
        strip_indices(last)
    }

    /// Every field name along the path, root first, indices removed.
    pub fn segment_names(&self) -> impl Iterator<Item = &str> {
        self.0
            .split('.')
            .map(strip_indices)
            .filter(|name| !name.is_empty())
    }

    /// Sequence breadcrumbs encoded in this path, outermost first.
    ///
    /// Each bracketed numeric index yields an [`ArrayIndex`] whose owner is
    /// the path prefix of the sequence it indexes.
    pub fn array_indices(&self) -> Vec<ArrayIndex> {
        let bytes = self.0.as_bytes();
        let mut indices = Vec::new();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'[' {
                if let Some(close) = self.0[i + 1..].find(']') {
                    let digits = &self.0[i + 1..i + 1 + close];
                    if let Ok(index) = digits.parse::<usize>() {
                        indices.push(ArrayIndex::new(&self.0[..i], index));
                    }
                    i += close + 2;
                    continue;
                }
            }
            i += 1;
        }
        indices
    }

    /// Returns `true` if `self` lies strictly below `ancestor`.
    pub fn is_descendant_of(&self, ancestor: &FieldPath) -> bool {
        if ancestor.is_root() {
            return !self.is_root();
        }
        match self.0.strip_prefix(ancestor.as_str()) {
            Some(rest) => rest.starts_with('.') || rest.starts_with('['),
            None => false,
        }
    }
}

fn strip_indices(segment: &str) -> &str {
    match segment.find('[') {
        Some(pos) => &segment[..pos],
        None => segment,
    }
}

impl fmt::Debug for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldPath({:?})", self.0)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        Self(path.to_string())
    }
}

impl From<String> for FieldPath {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl Borrow<str> for FieldPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Breadcrumb recording that a field sits at `index` inside the sequence
/// located at `owner`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArrayIndex {
    /// Full path of the sequence field.
    pub owner: String,
    /// Position inside that sequence.
    pub index: usize,
}

impl ArrayIndex {
    pub fn new(owner: impl Into<String>, index: usize) -> Self {
        Self {
            owner: owner.into(),
            index,
        }
    }
}

impl fmt::Display for ArrayIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.owner, self.index)
    }
}
