use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use fieldcmp_types::Value;

/// Outcome of a custom comparison.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Equal,
    /// Values differ; the message explains how.
    Differ(String),
}

impl Verdict {
    pub fn is_equal(&self) -> bool {
        matches!(self, Self::Equal)
    }
}

/// Signature of a comparison function.
pub type CompareFn = dyn Fn(&Value, &Value) -> Verdict + Send + Sync;

/// User-supplied equality for one or more types, identified by their
/// optional-stripped display names (`DateTime<Utc>`, `Money`, `i64`, ...).
#[derive(Clone)]
pub struct CustomTypeComparer {
    supported_types: BTreeSet<String>,
    /// First listed type. A cross-type comparer judges same-type pairs of
    /// this type only; the other listed types are bridges.
    anchor: Option<String>,
    allow_cross_type: bool,
    compare: Arc<CompareFn>,
}

impl CustomTypeComparer {
    /// Create a comparer for `types`. Cross-type comparison is off.
    ///
    /// The first listed type is the anchor, see [`with_cross_type`](Self::with_cross_type).
    pub fn new<I, S, F>(types: I, compare: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&Value, &Value) -> Verdict + Send + Sync + 'static,
    {
        let types: Vec<String> = types.into_iter().map(Into::into).collect();
        Self {
            anchor: types.first().cloned(),
            supported_types: types.into_iter().collect(),
            allow_cross_type: false,
            compare: Arc::new(compare),
        }
    }

    /// Allow this comparer to judge two different supported types against
    /// each other.
    ///
    /// With cross-type on, a pair of equal types is claimed only for the
    /// anchor type. Listing `String` as a bridge for `DateTime<Utc>` must
    /// not take over plain `String` fields.
    pub fn with_cross_type(mut self, allow: bool) -> Self {
        self.allow_cross_type = allow;
        self
    }

    pub fn supports(&self, type_name: &str) -> bool {
        self.supported_types.contains(type_name)
    }

    pub fn allows_cross_type(&self) -> bool {
        self.allow_cross_type
    }

    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }

    pub fn supported_types(&self) -> impl Iterator<Item = &str> {
        self.supported_types.iter().map(String::as_str)
    }

    pub fn compare(&self, left: &Value, right: &Value) -> Verdict {
        (self.compare)(left, right)
    }

    /// Whether this comparer claims a `(left, right)` type pair.
    fn claims(&self, left: &str, right: &str) -> bool {
        if left == right {
            if self.allow_cross_type {
                self.anchor() == Some(left)
            } else {
                self.supports(left)
            }
        } else {
            self.allow_cross_type && self.supports(left) && self.supports(right)
        }
    }
}

impl fmt::Debug for CustomTypeComparer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomTypeComparer")
            .field("supported_types", &self.supported_types)
            .field("anchor", &self.anchor)
            .field("allow_cross_type", &self.allow_cross_type)
            .finish_non_exhaustive()
    }
}

/// Named set of custom comparers.
///
/// Built once, then shared read-only by every comparison; cloning is cheap
/// because comparison functions are reference counted.
#[derive(Clone, Debug, Default)]
pub struct CustomComparerRegistry {
    comparers: BTreeMap<String, CustomTypeComparer>,
}

impl CustomComparerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `comparer` under `name`, returning any comparer it replaced.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        comparer: CustomTypeComparer,
    ) -> Option<CustomTypeComparer> {
        self.comparers.insert(name.into(), comparer)
    }

    /// Register `comparer` for the exact type pair `left|right`.
    ///
    /// Pair registrations are found in either orientation and take
    /// precedence over comparers matched by supported type.
    pub fn register_pair(
        &mut self,
        left: &str,
        right: &str,
        comparer: CustomTypeComparer,
    ) -> Option<CustomTypeComparer> {
        self.register(pair_key(left, right), comparer)
    }

    /// Find the comparer for a pair of type names.
    ///
    /// Lookup order: the exact `left|right` key, the reversed `right|left`
    /// key, then the first comparer (by name) that claims the pair. Equal
    /// names are claimed by a supporting comparer, or only by its anchor
    /// type when cross-type is on. Different names need cross-type and
    /// support for both.
    pub fn lookup(&self, left: &str, right: &str) -> Option<(&str, &CustomTypeComparer)> {
        for key in [pair_key(left, right), pair_key(right, left)] {
            if let Some((name, comparer)) = self.comparers.get_key_value(&key) {
                return Some((name.as_str(), comparer));
            }
        }
        self.comparers
            .iter()
            .find(|(_, comparer)| comparer.claims(left, right))
            .map(|(name, comparer)| (name.as_str(), comparer))
    }

    pub fn get(&self, name: &str) -> Option<&CustomTypeComparer> {
        self.comparers.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.comparers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.comparers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comparers.is_empty()
    }
}

fn pair_key(left: &str, right: &str) -> String {
    format!("{left}|{right}")
}
