use std::fmt;

use fieldcmp_types::FieldPath;

use crate::error::{MappingError, MappingResult};

/// Marker standing for exactly one numeric sequence index.
pub const WILDCARD: &str = "[]";

/// A field path in which every `[]` matches one bracketed numeric index.
///
/// `Orders[].Lines[].Sku` matches `Orders[0].Lines[12].Sku` and captures
/// `[0, 12]`. Literal text between wildcards must match exactly, and the
/// pattern is anchored at both ends.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct WildcardPattern {
    raw: String,
    /// Literal text around the wildcards; always `wildcard_count() + 1` long.
    literals: Vec<String>,
}

impl WildcardPattern {
    pub fn parse(raw: &str) -> MappingResult<Self> {
        if raw.is_empty() {
            return Err(MappingError::EmptyPattern);
        }
        Ok(Self {
            raw: raw.to_string(),
            literals: raw.split(WILDCARD).map(str::to_string).collect(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn wildcard_count(&self) -> usize {
        self.literals.len() - 1
    }

    pub fn has_wildcards(&self) -> bool {
        self.wildcard_count() > 0
    }

    /// Match a concrete path, returning the captured indices left to right.
    ///
    /// Matching is strict: every `[]` consumes exactly one `[digits]`
    /// group, literal text must line up exactly and nothing may trail the
    /// last literal. `A[].B` therefore rejects `A.B`, `A[0][1].B` and
    /// `A[0].B.C`. A looser matcher that only required the literal text in
    /// order would accept those; they are left unmapped here instead.
    pub fn matches(&self, path: &str) -> Option<Vec<usize>> {
        let (first, gaps) = self.literals.split_first()?;
        let mut rest = path.strip_prefix(first.as_str())?;
        let mut captured = Vec::with_capacity(gaps.len());

        for (i, literal) in gaps.iter().enumerate() {
            let (index, after) = take_index(rest)?;
            captured.push(index);
            rest = after.strip_prefix(literal.as_str())?;
            if i + 1 == gaps.len() && !rest.is_empty() {
                return None;
            }
        }

        if gaps.is_empty() && !rest.is_empty() {
            return None;
        }
        Some(captured)
    }

    /// Fill the wildcards with `indices`, in order.
    ///
    /// Returns `None` when the number of indices differs from the number of
    /// wildcards.
    pub fn substitute(&self, indices: &[usize]) -> Option<FieldPath> {
        if indices.len() != self.wildcard_count() {
            return None;
        }
        let mut out = String::with_capacity(self.raw.len() + indices.len() * 2);
        for (i, literal) in self.literals.iter().enumerate() {
            out.push_str(literal);
            if let Some(index) = indices.get(i) {
                out.push('[');
                out.push_str(&index.to_string());
                out.push(']');
            }
        }
        Some(FieldPath::new(out))
    }
}

/// Split a leading `[digits]` off `s`.
fn take_index(s: &str) -> Option<(usize, &str)> {
    let inner = s.strip_prefix('[')?;
    let close = inner.find(']')?;
    let digits = &inner[..close];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let index = digits.parse().ok()?;
    Some((index, &inner[close + 1..]))
}

impl fmt::Debug for WildcardPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WildcardPattern({:?})", self.raw)
    }
}

impl fmt::Display for WildcardPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pattern(raw: &str) -> WildcardPattern {
        WildcardPattern::parse(raw).unwrap()
    }

    #[test]
    fn literal_pattern_matches_exactly() {
        let p = pattern("A.B");
        assert_eq!(p.matches("A.B"), Some(vec![]));
        assert_eq!(p.matches("A.B.C"), None);
        assert_eq!(p.matches("A"), None);
    }

    #[test]
    fn captures_indices_in_order() {
        let p = pattern("A.B[].C[].D");
        assert_eq!(p.matches("A.B[0].C[12].D"), Some(vec![0, 12]));
    }

    #[test]
    fn rejects_wrong_shapes() {
        let p = pattern("A.B[].C");
        assert_eq!(p.matches("A.B.C"), None);
        assert_eq!(p.matches("A.B[x].C"), None);
        assert_eq!(p.matches("A.B[].C"), None);
        assert_eq!(p.matches("A.B[0][1].C"), None);
        assert_eq!(p.matches("A.B[0].C.D"), None);
        assert_eq!(p.matches("X.A.B[0].C"), None);
    }

    #[test]
    fn trailing_wildcard_matches_element_itself() {
        let p = pattern("Items[]");
        assert_eq!(p.matches("Items[3]"), Some(vec![3]));
        assert_eq!(p.matches("Items[3].Name"), None);
    }

    #[test]
    fn adjacent_wildcards() {
        let p = pattern("Grid[][]");
        assert_eq!(p.matches("Grid[1][2]"), Some(vec![1, 2]));
        assert_eq!(p.matches("Grid[1]"), None);
    }

    #[test]
    fn substitute_fills_in_order() {
        let p = pattern("X[].Y[].Z");
        assert_eq!(p.substitute(&[4, 5]).unwrap().as_str(), "X[4].Y[5].Z");
        assert!(p.substitute(&[1]).is_none());
    }

    #[test]
    fn empty_pattern_is_rejected() {
        assert_eq!(WildcardPattern::parse(""), Err(MappingError::EmptyPattern));
    }

    proptest! {
        #[test]
        fn substitute_then_match_recovers_indices(a in 0usize..10_000, b in 0usize..10_000) {
            let p = pattern("Orders[].Lines[].Sku");
            let path = p.substitute(&[a, b]).unwrap();
            prop_assert_eq!(p.matches(path.as_str()), Some(vec![a, b]));
        }
    }
}
