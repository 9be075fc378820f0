//! Error types for the mapping crate.

/// Errors raised while constructing a field mapping.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    /// A source or target pattern was empty.
    #[error("mapping pattern must not be empty")]
    EmptyPattern,

    /// Source and target disagree on the number of `[]` wildcards.
    #[error(
        "wildcard count mismatch: source '{source_pattern}' has {source_count}, \
         target '{target_pattern}' has {target_count}"
    )]
    WildcardCountMismatch {
        source_pattern: String,
        source_count: usize,
        target_pattern: String,
        target_count: usize,
    },
}

/// Convenience alias for mapping results.
pub type MappingResult<T> = Result<T, MappingError>;
