//! Error types for the report crate.

/// Errors that can occur while rendering or writing a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The result could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Writing the rendered report failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for report results.
pub type ReportResult<T> = Result<T, ReportError>;
