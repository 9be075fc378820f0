use std::path::PathBuf;

use fieldcmp_mapping::MappingError;

/// Errors raised while loading or validating a comparison configuration.
///
/// Comparing never fails; only building a comparator from external input
/// can.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid field mapping: {0}")]
    InvalidMapping(#[from] MappingError),

    /// A comparer entry is unusable (no types, bad tolerance, duplicate name).
    #[error("invalid comparer: {0}")]
    InvalidComparer(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
