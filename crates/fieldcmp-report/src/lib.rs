//! Reporters for fieldcmp comparison results.
//!
//! # Key Types
//!
//! - [`Reporter`] -- Renders a [`ComparisonResult`](fieldcmp_types::ComparisonResult)
//! - [`TextReporter`] -- Multi-line terminal report, optionally colored, with inline string diffs
//! - [`JsonReporter`] -- Machine-readable JSON
//! - [`SummaryReporter`] -- One line per difference

pub mod error;
pub mod json;
pub mod reporter;
pub mod summary;
pub mod text;

pub use error::{ReportError, ReportResult};
pub use json::JsonReporter;
pub use reporter::Reporter;
pub use summary::SummaryReporter;
pub use text::TextReporter;
