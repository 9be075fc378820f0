//! Structural equivalence comparison for Rust values.
//!
//! Two values, possibly of different types, are flattened into maps of
//! field path to value and compared field by field. Right-hand fields can be
//! moved onto left-hand paths with wildcard mappings, equality can be
//! customized per type, and optional fields can be made to compare by value.
//! This crate ties the fieldcmp subsystems together behind a single
//! [`StructuralComparator`].
//!
//! ```
//! use fieldcmp::{inspect_struct, DiffKind, StructuralComparator};
//!
//! struct Order { id: u64, status: String }
//! inspect_struct!(Order { id as "ID", status as "Status" });
//!
//! let comparator = StructuralComparator::default();
//! let result = comparator.compare(
//!     &Order { id: 7, status: "open".into() },
//!     &Order { id: 7, status: "closed".into() },
//! );
//! assert_eq!(result.differences[0].kind, DiffKind::ValueDiff);
//! ```
//!
//! # Key Types
//!
//! - [`StructuralComparator`] / [`compare`] -- Walk two values and diff them
//! - [`ComparisonOptions`] -- Mappings, comparers, pointer-agnostic mode, ignored fields
//! - [`ComparisonConfig`] -- The same options loaded from TOML or JSON
//! - [`ComparisonResult`] / [`Difference`] -- What differs, where, and why
//! - [`Reporter`] -- Text, JSON and summary renderings of a result

pub mod comparator;
pub mod config;
pub mod error;

pub use comparator::{compare, StructuralComparator, DEFAULT_CASE_NAME};
pub use config::{ComparerEntry, ComparerKind, ComparisonConfig, MappingEntry};
pub use error::{ConfigError, ConfigResult};

// Re-export key types
pub use fieldcmp_diff::{
    numeric, string_form, time_tolerance, ComparisonOptions, CustomComparerRegistry,
    CustomTypeComparer, Verdict,
};
pub use fieldcmp_inspect::{inspect_enum, inspect_opaque, inspect_struct, Field, Inspect, Visitor};
pub use fieldcmp_mapping::{FieldMapping, MappingError};
pub use fieldcmp_report::{JsonReporter, Reporter, SummaryReporter, TextReporter};
pub use fieldcmp_types::{
    ArrayIndex, ComparisonResult, DiffKind, Difference, FieldPath, TypeDescriptor, Value,
};
pub use fieldcmp_walk::walk;
