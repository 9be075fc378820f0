//! Diff engine for fieldcmp.
//!
//! Compares two flattened values field by field, producing a
//! [`ComparisonResult`](fieldcmp_types::ComparisonResult) of typed
//! differences. Type-specific equality plugs in through a
//! [`CustomComparerRegistry`].
//!
//! # Key Types
//!
//! - [`DiffEngine`] / [`diff_field_maps`] -- Field-by-field comparison
//! - [`ComparisonOptions`] -- Mappings, comparers, pointer-agnostic mode, ignored fields
//! - [`CustomComparerRegistry`] / [`CustomTypeComparer`] / [`Verdict`] -- Pluggable equality
//! - [`time_tolerance`], [`numeric`], [`string_form`] -- Built-in comparers

pub mod comparers;
pub mod engine;
pub mod options;
pub mod registry;

pub use comparers::{numbers_equal, numeric, string_form, time_tolerance};
pub use engine::{diff_field_maps, DiffEngine};
pub use options::ComparisonOptions;
pub use registry::{CompareFn, CustomComparerRegistry, CustomTypeComparer, Verdict};
