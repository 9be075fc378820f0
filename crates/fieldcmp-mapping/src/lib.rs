//! Field path remapping for fieldcmp.
//!
//! Lets two independently produced values with different layouts be
//! compared by moving right-hand fields onto left-hand paths before the
//! diff runs.
//!
//! # Key Types
//!
//! - [`WildcardPattern`] -- Path pattern where `[]` matches one numeric index
//! - [`FieldMapping`] -- Validated `source → target` rename rule
//! - [`apply_mappings`] -- Relocate the fields of a [`FieldMap`](fieldcmp_types::FieldMap)
//! - [`MappingError`] -- Construction errors

pub mod error;
pub mod mapper;
pub mod mapping;
pub mod pattern;

pub use error::{MappingError, MappingResult};
pub use mapper::apply_mappings;
pub use mapping::FieldMapping;
pub use pattern::{WildcardPattern, WILDCARD};
