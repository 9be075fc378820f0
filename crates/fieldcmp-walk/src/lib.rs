//! Path walker for fieldcmp.
//!
//! Flattens an arbitrary [`Inspect`](fieldcmp_inspect::Inspect) value into a
//! [`FieldMap`](fieldcmp_types::FieldMap) keyed by canonical field path,
//! truncating circular references along the way.
//!
//! # Key Types
//!
//! - [`PathWalker`] -- Single-use walker holding per-walk traversal state
//! - [`walk`] -- Convenience entry point

pub mod walker;

pub use walker::{walk, PathWalker};
