//! Foundation types for fieldcmp.
//!
//! This crate provides the data model shared by every other fieldcmp crate:
//! where a field lives, what it holds, what type it was declared with, and
//! how two fields differ.
//!
//! # Key Types
//!
//! - [`FieldPath`] -- Canonical location inside a nested value (`A.B[0].C`)
//! - [`ArrayIndex`] -- Breadcrumb recording which sequence an index belongs to
//! - [`Value`] -- Owned runtime value of a field
//! - [`TypeDescriptor`] -- Declared type shape, preserving `Option<…>`
//! - [`FieldInfo`] / [`FieldMap`] -- Flattened view of a walked value
//! - [`Difference`] / [`ComparisonResult`] -- Output of a comparison
//! - [`is_leaf`] -- Leaf/composite classification

pub mod classify;
pub mod descriptor;
pub mod difference;
pub mod field;
pub mod path;
pub mod value;

pub use classify::is_leaf;
pub use descriptor::{ScalarKind, TypeDescriptor};
pub use difference::{ComparisonResult, DiffKind, Difference};
pub use field::{FieldInfo, FieldMap};
pub use path::{ArrayIndex, FieldPath};
pub use value::{Value, CIRCULAR_REFERENCE};
