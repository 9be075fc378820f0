//! Runtime shape introspection for fieldcmp.
//!
//! Rust has no runtime reflection, so values opt in through the [`Inspect`]
//! trait. Each value presents itself to a [`Visitor`] as one of a closed set
//! of shapes (leaf, struct, sequence, map, optional, shared reference),
//! which is all the walker and the materializer need to traverse data of
//! unknown layout.
//!
//! # Key Types
//!
//! - [`Inspect`] -- A value whose shape can be discovered at runtime
//! - [`Visitor`] -- Receiver with one method per shape variant
//! - [`Field`] -- Named struct field with its export flag
//! - [`Materializer`] / [`materialize`] -- Owned [`Value`] from any `Inspect`
//! - [`inspect_struct!`], [`inspect_enum!`], [`inspect_opaque!`] -- Registration macros

pub mod external;
pub mod impls;
pub mod inspect;
mod macros;
pub mod materialize;

pub use external::JSON_OBJECT;
pub use impls::BORROWED_MARKER;
pub use inspect::{Field, Inspect, Visitor};
pub use materialize::{materialize, Materializer};

// Re-exported for the registration macros.
pub use fieldcmp_types::{ScalarKind, TypeDescriptor, Value};
