//! Field descriptors and their kinds.
//!
//! [`FieldDescriptor`] is the declared attribute; [`FieldKind`] is its type,
//! with class-name and ancestor information used for handler resolution.

pub mod descriptor;
pub mod kind;

pub use descriptor::FieldDescriptor;
pub use kind::FieldKind;
