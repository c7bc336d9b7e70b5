//! # docforms-document
//!
//! The document-model side of docforms. Describes document classes the way a
//! document mapper declares them, without talking to a store.
//!
//! ## Module Overview
//!
//! - [`document`] - [`DocumentMeta`](document::DocumentMeta), a document class and its fields
//! - [`fields`] - [`FieldDescriptor`](fields::FieldDescriptor) and [`FieldKind`](fields::FieldKind)
//! - [`value`] - The store-agnostic [`Value`](value::Value) enum
//! - [`object_id`] - 12-byte document identifiers
//! - [`manager`] - [`QueryManager`](manager::QueryManager) and referenced document types
//! - [`validators`] - Value validators

// cast_precision_loss: i64-to-f64 casts are acceptable for validator comparisons
// doc_markdown: field class names are written as prose
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]

pub mod document;
pub mod fields;
pub mod manager;
pub mod object_id;
pub mod validators;
pub mod value;

// Re-export the most commonly used types at the crate root.
pub use document::DocumentMeta;
pub use fields::{FieldDescriptor, FieldKind};
pub use manager::{DocumentRef, DocumentType, InMemoryManager, QueryManager};
pub use object_id::ObjectId;
pub use validators::Validator;
pub use value::Value;
