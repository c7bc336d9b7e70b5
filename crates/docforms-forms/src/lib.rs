//! # docforms-forms
//!
//! Form-field generation for document-model fields. Turns the
//! [`FieldDescriptor`](docforms_document::FieldDescriptor)s of a document
//! class into configured form fields that know how to extract, validate, and
//! coerce submitted data.
//!
//! ## Module Overview
//!
//! - [`generator`] - The strict and lenient form-field generators
//! - [`fields`] - [`FormFieldDef`](fields::FormFieldDef), field types, and cleaning
//! - [`choices`] - Choice lists and choice coercion
//! - [`widgets`] - Widget hints and submitted-data extraction
//! - [`document_form`] - Generating every field of a document at once

// cast_precision_loss: i64-to-f64 casts are acceptable for bounds
// doc_markdown: field class names are written as prose
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]

pub mod choices;
pub mod document_form;
pub mod fields;
pub mod generator;
pub mod widgets;

pub use document_form::{fields_for_document, DocumentFormConfig, DocumentFormFields};
pub use fields::{clean_field_value, clean_from_data, clean_value, FormFieldDef, FormFieldType};
pub use generator::{
    FieldOverrides, FormFieldGenerator, MongoDefaultFormFieldGenerator, MongoFormFieldGenerator,
};
pub use widgets::{WidgetType, WidgetValue};
