//! # docforms
//!
//! Generate web-form fields from document-model field declarations.
//!
//! This is the meta-crate that re-exports all sub-crates for convenient access.
//! You can depend on `docforms` to get everything, or depend on individual
//! crates for finer-grained control.
//!
//! ## Quick start
//!
//! ```
//! use docforms::core::{FormData, Settings};
//! use docforms::document::{FieldDescriptor, FieldKind, Value};
//! use docforms::forms::{clean_from_data, FieldOverrides, FormFieldGenerator, MongoDefaultFormFieldGenerator};
//!
//! let settings = Settings::default();
//! docforms::core::logging::setup_logging(&settings);
//!
//! let generator = MongoDefaultFormFieldGenerator::from_settings(&settings);
//! let age = FieldDescriptor::new("age", FieldKind::Int).required().min_value(0.0);
//! let field = generator.generate(&age, &FieldOverrides::default()).unwrap();
//!
//! let data = FormData::from_pairs([("age", "42")]);
//! assert_eq!(clean_from_data(&field, &data), Ok(Value::Int(42)));
//! ```

/// Errors, settings, logging, and form-data types.
pub use docforms_core as core;

/// Field descriptors, kinds, values, and query managers.
#[cfg(feature = "document")]
pub use docforms_document as document;

/// Form-field generators, form fields, widgets, and cleaning.
#[cfg(feature = "forms")]
pub use docforms_forms as forms;

pub use docforms_core::{FormsError, FormsResult, Settings};
