//! # docforms-core
//!
//! Core types for docforms. This crate has no docforms dependencies and
//! provides the foundation for the document and forms crates.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`settings`] - Generator and logging configuration
//! - [`settings_loader`] - Loading settings from TOML, JSON, and the environment
//! - [`logging`] - Tracing-based logging integration
//! - [`utils`] - Form data container and text helpers

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;
pub mod utils;

// Re-export the most commonly used types at the crate root.
pub use error::{FormsError, FormsResult, ValidationError};
pub use settings::Settings;
pub use utils::FormData;
