//! Core error types for docforms.
//!
//! [`FormsError`] covers everything that can go wrong while turning document
//! field descriptors into form fields: unsupported descriptor kinds, value
//! coercion failures, malformed identifiers, and configuration problems.
//! [`ValidationError`] mirrors Django's `ValidationError`.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// Represents a validation error with optional field-level errors.
///
/// Validation errors can be either simple (a single message) or compound
/// (containing per-field error lists), mirroring Django's `ValidationError`.
///
/// # Examples
///
/// ```
/// use docforms_core::error::ValidationError;
///
/// let err = ValidationError::new("This field is required.", "required");
/// assert_eq!(err.code, "required");
///
/// let mut field_errors = std::collections::HashMap::new();
/// field_errors.insert(
///     "email".to_string(),
///     vec![ValidationError::new("Enter a valid email address.", "invalid")],
/// );
/// let err = ValidationError::with_field_errors(field_errors);
/// assert!(err.to_string().contains("email"));
/// ```
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The primary error message.
    pub message: String,
    /// A short code identifying the type of validation failure (e.g. "required", "invalid").
    pub code: String,
    /// Additional parameters providing context for the error message.
    pub params: HashMap<String, String>,
    /// Per-field validation errors, keyed by field name.
    pub field_errors: HashMap<String, Vec<Self>>,
}

impl ValidationError {
    /// Creates a new `ValidationError` with a message and code.
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            params: HashMap::new(),
            field_errors: HashMap::new(),
        }
    }

    /// Creates a `ValidationError` containing per-field errors.
    pub fn with_field_errors(field_errors: HashMap<String, Vec<Self>>) -> Self {
        Self {
            message: String::new(),
            code: String::new(),
            params: HashMap::new(),
            field_errors,
        }
    }

    /// Adds a parameter to this validation error.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.message.is_empty() {
            write!(f, "{}", self.message)?;
        } else if !self.field_errors.is_empty() {
            let mut first = true;
            for (field, errors) in &self.field_errors {
                for error in errors {
                    if !first {
                        write!(f, "; ")?;
                    }
                    write!(f, "{field}: {error}")?;
                    first = false;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// The primary error type for docforms.
#[derive(Error, Debug)]
pub enum FormsError {
    // ── Generation ───────────────────────────────────────────────────

    /// No form-field handler resolves for the descriptor kind, neither by
    /// its own name, its ancestors, nor the alias table.
    #[error("{0} is not supported by MongoForm")]
    UnsupportedKind(String),

    // ── Values ───────────────────────────────────────────────────────

    /// One or more values failed validation.
    #[error("Validation error: {0}")]
    ValidationError(ValidationError),

    /// A submitted value could not be coerced into its native type.
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// A string is not a valid document identifier.
    #[error("Invalid id: {0}")]
    InvalidId(String),

    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl FormsError {
    /// Returns `true` if this is an [`UnsupportedKind`](Self::UnsupportedKind) error.
    pub const fn is_unsupported_kind(&self) -> bool {
        matches!(self, Self::UnsupportedKind(_))
    }
}

impl From<ValidationError> for FormsError {
    fn from(err: ValidationError) -> Self {
        Self::ValidationError(err)
    }
}

/// A convenience type alias for `Result<T, FormsError>`.
pub type FormsResult<T> = Result<T, FormsError>;
