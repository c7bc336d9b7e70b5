//! Field descriptors.
//!
//! A [`FieldDescriptor`] captures everything a document class declares about
//! one attribute: its [`FieldKind`], whether it is required, its default,
//! choices, and the length/value/regex constraints the store enforces. Form
//! generation only ever reads descriptors.

use super::kind::FieldKind;
use crate::value::Value;

/// Declaration of a single document attribute.
///
/// Descriptors are built with [`FieldDescriptor::new`] and chained setters,
/// the same way model fields are declared in code.
///
/// # Examples
///
/// ```
/// use docforms_document::{FieldDescriptor, FieldKind};
///
/// let title = FieldDescriptor::new("title", FieldKind::String)
///     .required()
///     .max_length(200)
///     .help_text("the headline shown on the front page");
/// assert!(title.required);
/// assert_eq!(title.max_length, Some(200));
/// ```
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// The attribute name, absent for element descriptors of lists and maps.
    pub name: Option<String>,
    /// The declared kind.
    pub kind: FieldKind,
    /// Whether a value must be provided.
    pub required: bool,
    /// Default value for new documents.
    pub default: Option<Value>,
    /// Allowed values as `(value, display_label)` pairs.
    pub choices: Option<Vec<(Value, String)>>,
    /// Free-form help text.
    pub help_text: Option<String>,
    /// Human-readable name for the attribute.
    pub verbose_name: Option<String>,
    /// Maximum length for string kinds.
    pub max_length: Option<usize>,
    /// Minimum length for string kinds.
    pub min_length: Option<usize>,
    /// Minimum value for numeric kinds.
    pub min_value: Option<f64>,
    /// Maximum value for numeric kinds.
    pub max_value: Option<f64>,
    /// Pattern that string values must match.
    pub regex: Option<String>,
    /// Decimal places kept by decimal kinds.
    pub precision: Option<u32>,
}

impl FieldDescriptor {
    /// Creates a descriptor for attribute `name` with default constraints
    /// (optional, no default, no choices).
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::element(kind)
        }
    }

    /// Creates an anonymous descriptor, as used for list and map elements.
    pub const fn element(kind: FieldKind) -> Self {
        Self {
            name: None,
            kind,
            required: false,
            default: None,
            choices: None,
            help_text: None,
            verbose_name: None,
            max_length: None,
            min_length: None,
            min_value: None,
            max_value: None,
            regex: None,
            precision: None,
        }
    }

    /// Marks this attribute as required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Sets the allowed choices.
    #[must_use]
    pub fn choices<V, L>(mut self, choices: impl IntoIterator<Item = (V, L)>) -> Self
    where
        V: Into<Value>,
        L: Into<String>,
    {
        self.choices = Some(
            choices
                .into_iter()
                .map(|(value, label)| (value.into(), label.into()))
                .collect(),
        );
        self
    }

    /// Sets the help text.
    #[must_use]
    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = Some(text.into());
        self
    }

    /// Sets the verbose (human-readable) name.
    #[must_use]
    pub fn verbose_name(mut self, name: impl Into<String>) -> Self {
        self.verbose_name = Some(name.into());
        self
    }

    /// Sets the maximum string length.
    #[must_use]
    pub const fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Sets the minimum string length.
    #[must_use]
    pub const fn min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    /// Sets the minimum numeric value.
    #[must_use]
    pub const fn min_value(mut self, min_value: f64) -> Self {
        self.min_value = Some(min_value);
        self
    }

    /// Sets the maximum numeric value.
    #[must_use]
    pub const fn max_value(mut self, max_value: f64) -> Self {
        self.max_value = Some(max_value);
        self
    }

    /// Sets the pattern string values must match.
    #[must_use]
    pub fn regex(mut self, pattern: impl Into<String>) -> Self {
        self.regex = Some(pattern.into());
        self
    }

    /// Sets the number of decimal places.
    #[must_use]
    pub const fn precision(mut self, places: u32) -> Self {
        self.precision = Some(places);
        self
    }

    /// Returns `true` if non-empty choices are declared.
    pub fn has_choices(&self) -> bool {
        self.choices.as_ref().is_some_and(|c| !c.is_empty())
    }

    /// Returns the declared choices, or an empty slice.
    pub fn choice_list(&self) -> &[(Value, String)] {
        self.choices.as_deref().unwrap_or_default()
    }
}
