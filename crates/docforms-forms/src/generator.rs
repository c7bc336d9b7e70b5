//! Form-field generation from document field descriptors.
//!
//! A [`FormFieldGenerator`] turns a [`FieldDescriptor`] into a configured
//! [`FormFieldDef`]. Two generators are provided:
//!
//! - [`MongoFormFieldGenerator`] is strict. It resolves a [`Handler`] for the
//!   descriptor's kind and fails with [`FormsError::UnsupportedKind`] when
//!   none applies.
//! - [`MongoDefaultFormFieldGenerator`] wraps the strict generator and falls
//!   back to a plain text field instead of failing.
//!
//! Handlers are resolved by lowercase kind name: the exact name first, then
//! each ancestor nearest first, then the configured alias table applied to
//! the same names. A user-defined `SlugField` extending `StringField` is thus
//! handled like a string.
//!
//! # Examples
//!
//! ```
//! use docforms_document::{FieldDescriptor, FieldKind, Value};
//! use docforms_forms::fields::FormFieldType;
//! use docforms_forms::generator::{FieldOverrides, FormFieldGenerator, MongoFormFieldGenerator};
//!
//! let generator = MongoFormFieldGenerator::default();
//! let grade = FieldDescriptor::new("grade", FieldKind::String).choices([("a", "A"), ("b", "B")]);
//!
//! let field = generator.generate(&grade, &FieldOverrides::default()).unwrap();
//! let FormFieldType::TypedChoice { choices, empty_value, .. } = &field.field_type else {
//!     panic!("expected a typed choice field");
//! };
//! assert_eq!(choices[0], (String::new(), "---------".to_string()));
//! assert_eq!(*empty_value, Value::Null);
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use docforms_core::utils::text::{capfirst, capitalize, verbose_name};
use docforms_core::{FormsError, FormsResult, Settings};
use docforms_document::{FieldDescriptor, FieldKind, Value};

use crate::choices::{coerce_boolean, coerce_integer, coerce_string, get_field_choices};
use crate::fields::{FormFieldDef, FormFieldType};
use crate::widgets::WidgetType;

/// Caller-supplied settings that replace the computed defaults of a
/// generated field.
///
/// Every `Some` value wins over whatever the handler derived from the
/// descriptor. Length, value, and choice overrides only apply to field types
/// that carry those parameters.
#[derive(Debug, Clone, Default)]
pub struct FieldOverrides {
    /// Replaces the label.
    pub label: Option<String>,
    /// Replaces the help text.
    pub help_text: Option<String>,
    /// Replaces the required flag.
    pub required: Option<bool>,
    /// Replaces the initial value.
    pub initial: Option<Value>,
    /// Replaces the widget.
    pub widget: Option<WidgetType>,
    /// Replaces the minimum length of text fields.
    pub min_length: Option<usize>,
    /// Replaces the maximum length of text fields.
    pub max_length: Option<usize>,
    /// Replaces the lower bound of numeric fields.
    pub min_value: Option<f64>,
    /// Replaces the upper bound of numeric fields.
    pub max_value: Option<f64>,
    /// Replaces the choices of choice fields.
    pub choices: Option<Vec<(String, String)>>,
    /// Replaces the disabled flag.
    pub disabled: Option<bool>,
    /// Custom error messages merged into the field's own.
    pub error_messages: HashMap<String, String>,
}

impl FieldOverrides {
    /// Creates an empty set of overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Overrides the help text.
    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = Some(text.into());
        self
    }

    /// Overrides the required flag.
    pub const fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Overrides the initial value.
    pub fn initial(mut self, value: impl Into<Value>) -> Self {
        self.initial = Some(value.into());
        self
    }

    /// Overrides the widget.
    pub fn widget(mut self, widget: WidgetType) -> Self {
        self.widget = Some(widget);
        self
    }

    /// Overrides the minimum length.
    pub const fn min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    /// Overrides the maximum length.
    pub const fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Overrides the lower bound.
    pub const fn min_value(mut self, min_value: f64) -> Self {
        self.min_value = Some(min_value);
        self
    }

    /// Overrides the upper bound.
    pub const fn max_value(mut self, max_value: f64) -> Self {
        self.max_value = Some(max_value);
        self
    }

    /// Overrides the choices.
    pub fn choices(mut self, choices: Vec<(String, String)>) -> Self {
        self.choices = Some(choices);
        self
    }

    /// Overrides the disabled flag.
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }

    /// Sets a custom error message for `code`.
    pub fn error_message(mut self, code: impl Into<String>, msg: impl Into<String>) -> Self {
        self.error_messages.insert(code.into(), msg.into());
        self
    }

    /// Applies these overrides to a generated field.
    pub fn apply(&self, mut field: FormFieldDef) -> FormFieldDef {
        if let Some(label) = &self.label {
            field.label.clone_from(label);
        }
        if let Some(help_text) = &self.help_text {
            field.help_text.clone_from(help_text);
        }
        if let Some(required) = self.required {
            field.required = required;
        }
        if let Some(initial) = &self.initial {
            field.initial = Some(initial.clone());
        }
        if let Some(disabled) = self.disabled {
            field.disabled = disabled;
        }
        field.error_messages.extend(
            self.error_messages
                .iter()
                .map(|(code, msg)| (code.clone(), msg.clone())),
        );

        match &mut field.field_type {
            FormFieldType::Char {
                min_length,
                max_length,
                ..
            }
            | FormFieldType::Email {
                min_length,
                max_length,
            }
            | FormFieldType::Url {
                min_length,
                max_length,
            }
            | FormFieldType::Regex {
                min_length,
                max_length,
                ..
            } => {
                if self.min_length.is_some() {
                    *min_length = self.min_length;
                }
                if self.max_length.is_some() {
                    *max_length = self.max_length;
                }
            }
            FormFieldType::Integer {
                min_value,
                max_value,
            } => {
                if let Some(min) = self.min_value {
                    *min_value = Some(int_lower_bound(min));
                }
                if let Some(max) = self.max_value {
                    *max_value = Some(int_upper_bound(max));
                }
            }
            FormFieldType::Float {
                min_value,
                max_value,
            }
            | FormFieldType::Decimal {
                min_value,
                max_value,
                ..
            } => {
                if self.min_value.is_some() {
                    *min_value = self.min_value;
                }
                if self.max_value.is_some() {
                    *max_value = self.max_value;
                }
            }
            FormFieldType::MultipleChoice { choices }
            | FormFieldType::TypedChoice { choices, .. } => {
                if let Some(overridden) = &self.choices {
                    choices.clone_from(overridden);
                }
            }
            _ => {}
        }

        if let Some(widget) = &self.widget {
            field.widget = widget.clone();
        }
        field
    }
}

/// Produces form fields from document field descriptors.
///
/// The trait is object safe so that list and map handlers can recurse
/// through whichever generator started the call.
pub trait FormFieldGenerator: Send + Sync {
    /// Generates a form field for `descriptor`, with `overrides` winning over
    /// computed defaults.
    fn generate(
        &self,
        descriptor: &FieldDescriptor,
        overrides: &FieldOverrides,
    ) -> FormsResult<FormFieldDef>;
}

/// The per-kind generation strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    /// `StringField`: text, regex, or typed choice.
    String,
    /// `EmailField`.
    Email,
    /// `URLField`.
    Url,
    /// `IntField`: integer or typed choice.
    Int,
    /// `FloatField`.
    Float,
    /// `DecimalField`.
    Decimal,
    /// `BooleanField`: checkbox or typed choice.
    Boolean,
    /// `DateTimeField`.
    DateTime,
    /// `ReferenceField`: a single reference select.
    Reference,
    /// `ListField`: multi-select, multi-reference, or a list of fields.
    List,
    /// `MapField`: a key/value map of fields.
    Map,
    /// `FileField`.
    File,
    /// `ImageField`.
    Image,
}

impl Handler {
    /// Looks up the handler registered under a lowercase kind name.
    pub fn for_kind_name(name: &str) -> Option<Self> {
        let handler = match name {
            "stringfield" => Self::String,
            "emailfield" => Self::Email,
            "urlfield" => Self::Url,
            "intfield" => Self::Int,
            "floatfield" => Self::Float,
            "decimalfield" => Self::Decimal,
            "booleanfield" => Self::Boolean,
            "datetimefield" => Self::DateTime,
            "referencefield" => Self::Reference,
            "listfield" => Self::List,
            "mapfield" => Self::Map,
            "filefield" => Self::File,
            "imagefield" => Self::Image,
            _ => return None,
        };
        Some(handler)
    }

    /// Returns the lowercase kind name this handler is registered under.
    pub const fn kind_name(self) -> &'static str {
        match self {
            Self::String => "stringfield",
            Self::Email => "emailfield",
            Self::Url => "urlfield",
            Self::Int => "intfield",
            Self::Float => "floatfield",
            Self::Decimal => "decimalfield",
            Self::Boolean => "booleanfield",
            Self::DateTime => "datetimefield",
            Self::Reference => "referencefield",
            Self::List => "listfield",
            Self::Map => "mapfield",
            Self::File => "filefield",
            Self::Image => "imagefield",
        }
    }
}

impl fmt::Display for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind_name())
    }
}

/// How a handler was found for a kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The kind's own name has a handler.
    Exact,
    /// An ancestor's name has a handler.
    Ancestor(String),
    /// The alias table maps the kind (or an ancestor) to a handled name.
    Alias(String),
}

/// The strict form-field generator.
///
/// Fails with [`FormsError::UnsupportedKind`] for kinds no handler covers.
#[derive(Debug, Clone)]
pub struct MongoFormFieldGenerator {
    aliases: BTreeMap<String, String>,
    blank_choice_label: String,
    reference_empty_label: String,
}

impl Default for MongoFormFieldGenerator {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl MongoFormFieldGenerator {
    /// Creates a generator using the alias table and labels in `settings`.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            aliases: settings
                .kind_aliases
                .iter()
                .map(|(from, to)| (from.to_lowercase(), to.to_lowercase()))
                .collect(),
            blank_choice_label: settings.blank_choice_label.clone(),
            reference_empty_label: settings.reference_empty_label.clone(),
        }
    }

    /// Adds an alias: kinds named `from` are handled by the handler of `to`.
    #[must_use]
    pub fn with_alias(mut self, from: &str, to: &str) -> Self {
        self.aliases.insert(from.to_lowercase(), to.to_lowercase());
        self
    }

    /// Resolves the handler for `kind`, or `None` if the kind is unsupported.
    ///
    /// # Examples
    ///
    /// ```
    /// use docforms_document::FieldKind;
    /// use docforms_forms::generator::{Handler, MongoFormFieldGenerator, Resolution};
    ///
    /// let generator = MongoFormFieldGenerator::default();
    /// let slug = FieldKind::custom("SlugField", FieldKind::String);
    /// assert_eq!(
    ///     generator.resolve(&slug),
    ///     Some((Handler::String, Resolution::Ancestor("stringfield".into())))
    /// );
    /// assert_eq!(generator.resolve(&FieldKind::GeoPoint), None);
    /// ```
    pub fn resolve(&self, kind: &FieldKind) -> Option<(Handler, Resolution)> {
        let own = kind.kind_name().to_lowercase();
        if let Some(handler) = Handler::for_kind_name(&own) {
            return Some((handler, Resolution::Exact));
        }

        let ancestors: Vec<String> = kind.ancestors().iter().map(|a| a.to_lowercase()).collect();
        for ancestor in &ancestors {
            if let Some(handler) = Handler::for_kind_name(ancestor) {
                return Some((handler, Resolution::Ancestor(ancestor.clone())));
            }
        }

        std::iter::once(&own).chain(&ancestors).find_map(|name| {
            self.aliases
                .get(name)
                .and_then(|target| Handler::for_kind_name(target))
                .map(|handler| (handler, Resolution::Alias(name.clone())))
        })
    }

    /// Generates a field for `descriptor`, recursing into list and map
    /// elements through `recurse`.
    pub fn dispatch(
        &self,
        descriptor: &FieldDescriptor,
        overrides: &FieldOverrides,
        recurse: &dyn FormFieldGenerator,
    ) -> FormsResult<FormFieldDef> {
        let kind_name = descriptor.kind.kind_name();
        let Some((handler, resolution)) = self.resolve(&descriptor.kind) else {
            return Err(FormsError::UnsupportedKind(kind_name.to_string()));
        };
        tracing::debug!(
            field = descriptor.name.as_deref().unwrap_or(""),
            kind = kind_name,
            %handler,
            ?resolution,
            "resolved form field handler"
        );

        let field = match handler {
            Handler::String => self.string_field(descriptor),
            Handler::Email => email_field(descriptor),
            Handler::Url => url_field(descriptor),
            Handler::Int => self.int_field(descriptor),
            Handler::Float => float_field(descriptor),
            Handler::Decimal => decimal_field(descriptor),
            Handler::Boolean => self.boolean_field(descriptor),
            Handler::DateTime => datetime_field(descriptor),
            Handler::Reference => self.reference_field(descriptor)?,
            Handler::List => list_field(descriptor, recurse)?,
            Handler::Map => map_field(descriptor, recurse)?,
            Handler::File => with_initial(base(descriptor, file_type()), descriptor),
            Handler::Image => with_initial(base(descriptor, FormFieldType::Image), descriptor),
        };
        Ok(overrides.apply(field))
    }

    fn string_field(&self, d: &FieldDescriptor) -> FormFieldDef {
        let has_choices = d.has_choices();
        let max_length = if has_choices { None } else { d.max_length };

        let field_type = if let Some(regex) = &d.regex {
            FormFieldType::Regex {
                regex: regex.clone(),
                min_length: None,
                max_length,
            }
        } else if has_choices {
            FormFieldType::TypedChoice {
                choices: get_field_choices(d, true, &self.blank_choice_label),
                coerce: coerce_string,
                empty_value: if d.required {
                    Value::String(String::new())
                } else {
                    Value::Null
                },
            }
        } else {
            FormFieldType::Char {
                min_length: None,
                max_length,
                strip: true,
                empty_value: Value::Null,
            }
        };

        let mut field = with_initial(base(d, field_type), d);
        if d.max_length.is_none() && !has_choices {
            field.widget = WidgetType::Textarea;
        }
        field
    }

    fn int_field(&self, d: &FieldDescriptor) -> FormFieldDef {
        let field_type = if d.has_choices() {
            FormFieldType::TypedChoice {
                choices: get_field_choices(d, true, &self.blank_choice_label),
                coerce: coerce_integer,
                empty_value: Value::Null,
            }
        } else {
            FormFieldType::Integer {
                min_value: d.min_value.map(int_lower_bound),
                max_value: d.max_value.map(int_upper_bound),
            }
        };
        with_initial(base(d, field_type), d)
    }

    fn boolean_field(&self, d: &FieldDescriptor) -> FormFieldDef {
        let field_type = if d.has_choices() {
            FormFieldType::TypedChoice {
                choices: get_field_choices(d, true, &self.blank_choice_label),
                coerce: coerce_boolean,
                empty_value: Value::Null,
            }
        } else {
            FormFieldType::Boolean
        };
        with_initial(base(d, field_type), d)
    }

    fn reference_field(&self, d: &FieldDescriptor) -> FormsResult<FormFieldDef> {
        let document = d
            .kind
            .document()
            .ok_or_else(|| FormsError::UnsupportedKind(d.kind.kind_name().to_string()))?;
        Ok(base(
            d,
            FormFieldType::Reference {
                queryset: document.objects.clone(),
                empty_label: Some(self.reference_empty_label.clone()),
            },
        ))
    }
}

impl FormFieldGenerator for MongoFormFieldGenerator {
    fn generate(
        &self,
        descriptor: &FieldDescriptor,
        overrides: &FieldOverrides,
    ) -> FormsResult<FormFieldDef> {
        self.dispatch(descriptor, overrides, self)
    }
}

/// The lenient form-field generator.
///
/// Behaves like [`MongoFormFieldGenerator`] but never fails: unsupported
/// kinds become a plain text field built from the descriptor's required
/// flag, length bounds, and default.
///
/// # Examples
///
/// ```
/// use docforms_document::{FieldDescriptor, FieldKind};
/// use docforms_forms::fields::FormFieldType;
/// use docforms_forms::generator::{FieldOverrides, FormFieldGenerator, MongoDefaultFormFieldGenerator};
///
/// let generator = MongoDefaultFormFieldGenerator::default();
/// let location = FieldDescriptor::new("location", FieldKind::GeoPoint);
/// let field = generator.generate(&location, &FieldOverrides::default()).unwrap();
/// assert!(matches!(field.field_type, FormFieldType::Char { .. }));
/// ```
#[derive(Debug, Clone)]
pub struct MongoDefaultFormFieldGenerator {
    strict: MongoFormFieldGenerator,
    warn_on_fallback: bool,
}

impl Default for MongoDefaultFormFieldGenerator {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl MongoDefaultFormFieldGenerator {
    /// Creates a lenient generator from `settings`.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            strict: MongoFormFieldGenerator::from_settings(settings),
            warn_on_fallback: settings.warn_on_fallback,
        }
    }

    /// Wraps an existing strict generator.
    pub const fn new(strict: MongoFormFieldGenerator) -> Self {
        Self {
            strict,
            warn_on_fallback: true,
        }
    }

    /// Returns the wrapped strict generator.
    pub const fn strict(&self) -> &MongoFormFieldGenerator {
        &self.strict
    }

    fn fallback(descriptor: &FieldDescriptor, overrides: &FieldOverrides) -> FormFieldDef {
        let mut field = FormFieldDef::new(
            attribute_name(descriptor),
            FormFieldType::Char {
                min_length: descriptor.min_length,
                max_length: descriptor.max_length,
                strip: true,
                empty_value: Value::String(String::new()),
            },
        )
        .required(descriptor.required)
        .label(field_label(descriptor));
        field.initial.clone_from(&descriptor.default);
        overrides.apply(field)
    }
}

impl FormFieldGenerator for MongoDefaultFormFieldGenerator {
    fn generate(
        &self,
        descriptor: &FieldDescriptor,
        overrides: &FieldOverrides,
    ) -> FormsResult<FormFieldDef> {
        match self.strict.dispatch(descriptor, overrides, self) {
            Err(err) if err.is_unsupported_kind() => {
                if self.warn_on_fallback {
                    tracing::warn!(
                        field = descriptor.name.as_deref().unwrap_or(""),
                        kind = descriptor.kind.kind_name(),
                        "{err}; falling back to a text field"
                    );
                }
                Ok(Self::fallback(descriptor, overrides))
            }
            other => other,
        }
    }
}

fn email_field(d: &FieldDescriptor) -> FormFieldDef {
    let field_type = FormFieldType::Email {
        min_length: d.min_length,
        max_length: d.max_length,
    };
    with_initial(base(d, field_type), d)
}

fn url_field(d: &FieldDescriptor) -> FormFieldDef {
    let field_type = FormFieldType::Url {
        min_length: d.min_length,
        max_length: d.max_length,
    };
    with_initial(base(d, field_type), d)
}

fn float_field(d: &FieldDescriptor) -> FormFieldDef {
    let field_type = FormFieldType::Float {
        min_value: d.min_value,
        max_value: d.max_value,
    };
    with_initial(base(d, field_type), d)
}

fn decimal_field(d: &FieldDescriptor) -> FormFieldDef {
    let field_type = FormFieldType::Decimal {
        min_value: d.min_value,
        max_value: d.max_value,
        max_digits: None,
        decimal_places: d.precision,
    };
    with_initial(base(d, field_type), d)
}

fn datetime_field(d: &FieldDescriptor) -> FormFieldDef {
    with_initial(base(d, FormFieldType::DateTime), d).help_text("")
}

fn file_type() -> FormFieldType {
    FormFieldType::File {
        max_size: None,
        allowed_extensions: Vec::new(),
    }
}

fn list_field(d: &FieldDescriptor, recurse: &dyn FormFieldGenerator) -> FormsResult<FormFieldDef> {
    let element = d
        .kind
        .element()
        .ok_or_else(|| FormsError::UnsupportedKind(d.kind.kind_name().to_string()))?;

    if element.has_choices() {
        let choices = get_field_choices(element, false, "");
        return Ok(base(d, FormFieldType::MultipleChoice { choices })
            .widget(WidgetType::CheckboxSelectMultiple));
    }

    if let Some(document) = element.kind.document() {
        return Ok(base(
            d,
            FormFieldType::DocumentMultipleChoice {
                queryset: document.objects.clone(),
            },
        ));
    }

    if element.kind.is_embedded_document() {
        return Err(FormsError::UnsupportedKind(
            element.kind.kind_name().to_string(),
        ));
    }

    let item = recurse.generate(element, &FieldOverrides::default())?;
    Ok(base(d, FormFieldType::List {
        item: Box::new(item),
    }))
}

fn map_field(d: &FieldDescriptor, recurse: &dyn FormFieldGenerator) -> FormsResult<FormFieldDef> {
    let element = d
        .kind
        .element()
        .ok_or_else(|| FormsError::UnsupportedKind(d.kind.kind_name().to_string()))?;
    let value = recurse.generate(element, &FieldOverrides::default())?;
    Ok(base(d, FormFieldType::Map {
        value: Box::new(value),
        min_key_length: None,
        max_key_length: None,
    }))
}

/// Builds a field with the name, label, help text and required flag every
/// handler shares.
fn base(d: &FieldDescriptor, field_type: FormFieldType) -> FormFieldDef {
    FormFieldDef::new(attribute_name(d), field_type)
        .required(d.required)
        .label(field_label(d))
        .help_text(field_help_text(d))
}

fn with_initial(mut field: FormFieldDef, d: &FieldDescriptor) -> FormFieldDef {
    field.initial.clone_from(&d.default);
    field
}

fn attribute_name(d: &FieldDescriptor) -> &str {
    d.name.as_deref().unwrap_or("")
}

/// The verbose name if declared, else the humanized attribute name.
fn field_label(d: &FieldDescriptor) -> String {
    match (&d.verbose_name, &d.name) {
        (Some(verbose), _) if !verbose.is_empty() => verbose.clone(),
        (_, Some(name)) => capfirst(&verbose_name(name)),
        _ => String::new(),
    }
}

fn field_help_text(d: &FieldDescriptor) -> String {
    d.help_text.as_deref().map(capitalize).unwrap_or_default()
}

/// Smallest integer satisfying `>= value`.
#[allow(clippy::cast_possible_truncation)]
fn int_lower_bound(value: f64) -> i64 {
    value.ceil() as i64
}

/// Largest integer satisfying `<= value`.
#[allow(clippy::cast_possible_truncation)]
fn int_upper_bound(value: f64) -> i64 {
    value.floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::clean_field_value;
    use std::sync::Arc;

    use docforms_document::{InMemoryManager, ObjectId, QueryManager};

    fn strict() -> MongoFormFieldGenerator {
        MongoFormFieldGenerator::default()
    }

    fn generate(descriptor: &FieldDescriptor) -> FormFieldDef {
        strict()
            .generate(descriptor, &FieldOverrides::default())
            .unwrap()
    }

    #[test]
    fn test_handler_lookup() {
        assert_eq!(Handler::for_kind_name("stringfield"), Some(Handler::String));
        assert_eq!(Handler::for_kind_name("StringField"), None);
        assert_eq!(Handler::for_kind_name("dictfield"), None);
        assert_eq!(Handler::List.to_string(), "listfield");
    }

    #[test]
    fn test_resolve_exact() {
        assert_eq!(
            strict().resolve(&FieldKind::Email),
            Some((Handler::Email, Resolution::Exact))
        );
    }

    #[test]
    fn test_resolve_ancestor_chain() {
        let nested = FieldKind::custom("ShortCode", FieldKind::custom("Code", FieldKind::String));
        assert_eq!(
            strict().resolve(&nested),
            Some((Handler::String, Resolution::Ancestor("stringfield".into())))
        );
        assert_eq!(
            strict().resolve(&FieldKind::ComplexDateTime),
            Some((Handler::String, Resolution::Ancestor("stringfield".into())))
        );
    }

    #[test]
    fn test_resolve_alias() {
        let generator = strict().with_alias("GeoPointField", "StringField");
        assert_eq!(
            generator.resolve(&FieldKind::GeoPoint),
            Some((Handler::String, Resolution::Alias("geopointfield".into())))
        );
    }

    #[test]
    fn test_resolve_alias_from_settings() {
        let mut settings = Settings::default();
        settings
            .kind_aliases
            .insert("uuidfield".into(), "stringfield".into());
        let generator = MongoFormFieldGenerator::from_settings(&settings);
        assert!(generator.resolve(&FieldKind::Uuid).is_some());
    }

    #[test]
    fn test_unsupported_kinds() {
        for kind in [
            FieldKind::ObjectId,
            FieldKind::Dict,
            FieldKind::Binary,
            FieldKind::GenericReference,
        ] {
            let descriptor = FieldDescriptor::new("x", kind);
            let err = strict()
                .generate(&descriptor, &FieldOverrides::default())
                .unwrap_err();
            assert!(err.is_unsupported_kind());
        }
    }

    #[test]
    fn test_unsupported_kind_message() {
        let descriptor = FieldDescriptor::new("where", FieldKind::GeoPoint);
        let err = strict()
            .generate(&descriptor, &FieldOverrides::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "GeoPointField is not supported by MongoForm");
    }

    #[test]
    fn test_label_from_verbose_name() {
        let field = generate(&FieldDescriptor::new("title", FieldKind::String).verbose_name("Headline"));
        assert_eq!(field.label, "Headline");
    }

    #[test]
    fn test_label_from_attribute_name() {
        assert_eq!(
            generate(&FieldDescriptor::new("first_name", FieldKind::String)).label,
            "First name"
        );
        assert_eq!(
            generate(&FieldDescriptor::new("createdAt", FieldKind::String)).label,
            "Created at"
        );
        assert_eq!(generate(&FieldDescriptor::element(FieldKind::String)).label, "");
    }

    #[test]
    fn test_help_text_capitalized() {
        let field = generate(&FieldDescriptor::new("t", FieldKind::String).help_text("the TITLE"));
        assert_eq!(field.help_text, "The title");
        assert_eq!(generate(&FieldDescriptor::new("t", FieldKind::String)).help_text, "");
    }

    #[test]
    fn test_string_plain_with_max_length() {
        let field = generate(
            &FieldDescriptor::new("title", FieldKind::String)
                .required()
                .max_length(100)
                .default("Untitled"),
        );
        assert!(matches!(
            field.field_type,
            FormFieldType::Char {
                max_length: Some(100),
                empty_value: Value::Null,
                ..
            }
        ));
        assert_eq!(field.widget, WidgetType::TextInput);
        assert!(field.required);
        assert_eq!(field.initial, Some(Value::String("Untitled".into())));
    }

    #[test]
    fn test_string_without_max_length_is_textarea() {
        let field = generate(&FieldDescriptor::new("body", FieldKind::String));
        assert_eq!(field.widget, WidgetType::Textarea);
        assert!(!field.required);
    }

    #[test]
    fn test_string_regex() {
        let field = generate(
            &FieldDescriptor::new("code", FieldKind::String)
                .regex("^[A-Z]+$")
                .max_length(8),
        );
        let FormFieldType::Regex { regex, max_length, .. } = &field.field_type else {
            panic!("expected a regex field");
        };
        assert_eq!(regex, "^[A-Z]+$");
        assert_eq!(*max_length, Some(8));
        assert_eq!(field.widget, WidgetType::TextInput);
    }

    #[test]
    fn test_string_regex_wins_over_choices() {
        let field = generate(
            &FieldDescriptor::new("code", FieldKind::String)
                .regex("^[a-z]$")
                .choices([("a", "A")]),
        );
        assert!(matches!(field.field_type, FormFieldType::Regex { .. }));
    }

    #[test]
    fn test_string_choices_optional() {
        let field = generate(
            &FieldDescriptor::new("grade", FieldKind::String).choices([("a", "A"), ("b", "B")]),
        );
        let FormFieldType::TypedChoice {
            choices,
            coerce,
            empty_value,
        } = &field.field_type
        else {
            panic!("expected a typed choice field");
        };
        assert_eq!(
            choices,
            &[
                (String::new(), "---------".to_string()),
                ("a".to_string(), "A".to_string()),
                ("b".to_string(), "B".to_string()),
            ]
        );
        assert_eq!(*empty_value, Value::Null);
        assert_eq!(coerce("a").unwrap(), Value::String("a".into()));
        assert_eq!(field.widget, WidgetType::Select);
    }

    #[test]
    fn test_string_choices_required_empty_value() {
        let field = generate(
            &FieldDescriptor::new("grade", FieldKind::String)
                .required()
                .max_length(1)
                .choices([("a", "A")]),
        );
        let FormFieldType::TypedChoice { empty_value, .. } = &field.field_type else {
            panic!("expected a typed choice field");
        };
        assert_eq!(*empty_value, Value::String(String::new()));
    }

    #[test]
    fn test_custom_blank_label() {
        let settings = Settings {
            blank_choice_label: "(pick one)".into(),
            ..Settings::default()
        };
        let field = MongoFormFieldGenerator::from_settings(&settings)
            .generate(
                &FieldDescriptor::new("size", FieldKind::Int).choices([(1, "S")]),
                &FieldOverrides::default(),
            )
            .unwrap();
        let FormFieldType::TypedChoice { choices, .. } = &field.field_type else {
            panic!("expected a typed choice field");
        };
        assert_eq!(choices[0].1, "(pick one)");
    }

    #[test]
    fn test_email_and_url() {
        let email = generate(
            &FieldDescriptor::new("email", FieldKind::Email)
                .min_length(5)
                .max_length(50),
        );
        assert!(matches!(
            email.field_type,
            FormFieldType::Email {
                min_length: Some(5),
                max_length: Some(50)
            }
        ));
        assert_eq!(email.widget, WidgetType::EmailInput);

        let url = generate(&FieldDescriptor::new("site", FieldKind::Url).default("https://a.io"));
        assert!(matches!(url.field_type, FormFieldType::Url { .. }));
        assert_eq!(url.initial, Some(Value::String("https://a.io".into())));
    }

    #[test]
    fn test_int_bounds() {
        let field = generate(
            &FieldDescriptor::new("age", FieldKind::Int)
                .min_value(0.0)
                .max_value(130.0)
                .default(18),
        );
        assert!(matches!(
            field.field_type,
            FormFieldType::Integer {
                min_value: Some(0),
                max_value: Some(130)
            }
        ));
        assert_eq!(field.initial, Some(Value::Int(18)));
    }

    #[test]
    fn test_int_fractional_bounds_stay_inside_range() {
        let field = generate(
            &FieldDescriptor::new("rank", FieldKind::Int)
                .min_value(0.5)
                .max_value(9.9),
        );
        assert!(matches!(
            field.field_type,
            FormFieldType::Integer {
                min_value: Some(1),
                max_value: Some(9)
            }
        ));
        assert!(clean_field_value(&field, Some("0")).is_err());
        assert_eq!(clean_field_value(&field, Some("1")).unwrap(), Value::Int(1));

        let negative = generate(
            &FieldDescriptor::new("delta", FieldKind::Int)
                .min_value(-2.5)
                .max_value(-0.5),
        );
        assert!(matches!(
            negative.field_type,
            FormFieldType::Integer {
                min_value: Some(-2),
                max_value: Some(-1)
            }
        ));
    }

    #[test]
    fn test_int_override_fractional_bounds() {
        let field = strict()
            .generate(
                &FieldDescriptor::new("rank", FieldKind::Int),
                &FieldOverrides::new().min_value(1.2).max_value(4.8),
            )
            .unwrap();
        assert!(matches!(
            field.field_type,
            FormFieldType::Integer {
                min_value: Some(2),
                max_value: Some(4)
            }
        ));
    }

    #[test]
    fn test_int_choices() {
        let field = generate(
            &FieldDescriptor::new("size", FieldKind::Int)
                .required()
                .choices([(1, "Small"), (2, "Large")]),
        );
        let FormFieldType::TypedChoice {
            choices,
            coerce,
            empty_value,
        } = &field.field_type
        else {
            panic!("expected a typed choice field");
        };
        assert_eq!(choices.len(), 3);
        assert_eq!(coerce("2").unwrap(), Value::Int(2));
        assert_eq!(*empty_value, Value::Null);
    }

    #[test]
    fn test_float_and_decimal() {
        let float = generate(&FieldDescriptor::new("ratio", FieldKind::Float).max_value(1.0));
        assert!(matches!(
            float.field_type,
            FormFieldType::Float {
                min_value: None,
                max_value: Some(_)
            }
        ));

        let decimal = generate(
            &FieldDescriptor::new("price", FieldKind::Decimal)
                .min_value(0.0)
                .precision(2),
        );
        assert!(matches!(
            decimal.field_type,
            FormFieldType::Decimal {
                decimal_places: Some(2),
                max_digits: None,
                ..
            }
        ));
    }

    #[test]
    fn test_boolean() {
        let plain = generate(&FieldDescriptor::new("active", FieldKind::Boolean).default(true));
        assert!(matches!(plain.field_type, FormFieldType::Boolean));
        assert_eq!(plain.widget, WidgetType::CheckboxInput);
        assert_eq!(plain.initial, Some(Value::Bool(true)));

        let choices = generate(
            &FieldDescriptor::new("active", FieldKind::Boolean).choices([(true, "Yes"), (false, "No")]),
        );
        let FormFieldType::TypedChoice { coerce, .. } = &choices.field_type else {
            panic!("expected a typed choice field");
        };
        assert_eq!(coerce("True").unwrap(), Value::Bool(true));
        assert_eq!(coerce("false").unwrap(), Value::Bool(false));
    }

    #[test]
    fn test_datetime_has_no_help_text() {
        let field = generate(
            &FieldDescriptor::new("published", FieldKind::DateTime)
                .required()
                .help_text("when it went live"),
        );
        assert!(matches!(field.field_type, FormFieldType::DateTime));
        assert_eq!(field.help_text, "");
        assert!(field.required);
    }

    #[test]
    fn test_reference() {
        let authors = InMemoryManager::new("author").into_document_type("Author");
        let field = generate(
            &FieldDescriptor::new("author", FieldKind::reference(authors.clone())).required(),
        );
        let FormFieldType::Reference {
            queryset,
            empty_label,
        } = &field.field_type
        else {
            panic!("expected a reference field");
        };
        assert!(authors.same_manager(queryset));
        assert_eq!(empty_label.as_deref(), Some("---------"));
        assert!(field.initial.is_none());
    }

    #[test]
    fn test_list_of_choices() {
        let element = FieldDescriptor::element(FieldKind::String).choices([("r", "Red"), ("g", "Green")]);
        let field = generate(&FieldDescriptor::new("colors", FieldKind::list(element)));
        let FormFieldType::MultipleChoice { choices } = &field.field_type else {
            panic!("expected a multiple choice field");
        };
        assert_eq!(choices[0], ("r".to_string(), "Red".to_string()));
        assert_eq!(choices.len(), 2);
        assert_eq!(field.widget, WidgetType::CheckboxSelectMultiple);
    }

    #[test]
    fn test_list_of_references() {
        let tags: Arc<dyn QueryManager> = Arc::new(
            InMemoryManager::new("tag").with_document(ObjectId::from_bytes([3; 12]), "rust"),
        );
        let tag_type = docforms_document::DocumentType::new("Tag", tags.clone());
        let element = FieldDescriptor::element(FieldKind::reference(tag_type));
        let field = generate(&FieldDescriptor::new("tags", FieldKind::list(element)));
        let FormFieldType::DocumentMultipleChoice { queryset } = &field.field_type else {
            panic!("expected a document multiple choice field");
        };
        assert!(Arc::ptr_eq(queryset, &tags));
        assert_eq!(field.widget, WidgetType::SelectMultiple);
    }

    #[test]
    fn test_list_of_scalars() {
        let element = FieldDescriptor::element(FieldKind::Int).min_value(1.0);
        let field = generate(&FieldDescriptor::new("scores", FieldKind::list(element)).required());
        let FormFieldType::List { item } = &field.field_type else {
            panic!("expected a list field");
        };
        assert!(matches!(
            item.field_type,
            FormFieldType::Integer {
                min_value: Some(1),
                ..
            }
        ));
        assert_eq!(item.name, "");
        assert_eq!(field.widget, WidgetType::List(Box::new(WidgetType::NumberInput)));
        assert!(field.required);
    }

    #[test]
    fn test_list_of_embedded_documents_is_unsupported() {
        let element = FieldDescriptor::element(FieldKind::EmbeddedDocument {
            document: "Comment".into(),
        });
        let err = strict()
            .generate(
                &FieldDescriptor::new("comments", FieldKind::list(element)),
                &FieldOverrides::default(),
            )
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "EmbeddedDocumentField is not supported by MongoForm"
        );
    }

    #[test]
    fn test_sorted_list_resolves_as_list() {
        let element = FieldDescriptor::element(FieldKind::String).max_length(10);
        let field = generate(&FieldDescriptor::new("names", FieldKind::sorted_list(element)));
        assert!(matches!(field.field_type, FormFieldType::List { .. }));
    }

    #[test]
    fn test_map() {
        let element = FieldDescriptor::element(FieldKind::Float);
        let field = generate(&FieldDescriptor::new("prices", FieldKind::map(element)));
        let FormFieldType::Map { value, .. } = &field.field_type else {
            panic!("expected a map field");
        };
        assert!(matches!(value.field_type, FormFieldType::Float { .. }));
        assert_eq!(field.widget, WidgetType::Map(Box::new(WidgetType::NumberInput)));
    }

    #[test]
    fn test_map_of_unsupported_fails_strict() {
        let element = FieldDescriptor::element(FieldKind::Binary);
        let err = strict()
            .generate(
                &FieldDescriptor::new("blobs", FieldKind::map(element)),
                &FieldOverrides::default(),
            )
            .unwrap_err();
        assert!(err.is_unsupported_kind());
    }

    #[test]
    fn test_file_and_image() {
        let file = generate(&FieldDescriptor::new("attachment", FieldKind::File).required());
        assert!(matches!(file.field_type, FormFieldType::File { .. }));
        assert_eq!(file.widget, WidgetType::FileInput);
        let image = generate(&FieldDescriptor::new("avatar", FieldKind::Image));
        assert!(matches!(image.field_type, FormFieldType::Image));
    }

    #[test]
    fn test_overrides_win() {
        let descriptor = FieldDescriptor::new("title", FieldKind::String)
            .required()
            .max_length(100)
            .verbose_name("Title")
            .help_text("shown on top");
        let overrides = FieldOverrides::new()
            .label("Headline")
            .help_text("Keep it short")
            .required(false)
            .initial("Draft")
            .max_length(20)
            .widget(WidgetType::HiddenInput)
            .error_message("required", "Need a title.");
        let field = strict().generate(&descriptor, &overrides).unwrap();
        assert_eq!(field.label, "Headline");
        assert_eq!(field.help_text, "Keep it short");
        assert!(!field.required);
        assert_eq!(field.initial, Some(Value::String("Draft".into())));
        assert!(matches!(
            field.field_type,
            FormFieldType::Char {
                max_length: Some(20),
                ..
            }
        ));
        assert_eq!(field.widget, WidgetType::HiddenInput);
        assert_eq!(field.error_messages["required"], "Need a title.");
    }

    #[test]
    fn test_override_bounds_and_choices() {
        let int = strict()
            .generate(
                &FieldDescriptor::new("n", FieldKind::Int).max_value(10.0),
                &FieldOverrides::new().max_value(5.0),
            )
            .unwrap();
        assert!(matches!(
            int.field_type,
            FormFieldType::Integer {
                max_value: Some(5),
                ..
            }
        ));

        let choice = strict()
            .generate(
                &FieldDescriptor::new("c", FieldKind::String).choices([("a", "A")]),
                &FieldOverrides::new().choices(vec![("z".into(), "Z".into())]),
            )
            .unwrap();
        let FormFieldType::TypedChoice { choices, .. } = &choice.field_type else {
            panic!("expected a typed choice field");
        };
        assert_eq!(choices, &[("z".to_string(), "Z".to_string())]);
    }

    #[test]
    fn test_lenient_fallback() {
        let generator = MongoDefaultFormFieldGenerator::default();
        let descriptor = FieldDescriptor::new("token", FieldKind::Uuid)
            .required()
            .min_length(2)
            .max_length(36)
            .default("abc");
        let field = generator
            .generate(&descriptor, &FieldOverrides::default())
            .unwrap();
        assert!(matches!(
            field.field_type,
            FormFieldType::Char {
                min_length: Some(2),
                max_length: Some(36),
                ..
            }
        ));
        assert!(field.required);
        assert_eq!(field.initial, Some(Value::String("abc".into())));
        assert_eq!(field.name, "token");
    }

    #[test]
    fn test_lenient_fallback_label_is_humanized() {
        let generator = MongoDefaultFormFieldGenerator::default();
        let fallback = generator
            .generate(
                &FieldDescriptor::new("first_name", FieldKind::Binary),
                &FieldOverrides::default(),
            )
            .unwrap();
        let generated = generator
            .generate(
                &FieldDescriptor::new("first_name", FieldKind::String),
                &FieldOverrides::default(),
            )
            .unwrap();
        assert_eq!(fallback.label, "First name");
        assert_eq!(fallback.label, generated.label);

        let verbose = generator
            .generate(
                &FieldDescriptor::new("blob", FieldKind::Binary).verbose_name("Raw bytes"),
                &FieldOverrides::default(),
            )
            .unwrap();
        assert_eq!(verbose.label, "Raw bytes");
    }

    #[test]
    fn test_lenient_fallback_applies_overrides() {
        let generator = MongoDefaultFormFieldGenerator::default();
        let field = generator
            .generate(
                &FieldDescriptor::new("data", FieldKind::Dict),
                &FieldOverrides::new().label("Payload").widget(WidgetType::Textarea),
            )
            .unwrap();
        assert_eq!(field.label, "Payload");
        assert_eq!(field.widget, WidgetType::Textarea);
    }

    #[test]
    fn test_lenient_matches_strict_for_supported_kinds() {
        let generator = MongoDefaultFormFieldGenerator::default();
        let field = generator
            .generate(
                &FieldDescriptor::new("age", FieldKind::Int),
                &FieldOverrides::default(),
            )
            .unwrap();
        assert!(matches!(field.field_type, FormFieldType::Integer { .. }));
    }

    #[test]
    fn test_lenient_recurses_into_elements() {
        let generator = MongoDefaultFormFieldGenerator::default();
        let element = FieldDescriptor::element(FieldKind::Binary);
        let field = generator
            .generate(
                &FieldDescriptor::new("blobs", FieldKind::map(element)),
                &FieldOverrides::default(),
            )
            .unwrap();
        let FormFieldType::Map { value, .. } = &field.field_type else {
            panic!("expected a map field");
        };
        assert!(matches!(value.field_type, FormFieldType::Char { .. }));
    }

    #[test]
    fn test_lenient_list_of_embedded_documents_falls_back() {
        let generator = MongoDefaultFormFieldGenerator::default();
        let element = FieldDescriptor::element(FieldKind::EmbeddedDocument {
            document: "Comment".into(),
        });
        let field = generator
            .generate(
                &FieldDescriptor::new("comments", FieldKind::list(element)),
                &FieldOverrides::default(),
            )
            .unwrap();
        assert!(matches!(field.field_type, FormFieldType::Char { .. }));
    }

    #[test]
    fn test_generators_are_object_safe() {
        let generators: Vec<Box<dyn FormFieldGenerator>> = vec![
            Box::new(MongoFormFieldGenerator::default()),
            Box::new(MongoDefaultFormFieldGenerator::default()),
        ];
        for generator in &generators {
            let field = generator
                .generate(
                    &FieldDescriptor::new("name", FieldKind::String),
                    &FieldOverrides::default(),
                )
                .unwrap();
            assert_eq!(field.name, "name");
        }
    }
}
