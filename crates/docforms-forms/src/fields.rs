//! Form field definitions and type-level validation.
//!
//! Each [`FormFieldDef`] describes a single form field, including its type,
//! validators, widget, and metadata. The [`FormFieldType`] enum defines
//! the type-specific parsing and coercion logic through the [`clean_field_value`]
//! and [`clean_value`] functions.
//!
//! Besides the scalar Django field types this covers the document-specific
//! ones: single and multiple references resolved through a
//! [`QueryManager`], and the homogeneous list and key/value map fields that
//! wrap another form field.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, OnceLock};

use docforms_core::{FormData, FormsError};
use docforms_document::manager::QueryManager;
use docforms_document::validators::{
    MaxLengthValidator, MinLengthValidator, RegexValidator, Validator,
};
use docforms_document::{ObjectId, Value};
use regex::Regex;

use crate::widgets::{WidgetType, WidgetValue};

/// Converts a submitted choice string into its native value.
pub type CoerceFn = fn(&str) -> Result<Value, FormsError>;

/// Defines the type of a form field, including type-specific parameters.
///
/// Each variant carries the parameters needed for parsing and validating
/// raw string input from form submissions.
#[derive(Debug, Clone)]
pub enum FormFieldType {
    /// A character (string) field.
    Char {
        /// Minimum length (characters).
        min_length: Option<usize>,
        /// Maximum length (characters).
        max_length: Option<usize>,
        /// Whether to strip leading/trailing whitespace.
        strip: bool,
        /// The value an empty, optional submission cleans to.
        empty_value: Value,
    },
    /// An integer field.
    Integer {
        /// Minimum allowed value.
        min_value: Option<i64>,
        /// Maximum allowed value.
        max_value: Option<i64>,
    },
    /// A floating-point field.
    Float {
        /// Minimum allowed value.
        min_value: Option<f64>,
        /// Maximum allowed value.
        max_value: Option<f64>,
    },
    /// A fixed-precision decimal field.
    Decimal {
        /// Minimum allowed value.
        min_value: Option<f64>,
        /// Maximum allowed value.
        max_value: Option<f64>,
        /// Maximum total number of digits.
        max_digits: Option<u32>,
        /// Maximum number of digits after the decimal point.
        decimal_places: Option<u32>,
    },
    /// A boolean field (true/false).
    Boolean,
    /// A date-time field (YYYY-MM-DDTHH:MM:SS).
    DateTime,
    /// An email address field.
    Email {
        /// Minimum length (characters).
        min_length: Option<usize>,
        /// Maximum length (characters).
        max_length: Option<usize>,
    },
    /// A URL field.
    Url {
        /// Minimum length (characters).
        min_length: Option<usize>,
        /// Maximum length (characters).
        max_length: Option<usize>,
    },
    /// A multiple-choice field.
    MultipleChoice {
        /// Available choices as `(value, display_label)` pairs.
        choices: Vec<(String, String)>,
    },
    /// A file upload field.
    File {
        /// Maximum file size in bytes.
        max_size: Option<usize>,
        /// Allowed file extensions (e.g. `["jpg", "png"]`).
        allowed_extensions: Vec<String>,
    },
    /// An image upload field.
    Image,
    /// A choice field with a coercion function.
    TypedChoice {
        /// Available choices as `(value, display_label)` pairs.
        choices: Vec<(String, String)>,
        /// A function to coerce the raw string value into a `Value`.
        coerce: CoerceFn,
        /// The value an empty, optional submission cleans to.
        empty_value: Value,
    },
    /// A field validated against a regular expression.
    Regex {
        /// The regex pattern string.
        regex: String,
        /// Minimum length (characters).
        min_length: Option<usize>,
        /// Maximum length (characters).
        max_length: Option<usize>,
    },
    /// A single reference to a document of another collection.
    Reference {
        /// The manager of the referenced collection.
        queryset: Arc<dyn QueryManager>,
        /// Label of the leading blank choice, if any.
        empty_label: Option<String>,
    },
    /// Several references to documents of another collection.
    DocumentMultipleChoice {
        /// The manager of the referenced collection.
        queryset: Arc<dyn QueryManager>,
    },
    /// A homogeneous list whose items are cleaned by `item`.
    List {
        /// The form field every item is cleaned with.
        item: Box<FormFieldDef>,
    },
    /// A string-keyed map whose values are cleaned by `value`.
    Map {
        /// The form field every value is cleaned with.
        value: Box<FormFieldDef>,
        /// Minimum key length (characters).
        min_key_length: Option<usize>,
        /// Maximum key length (characters).
        max_key_length: Option<usize>,
    },
}

impl FormFieldType {
    /// Returns the Django-style class name of this field type.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Char { .. } => "CharField",
            Self::Integer { .. } => "IntegerField",
            Self::Float { .. } => "FloatField",
            Self::Decimal { .. } => "DecimalField",
            Self::Boolean => "BooleanField",
            Self::DateTime => "DateTimeField",
            Self::Email { .. } => "EmailField",
            Self::Url { .. } => "URLField",
            Self::MultipleChoice { .. } => "MultipleChoiceField",
            Self::File { .. } => "FileField",
            Self::Image => "ImageField",
            Self::TypedChoice { .. } => "TypedChoiceField",
            Self::Regex { .. } => "RegexField",
            Self::Reference { .. } => "ReferenceField",
            Self::DocumentMultipleChoice { .. } => "DocumentMultipleChoiceField",
            Self::List { .. } => "ListField",
            Self::Map { .. } => "MapField",
        }
    }
}

/// Complete definition of a form field.
///
/// A `FormFieldDef` captures everything needed to present, parse, and
/// validate a single form field. It is the form-layer analog of a document
/// [`FieldDescriptor`](docforms_document::FieldDescriptor).
#[derive(Debug, Clone)]
pub struct FormFieldDef {
    /// The field name (the submitted data key).
    pub name: String,
    /// The field type, controlling parsing and coercion.
    pub field_type: FormFieldType,
    /// Whether this field is required.
    pub required: bool,
    /// Default/initial value.
    pub initial: Option<Value>,
    /// Help text displayed alongside the field.
    pub help_text: String,
    /// Human-readable label.
    pub label: String,
    /// The widget type used for input.
    pub widget: WidgetType,
    /// Additional validators applied after type coercion.
    pub validators: Vec<Arc<dyn Validator>>,
    /// Custom error messages keyed by error code.
    pub error_messages: HashMap<String, String>,
    /// Whether the field is disabled (shown but not editable).
    pub disabled: bool,
}

impl FormFieldDef {
    /// Creates a new `FormFieldDef` with sensible defaults.
    ///
    /// The field is required by default, uses the default widget for its type,
    /// and has no validators beyond the type-level validation.
    pub fn new(name: impl Into<String>, field_type: FormFieldType) -> Self {
        let name = name.into();
        let widget = default_widget_for_field_type(&field_type);
        let label = name.replace('_', " ");
        Self {
            name,
            field_type,
            required: true,
            initial: None,
            help_text: String::new(),
            label,
            widget,
            validators: Vec::new(),
            error_messages: HashMap::new(),
            disabled: false,
        }
    }

    /// Sets whether this field is required.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets the initial value.
    pub fn initial(mut self, value: Value) -> Self {
        self.initial = Some(value);
        self
    }

    /// Sets the help text.
    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = text.into();
        self
    }

    /// Sets the label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the widget type.
    pub fn widget(mut self, widget: WidgetType) -> Self {
        self.widget = widget;
        self
    }

    /// Adds a validator.
    pub fn validator(mut self, validator: Arc<dyn Validator>) -> Self {
        self.validators.push(validator);
        self
    }

    /// Sets a custom error message for a given code.
    pub fn error_message(mut self, code: impl Into<String>, msg: impl Into<String>) -> Self {
        self.error_messages.insert(code.into(), msg.into());
        self
    }

    /// Sets whether this field is disabled.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    fn message(&self, code: &str, default: impl FnOnce() -> String) -> String {
        self.error_messages
            .get(code)
            .cloned()
            .unwrap_or_else(default)
    }

    fn required_error(&self) -> Vec<String> {
        vec![self.message("required", || "This field is required.".to_string())]
    }
}

static EMAIL: OnceLock<Regex> = OnceLock::new();
static URL: OnceLock<Regex> = OnceLock::new();

/// Returns the default widget type for a given form field type.
pub fn default_widget_for_field_type(field_type: &FormFieldType) -> WidgetType {
    match field_type {
        FormFieldType::Char { .. } | FormFieldType::Regex { .. } => WidgetType::TextInput,
        FormFieldType::Integer { .. }
        | FormFieldType::Float { .. }
        | FormFieldType::Decimal { .. } => WidgetType::NumberInput,
        FormFieldType::Boolean => WidgetType::CheckboxInput,
        FormFieldType::TypedChoice { .. } | FormFieldType::Reference { .. } => WidgetType::Select,
        FormFieldType::DateTime => WidgetType::DateTimeInput,
        FormFieldType::Email { .. } => WidgetType::EmailInput,
        FormFieldType::Url { .. } => WidgetType::UrlInput,
        FormFieldType::MultipleChoice { .. } | FormFieldType::DocumentMultipleChoice { .. } => {
            WidgetType::SelectMultiple
        }
        FormFieldType::File { .. } | FormFieldType::Image => WidgetType::FileInput,
        FormFieldType::List { item } => WidgetType::List(Box::new(item.widget.clone())),
        FormFieldType::Map { value, .. } => WidgetType::Map(Box::new(value.widget.clone())),
    }
}

/// Returns the choices a field offers, in display order.
///
/// Reference fields enumerate their collection through the query manager:
/// an optional `("", empty_label)` entry first, then one `(id, label)` pair
/// per document. Fields without choices return an empty list.
pub fn field_choices(field: &FormFieldDef) -> Vec<(String, String)> {
    match &field.field_type {
        FormFieldType::MultipleChoice { choices }
        | FormFieldType::TypedChoice { choices, .. } => choices.clone(),
        FormFieldType::Reference {
            queryset,
            empty_label,
        } => {
            let mut choices: Vec<(String, String)> = empty_label
                .iter()
                .map(|label| (String::new(), label.clone()))
                .collect();
            choices.extend(
                queryset
                    .all()
                    .into_iter()
                    .map(|doc| (doc.id.to_string(), doc.label)),
            );
            choices
        }
        FormFieldType::DocumentMultipleChoice { queryset } => queryset
            .all()
            .into_iter()
            .map(|doc| (doc.id.to_string(), doc.label))
            .collect(),
        _ => Vec::new(),
    }
}

/// Extracts the field's raw value from submitted data through its widget
/// and cleans it.
///
/// # Examples
///
/// ```
/// use docforms_core::FormData;
/// use docforms_document::Value;
/// use docforms_forms::fields::{clean_from_data, FormFieldDef, FormFieldType};
///
/// let item = FormFieldDef::new("", FormFieldType::Integer { min_value: None, max_value: None });
/// let field = FormFieldDef::new("scores", FormFieldType::List { item: Box::new(item) });
/// let data = FormData::from_pairs([("scores_0", "3"), ("scores_1", "5")]);
/// assert_eq!(
///     clean_from_data(&field, &data),
///     Ok(Value::List(vec![Value::Int(3), Value::Int(5)]))
/// );
/// ```
pub fn clean_from_data(field: &FormFieldDef, data: &FormData) -> Result<Value, Vec<String>> {
    clean_value(field, &field.widget.value_from_data(data, &field.name))
}

/// Cleans a value extracted by a widget.
///
/// Single values go through [`clean_field_value`]; multiple values feed
/// multi-select, reference-list and list fields; key/value pairs feed map
/// fields.
pub fn clean_value(field: &FormFieldDef, value: &WidgetValue) -> Result<Value, Vec<String>> {
    match (value, &field.field_type) {
        (WidgetValue::Single(raw), _) => clean_field_value(field, raw.as_deref()),
        (WidgetValue::Multiple(items), FormFieldType::MultipleChoice { choices }) => {
            clean_multiple_choice(field, choices, items)
        }
        (WidgetValue::Multiple(items), FormFieldType::DocumentMultipleChoice { queryset }) => {
            clean_document_multiple_choice(field, queryset.as_ref(), items)
        }
        (WidgetValue::Multiple(items), FormFieldType::List { item }) => {
            clean_list(field, item, items)
        }
        (
            WidgetValue::Pairs(pairs),
            FormFieldType::Map {
                value,
                min_key_length,
                max_key_length,
            },
        ) => clean_map(field, value, *min_key_length, *max_key_length, pairs),
        (WidgetValue::Multiple(_), FormFieldType::Map { .. }) | (WidgetValue::Pairs(_), _) => {
            Err(vec![field.message("invalid", || {
                "Enter a list of values.".to_string()
            })])
        }
        (WidgetValue::Multiple(items), _) => {
            clean_field_value(field, items.last().map(String::as_str))
        }
    }
}

/// Cleans (validates and coerces) a raw form input string into a typed `Value`.
///
/// This performs type-level validation:
/// 1. Required check (if `required` and value is empty/None)
/// 2. Type coercion (string -> i64, date, object id, etc.)
/// 3. Type-specific constraint validation (min/max, regex, choices, lookups)
/// 4. Custom validators
///
/// Multi-valued fields accept a comma-separated string; a list field treats
/// the string as its only item.
///
/// Returns the cleaned `Value` or a list of error messages.
pub fn clean_field_value(field: &FormFieldDef, raw: Option<&str>) -> Result<Value, Vec<String>> {
    match &field.field_type {
        FormFieldType::MultipleChoice { choices } => {
            return clean_multiple_choice(field, choices, &split_csv(raw));
        }
        FormFieldType::DocumentMultipleChoice { queryset } => {
            return clean_document_multiple_choice(field, queryset.as_ref(), &split_csv(raw));
        }
        FormFieldType::List { item } => {
            let items: Vec<String> = raw.map(String::from).into_iter().collect();
            return clean_list(field, item, &items);
        }
        FormFieldType::Map {
            value,
            min_key_length,
            max_key_length,
        } => {
            if raw.map_or(true, str::is_empty) {
                return clean_map(field, value, *min_key_length, *max_key_length, &[]);
            }
            return Err(vec![field.message("invalid", || {
                "Enter a list of values.".to_string()
            })]);
        }
        _ => {}
    }

    let raw_str = raw.unwrap_or("");
    let is_empty = raw_str.is_empty();

    // Required check
    if field.required && is_empty {
        return Err(field.required_error());
    }

    if is_empty {
        return Ok(empty_value(&field.field_type));
    }

    let mut errors = Vec::new();

    // Type coercion and built-in validation
    let value = match &field.field_type {
        FormFieldType::Char {
            min_length,
            max_length,
            strip,
            empty_value,
        } => {
            let s = if *strip { raw_str.trim() } else { raw_str };
            if s.is_empty() {
                if field.required {
                    return Err(field.required_error());
                }
                return Ok(empty_value.clone());
            }
            check_length(s, *min_length, *max_length, &mut errors);
            Value::String(s.to_string())
        }

        FormFieldType::Integer {
            min_value,
            max_value,
        } => match raw_str.trim().parse::<i64>() {
            Ok(n) => {
                if let Some(min) = min_value {
                    if n < *min {
                        errors.push(format!(
                            "Ensure this value is greater than or equal to {min}."
                        ));
                    }
                }
                if let Some(max) = max_value {
                    if n > *max {
                        errors.push(format!("Ensure this value is less than or equal to {max}."));
                    }
                }
                Value::Int(n)
            }
            Err(_) => {
                errors.push("Enter a whole number.".to_string());
                Value::Null
            }
        },

        FormFieldType::Float {
            min_value,
            max_value,
        } => match raw_str.trim().parse::<f64>() {
            Ok(n) => {
                check_bounds(n, *min_value, *max_value, &mut errors);
                Value::Float(n)
            }
            Err(_) => {
                errors.push("Enter a number.".to_string());
                Value::Null
            }
        },

        FormFieldType::Decimal {
            min_value,
            max_value,
            max_digits,
            decimal_places,
        } => {
            let trimmed = raw_str.trim();
            match trimmed.parse::<f64>() {
                Ok(n) => {
                    // Validate digit counts
                    let mut parts = trimmed.trim_start_matches('-').splitn(2, '.');
                    let integer_digits = parts.next().map_or(0, str::len);
                    let actual_decimal_places = parts.next().map_or(0, str::len);
                    let total_digits = integer_digits + actual_decimal_places;

                    if let Some(max_digits) = max_digits {
                        if total_digits > *max_digits as usize {
                            errors.push(format!(
                                "Ensure that there are no more than {max_digits} digits in total."
                            ));
                        }
                    }
                    if let Some(decimal_places) = decimal_places {
                        if actual_decimal_places > *decimal_places as usize {
                            errors.push(format!(
                                "Ensure that there are no more than {decimal_places} decimal places."
                            ));
                        }
                    }
                    check_bounds(n, *min_value, *max_value, &mut errors);
                    Value::Float(n)
                }
                Err(_) => {
                    errors.push("Enter a number.".to_string());
                    Value::Null
                }
            }
        }

        FormFieldType::Boolean => {
            let val = matches!(raw_str.to_lowercase().as_str(), "true" | "1" | "yes" | "on");
            Value::Bool(val)
        }

        FormFieldType::DateTime => {
            // Try multiple formats
            let result = chrono::NaiveDateTime::parse_from_str(raw_str, "%Y-%m-%dT%H:%M:%S")
                .or_else(|_| chrono::NaiveDateTime::parse_from_str(raw_str, "%Y-%m-%dT%H:%M"))
                .or_else(|_| chrono::NaiveDateTime::parse_from_str(raw_str, "%Y-%m-%d %H:%M:%S"))
                .or_else(|_| chrono::NaiveDateTime::parse_from_str(raw_str, "%Y-%m-%d %H:%M"));
            match result {
                Ok(dt) => Value::DateTime(dt),
                Err(_) => {
                    errors.push("Enter a valid date/time.".to_string());
                    Value::Null
                }
            }
        }

        FormFieldType::Email {
            min_length,
            max_length,
        } => {
            let s = raw_str.trim();
            let email_re = EMAIL.get_or_init(|| {
                Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$").expect("valid regex")
            });
            check_length(s, *min_length, *max_length, &mut errors);
            if !email_re.is_match(s) {
                errors.push("Enter a valid email address.".to_string());
            }
            Value::String(s.to_string())
        }

        FormFieldType::Url {
            min_length,
            max_length,
        } => {
            let s = raw_str.trim();
            let url_re = URL
                .get_or_init(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").expect("valid regex"));
            check_length(s, *min_length, *max_length, &mut errors);
            if !url_re.is_match(s) {
                errors.push("Enter a valid URL.".to_string());
            }
            Value::String(s.to_string())
        }

        FormFieldType::File {
            max_size,
            allowed_extensions,
        } => {
            if let Some(max) = max_size {
                if raw_str.len() > *max {
                    errors.push(format!("File size exceeds maximum of {max} bytes."));
                }
            }
            if !allowed_extensions.is_empty() {
                let ext = file_extension(raw_str);
                if !allowed_extensions.iter().any(|e| e.to_lowercase() == ext) {
                    errors.push(format!(
                        "File extension not allowed. Allowed extensions: {}.",
                        allowed_extensions.join(", ")
                    ));
                }
            }
            Value::String(raw_str.to_string())
        }

        FormFieldType::Image => {
            let image_exts = ["jpg", "jpeg", "png", "gif", "bmp", "webp", "svg"];
            if !image_exts.contains(&file_extension(raw_str).as_str()) {
                errors.push(
                    "Upload a valid image. The file must have an image extension.".to_string(),
                );
            }
            Value::String(raw_str.to_string())
        }

        FormFieldType::TypedChoice { choices, coerce, .. } => {
            if !choices.iter().any(|(v, _)| v == raw_str) {
                errors.push(invalid_choice(field, raw_str));
                Value::Null
            } else if let Ok(v) = coerce(raw_str) {
                v
            } else {
                errors.push(invalid_choice(field, raw_str));
                Value::Null
            }
        }

        FormFieldType::Regex {
            regex,
            min_length,
            max_length,
        } => {
            let validator = RegexValidator::new(regex).map_err(|e| vec![e.to_string()])?;
            let value = Value::String(raw_str.to_string());
            check_length(raw_str, *min_length, *max_length, &mut errors);
            if let Err(e) = validator.validate(&value) {
                errors.push(validation_message(&e));
            }
            value
        }

        FormFieldType::Reference { queryset, .. } => {
            match ObjectId::parse_str(raw_str.trim()) {
                Ok(id) if queryset.get(&id).is_some() => Value::ObjectId(id),
                _ => {
                    errors.push(field.message("invalid_choice", || {
                        "Select a valid choice. That choice is not one of the available choices."
                            .to_string()
                    }));
                    Value::Null
                }
            }
        }

        FormFieldType::MultipleChoice { .. }
        | FormFieldType::DocumentMultipleChoice { .. }
        | FormFieldType::List { .. }
        | FormFieldType::Map { .. } => unreachable!("multi-valued types are cleaned above"),
    };

    finish(field, value, errors)
}

/// Returns the value an empty, optional submission cleans to.
fn empty_value(field_type: &FormFieldType) -> Value {
    match field_type {
        FormFieldType::Char { empty_value, .. } | FormFieldType::TypedChoice { empty_value, .. } => {
            empty_value.clone()
        }
        FormFieldType::MultipleChoice { .. }
        | FormFieldType::DocumentMultipleChoice { .. }
        | FormFieldType::List { .. } => Value::List(Vec::new()),
        FormFieldType::Map { .. } => Value::Map(BTreeMap::new()),
        _ => Value::Null,
    }
}

/// Runs custom validators on the cleaned value (only if no type errors so far).
fn finish(field: &FormFieldDef, value: Value, mut errors: Vec<String>) -> Result<Value, Vec<String>> {
    if errors.is_empty() {
        for validator in &field.validators {
            if let Err(e) = validator.validate(&value) {
                errors.push(validation_message(&e));
            }
        }
    }

    if errors.is_empty() {
        Ok(value)
    } else {
        Err(errors)
    }
}

fn clean_multiple_choice(
    field: &FormFieldDef,
    choices: &[(String, String)],
    items: &[String],
) -> Result<Value, Vec<String>> {
    if items.iter().all(String::is_empty) {
        if field.required {
            return Err(field.required_error());
        }
        return Ok(Value::List(Vec::new()));
    }

    let mut errors = Vec::new();
    let mut values = Vec::new();
    for item in items {
        if choices.iter().any(|(v, _)| v == item) {
            values.push(Value::String(item.clone()));
        } else {
            errors.push(invalid_choice(field, item));
        }
    }
    finish(field, Value::List(values), errors)
}

fn clean_document_multiple_choice(
    field: &FormFieldDef,
    queryset: &dyn QueryManager,
    items: &[String],
) -> Result<Value, Vec<String>> {
    if items.iter().all(String::is_empty) {
        if field.required {
            return Err(field.required_error());
        }
        return Ok(Value::List(Vec::new()));
    }

    let mut ids = Vec::with_capacity(items.len());
    for item in items {
        match ObjectId::parse_str(item.trim()) {
            Ok(id) => ids.push(id),
            Err(_) => return Err(vec![invalid_choice(field, item)]),
        }
    }

    let found = queryset.filter_in(&ids);
    if let Some(pos) = ids.iter().position(|id| !found.iter().any(|doc| doc.id == *id)) {
        return Err(vec![invalid_choice(field, &items[pos])]);
    }

    let value = Value::List(found.into_iter().map(|doc| Value::ObjectId(doc.id)).collect());
    finish(field, value, Vec::new())
}

/// Cleans list items with `item`. Only the first item inherits the list's
/// `required` flag; the rest are optional.
fn clean_list(
    field: &FormFieldDef,
    item: &FormFieldDef,
    items: &[String],
) -> Result<Value, Vec<String>> {
    if items.iter().all(String::is_empty) {
        if field.required {
            return Err(field.required_error());
        }
        return Ok(Value::List(Vec::new()));
    }

    let mut item_field = item.clone();
    item_field.required = field.required;

    let mut errors = Vec::new();
    let mut values = Vec::with_capacity(items.len());
    for raw in items {
        match clean_field_value(&item_field, Some(raw)) {
            Ok(v) => values.push(v),
            Err(e) => errors.extend(e),
        }
        item_field.required = false;
    }

    finish(field, Value::List(values), errors)
}

/// Cleans map entries: values with `value_field`, keys with the key length
/// constraints. Entries whose key and value are both empty are skipped.
fn clean_map(
    field: &FormFieldDef,
    value_field: &FormFieldDef,
    min_key_length: Option<usize>,
    max_key_length: Option<usize>,
    pairs: &[(String, String)],
) -> Result<Value, Vec<String>> {
    if pairs.iter().all(|(_, v)| v.is_empty()) {
        if field.required {
            return Err(field.required_error());
        }
        return Ok(Value::Map(BTreeMap::new()));
    }

    let mut key_validators: Vec<Box<dyn Validator>> = Vec::new();
    if let Some(min) = min_key_length {
        key_validators.push(Box::new(MinLengthValidator::new(min)));
    }
    if let Some(max) = max_key_length {
        key_validators.push(Box::new(MaxLengthValidator::new(max)));
    }

    let mut data_field = value_field.clone();
    data_field.required = field.required;

    let mut errors = Vec::new();
    let mut entries = BTreeMap::new();
    for (key, raw) in pairs {
        if key.is_empty() && raw.is_empty() {
            continue;
        }

        let cleaned = match clean_field_value(&data_field, Some(raw)) {
            Ok(v) => v,
            Err(e) => {
                errors.extend(e);
                Value::Null
            }
        };

        if key.is_empty() && field.required {
            errors.push(field.message("key_required", || "A key is required.".to_string()));
        } else {
            let key_value = Value::String(key.clone());
            for validator in &key_validators {
                if let Err(e) = validator.validate(&key_value) {
                    errors.push(validation_message(&e));
                }
            }
        }

        entries.insert(key.clone(), cleaned);
        data_field.required = false;
    }

    finish(field, Value::Map(entries), errors)
}

fn check_length(
    s: &str,
    min_length: Option<usize>,
    max_length: Option<usize>,
    errors: &mut Vec<String>,
) {
    let len = s.chars().count();
    if let Some(min) = min_length {
        if len < min {
            errors.push(format!(
                "Ensure this value has at least {min} characters (it has {len})."
            ));
        }
    }
    if let Some(max) = max_length {
        if len > max {
            errors.push(format!(
                "Ensure this value has at most {max} characters (it has {len})."
            ));
        }
    }
}

fn check_bounds(n: f64, min_value: Option<f64>, max_value: Option<f64>, errors: &mut Vec<String>) {
    if let Some(min) = min_value {
        if n < min {
            errors.push(format!("Ensure this value is greater than or equal to {min}."));
        }
    }
    if let Some(max) = max_value {
        if n > max {
            errors.push(format!("Ensure this value is less than or equal to {max}."));
        }
    }
}

fn invalid_choice(field: &FormFieldDef, value: &str) -> String {
    field.error_messages.get("invalid_choice").map_or_else(
        || format!("Select a valid choice. {value} is not one of the available choices."),
        |template| template.replace("%(value)s", value),
    )
}

fn validation_message(error: &FormsError) -> String {
    match error {
        FormsError::ValidationError(e) => e.message.clone(),
        other => other.to_string(),
    }
}

fn split_csv(raw: Option<&str>) -> Vec<String> {
    raw.filter(|s| !s.is_empty())
        .map(|s| s.split(',').map(|part| part.trim().to_string()).collect())
        .unwrap_or_default()
}

fn file_extension(name: &str) -> String {
    name.rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}
