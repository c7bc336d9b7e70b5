//! Choice lists and choice coercion.
//!
//! Typed choice fields submit strings; the coercion functions here turn a
//! submitted choice back into the descriptor's native type. Every coercion
//! maps empty input to [`Value::Null`].

use docforms_core::FormsError;
use docforms_document::{FieldDescriptor, Value};

/// Returns the descriptor's choices as submitted-value/label pairs,
/// optionally prefixed with a blank `("", blank_label)` entry.
///
/// # Examples
///
/// ```
/// use docforms_document::{FieldDescriptor, FieldKind};
/// use docforms_forms::choices::get_field_choices;
///
/// let size = FieldDescriptor::new("size", FieldKind::Int).choices([(1, "Small"), (2, "Large")]);
/// assert_eq!(
///     get_field_choices(&size, true, "---------"),
///     [
///         (String::new(), "---------".to_string()),
///         ("1".to_string(), "Small".to_string()),
///         ("2".to_string(), "Large".to_string()),
///     ]
/// );
/// ```
pub fn get_field_choices(
    descriptor: &FieldDescriptor,
    include_blank: bool,
    blank_label: &str,
) -> Vec<(String, String)> {
    let blank = include_blank.then(|| (String::new(), blank_label.to_string()));
    blank
        .into_iter()
        .chain(
            descriptor
                .choice_list()
                .iter()
                .map(|(value, label)| (value.to_form_string(), label.clone())),
        )
        .collect()
}

/// Coerces a submitted choice to a string.
pub fn coerce_string(raw: &str) -> Result<Value, FormsError> {
    if raw.is_empty() {
        return Ok(Value::Null);
    }
    Ok(Value::String(raw.to_string()))
}

/// Coerces a submitted choice to an integer.
pub fn coerce_integer(raw: &str) -> Result<Value, FormsError> {
    if raw.is_empty() {
        return Ok(Value::Null);
    }
    raw.trim()
        .parse::<i64>()
        .map(Value::Int)
        .map_err(|e| FormsError::InvalidValue(format!("'{raw}' is not an integer: {e}")))
}

/// Coerces a submitted choice to a boolean: `"true"` in any case is `true`,
/// anything else is `false`.
pub fn coerce_boolean(raw: &str) -> Result<Value, FormsError> {
    if raw.is_empty() {
        return Ok(Value::Null);
    }
    Ok(Value::Bool(raw.eq_ignore_ascii_case("true")))
}
