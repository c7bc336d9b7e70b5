//! Widget hints and submitted-data extraction.
//!
//! Widgets are the bridge between form fields and submitted form data. A
//! [`WidgetType`] names the input a field should be presented with and knows
//! how to pull that field's raw value out of [`FormData`], including the
//! indexed sub-inputs of the composite list and map widgets.
//!
//! Markup generation is left to the presentation layer.

use std::fmt;

use docforms_core::FormData;

/// Enumerates all built-in widget types.
///
/// Each leaf variant corresponds to a distinct form input. [`List`](Self::List)
/// and [`Map`](Self::Map) are composite widgets that repeat an inner widget
/// for every item (and, for maps, pair it with a key text input).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetType {
    /// `<input type="text">`.
    TextInput,
    /// `<input type="number">`.
    NumberInput,
    /// `<input type="email">`.
    EmailInput,
    /// `<input type="url">`.
    UrlInput,
    /// `<input type="hidden">`.
    HiddenInput,
    /// `<textarea>`.
    Textarea,
    /// `<input type="checkbox">`.
    CheckboxInput,
    /// `<select>`.
    Select,
    /// `<select multiple>`.
    SelectMultiple,
    /// A set of `<input type="radio">` elements.
    RadioSelect,
    /// A set of `<input type="checkbox">` elements.
    CheckboxSelectMultiple,
    /// `<input type="date">`.
    DateInput,
    /// `<input type="datetime-local">`.
    DateTimeInput,
    /// `<input type="file">`.
    FileInput,
    /// `<input type="file">` with a clear checkbox.
    ClearableFileInput,
    /// One inner widget per list item, named `{name}_0`, `{name}_1`, ...
    List(Box<WidgetType>),
    /// One key input and one inner widget per entry, named
    /// `{name}_key_{i}` and `{name}_value_{i}`.
    Map(Box<WidgetType>),
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TextInput => "TextInput",
            Self::NumberInput => "NumberInput",
            Self::EmailInput => "EmailInput",
            Self::UrlInput => "UrlInput",
            Self::HiddenInput => "HiddenInput",
            Self::Textarea => "Textarea",
            Self::CheckboxInput => "CheckboxInput",
            Self::Select => "Select",
            Self::SelectMultiple => "SelectMultiple",
            Self::RadioSelect => "RadioSelect",
            Self::CheckboxSelectMultiple => "CheckboxSelectMultiple",
            Self::DateInput => "DateInput",
            Self::DateTimeInput => "DateTimeInput",
            Self::FileInput => "FileInput",
            Self::ClearableFileInput => "ClearableFileInput",
            Self::List(inner) => return write!(f, "ListWidget({inner})"),
            Self::Map(inner) => return write!(f, "MapWidget({inner})"),
        };
        write!(f, "{name}")
    }
}

/// The raw value a widget extracted from submitted data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetValue {
    /// A single input; `None` if nothing was submitted under the name.
    Single(Option<String>),
    /// Multiple values: a multi-select or the non-empty items of a list.
    Multiple(Vec<String>),
    /// Key/value pairs of a map widget, in submission order.
    Pairs(Vec<(String, String)>),
}

impl WidgetValue {
    /// Returns `true` if nothing (or only empty strings) was submitted.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(value) => value.as_deref().map_or(true, str::is_empty),
            Self::Multiple(values) => values.iter().all(String::is_empty),
            Self::Pairs(pairs) => pairs.iter().all(|(_, v)| v.is_empty()),
        }
    }
}

impl WidgetType {
    /// Returns `true` for widgets that submit several values under one name.
    pub const fn is_multiple(&self) -> bool {
        matches!(self, Self::SelectMultiple | Self::CheckboxSelectMultiple)
    }

    /// Extracts this widget's raw value for field `name` from `data`.
    ///
    /// List widgets read `{name}_0`, `{name}_1`, ... up to the first missing
    /// index and drop empty items. Map widgets read `{name}_key_{i}` and
    /// `{name}_value_{i}` the same way and drop entries with an empty key.
    pub fn value_from_data(&self, data: &FormData, name: &str) -> WidgetValue {
        match self {
            Self::SelectMultiple | Self::CheckboxSelectMultiple => {
                WidgetValue::Multiple(data.get_list(name).to_vec())
            }
            Self::ClearableFileInput => {
                if data.contains_key(&format!("{name}-clear")) {
                    WidgetValue::Single(Some(String::new()))
                } else {
                    WidgetValue::Single(data.get(name).map(String::from))
                }
            }
            Self::List(inner) => {
                let mut items = Vec::new();
                let mut i = 0;
                loop {
                    let item_name = format!("{name}_{i}");
                    if !data.contains_key(&item_name) {
                        break;
                    }
                    match inner.value_from_data(data, &item_name) {
                        WidgetValue::Single(Some(item)) if !item.is_empty() => items.push(item),
                        WidgetValue::Multiple(values) => {
                            items.extend(values.into_iter().filter(|v| !v.is_empty()));
                        }
                        _ => {}
                    }
                    i += 1;
                }
                WidgetValue::Multiple(items)
            }
            Self::Map(_) => {
                let mut pairs: Vec<(String, String)> = Vec::new();
                let mut i = 0;
                loop {
                    let key_name = format!("{name}_key_{i}");
                    let Some(key) = data.get(&key_name) else {
                        break;
                    };
                    if !key.is_empty() {
                        let value = data
                            .get(&format!("{name}_value_{i}"))
                            .unwrap_or_default()
                            .to_string();
                        // A repeated key replaces the earlier entry.
                        pairs.retain(|(k, _)| k != key);
                        pairs.push((key.to_string(), value));
                    }
                    i += 1;
                }
                WidgetValue::Pairs(pairs)
            }
            _ => WidgetValue::Single(data.get(name).map(String::from)),
        }
    }

    /// Returns the `id` a label for this widget should point at.
    ///
    /// Widgets made of several inputs point at the first one.
    pub fn id_for_label(&self, id: &str) -> String {
        match self {
            Self::RadioSelect | Self::CheckboxSelectMultiple | Self::List(_) | Self::Map(_)
                if !id.is_empty() =>
            {
                format!("{id}_0")
            }
            _ => id.to_string(),
        }
    }
}
