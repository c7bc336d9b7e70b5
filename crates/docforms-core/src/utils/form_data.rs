//! Submitted form data.
//!
//! [`FormData`] mirrors Django's `QueryDict`/`MultiValueDict`: a key may be
//! submitted several times (multi-selects, checkbox groups), so every key maps
//! to a list of raw string values.

use std::collections::HashMap;

/// Raw submitted values keyed by HTML field name.
///
/// [`get`](FormData::get) returns the **last** value for a key (matching
/// Django's behavior), while [`get_list`](FormData::get_list) returns all
/// values in submission order.
///
/// # Examples
///
/// ```
/// use docforms_core::utils::FormData;
///
/// let data = FormData::from_pairs([("tags", "rust"), ("tags", "forms")]);
/// assert_eq!(data.get("tags"), Some("forms"));
/// assert_eq!(data.get_list("tags"), ["rust", "forms"]);
/// assert!(data.get_list("missing").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    inner: HashMap<String, Vec<String>>,
}

impl FormData {
    /// Creates empty form data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds form data from `(name, value)` pairs, appending repeated names.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut data = Self::new();
        for (key, value) in pairs {
            data.append(key, value);
        }
        data
    }

    /// Returns the last value submitted under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner
            .get(key)
            .and_then(|values| values.last())
            .map(String::as_str)
    }

    /// Returns every value submitted under `key` (empty if absent).
    pub fn get_list(&self, key: &str) -> &[String] {
        self.inner.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Replaces all values for `key` with a single value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.insert(key.into(), vec![value.into()]);
    }

    /// Appends a value under `key`.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.entry(key.into()).or_default().push(value.into());
    }

    /// Returns `true` if `key` was submitted at all (even with an empty value).
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Returns the number of distinct keys.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if nothing was submitted.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns an iterator over the submitted keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}
