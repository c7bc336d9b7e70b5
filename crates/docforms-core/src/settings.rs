//! Settings for docforms.
//!
//! [`Settings`] holds the knobs that shape generated form fields: the blank
//! choice label, the empty label of reference selects, the kind alias table
//! used during handler resolution, and logging configuration. Every field has
//! a default so partial configuration files only need to name what changes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The label of the blank sentinel prepended to choice lists.
pub const BLANK_CHOICE_LABEL: &str = "---------";

/// The complete set of docforms settings.
///
/// # Examples
///
/// ```
/// use docforms_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.debug);
/// assert_eq!(settings.blank_choice_label, "---------");
/// assert_eq!(
///     settings.kind_aliases.get("sortedlistfield").map(String::as_str),
///     Some("listfield")
/// );
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // ── Core ─────────────────────────────────────────────────────────

    /// Whether debug mode is enabled (pretty logs instead of JSON).
    pub debug: bool,

    // ── Logging ──────────────────────────────────────────────────────

    /// The log level or `EnvFilter` directive (e.g. "info", "docforms=debug").
    pub log_level: String,
    /// Whether the lenient generator logs a warning when it falls back to a
    /// plain text field.
    pub warn_on_fallback: bool,

    // ── Choices ──────────────────────────────────────────────────────

    /// Label of the blank `("", label)` pair prefixed to choice lists.
    pub blank_choice_label: String,
    /// Label of the empty option offered by single reference selects.
    pub reference_empty_label: String,

    // ── Resolution ───────────────────────────────────────────────────

    /// Kind names (lowercase) that should be handled by another kind's
    /// handler, e.g. `sortedlistfield -> listfield`.
    pub kind_aliases: BTreeMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        let mut kind_aliases = BTreeMap::new();
        kind_aliases.insert("sortedlistfield".to_string(), "listfield".to_string());

        Self {
            debug: true,
            log_level: "info".to_string(),
            warn_on_fallback: true,
            blank_choice_label: BLANK_CHOICE_LABEL.to_string(),
            reference_empty_label: BLANK_CHOICE_LABEL.to_string(),
            kind_aliases,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let s = Settings::default();
        assert!(s.debug);
        assert_eq!(s.log_level, "info");
        assert!(s.warn_on_fallback);
        assert_eq!(s.blank_choice_label, "---------");
        assert_eq!(s.reference_empty_label, "---------");
    }

    #[test]
    fn test_default_kind_aliases() {
        let s = Settings::default();
        assert_eq!(s.kind_aliases.len(), 1);
        assert_eq!(s.kind_aliases["sortedlistfield"], "listfield");
    }

    #[test]
    fn test_settings_serde_round_trip_keeps_aliases() {
        let mut s = Settings::default();
        s.kind_aliases
            .insert("taglistfield".to_string(), "listfield".to_string());
        let json = serde_json::to_value(&s).unwrap();
        let back: Settings = serde_json::from_value(json).unwrap();
        assert_eq!(back.kind_aliases.len(), 2);
        assert_eq!(back.kind_aliases["taglistfield"], "listfield");
    }
}
