//! String utility functions.
//!
//! These mirror the Django text helpers used when deriving labels and help
//! texts: `capfirst`, Python's `str.capitalize`, and the verbose-name
//! derivation applied to attribute names.

use regex::Regex;
use std::sync::OnceLock;

/// Capitalizes the first character of a string, leaving the rest untouched.
///
/// # Examples
///
/// ```
/// use docforms_core::utils::text::capfirst;
///
/// assert_eq!(capfirst("hello"), "Hello");
/// assert_eq!(capfirst(""), "");
/// assert_eq!(capfirst("HELLO"), "HELLO");
/// ```
pub fn capfirst(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |c| {
        let mut result = c.to_uppercase().to_string();
        result.extend(chars);
        result
    })
}

/// Uppercases the first character and lowercases the rest.
///
/// # Examples
///
/// ```
/// use docforms_core::utils::text::capitalize;
///
/// assert_eq!(capitalize("enter YOUR name"), "Enter your name");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |c| {
        let mut result = c.to_uppercase().to_string();
        result.extend(chars.flat_map(char::to_lowercase));
        result
    })
}

/// Derives a lowercase, space-separated verbose name from an identifier.
///
/// CamelCase boundaries and underscores become spaces, so `createdAt`,
/// `created_at` and `CreatedAt` all produce `"created at"`. Runs of capitals
/// are kept together (`HTTPStatus` gives `"http status"`).
///
/// # Examples
///
/// ```
/// use docforms_core::utils::text::verbose_name;
///
/// assert_eq!(verbose_name("first_name"), "first name");
/// assert_eq!(verbose_name("BlogPost"), "blog post");
/// ```
pub fn verbose_name(identifier: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    let whitespace = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"));

    let chars: Vec<char> = identifier.chars().collect();
    let mut spaced = String::with_capacity(identifier.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let after_lower = i > 0 && chars[i - 1].is_lowercase();
            let starts_word = chars.get(i + 1).is_some_and(|next| !next.is_uppercase());
            if after_lower || starts_word {
                spaced.push(' ');
            }
        }
        spaced.push(if c == '_' { ' ' } else { c });
    }

    let lowered = spaced.to_lowercase();
    whitespace.replace_all(lowered.trim(), " ").into_owned()
}
