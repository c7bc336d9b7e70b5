//! Utility types and functions for docforms.
//!
//! This module provides:
//! - [`FormData`]: submitted form data, holding one or more values per key.
//! - [`text`]: String helpers for labels and help texts.

mod form_data;
pub mod text;

pub use form_data::FormData;
