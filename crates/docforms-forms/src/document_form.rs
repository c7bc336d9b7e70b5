//! Document-backed forms that generate their fields from document metadata.
//!
//! [`DocumentFormConfig`] specifies how to build form fields from a
//! document's [`DocumentMeta`]. The [`fields_for_document`] function runs
//! every selected descriptor through a [`FormFieldGenerator`] and applies the
//! configured widget, label, and help-text overrides.

use std::collections::HashMap;

use docforms_core::logging::document_span;
use docforms_core::FormsResult;
use docforms_document::DocumentMeta;

use crate::fields::FormFieldDef;
use crate::generator::{FieldOverrides, FormFieldGenerator};
use crate::widgets::WidgetType;

/// Configuration for generating a document-backed form.
///
/// Specifies which document fields to include/exclude and allows overriding
/// widgets, labels, and help texts for the generated form fields.
#[derive(Debug, Clone)]
pub struct DocumentFormConfig {
    /// The document metadata to generate fields from.
    pub meta: DocumentMeta,
    /// Which document fields to include in the form.
    pub fields: DocumentFormFields,
    /// Widget overrides keyed by field name.
    pub widgets: HashMap<String, WidgetType>,
    /// Label overrides keyed by field name.
    pub labels: HashMap<String, String>,
    /// Help text overrides keyed by field name.
    pub help_texts: HashMap<String, String>,
}

/// Specifies which document fields to include in a form.
#[derive(Debug, Clone, Default)]
pub enum DocumentFormFields {
    /// Include every named field.
    #[default]
    All,
    /// Include only the specified fields, in the given order.
    Include(Vec<String>),
    /// Include all fields except the specified ones.
    Exclude(Vec<String>),
}

impl DocumentFormConfig {
    /// Creates a new `DocumentFormConfig` with all fields included.
    pub fn new(meta: DocumentMeta) -> Self {
        Self {
            meta,
            fields: DocumentFormFields::All,
            widgets: HashMap::new(),
            labels: HashMap::new(),
            help_texts: HashMap::new(),
        }
    }

    /// Sets which fields to include.
    #[must_use]
    pub fn with_fields(mut self, fields: DocumentFormFields) -> Self {
        self.fields = fields;
        self
    }

    /// Adds a widget override for a specific field.
    #[must_use]
    pub fn with_widget(mut self, field_name: impl Into<String>, widget: WidgetType) -> Self {
        self.widgets.insert(field_name.into(), widget);
        self
    }

    /// Adds a label override for a specific field.
    #[must_use]
    pub fn with_label(mut self, field_name: impl Into<String>, label: impl Into<String>) -> Self {
        self.labels.insert(field_name.into(), label.into());
        self
    }

    /// Adds a help text override for a specific field.
    #[must_use]
    pub fn with_help_text(
        mut self,
        field_name: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.help_texts.insert(field_name.into(), text.into());
        self
    }

    /// Returns the overrides configured for `field_name`.
    fn overrides_for(&self, field_name: &str) -> FieldOverrides {
        FieldOverrides {
            label: self.labels.get(field_name).cloned(),
            help_text: self.help_texts.get(field_name).cloned(),
            widget: self.widgets.get(field_name).cloned(),
            ..FieldOverrides::default()
        }
    }

    fn selected_names(&self) -> Vec<&str> {
        let names = self.meta.field_names();
        match &self.fields {
            DocumentFormFields::All => names,
            DocumentFormFields::Include(include) => include
                .iter()
                .map(String::as_str)
                .filter(|name| names.contains(name))
                .collect(),
            DocumentFormFields::Exclude(exclude) => names
                .into_iter()
                .filter(|name| !exclude.iter().any(|e| e == name))
                .collect(),
        }
    }
}

/// Generates form field definitions for a document form configuration.
///
/// Fields are produced in declaration order (or, for
/// [`DocumentFormFields::Include`], in the listed order). Names listed in
/// `Include` that the document does not declare are ignored. The first
/// generator error aborts generation.
///
/// # Examples
///
/// ```
/// use docforms_document::{DocumentMeta, FieldDescriptor, FieldKind};
/// use docforms_forms::document_form::{fields_for_document, DocumentFormConfig};
/// use docforms_forms::generator::MongoDefaultFormFieldGenerator;
///
/// let meta = DocumentMeta::new("Post")
///     .field(FieldDescriptor::new("title", FieldKind::String).max_length(200))
///     .field(FieldDescriptor::new("location", FieldKind::GeoPoint));
/// let config = DocumentFormConfig::new(meta).with_label("title", "Headline");
///
/// let fields = fields_for_document(&config, &MongoDefaultFormFieldGenerator::default()).unwrap();
/// assert_eq!(fields.len(), 2);
/// assert_eq!(fields[0].label, "Headline");
/// ```
pub fn fields_for_document(
    config: &DocumentFormConfig,
    generator: &dyn FormFieldGenerator,
) -> FormsResult<Vec<FormFieldDef>> {
    let span = document_span(&config.meta.name);
    let _guard = span.enter();

    let mut form_fields = Vec::new();
    for name in config.selected_names() {
        let Some(descriptor) = config.meta.get_field(name) else {
            continue;
        };
        let field = generator.generate(descriptor, &config.overrides_for(name))?;
        form_fields.push(field);
    }

    tracing::debug!(count = form_fields.len(), "generated document form fields");
    Ok(form_fields)
}
