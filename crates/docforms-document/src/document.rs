//! Document class metadata.
//!
//! [`DocumentMeta`] is the declared shape of a document class: its name,
//! collection, and the ordered list of attribute descriptors. Document forms
//! are built from it one descriptor at a time.

use crate::fields::FieldDescriptor;

/// Metadata for a document class.
///
/// # Examples
///
/// ```
/// use docforms_document::{DocumentMeta, FieldDescriptor, FieldKind};
///
/// let meta = DocumentMeta::new("BlogPost")
///     .field(FieldDescriptor::new("title", FieldKind::String).required())
///     .field(FieldDescriptor::new("views", FieldKind::Int));
/// assert_eq!(meta.collection, "blog_post");
/// assert_eq!(meta.field_names(), ["title", "views"]);
/// ```
#[derive(Debug, Clone)]
pub struct DocumentMeta {
    /// The document class name (e.g. "BlogPost").
    pub name: String,
    /// The collection storing documents of this class.
    pub collection: String,
    /// Attribute descriptors, in declaration order.
    pub fields: Vec<FieldDescriptor>,
}

impl DocumentMeta {
    /// Creates metadata for `name` with the default collection name: the
    /// class name in snake case.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let collection = default_collection_name(&name);
        Self {
            name,
            collection,
            fields: Vec::new(),
        }
    }

    /// Overrides the collection name.
    #[must_use]
    pub fn collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Appends an attribute descriptor.
    #[must_use]
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Looks up a descriptor by attribute name.
    pub fn get_field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields
            .iter()
            .find(|f| f.name.as_deref() == Some(name))
    }

    /// Returns the attribute names in declaration order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().filter_map(|f| f.name.as_deref()).collect()
    }
}

fn default_collection_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
