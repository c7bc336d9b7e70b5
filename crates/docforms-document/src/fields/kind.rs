//! Descriptor kinds.
//!
//! [`FieldKind`] is the declared type of a document attribute. Each variant
//! corresponds to a field class of the document mapper, and kinds that wrap
//! another field (lists, maps) or point at another document (references)
//! carry that payload directly.
//!
//! Kinds also expose their class name and ancestor chain so that form-field
//! handlers can be resolved by name with ancestor fallback, the same way a
//! subclass of `StringField` is handled like a `StringField`.

use super::descriptor::FieldDescriptor;
use crate::manager::DocumentType;

/// Root of every field class hierarchy. Never handled directly.
const BASE_FIELD: &str = "BaseField";
/// Common ancestor of container kinds.
const COMPLEX_BASE_FIELD: &str = "ComplexBaseField";

/// The declared type of a document attribute.
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// Unicode string.
    String,
    /// Email address (a string subclass).
    Email,
    /// URL (a string subclass).
    Url,
    /// 32/64-bit integer.
    Int,
    /// Floating-point number.
    Float,
    /// Fixed-precision decimal.
    Decimal,
    /// Boolean.
    Boolean,
    /// Date and time.
    DateTime,
    /// Date and time stored as a formatted string (a string subclass).
    ComplexDateTime,
    /// Raw object id.
    ObjectId,
    /// UUID.
    Uuid,
    /// Reference to a document of another collection.
    Reference {
        /// The referenced document type.
        document: DocumentType,
    },
    /// Reference to a document of any collection.
    GenericReference,
    /// A document embedded in its parent.
    EmbeddedDocument {
        /// The embedded document class name.
        document: String,
    },
    /// Homogeneous list.
    List {
        /// Descriptor of the list elements.
        field: Box<FieldDescriptor>,
    },
    /// List kept sorted on save (a list subclass).
    SortedList {
        /// Descriptor of the list elements.
        field: Box<FieldDescriptor>,
    },
    /// Free-form dictionary.
    Dict,
    /// String-keyed map with homogeneous values (a dict subclass).
    Map {
        /// Descriptor of the map values.
        field: Box<FieldDescriptor>,
    },
    /// Stored file.
    File,
    /// Stored image (a file subclass).
    Image,
    /// Raw binary data.
    Binary,
    /// Geographic point.
    GeoPoint,
    /// A user-defined field class extending another kind.
    Custom {
        /// The class name (e.g. "SlugField").
        name: String,
        /// The kind this class extends.
        base: Box<FieldKind>,
    },
}

impl FieldKind {
    /// Creates a list kind from its element descriptor.
    pub fn list(field: FieldDescriptor) -> Self {
        Self::List {
            field: Box::new(field),
        }
    }

    /// Creates a sorted-list kind from its element descriptor.
    pub fn sorted_list(field: FieldDescriptor) -> Self {
        Self::SortedList {
            field: Box::new(field),
        }
    }

    /// Creates a map kind from its value descriptor.
    pub fn map(field: FieldDescriptor) -> Self {
        Self::Map {
            field: Box::new(field),
        }
    }

    /// Creates a reference kind.
    pub fn reference(document: DocumentType) -> Self {
        Self::Reference { document }
    }

    /// Creates a user-defined kind named `name` extending `base`.
    pub fn custom(name: impl Into<String>, base: Self) -> Self {
        Self::Custom {
            name: name.into(),
            base: Box::new(base),
        }
    }

    /// Returns the field class name of this kind.
    pub fn kind_name(&self) -> &str {
        match self {
            Self::String => "StringField",
            Self::Email => "EmailField",
            Self::Url => "URLField",
            Self::Int => "IntField",
            Self::Float => "FloatField",
            Self::Decimal => "DecimalField",
            Self::Boolean => "BooleanField",
            Self::DateTime => "DateTimeField",
            Self::ComplexDateTime => "ComplexDateTimeField",
            Self::ObjectId => "ObjectIdField",
            Self::Uuid => "UUIDField",
            Self::Reference { .. } => "ReferenceField",
            Self::GenericReference => "GenericReferenceField",
            Self::EmbeddedDocument { .. } => "EmbeddedDocumentField",
            Self::List { .. } => "ListField",
            Self::SortedList { .. } => "SortedListField",
            Self::Dict => "DictField",
            Self::Map { .. } => "MapField",
            Self::File => "FileField",
            Self::Image => "ImageField",
            Self::Binary => "BinaryField",
            Self::GeoPoint => "GeoPointField",
            Self::Custom { name, .. } => name.as_str(),
        }
    }

    /// Returns the ancestor class names, nearest first.
    ///
    /// # Examples
    ///
    /// ```
    /// use docforms_document::FieldKind;
    ///
    /// assert_eq!(FieldKind::Email.ancestors(), ["StringField", "BaseField"]);
    ///
    /// let slug = FieldKind::custom("SlugField", FieldKind::String);
    /// assert_eq!(slug.ancestors(), ["StringField", "BaseField"]);
    /// ```
    pub fn ancestors(&self) -> Vec<&str> {
        match self {
            Self::Email | Self::Url | Self::ComplexDateTime => vec!["StringField", BASE_FIELD],
            Self::List { .. } | Self::Dict => vec![COMPLEX_BASE_FIELD, BASE_FIELD],
            Self::SortedList { .. } => vec!["ListField", COMPLEX_BASE_FIELD, BASE_FIELD],
            Self::Map { .. } => vec!["DictField", COMPLEX_BASE_FIELD, BASE_FIELD],
            Self::Image => vec!["FileField", BASE_FIELD],
            Self::Custom { base, .. } => {
                let mut chain = vec![base.kind_name()];
                chain.extend(base.ancestors());
                chain
            }
            _ => vec![BASE_FIELD],
        }
    }

    /// Returns the element descriptor of list and map kinds.
    pub fn element(&self) -> Option<&FieldDescriptor> {
        match self {
            Self::List { field } | Self::SortedList { field } | Self::Map { field } => {
                Some(field.as_ref())
            }
            Self::Custom { base, .. } => base.element(),
            _ => None,
        }
    }

    /// Returns the referenced document type of reference kinds.
    pub fn document(&self) -> Option<&DocumentType> {
        match self {
            Self::Reference { document } => Some(document),
            Self::Custom { base, .. } => base.document(),
            _ => None,
        }
    }

    /// Returns `true` if this kind is, or extends, a reference.
    pub fn is_reference(&self) -> bool {
        self.document().is_some()
    }

    /// Returns `true` if this kind is, or extends, an embedded document.
    pub fn is_embedded_document(&self) -> bool {
        match self {
            Self::EmbeddedDocument { .. } => true,
            Self::Custom { base, .. } => base.is_embedded_document(),
            _ => false,
        }
    }
}
