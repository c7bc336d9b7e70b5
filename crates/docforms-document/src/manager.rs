//! Query managers for referenced documents.
//!
//! Reference form fields never talk to a store directly. They are bound to a
//! [`QueryManager`], the collection-level accessor of the referenced document
//! type, and use it to list choices and to resolve submitted ids.
//!
//! [`DocumentType`] pairs a document class name with its manager and is what
//! reference descriptors point at. [`InMemoryManager`] is a ready-made manager
//! over a fixed set of documents.

use std::fmt;
use std::sync::Arc;

use crate::object_id::ObjectId;

/// A lightweight handle to a stored document: its id and display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    /// The document's primary key.
    pub id: ObjectId,
    /// Human-readable label shown in selects.
    pub label: String,
}

impl DocumentRef {
    /// Creates a new `DocumentRef`.
    pub fn new(id: ObjectId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

/// Collection-level access to the documents of one type.
///
/// This is the seam between generated reference fields and the document
/// store. Implementations must be cheap to share behind an `Arc`.
pub trait QueryManager: Send + Sync + fmt::Debug {
    /// The name of the collection this manager reads.
    fn collection(&self) -> &str;

    /// Returns every document in the collection, in display order.
    fn all(&self) -> Vec<DocumentRef>;

    /// Looks up a single document by id.
    fn get(&self, id: &ObjectId) -> Option<DocumentRef>;

    /// Returns the documents whose id is in `ids`, in collection order.
    fn filter_in(&self, ids: &[ObjectId]) -> Vec<DocumentRef> {
        self.all()
            .into_iter()
            .filter(|doc| ids.contains(&doc.id))
            .collect()
    }

    /// Returns the number of documents in the collection.
    fn count(&self) -> usize {
        self.all().len()
    }
}

/// A referenced document class together with its query manager.
///
/// Cloning is cheap; clones share the same manager.
#[derive(Debug, Clone)]
pub struct DocumentType {
    /// The document class name (e.g. "Author").
    pub name: String,
    /// The collection accessor (the document class's `objects`).
    pub objects: Arc<dyn QueryManager>,
}

impl DocumentType {
    /// Creates a new `DocumentType`.
    pub fn new(name: impl Into<String>, objects: Arc<dyn QueryManager>) -> Self {
        Self {
            name: name.into(),
            objects,
        }
    }

    /// Returns `true` if both handles share the same query manager.
    pub fn same_manager(&self, other: &Arc<dyn QueryManager>) -> bool {
        Arc::ptr_eq(&self.objects, other)
    }
}

/// A [`QueryManager`] over a fixed, in-memory list of documents.
///
/// # Examples
///
/// ```
/// use docforms_document::manager::{InMemoryManager, QueryManager};
/// use docforms_document::ObjectId;
///
/// let id = ObjectId::from_bytes([1; 12]);
/// let authors = InMemoryManager::new("author").with_document(id, "Ursula");
/// assert_eq!(authors.get(&id).map(|d| d.label), Some("Ursula".to_string()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryManager {
    collection: String,
    documents: Vec<DocumentRef>,
}

impl InMemoryManager {
    /// Creates an empty manager for `collection`.
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            documents: Vec::new(),
        }
    }

    /// Adds a document.
    #[must_use]
    pub fn with_document(mut self, id: ObjectId, label: impl Into<String>) -> Self {
        self.documents.push(DocumentRef::new(id, label));
        self
    }

    /// Wraps this manager in a [`DocumentType`] named `name`.
    pub fn into_document_type(self, name: impl Into<String>) -> DocumentType {
        DocumentType::new(name, Arc::new(self))
    }
}

impl QueryManager for InMemoryManager {
    fn collection(&self) -> &str {
        &self.collection
    }

    fn all(&self) -> Vec<DocumentRef> {
        self.documents.clone()
    }

    fn get(&self, id: &ObjectId) -> Option<DocumentRef> {
        self.documents.iter().find(|doc| &doc.id == id).cloned()
    }

    fn count(&self) -> usize {
        self.documents.len()
    }
}
