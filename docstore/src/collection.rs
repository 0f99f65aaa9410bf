use std::collections::HashMap;

use serde_json::Value;

use crate::error::DocError;

/// A document: named fields with JSON-compatible values.
pub type Document = HashMap<String, Value>;

/// A collection of documents in an external document store.
///
/// Filter semantics follow the usual document-database convention: a filter
/// field matches a document field that equals it, or an array field that
/// contains it. An empty filter matches every document.
///
/// All implementations must be safe for concurrent use (Send + Sync).
pub trait Collection: Send + Sync {
    /// Insert a document, assigning it a fresh `_id`. Returns the new
    /// identifier.
    fn insert(&self, doc: Document) -> Result<String, DocError>;

    /// Return all documents matching `filter`, in insertion order.
    fn find(&self, filter: &Document) -> Result<Vec<Document>, DocError>;

    /// Set `fields` on every document matching `filter` (field-level merge:
    /// listed fields are overwritten or added, others left unchanged).
    /// Returns the number of matched documents.
    fn update_many(&self, filter: &Document, fields: &Document) -> Result<u64, DocError>;
}

/// Whether a document field satisfies a filter field: equality, or array
/// containment when the document field is an array.
pub(crate) fn field_matches(doc_value: &Value, filter_value: &Value) -> bool {
    if doc_value == filter_value {
        return true;
    }
    matches!(doc_value, Value::Array(items) if items.contains(filter_value))
}

/// Whether a document satisfies every field of a filter.
pub(crate) fn matches(doc: &Document, filter: &Document) -> bool {
    filter.iter().all(|(field, expected)| {
        doc.get(field)
            .is_some_and(|actual| field_matches(actual, expected))
    })
}
