//! In-memory document collection for testing.

use std::sync::{Arc, Mutex};

use serde_json::Value;
use uuid::Uuid;

use crate::collection::{Collection, Document, matches};
use crate::error::DocError;

/// An in-memory document collection backed by a Vec, preserving insertion
/// order the way a real collection scan does.
#[derive(Clone, Default)]
pub struct MemoryCollection {
    docs: Arc<Mutex<Vec<Document>>>,
}

impl MemoryCollection {
    /// Create a new empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Document>>, DocError> {
        self.docs.lock().map_err(|e| DocError::Storage(e.to_string()))
    }
}

impl Collection for MemoryCollection {
    fn insert(&self, mut doc: Document) -> Result<String, DocError> {
        let id = Uuid::new_v4().to_string();
        doc.insert("_id".to_string(), Value::String(id.clone()));
        self.lock()?.push(doc);
        Ok(id)
    }

    fn find(&self, filter: &Document) -> Result<Vec<Document>, DocError> {
        let docs = self.lock()?;
        Ok(docs
            .iter()
            .filter(|doc| matches(doc, filter))
            .cloned()
            .collect())
    }

    fn update_many(&self, filter: &Document, fields: &Document) -> Result<u64, DocError> {
        let mut docs = self.lock()?;
        let mut updated = 0;
        for doc in docs.iter_mut().filter(|doc| matches(doc, filter)) {
            for (field, value) in fields {
                doc.insert(field.clone(), value.clone());
            }
            updated += 1;
        }
        Ok(updated)
    }
}
