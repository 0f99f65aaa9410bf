//! Helpers over a school collection.

use serde_json::Value;

use crate::collection::{Collection, Document};
use crate::error::DocError;

/// All documents in the collection; empty when no collection handle is
/// given.
pub fn list_all(coll: Option<&dyn Collection>) -> Result<Vec<Document>, DocError> {
    match coll {
        Some(coll) => coll.find(&Document::new()),
        None => Ok(Vec::new()),
    }
}

/// Insert a school document built from arbitrary named fields, returning
/// the new identifier.
pub fn insert_school(coll: &dyn Collection, fields: Document) -> Result<String, DocError> {
    coll.insert(fields)
}

/// Schools whose `topics` field contains `topic`.
pub fn schools_by_topic(coll: &dyn Collection, topic: &str) -> Result<Vec<Document>, DocError> {
    let filter = Document::from([("topics".to_string(), Value::String(topic.to_string()))]);
    coll.find(&filter)
}

/// Set the `topics` field to `topics` on every school whose `name` matches.
/// Returns the number of schools updated.
pub fn update_topics(coll: &dyn Collection, name: &str, topics: &[String]) -> Result<u64, DocError> {
    let filter = Document::from([("name".to_string(), Value::String(name.to_string()))]);
    let fields = Document::from([(
        "topics".to_string(),
        Value::Array(topics.iter().cloned().map(Value::String).collect()),
    )]);
    coll.update_many(&filter, &fields)
}
