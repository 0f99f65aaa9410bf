//! Document-store interface and school collection helpers.
//!
//! A thin trait seam over an external document database (insert, filtered
//! find, multi-document update) plus the handful of school-collection
//! helpers built on it. Ships an in-memory collection for tests; the real
//! document database stays an external dependency.

pub mod collection;
pub mod error;
pub mod memory;
pub mod schools;

pub use collection::{Collection, Document};
pub use error::DocError;
pub use memory::MemoryCollection;
pub use schools::{insert_school, list_all, schools_by_topic, update_topics};
