//! Instrumented caching facade over an external key-value store.
//!
//! `Cache` writes values under fresh random keys and reads them back with
//! optional decoding. Writes pass through a decorator chain that counts
//! invocations and records per-call input/output history in the same store;
//! the `replay` module reads that history back.

pub mod cache;
pub mod error;
pub mod instrument;
pub mod replay;
pub mod value;

pub use cache::{Cache, STORE_OP};
pub use error::CacheError;
pub use instrument::{CountCalls, OpIdentity, Operation, RecordHistory, Recorded};
pub use replay::{CallRecord, call_count, history, replay};
pub use value::Value;

#[cfg(test)]
mod tests;
