//! Key-value store interface and implementations.
//!
//! Provides a trait-based KV store interface covering the handful of
//! primitives the instrumented cache needs: plain set/get, an atomic
//! counter, atomic list append, list reads, and a full flush. Ships an
//! in-memory implementation for testing and a Redis-backed implementation
//! for real deployments.

pub mod memory;
pub mod redis;

use std::fmt;
use thiserror::Error;

/// Errors that can occur in KV store operations.
#[derive(Error, Debug)]
pub enum KVError {
    #[error("kv: storage error: {0}")]
    Storage(String),

    #[error("kv: redis error: {0}")]
    Redis(#[from] ::redis::RedisError),

    #[error("kv: value at {key} is not an integer")]
    NotAnInteger { key: String },
}

/// Result type for KV operations.
pub type KVResult<T> = Result<T, KVError>;

/// Key-value store trait.
///
/// Keys are strings, values are opaque byte sequences. `incr` and `rpush`
/// must be atomic with respect to concurrent callers; everything built on
/// top of this trait relies on that.
pub trait KVStore: Send + Sync {
    /// Get a value by key. Returns `None` if the key is absent.
    fn get(&self, key: &str) -> KVResult<Option<Vec<u8>>>;

    /// Set a key-value pair.
    fn set(&self, key: &str, value: &[u8]) -> KVResult<()>;

    /// Atomically increment the integer at `key` by 1, returning the new
    /// value. A missing key counts from 0. The stored representation is the
    /// ASCII decimal of the new value, so a plain `get` of a counter key
    /// stays readable. An existing non-integer value is an error.
    fn incr(&self, key: &str) -> KVResult<i64>;

    /// Atomically append a value to the list at `key`, creating the list if
    /// absent. Returns the new list length.
    fn rpush(&self, key: &str, value: &[u8]) -> KVResult<usize>;

    /// Read a slice of the list at `key`, Redis index semantics: `start` and
    /// `stop` are inclusive, negative indices count from the end (`-1` is
    /// the last element). A missing key yields an empty list.
    fn lrange(&self, key: &str, start: i64, stop: i64) -> KVResult<Vec<Vec<u8>>>;

    /// Erase every entry, counter, and list in the store.
    fn flush_all(&self) -> KVResult<()>;
}

impl fmt::Debug for dyn KVStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KVStore {{ ... }}")
    }
}

// Re-export the implementations
pub use memory::MemoryStore;
pub use redis::RedisStore;
