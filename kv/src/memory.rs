//! In-memory key-value store implementation for testing.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::{KVError, KVResult, KVStore};

#[derive(Default)]
struct Inner {
    values: HashMap<String, Vec<u8>>,
    lists: HashMap<String, Vec<Vec<u8>>>,
}

/// An in-memory key-value store backed by a HashMap.
///
/// `incr` and `rpush` are atomic because every operation runs under the
/// store-wide mutex.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    fn lock(&self) -> KVResult<std::sync::MutexGuard<'_, Inner>> {
        self.inner.lock().map_err(|e| KVError::Storage(e.to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize a Redis-style inclusive range against a list of `len` items.
/// Returns `None` when the range selects nothing.
fn normalize_range(len: usize, start: i64, stop: i64) -> Option<(usize, usize)> {
    let n = len as i64;
    let mut start = if start < 0 { n + start } else { start };
    let mut stop = if stop < 0 { n + stop } else { stop };
    if start < 0 {
        start = 0;
    }
    if stop >= n {
        stop = n - 1;
    }
    if n == 0 || start >= n || stop < 0 || start > stop {
        return None;
    }
    Some((start as usize, stop as usize))
}

impl KVStore for MemoryStore {
    fn get(&self, key: &str) -> KVResult<Option<Vec<u8>>> {
        let inner = self.lock()?;
        Ok(inner.values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> KVResult<()> {
        let mut inner = self.lock()?;
        inner.values.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn incr(&self, key: &str) -> KVResult<i64> {
        let mut inner = self.lock()?;
        let current = match inner.values.get(key) {
            Some(raw) => std::str::from_utf8(raw)
                .ok()
                .and_then(|s| s.parse::<i64>().ok())
                .ok_or_else(|| KVError::NotAnInteger {
                    key: key.to_string(),
                })?,
            None => 0,
        };
        let next = current + 1;
        inner
            .values
            .insert(key.to_string(), next.to_string().into_bytes());
        Ok(next)
    }

    fn rpush(&self, key: &str, value: &[u8]) -> KVResult<usize> {
        let mut inner = self.lock()?;
        let list = inner.lists.entry(key.to_string()).or_default();
        list.push(value.to_vec());
        Ok(list.len())
    }

    fn lrange(&self, key: &str, start: i64, stop: i64) -> KVResult<Vec<Vec<u8>>> {
        let inner = self.lock()?;
        let Some(list) = inner.lists.get(key) else {
            return Ok(Vec::new());
        };
        match normalize_range(list.len(), start, stop) {
            Some((start, stop)) => Ok(list[start..=stop].to_vec()),
            None => Ok(Vec::new()),
        }
    }

    fn flush_all(&self) -> KVResult<()> {
        let mut inner = self.lock()?;
        inner.values.clear();
        inner.lists.clear();
        Ok(())
    }
}
