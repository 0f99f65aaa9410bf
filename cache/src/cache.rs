use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use tracekv_kv::{KVStore, RedisStore};

use crate::error::CacheError;
use crate::instrument::{CountCalls, OpIdentity, Operation, RecordHistory};
use crate::value::Value;

/// Identity under which `store` calls are counted and logged.
pub const STORE_OP: OpIdentity = OpIdentity::new("Cache", "store");

/// The core store operation: fresh random key, one write.
struct StoreOp {
    store: Arc<dyn KVStore>,
}

impl Operation for StoreOp {
    type Input = Value;
    type Output = String;

    fn invoke(&self, data: Value) -> Result<String, CacheError> {
        let key = Uuid::new_v4().to_string();
        self.store.set(&key, &data.encode())?;
        Ok(key)
    }
}

/// Caching facade over an external key-value store, with instrumented
/// writes and decoding reads.
///
/// The store handle is injected, never ambient; construction flushes it
/// exactly once, erasing prior entries, counters, and logs. Only `store`
/// is instrumented; reads go straight to the store.
pub struct Cache {
    store: Arc<dyn KVStore>,
    store_op: CountCalls<RecordHistory<StoreOp>>,
}

impl Cache {
    /// Wrap an injected store handle. Flushes the store, then wires the
    /// `store` decorator chain with counting outermost and history inside.
    pub fn new(store: Arc<dyn KVStore>) -> Result<Self, CacheError> {
        store.flush_all()?;
        let core = StoreOp {
            store: store.clone(),
        };
        let store_op = CountCalls::new(
            STORE_OP,
            store.clone(),
            RecordHistory::new(STORE_OP, store.clone(), core),
        );
        Ok(Self { store, store_op })
    }

    /// Connect to a Redis server and wrap it.
    pub fn connect(url: &str) -> Result<Self, CacheError> {
        let store = RedisStore::connect(url)?;
        Self::new(Arc::new(store))
    }

    /// Store a value under a fresh random key and return the key.
    ///
    /// Keys are v4 UUIDs, never caller-chosen and never reused. The write
    /// is synchronous; any store failure surfaces here, already counted in
    /// the invocation counter.
    pub fn store(&self, data: impl Into<Value>) -> Result<String, CacheError> {
        let key = self.store_op.invoke(data.into())?;
        debug!(%key, "stored value");
        Ok(key)
    }

    /// Raw read. `None` is the missing sentinel, not an error; callers
    /// must check for it.
    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(self.store.get(key)?)
    }

    /// Read and decode. The decoder runs only on a present value; a
    /// missing key stays `None` and decode failures propagate unchanged.
    pub fn get_with<T, F>(&self, key: &str, decode: F) -> Result<Option<T>, CacheError>
    where
        F: FnOnce(Vec<u8>) -> Result<T, CacheError>,
    {
        match self.store.get(key)? {
            Some(raw) => Ok(Some(decode(raw)?)),
            None => Ok(None),
        }
    }

    /// Read as UTF-8 text. Malformed bytes are an error, not `None`.
    pub fn get_str(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.get_with(key, |raw| Ok(String::from_utf8(raw)?))
    }

    /// Read as an integer. Non-numeric content is an error, not `None`.
    pub fn get_int(&self, key: &str) -> Result<Option<i64>, CacheError> {
        self.get_with(key, |raw| Ok(String::from_utf8(raw)?.parse::<i64>()?))
    }

    /// Handle to the underlying store; the instrumentation counters and
    /// history logs live there under the [`STORE_OP`] keys.
    pub fn kv(&self) -> &Arc<dyn KVStore> {
        &self.store
    }
}
