//! Redis-backed key-value store implementation.

use std::sync::{Mutex, MutexGuard};

use ::redis::{Commands, Connection};
use tracing::debug;

use crate::{KVError, KVResult, KVStore};

/// A key-value store backed by a Redis server.
///
/// Holds a single synchronous connection behind a mutex; every trait method
/// maps 1:1 to a Redis command, so `incr` and `rpush` inherit Redis's
/// server-side atomicity. No retries and no timeouts beyond the client's
/// defaults; failures surface immediately.
pub struct RedisStore {
    conn: Mutex<Connection>,
}

impl RedisStore {
    /// Connect to a Redis server, e.g. `redis://127.0.0.1/`.
    pub fn connect(url: &str) -> KVResult<Self> {
        let client = ::redis::Client::open(url)?;
        let conn = client.get_connection()?;
        debug!(url, "connected to redis");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> KVResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| KVError::Storage(e.to_string()))
    }
}

impl KVStore for RedisStore {
    fn get(&self, key: &str) -> KVResult<Option<Vec<u8>>> {
        let mut conn = self.lock()?;
        let value: Option<Vec<u8>> = conn.get(key)?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &[u8]) -> KVResult<()> {
        let mut conn = self.lock()?;
        let _: () = conn.set(key, value)?;
        Ok(())
    }

    fn incr(&self, key: &str) -> KVResult<i64> {
        let mut conn = self.lock()?;
        // INCR refuses non-integer values server-side
        let next: i64 = conn.incr(key, 1)?;
        Ok(next)
    }

    fn rpush(&self, key: &str, value: &[u8]) -> KVResult<usize> {
        let mut conn = self.lock()?;
        let len: usize = conn.rpush(key, value)?;
        Ok(len)
    }

    fn lrange(&self, key: &str, start: i64, stop: i64) -> KVResult<Vec<Vec<u8>>> {
        let mut conn = self.lock()?;
        let items: Vec<Vec<u8>> = conn.lrange(key, start as isize, stop as isize)?;
        Ok(items)
    }

    fn flush_all(&self) -> KVResult<()> {
        let mut conn = self.lock()?;
        debug!("flushing redis database");
        let _: () = ::redis::cmd("FLUSHDB").query(&mut *conn)?;
        Ok(())
    }
}
