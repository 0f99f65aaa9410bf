//! Readers over the instrumentation counters and history logs.

use tracekv_kv::KVStore;

use crate::error::CacheError;
use crate::instrument::OpIdentity;

/// One paired input/output from an operation's history logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRecord {
    pub input: String,
    pub output: String,
}

/// Number of recorded invocations for `identity`, 0 when never called.
pub fn call_count(store: &dyn KVStore, identity: OpIdentity) -> Result<u64, CacheError> {
    match store.get(&identity.counter_key())? {
        Some(raw) => Ok(String::from_utf8(raw)?.parse::<u64>()?),
        None => Ok(0),
    }
}

/// Paired call history for `identity`.
///
/// The inputs and outputs logs can be of unequal length when a call failed
/// between the two appends, so entries are paired positionally only up to
/// the shorter log's length.
pub fn history(store: &dyn KVStore, identity: OpIdentity) -> Result<Vec<CallRecord>, CacheError> {
    let inputs = store.lrange(&identity.inputs_key(), 0, -1)?;
    let outputs = store.lrange(&identity.outputs_key(), 0, -1)?;
    Ok(inputs
        .into_iter()
        .zip(outputs)
        .map(|(input, output)| CallRecord {
            input: String::from_utf8_lossy(&input).into_owned(),
            output: String::from_utf8_lossy(&output).into_owned(),
        })
        .collect())
}

/// Human-readable rendering of an operation's call history:
///
/// ```text
/// Cache.store was called 2 times:
/// Cache.store(a) -> 8d918656-...
/// Cache.store(b) -> 7b8309b0-...
/// ```
pub fn replay(store: &dyn KVStore, identity: OpIdentity) -> Result<String, CacheError> {
    let name = identity.qualified_name();
    let count = call_count(store, identity)?;
    let mut out = format!("{name} was called {count} times:\n");
    for record in history(store, identity)? {
        out.push_str(&format!("{name}({}) -> {}\n", record.input, record.output));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tracekv_kv::MemoryStore;

    const PROBE: OpIdentity = OpIdentity::new("Probe", "poke");

    #[test]
    fn test_call_count_missing_is_zero() {
        let store = MemoryStore::new();
        assert_eq!(call_count(&store, PROBE).unwrap(), 0);
    }

    #[test]
    fn test_history_pairs_to_shorter_log() {
        let store = MemoryStore::new();
        store.rpush(&PROBE.inputs_key(), b"a").unwrap();
        store.rpush(&PROBE.inputs_key(), b"b").unwrap();
        store.rpush(&PROBE.outputs_key(), b"out-a").unwrap();
        // "b" has no output entry (its call failed mid-flight)

        let records = history(&store, PROBE).unwrap();
        assert_eq!(
            records,
            vec![CallRecord {
                input: "a".to_string(),
                output: "out-a".to_string(),
            }]
        );
    }

    #[test]
    fn test_replay_rendering() {
        let store: Arc<dyn KVStore> = Arc::new(MemoryStore::new());
        store.incr(&PROBE.counter_key()).unwrap();
        store.rpush(&PROBE.inputs_key(), b"a").unwrap();
        store.rpush(&PROBE.outputs_key(), b"k1").unwrap();

        let rendered = replay(store.as_ref(), PROBE).unwrap();
        assert_eq!(rendered, "Probe.poke was called 1 times:\nProbe.poke(a) -> k1\n");
    }
}
