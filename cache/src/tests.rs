use std::collections::HashSet;
use std::sync::Arc;

use tracekv_kv::{KVStore, MemoryStore};

use crate::cache::{Cache, STORE_OP};
use crate::error::CacheError;
use crate::replay::{call_count, history, replay};
use crate::value::Value;

fn fresh_cache() -> (Cache, Arc<dyn KVStore>) {
    let store: Arc<dyn KVStore> = Arc::new(MemoryStore::new());
    let cache = Cache::new(store.clone()).unwrap();
    (cache, store)
}

#[test]
fn test_round_trip_all_value_types() {
    let (cache, _) = fresh_cache();

    let values = [
        Value::from("hello"),
        Value::from(b"\x00\x01\xff".as_slice()),
        Value::from(42i64),
        Value::from(-13i64),
        Value::from(2.5f64),
    ];
    for value in values {
        let key = cache.store(value.clone()).unwrap();
        assert_eq!(cache.get(&key).unwrap(), Some(value.encode()));
    }
}

#[test]
fn test_get_str_round_trip() {
    let (cache, _) = fresh_cache();
    let key = cache.store("hello").unwrap();
    assert_eq!(cache.get_str(&key).unwrap(), Some("hello".to_string()));
}

#[test]
fn test_get_int_round_trip() {
    let (cache, _) = fresh_cache();
    let key = cache.store(42i64).unwrap();
    assert_eq!(cache.get_int(&key).unwrap(), Some(42));
}

#[test]
fn test_missing_key_is_none_for_every_accessor() {
    let (cache, _) = fresh_cache();
    assert_eq!(cache.get("never-stored").unwrap(), None);
    assert_eq!(cache.get_str("never-stored").unwrap(), None);
    assert_eq!(cache.get_int("never-stored").unwrap(), None);
}

#[test]
fn test_decode_failure_is_an_error() {
    let (cache, _) = fresh_cache();

    let key = cache.store(b"\xff\xfe".as_slice()).unwrap();
    assert!(matches!(cache.get_str(&key), Err(CacheError::Utf8(_))));

    let key = cache.store("not a number").unwrap();
    assert!(matches!(cache.get_int(&key), Err(CacheError::ParseInt(_))));
}

#[test]
fn test_custom_decoder_only_runs_on_present_values() {
    let (cache, _) = fresh_cache();

    let key = cache.store("abc").unwrap();
    let len = cache.get_with(&key, |raw| Ok(raw.len())).unwrap();
    assert_eq!(len, Some(3));

    // A missing key never reaches the decoder
    let missing = cache
        .get_with("never-stored", |_| -> Result<usize, CacheError> {
            panic!("decoder must not run on a missing value")
        })
        .unwrap();
    assert_eq!(missing, None);
}

#[test]
fn test_store_counter_tracks_every_call() {
    let (cache, store) = fresh_cache();

    for _ in 0..5 {
        cache.store("x").unwrap();
    }

    // Observable through the reader and through a direct get of the key
    assert_eq!(call_count(store.as_ref(), STORE_OP).unwrap(), 5);
    assert_eq!(
        store.get(&STORE_OP.counter_key()).unwrap(),
        Some(b"5".to_vec())
    );
}

#[test]
fn test_store_history_records_inputs_and_keys_in_order() {
    let (cache, store) = fresh_cache();

    let key_a = cache.store("a").unwrap();
    let key_b = cache.store("b").unwrap();

    let records = history(store.as_ref(), STORE_OP).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].input, "a");
    assert_eq!(records[0].output, key_a);
    assert_eq!(records[1].input, "b");
    assert_eq!(records[1].output, key_b);
}

#[test]
fn test_replay_renders_store_history() {
    let (cache, store) = fresh_cache();

    let key = cache.store("a").unwrap();
    let rendered = replay(store.as_ref(), STORE_OP).unwrap();
    assert_eq!(
        rendered,
        format!("Cache.store was called 1 times:\nCache.store(a) -> {key}\n")
    );
}

#[test]
fn test_store_keys_are_distinct() {
    let (cache, _) = fresh_cache();

    let mut seen = HashSet::new();
    for _ in 0..10_000 {
        assert!(seen.insert(cache.store("v").unwrap()));
    }
}

#[test]
fn test_construction_flushes_prior_state() {
    let store: Arc<dyn KVStore> = Arc::new(MemoryStore::new());

    let first = Cache::new(store.clone()).unwrap();
    let stale_key = first.store("stale").unwrap();
    assert_eq!(call_count(store.as_ref(), STORE_OP).unwrap(), 1);

    let second = Cache::new(store.clone()).unwrap();
    assert_eq!(second.get(&stale_key).unwrap(), None);
    assert_eq!(call_count(store.as_ref(), STORE_OP).unwrap(), 0);
    assert!(history(store.as_ref(), STORE_OP).unwrap().is_empty());
}

#[test]
fn test_reads_are_not_instrumented() {
    let (cache, store) = fresh_cache();

    let key = cache.store("v").unwrap();
    cache.get(&key).unwrap();
    cache.get_str(&key).unwrap();

    assert_eq!(call_count(store.as_ref(), STORE_OP).unwrap(), 1);
    assert_eq!(history(store.as_ref(), STORE_OP).unwrap().len(), 1);
}
