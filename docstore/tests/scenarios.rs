use docstore::clock::{ManualClock, SetableClock};
use docstore::memory_store::StoreEngine;
use docstore::{is_key_not_found_error, JsonCodec, StoreConfig, StoreError, VersionedStore};
use std::sync::Arc;
use test_case::test_case;

fn create_store(engine: StoreEngine) -> (Arc<ManualClock>, VersionedStore<JsonCodec>) {
    let clock = Arc::new(ManualClock::starting_now());
    let store = VersionedStore::from_config(&StoreConfig::new(engine), clock.clone(), JsonCodec);
    (clock, store)
}

#[test_case(StoreEngine::DashMap ; "dash_map_backend")]
#[test_case(StoreEngine::Moka ; "moka_backend")]
fn insert_then_get(engine: StoreEngine) {
    let (_clock, store) = create_store(engine);
    assert_eq!(store.insert("k", "v1", 1), Ok(1));
    let found = store.get::<String>("k").unwrap();
    assert_eq!(found.version, 1);
    assert_eq!(found.value, "v1");
}

#[test_case(StoreEngine::DashMap ; "dash_map_backend")]
#[test_case(StoreEngine::Moka ; "moka_backend")]
fn upsert_after_insert(engine: StoreEngine) {
    let (_clock, store) = create_store(engine);
    store.insert("k", "v1", 1).unwrap();
    assert_eq!(store.upsert("k", "v2", 1), Ok(2));
    let found = store.get::<String>("k").unwrap();
    assert_eq!((found.version, found.value.as_str()), (2, "v2"));
}

#[test_case(StoreEngine::DashMap ; "dash_map_backend")]
#[test_case(StoreEngine::Moka ; "moka_backend")]
fn replace_with_wrong_version(engine: StoreEngine) {
    let (_clock, store) = create_store(engine);
    assert_eq!(store.insert("k", "v1", 1), Ok(1));
    assert_eq!(store.replace("k", "v2", 2, 1), Err(StoreError::CasMismatch));
}

#[test_case(StoreEngine::DashMap ; "dash_map_backend")]
#[test_case(StoreEngine::Moka ; "moka_backend")]
fn remove_then_get(engine: StoreEngine) {
    let (_clock, store) = create_store(engine);
    assert_eq!(store.insert("k", "v1", 1), Ok(1));
    assert_eq!(store.remove("k", 1), Ok(1));
    let err = store.get::<String>("k").unwrap_err();
    assert_eq!(err, StoreError::KeyNotExist);
    assert!(is_key_not_found_error(&err));
}

#[test_case(StoreEngine::DashMap ; "dash_map_backend")]
#[test_case(StoreEngine::Moka ; "moka_backend")]
fn touch_then_expire(engine: StoreEngine) {
    let (clock, store) = create_store(engine);
    assert_eq!(store.insert("k", "v1", 0), Ok(1));
    assert_eq!(store.touch("k", 1, 1), Ok(2));
    clock.add_seconds(2);
    assert_eq!(store.get::<String>("k"), Err(StoreError::KeyNotExist));
}

#[test]
fn system_clock_store_keeps_short_lived_documents() {
    let store = VersionedStore::new();
    assert_eq!(store.insert("k", &vec![1, 2, 3], 60), Ok(1));
    assert_eq!(store.get::<Vec<u8>>("k").unwrap().value, vec![1, 2, 3]);
}

#[test_case(StoreEngine::DashMap ; "dash_map_backend")]
#[test_case(StoreEngine::Moka ; "moka_backend")]
fn live_documents_are_never_dropped(engine: StoreEngine) {
    let (_, store) = create_store(engine);
    let value = "x".repeat(64);
    for i in 0..200 {
        assert_eq!(store.insert(&format!("key-{}", i), &value, 0), Ok(1));
    }
    for i in 0..200 {
        let found = store.get::<String>(&format!("key-{}", i)).unwrap();
        assert_eq!(found.version, 1);
        assert_eq!(found.value, value);
    }
}
