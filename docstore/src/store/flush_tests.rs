use super::test_utils::*;
use test_case::test_case;

#[test_case(create_moka_store() ; "moka_backend")]
#[test_case(create_dash_map_store() ; "dash_map_backend")]
fn flush_removes_everything(server: MockStore) {
    for idx in 0..10 {
        server.storage.insert(&format!("key-{}", idx), &idx, 0).unwrap();
    }
    assert_eq!(server.storage.len(), 10);
    server.storage.flush();
    assert!(server.storage.is_empty());
    assert_eq!(
        server.storage.get::<u32>("key-1"),
        Err(StoreError::KeyNotExist)
    );
}

#[test_case(create_moka_store() ; "moka_backend")]
#[test_case(create_dash_map_store() ; "dash_map_backend")]
fn expired_documents_are_counted_until_evicted(server: MockStore) {
    server.storage.insert("short", "v", 1).unwrap();
    server.storage.insert("long", "v", 100).unwrap();
    server.storage.insert("forever", "v", 0).unwrap();
    server.clock.add_seconds(2);
    assert_eq!(server.storage.len(), 3);

    assert_eq!(server.storage.evict_expired(), 1);
    assert_eq!(server.storage.len(), 2);
    assert!(server.storage.get::<String>("long").is_ok());
    assert!(server.storage.get::<String>("forever").is_ok());
}

#[test_case(create_moka_store() ; "moka_backend")]
#[test_case(create_dash_map_store() ; "dash_map_backend")]
fn evict_expired_without_expired_documents(server: MockStore) {
    server.storage.insert("k", "v", 0).unwrap();
    assert_eq!(server.storage.evict_expired(), 0);
    assert_eq!(server.storage.len(), 1);
}
