use super::test_utils::*;
use test_case::test_case;

#[test_case(create_moka_store() ; "moka_backend")]
#[test_case(create_dash_map_store() ; "dash_map_backend")]
fn remove_document(server: MockStore) {
    let version = server.storage.insert("k", "v1", 1).unwrap();
    assert_eq!(server.storage.remove("k", version), Ok(1));
    match server.storage.get::<String>("k") {
        Ok(_) => unreachable!(),
        Err(err) => assert_eq!(err, StoreError::KeyNotExist),
    }
    assert!(server.storage.is_empty());
}

#[test_case(create_moka_store() ; "moka_backend")]
#[test_case(create_dash_map_store() ; "dash_map_backend")]
fn remove_should_return_not_exists(server: MockStore) {
    server.storage.insert("k", "v1", 0).unwrap();
    let removed = server.storage.remove("bad key", 1);
    match removed {
        Ok(_) => unreachable!(),
        Err(err) => assert_eq!(err, StoreError::KeyNotExist),
    }
}

#[test_case(create_moka_store() ; "moka_backend")]
#[test_case(create_dash_map_store() ; "dash_map_backend")]
fn remove_if_version_doesnt_match_should_not_remove(server: MockStore) {
    server.storage.insert("k", "v1", 0).unwrap();
    let removed = server.storage.remove("k", 6);
    match removed {
        Ok(_) => unreachable!(),
        Err(err) => assert_eq!(err, StoreError::CasMismatch),
    }
    let found = server.storage.get::<String>("k").unwrap();
    assert_eq!(found.value, "v1");
    assert_eq!(found.version, 1);
    assert_eq!(server.storage.remove("k", 1), Ok(1));
}

#[test_case(create_moka_store() ; "moka_backend")]
#[test_case(create_dash_map_store() ; "dash_map_backend")]
fn remove_returns_removed_version(server: MockStore) {
    server.storage.insert("k", "v1", 0).unwrap();
    server.storage.upsert("k", "v2", 0).unwrap();
    server.storage.upsert("k", "v3", 0).unwrap();
    assert_eq!(server.storage.remove("k", 3), Ok(3));
    // the key starts over once re-created
    assert_eq!(server.storage.insert("k", "v4", 0), Ok(1));
}

#[test_case(create_moka_store() ; "moka_backend")]
#[test_case(create_dash_map_store() ; "dash_map_backend")]
fn remove_expired_document_reports_not_exists(server: MockStore) {
    server.storage.insert("k", "v1", 1).unwrap();
    server.clock.add_seconds(2);
    assert_eq!(server.storage.remove("k", 1), Err(StoreError::KeyNotExist));
    assert_eq!(server.storage.len(), 0);
}
