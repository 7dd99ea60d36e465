use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use state_store::{
    MemoryStorageArea, Persistence, RegistryBackends, StateObject, StateRegistry, StorageArea,
    StoragePersister, StoreError, StoreStateSettings,
};

fn object(value: Value) -> StateObject {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

fn registry_over(session: &MemoryStorageArea, local: &MemoryStorageArea) -> StateRegistry {
    StateRegistry::new(RegistryBackends::new(
        StoragePersister::session(session.clone()),
        StoragePersister::local(local.clone()),
    ))
}

#[test]
fn memory_client_store_accumulates_merged_state() {
    let registry = registry_over(&MemoryStorageArea::new(), &MemoryStorageArea::new());
    let settings = StoreStateSettings::new("client");
    registry.init(&settings).expect("init");

    registry.set(&settings, object(json!({"user": "a"}))).expect("set user");
    registry
        .set(&settings, object(json!({"token": "xyz"})))
        .expect("set token");

    let state = registry.get(&settings, true).expect("get").expect("stored");
    assert_eq!(
        Value::Object((*state).clone()),
        json!({"user": "a", "token": "xyz"})
    );
}

#[test]
fn session_store_survives_a_registry_reload_on_the_same_tab() {
    let session = MemoryStorageArea::new();
    let local = MemoryStorageArea::new();
    let settings = StoreStateSettings::new("client")
        .with_persistence(Persistence::SessionStorage)
        .with_history(true);

    let before_reload = registry_over(&session, &local);
    before_reload.init(&settings).expect("init");
    before_reload
        .set(&settings, object(json!({"user": "a"})))
        .expect("set");

    let after_reload = registry_over(&session, &local);
    after_reload.init(&settings).expect("init after reload");
    assert_eq!(
        after_reload.get_property(&settings, "user").expect("get"),
        Some(json!("a"))
    );
    assert!(after_reload
        .get_history(&settings)
        .expect("history")
        .is_empty());
}

#[test]
fn memory_store_does_not_survive_a_registry_reload() {
    let session = MemoryStorageArea::new();
    let local = MemoryStorageArea::new();
    let settings = StoreStateSettings::new("client");

    let before_reload = registry_over(&session, &local);
    before_reload.init(&settings).expect("init");
    before_reload
        .set(&settings, object(json!({"user": "a"})))
        .expect("set");

    let after_reload = registry_over(&session, &local);
    after_reload.init(&settings).expect("init after reload");
    assert_eq!(after_reload.get(&settings, true).expect("get"), None);
}

#[test]
fn bogus_persistence_is_rejected_before_init() {
    let err = StoreStateSettings::from_json(r#"{"name":"client","persistence":"bogus"}"#)
        .expect_err("bogus persistence");
    assert!(err.is_configuration_error());
    assert_eq!(err, StoreError::UnknownPersistence("bogus".to_string()));
}

#[test]
fn corrupt_local_storage_text_fails_reads_naming_the_key() {
    let local = MemoryStorageArea::new();
    let registry = registry_over(&MemoryStorageArea::new(), &local);
    let settings = StoreStateSettings::new("client").with_persistence(Persistence::LocalStorage);
    registry.init(&settings).expect("init");

    local
        .set_item("client-localStorage", "{\"user\": ")
        .expect("seed corrupt value");

    let err = registry.get(&settings, true).expect_err("corrupt state");
    assert!(err.to_string().contains("client-localStorage"));
    assert!(matches!(err, StoreError::Deserialize { .. }));
    assert!(matches!(
        registry.set(&settings, object(json!({"user": "b"}))),
        Err(StoreError::Deserialize { .. })
    ));
}

#[test]
fn quota_failures_propagate_from_set_and_leave_state_untouched() {
    let local = MemoryStorageArea::with_quota(48);
    let registry = registry_over(&MemoryStorageArea::new(), &local);
    let settings = StoreStateSettings::new("client").with_persistence(Persistence::LocalStorage);
    registry.init(&settings).expect("init");
    registry.set(&settings, object(json!({"k": 1}))).expect("small set");

    let err = registry
        .set(&settings, object(json!({"blob": "x".repeat(64)})))
        .expect_err("quota exceeded");
    assert!(matches!(
        err,
        StoreError::Write {
            medium: Persistence::LocalStorage,
            ..
        }
    ));
    assert_eq!(
        registry.get(&settings, true).expect("get").as_deref(),
        Some(&object(json!({"k": 1})))
    );
}

#[test]
fn stores_sharing_a_medium_are_keyed_apart_in_the_shared_area() {
    let local = MemoryStorageArea::new();
    let registry = registry_over(&MemoryStorageArea::new(), &local);
    let tabs = StoreStateSettings::new("tabs").with_persistence(Persistence::LocalStorage);
    let modal = StoreStateSettings::new("modal").with_persistence(Persistence::LocalStorage);
    registry.init(&tabs).expect("init tabs");
    registry.init(&modal).expect("init modal");

    registry.set(&tabs, object(json!({"open": 1}))).expect("set");
    registry.set(&modal, object(json!({"open": true}))).expect("set");
    registry.clear(&tabs).expect("clear tabs");

    assert_eq!(local.keys(), vec!["modal-localStorage".to_string()]);
    assert_eq!(
        registry.get_property(&modal, "open").expect("get"),
        Some(json!(true))
    );
}

#[test]
fn equivalent_settings_values_address_the_same_store() {
    let registry = registry_over(&MemoryStorageArea::new(), &MemoryStorageArea::new());
    let writer = StoreStateSettings::new("client").with_history(true);
    let reader = StoreStateSettings::from_json(r#"{"name":"client","persistence":"memory"}"#)
        .expect("parse reader settings");
    registry.init(&writer).expect("init");
    registry.init(&reader).expect("init is idempotent");

    registry.set(&writer, object(json!({"user": "a"}))).expect("set");
    assert_eq!(
        registry.get_property(&reader, "user").expect("get"),
        Some(json!("a"))
    );
    assert_eq!(registry.get_history(&reader).expect("history").len(), 1);
}
