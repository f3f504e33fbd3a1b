use super::*;

#[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
struct Draft {
    title: String,
    count: u32,
}

#[test]
fn memory_storage_set_get_remove() {
    let store = MemoryStorage::new();
    assert!(store.is_empty());

    store.set_item("k", "v1");
    store.set_item("k", "v2");
    assert_eq!(store.get_item("k").as_deref(), Some("v2"));
    assert_eq!(store.len(), 1);

    store.remove_item("k");
    assert!(!store.contains("k"));
    store.remove_item("missing");
}

#[test]
fn load_json_missing_key_is_none() {
    let store = MemoryStorage::new();
    assert!(load_json::<Draft>(&store, "draft").is_none());
}

#[test]
fn load_json_empty_value_is_none() {
    let store = MemoryStorage::new();
    store.set_item("draft", "");
    assert!(load_json::<Draft>(&store, "draft").is_none());
}

#[test]
fn save_then_load_json_value() {
    let store = MemoryStorage::new();
    let draft = Draft { title: "ballot".to_owned(), count: 2 };
    save_json(&store, "draft", &draft);
    let loaded = load_json::<Draft>(&store, "draft").expect("present").expect("decodes");
    assert_eq!(loaded, draft);
}

#[test]
fn load_json_reports_corrupt_value() {
    let store = MemoryStorage::new();
    store.set_item("draft", "{not json");
    assert!(matches!(load_json::<Draft>(&store, "draft"), Some(Err(_))));
}

#[test]
fn shared_reference_forwards_to_inner_store() {
    let store = MemoryStorage::new();
    let by_ref = &store;
    by_ref.set_item("k", "v");
    assert_eq!(store.get_item("k").as_deref(), Some("v"));
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn local_storage_is_noop_without_browser() {
    let store = LocalStorage;
    store.set_item("authToken", "t");
    assert_eq!(store.get_item("authToken"), None);
    store.remove_item("authToken");
}
