use super::*;

#[test]
fn memory_store_load_missing_is_none() {
    let store = MemoryStore::new();
    assert_eq!(store.load("k"), Ok(None));
}

#[test]
fn memory_store_save_then_load() {
    let store = MemoryStore::new();
    store.save("k", "dark").expect("save");
    assert_eq!(store.load("k"), Ok(Some("dark".to_owned())));
}

#[test]
fn memory_store_remove_clears_and_tolerates_absent_key() {
    let store = MemoryStore::new();
    store.save("k", "light").expect("save");
    store.remove("k").expect("remove");
    store.remove("k").expect("second remove");
    assert_eq!(store.load("k"), Ok(None));
}
