use super::*;

#[test]
fn memory_storage_starts_empty() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(storage.token().unwrap(), None);
}

#[test]
fn clones_share_entries() {
    let a = MemoryStorage::new();
    let b = a.clone();
    a.set(TOKEN_KEY, "abc").unwrap();
    assert_eq!(b.token().unwrap().as_deref(), Some("abc"));
    b.remove(TOKEN_KEY).unwrap();
    assert_eq!(a.token().unwrap(), None);
}

#[test]
fn token_treats_empty_string_as_absent() {
    let storage = MemoryStorage::with_token("");
    assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some(""));
    assert_eq!(storage.token().unwrap(), None);
}

#[test]
fn removing_missing_key_is_ok() {
    let storage = MemoryStorage::new();
    assert!(storage.remove("nope").is_ok());
}
