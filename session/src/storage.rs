//! Persisted key/value storage for the bearer token.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser keeps the token in `localStorage`, the CLI in a JSON file.
//! Both sit behind [`TokenStorage`] so the HTTP client and the session store
//! read and clear the same slot.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::StorageError;

/// Well-known key the bearer token is persisted under.
pub const TOKEN_KEY: &str = "token";

/// String key/value store surviving process or page restarts.
///
/// Handles are cheap to clone and clones share the same backing store.
pub trait TokenStorage: Clone {
    /// Read `key`; `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing store rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`; deleting an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing store rejects the delete.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Read the persisted bearer token, treating empty strings as absent.
    ///
    /// # Errors
    ///
    /// Propagates [`TokenStorage::get`] failures.
    fn token(&self) -> Result<Option<String>, StorageError> {
        Ok(self.get(TOKEN_KEY)?.filter(|t| !t.is_empty()))
    }
}

/// In-process storage, used by tests and as a fallback when nothing persists.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with a bearer token.
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        let storage = Self::new();
        storage.entries.borrow_mut().insert(TOKEN_KEY.to_owned(), token.to_owned());
        storage
    }
}

impl TokenStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
