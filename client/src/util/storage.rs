//! Browser `localStorage` backend for the session token.
//!
//! SYSTEM CONTEXT
//! ==============
//! Centralizes the browser-only web-sys glue behind `session::TokenStorage`
//! so the HTTP client and the session store share one persisted slot.
//!
//! TRADE-OFFS
//! ==========
//! Outside the browser there is no storage; reads and writes fail with
//! `StorageError::Unavailable` and the session simply starts empty.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use session::{StorageError, TokenStorage};

/// Handle to `window.localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "csr")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or(StorageError::Unavailable)
}

#[cfg(feature = "csr")]
fn js_error(err: &wasm_bindgen::JsValue) -> StorageError {
    StorageError::Io(format!("{err:?}"))
}

impl TokenStorage for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.get_item(key).map_err(|e| js_error(&e))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            Err(StorageError::Unavailable)
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.set_item(key, value).map_err(|e| js_error(&e))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
            Err(StorageError::Unavailable)
        }
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.remove_item(key).map_err(|e| js_error(&e))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            Err(StorageError::Unavailable)
        }
    }
}
