//! # Browser local storage — web-side session persistence
//!
//! [`LocalStorageStore`] is the [`KeyValueStore`] used on the **web platform**.
//! It writes the session keys (`accessToken`, `userRole`, `userData`,
//! `walker_available`) into `window.localStorage`, so a full page reload
//! restores the logged-in user without a network round trip.
//!
//! ## Error handling
//!
//! Reads swallow errors and return `None`: storage disabled by the browser or
//! a blocked `window` degrades to "logged out" rather than crashing. Writes
//! report failures (quota exceeded, private mode) so the session store can
//! roll back a partial login.

use web_sys::Storage;

use crate::kv::{KeyValueStore, StorageError};

/// `window.localStorage`-backed KeyValueStore for the web platform.
///
/// Zero-size and `Clone`: the `Storage` handle is looked up on every call
/// because `web_sys::Storage` is tied to the current window.
#[derive(Clone, Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> Option<Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = self.storage().ok_or_else(|| {
            StorageError::Unavailable("window.localStorage is not accessible".to_string())
        })?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError::Write {
                key: key.to_string(),
                reason: format!("{e:?}"),
            })
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = self.storage() {
            let _ = storage.remove_item(key);
        }
    }
}
