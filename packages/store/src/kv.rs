//! Key/value persistence used by the session store.
//!
//! Browser local storage is synchronous and string-typed, so the trait is too.
//! Implementations live in sibling modules ([`crate::memory`],
//! [`crate::file_store`], and the web-only `local_storage`).

/// Failure to write a value to the persistence backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("failed to write key {key}: {reason}")]
    Write { key: String, reason: String },
}

/// Synchronous string key/value store.
///
/// Reads never fail: a missing or unreadable entry is `None`. Removal is
/// best-effort.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str);
}
