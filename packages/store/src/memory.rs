use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::kv::{KeyValueStore, StorageError};

/// In-memory KeyValueStore for tests and as a fallback when no
/// persistent backend is reachable.
///
/// Clones share the same map, so a second `SessionStore` opened on a clone
/// behaves like a reload of the same browser profile.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects every write, like a browser with storage
    /// disabled or over quota.
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::Write {
                key: key.to_string(),
                reason: "read-only store".to_string(),
            });
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let reopened = store.clone();

        store.set("accessToken", "T1").unwrap();
        assert_eq!(reopened.get("accessToken").as_deref(), Some("T1"));

        reopened.remove("accessToken");
        assert!(store.is_empty());
    }

    #[test]
    fn test_read_only_rejects_writes() {
        let store = MemoryStore::read_only();
        let err = store.set("userRole", "walker").unwrap_err();
        assert!(matches!(err, StorageError::Write { ref key, .. } if key == "userRole"));
        assert!(store.get("userRole").is_none());
    }
}
