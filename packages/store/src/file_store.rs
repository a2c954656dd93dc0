//! # Filesystem-backed key/value store
//!
//! [`FileStore`] is the [`KeyValueStore`] used by native builds, where there is
//! no browser local storage. Each key is one file under the base directory:
//!
//! ```text
//! <base_dir>/
//! ├── accessToken
//! ├── userRole
//! ├── userData
//! └── walker_available
//! ```
//!
//! The `ui` crate uses `dirs::data_dir()` to pick a platform-appropriate base
//! such as `~/.local/share/paseo/`.

use std::path::PathBuf;

use crate::kv::{KeyValueStore, StorageError};

/// Filesystem-backed KeyValueStore for native persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.base.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.entry_path(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.base)
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        std::fs::write(self.entry_path(key), value).map_err(|e| StorageError::Write {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }

    fn remove(&self, key: &str) {
        let _ = std::fs::remove_file(self.entry_path(key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Profile, Role, SessionStore};

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = std::env::temp_dir().join(format!("paseo_test_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let sessions = SessionStore::open(FileStore::new(dir.clone()));
        sessions
            .login(Role::Owner, "T-owner", Some(Profile::named(7, "Ana")))
            .unwrap();

        // Re-open from the same directory
        let reopened = SessionStore::open(FileStore::new(dir.clone()));
        let session = reopened.current().unwrap();
        assert_eq!(session.role, Role::Owner);
        assert_eq!(session.token, "T-owner");
        assert_eq!(session.profile.unwrap().name.as_deref(), Some("Ana"));

        reopened.logout();
        assert!(FileStore::new(dir.clone()).get("accessToken").is_none());

        // Cleanup
        let _ = std::fs::remove_dir_all(&dir);
    }
}
