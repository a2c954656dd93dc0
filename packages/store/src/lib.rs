pub mod config;
pub mod kv;
pub mod session;

mod memory;
pub use memory::MemoryStore;

mod file_store;
pub use file_store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorageStore;

pub use config::{ApiConfig, LocationConfig, PaseoConfig};
pub use kv::{KeyValueStore, StorageError};
pub use session::{check_access, Access, Profile, Role, Session, SessionError, SessionStore};
