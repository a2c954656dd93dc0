//! Platform-specific constructors shared by every front-end.
//!
//! | Concern | Web (WASM + `web` feature) | Native |
//! |---------|---------------------------|--------|
//! | Session storage | [`store::LocalStorageStore`] | [`store::FileStore`] under `<data_dir>/paseo/` |
//! | Positioning | [`api::BrowserPositioner`] | [`api::FixedPositioner`] at the configured fallback |
//! | Configuration | defaults, `PASEO_API_URL` at build time | `<config_dir>/paseo/paseo.toml` if present |

use store::{PaseoConfig, SessionStore};

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStore = store::LocalStorageStore;
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type PlatformStore = store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformPositioner = api::BrowserPositioner;
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type PlatformPositioner = api::FixedPositioner;

/// Open the session store, restoring any persisted session.
pub fn make_session_store() -> SessionStore<PlatformStore> {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        SessionStore::open(store::LocalStorageStore)
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("paseo");
        SessionStore::open(store::FileStore::new(base))
    }
}

pub fn make_positioner(config: &PaseoConfig) -> PlatformPositioner {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        let _ = config;
        api::BrowserPositioner
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        api::FixedPositioner(api::fallback_coordinates(&config.location))
    }
}

/// Load the app configuration, falling back to defaults.
pub fn load_config() -> PaseoConfig {
    #[cfg(target_arch = "wasm32")]
    {
        match option_env!("PASEO_API_URL") {
            Some(url) if !url.is_empty() => PaseoConfig::default().with_base_url(url),
            _ => PaseoConfig::default(),
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let Some(path) = dirs::config_dir().map(|d| d.join("paseo").join(PaseoConfig::filename()))
        else {
            return PaseoConfig::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(raw) => PaseoConfig::from_toml(&raw).unwrap_or_else(|e| {
                tracing::warn!("ignoring invalid {}: {e}", path.display());
                PaseoConfig::default()
            }),
            Err(_) => PaseoConfig::default(),
        }
    }
}
