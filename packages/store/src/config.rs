//! # Client configuration — `paseo.toml`
//!
//! Defines the TOML configuration read by the front-end at startup
//! (filename: [`PaseoConfig::filename`] = `"paseo.toml"`). It tells the HTTP
//! wrappers where the backend lives and sets the cadence of the walker
//! location reporter.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:3000"
//! request_timeout_secs = 30
//!
//! [location]
//! report_interval_secs = 180      # walker location cadence
//! positioning_timeout_secs = 10   # bounded wait for one GPS fix
//! high_accuracy = true
//! walk_refresh_secs = 60          # owner walk detail auto-refresh
//! nearby_positioning_timeout_secs = 15
//! fallback_latitude = -17.7833
//! fallback_longitude = -63.1833
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`PaseoConfig`] | Top-level config. Builder helpers (`with_base_url`, `with_report_interval`), TOML (de)serialisation and the canonical filename. |
//! | [`ApiConfig`] | Backend base URL and the client-side request timeout. |
//! | [`LocationConfig`] | Reporter interval, positioning timeout and accuracy hint, walk auto-refresh period, and the fallback coordinates used by the nearby-walker search. |
//!
//! Every field has a serde default, so a missing or partial file is
//! equivalent to the default configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `paseo.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PaseoConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub location: LocationConfig,
}

/// Backend connection settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the marketplace backend, without trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Client-side timeout applied to every HTTP call.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Location reporting and positioning settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    #[serde(default = "default_report_interval")]
    pub report_interval_secs: u64,
    #[serde(default = "default_positioning_timeout")]
    pub positioning_timeout_secs: u64,
    #[serde(default = "default_high_accuracy")]
    pub high_accuracy: bool,
    /// Auto-refresh period of a live walk on the owner's detail view.
    #[serde(default = "default_walk_refresh")]
    pub walk_refresh_secs: u64,
    #[serde(default = "default_nearby_positioning_timeout")]
    pub nearby_positioning_timeout_secs: u64,
    #[serde(default = "default_fallback_latitude")]
    pub fallback_latitude: f64,
    #[serde(default = "default_fallback_longitude")]
    pub fallback_longitude: f64,
}

fn default_report_interval() -> u64 {
    180
}

fn default_positioning_timeout() -> u64 {
    10
}

fn default_high_accuracy() -> bool {
    true
}

fn default_walk_refresh() -> u64 {
    60
}

fn default_nearby_positioning_timeout() -> u64 {
    15
}

fn default_fallback_latitude() -> f64 {
    -17.7833
}

fn default_fallback_longitude() -> f64 {
    -63.1833
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            report_interval_secs: default_report_interval(),
            positioning_timeout_secs: default_positioning_timeout(),
            high_accuracy: default_high_accuracy(),
            walk_refresh_secs: default_walk_refresh(),
            nearby_positioning_timeout_secs: default_nearby_positioning_timeout(),
            fallback_latitude: default_fallback_latitude(),
            fallback_longitude: default_fallback_longitude(),
        }
    }
}

impl LocationConfig {
    pub fn report_interval(&self) -> Duration {
        Duration::from_secs(self.report_interval_secs)
    }

    pub fn positioning_timeout(&self) -> Duration {
        Duration::from_secs(self.positioning_timeout_secs)
    }

    pub fn walk_refresh(&self) -> Duration {
        Duration::from_secs(self.walk_refresh_secs)
    }

    pub fn nearby_positioning_timeout(&self) -> Duration {
        Duration::from_secs(self.nearby_positioning_timeout_secs)
    }
}

impl PaseoConfig {
    /// Builder method to point the client at another backend.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Builder method to set the walker location reporting interval.
    pub fn with_report_interval(mut self, secs: u64) -> Self {
        self.location.report_interval_secs = secs;
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "paseo.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = PaseoConfig::from_toml("").unwrap();
        assert_eq!(config, PaseoConfig::default());
        assert_eq!(config.api.base_url, "http://localhost:3000");
        assert_eq!(config.location.report_interval(), Duration::from_secs(180));
        assert_eq!(config.location.positioning_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = PaseoConfig::from_toml(
            r#"
            [api]
            base_url = "https://paseos.example.org"

            [location]
            report_interval_secs = 60
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://paseos.example.org");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.location.report_interval_secs, 60);
        assert!(config.location.high_accuracy);
        assert_eq!(config.location.fallback_latitude, -17.7833);
    }

    #[test]
    fn test_builders_and_toml_output() {
        let config = PaseoConfig::default()
            .with_base_url("http://10.0.0.2:3000/")
            .with_report_interval(30);
        assert_eq!(config.api.base_url, "http://10.0.0.2:3000");

        let text = config.to_toml().unwrap();
        assert!(text.contains("report_interval_secs = 30"));
        assert_eq!(PaseoConfig::from_toml(&text).unwrap(), config);
    }
}
