//! Constants and user settings.
//!
//! Settings resolve in layers: built-in defaults, then the TOML config file,
//! then environment variables. Builder and CLI values are applied on top by
//! the caller.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Environment variable overriding the backend base URL.
pub const BASE_URL_ENV: &str = "PRICE_TRACKER_API_URL";
/// Environment variable setting a request timeout in seconds.
pub const TIMEOUT_ENV: &str = "PRICE_TRACKER_TIMEOUT_SECS";

/// Fixed page size of the favorites listing view.
pub const FAVORITES_PAGE_SIZE: u32 = 10;
/// How many favorites the external-id probe scans before giving up.
pub const FAVORITE_SCAN_LIMIT: u32 = 100;
/// Page size used when walking every favorite to build a [`FavoritedSet`](crate::reconcile::FavoritedSet).
pub const FAVORITED_SET_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout; unset means the transport default applies.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl Settings {
    /// Load from the default config path, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut settings = Self::load_from(&default_config_path())?;
        settings.apply_env();
        Ok(settings)
    }

    /// Load from an explicit file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Overlay `PRICE_TRACKER_API_URL` and `PRICE_TRACKER_TIMEOUT_SECS`.
    pub fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var(BASE_URL_ENV).ok(),
            std::env::var(TIMEOUT_ENV).ok(),
        );
    }

    fn apply_overrides(&mut self, base_url: Option<String>, timeout: Option<String>) {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        if let Some(raw) = timeout {
            match raw.trim().parse::<u64>() {
                Ok(secs) => self.timeout_secs = Some(secs),
                Err(e) => warn!("Ignoring invalid {TIMEOUT_ENV} value {raw:?}: {e}"),
            }
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

pub fn default_config_path() -> PathBuf {
    if let Some(dir) = dirs::config_dir() {
        dir.join("price-tracker").join("config.toml")
    } else {
        PathBuf::from(".price-tracker.toml")
    }
}
