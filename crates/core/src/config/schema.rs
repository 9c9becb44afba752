//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// Backend connection settings
    #[serde(default)]
    pub api: ApiSection,

    /// Session persistence settings
    #[serde(default)]
    pub session: SessionSection,
}

/// Backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSection {
    /// Backend base URL; role paths (`/admin`, `/vendor`, `/client`) hang off it
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Session persistence settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionSection {
    /// File backing the session store. Defaults to the platform data dir.
    #[serde(default)]
    pub storage_path: Option<PathBuf>,
}

impl SessionSection {
    /// Resolve the storage file, falling back to `<data dir>/eventmart/session.json`
    #[must_use]
    pub fn resolved_storage_path(&self) -> PathBuf {
        self.storage_path.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from(".eventmart"))
                .join("eventmart")
                .join("session.json")
        })
    }
}
