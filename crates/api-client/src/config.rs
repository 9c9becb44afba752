//! Configuration for the EventMart API client
//!
//! Supports environment-based configuration with sensible defaults.

use crate::error::{ApiError, ApiResult};
use eventmart_core::config::ApiSection;
use eventmart_core::Role;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default backend URL for local development
const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Environment types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development backend
    #[default]
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    Production,
}

impl Environment {
    /// Parse from environment variable
    pub fn from_env() -> Self {
        match env::var("EVENTMART_ENV")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "staging" | "stage" => Self::Staging,
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend base URL
    pub base_url: String,
    /// Admin API root (derived from `base_url` if not set)
    pub admin_url: String,
    /// Vendor API root (derived from `base_url` if not set)
    pub vendor_url: String,
    /// Client API root (derived from `base_url` if not set)
    pub client_url: String,
    /// Request timeout
    #[serde(with = "secs_serde")]
    pub timeout: Duration,
    /// Current environment
    pub environment: Environment,
}

mod secs_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_base_url(DEFAULT_BASE_URL, Duration::from_secs(30), Environment::default())
    }
}

impl ClientConfig {
    fn for_base_url(base_url: &str, timeout: Duration, environment: Environment) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            base_url: base.to_string(),
            admin_url: format!("{base}/admin"),
            vendor_url: format!("{base}/vendor"),
            client_url: format!("{base}/client"),
            timeout,
            environment,
        }
    }

    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `EVENTMART_API_URL`: backend base URL
    /// - `EVENTMART_ENV`: environment (development/staging/production)
    /// - `EVENTMART_TIMEOUT_SECS`: request timeout in seconds
    pub fn from_env() -> ApiResult<Self> {
        let environment = Environment::from_env();

        let base_url = env::var("EVENTMART_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout = env::var("EVENTMART_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map_or(Duration::from_secs(30), Duration::from_secs);

        let config = Self::for_base_url(&base_url, timeout, environment);
        config.validate()?;
        Ok(config)
    }

    /// Build from the `[api]` section of `eventmart.toml`
    #[must_use]
    pub fn from_section(section: &ApiSection) -> Self {
        Self::for_base_url(
            &section.base_url,
            Duration::from_secs(section.timeout_secs),
            Environment::from_env(),
        )
    }

    /// API root for a role
    #[must_use]
    pub fn url_for(&self, role: Role) -> &str {
        match role {
            Role::Admin => &self.admin_url,
            Role::Vendor => &self.vendor_url,
            Role::Client => &self.client_url,
        }
    }

    /// Builder-style method to set base URL (re-derives the role roots)
    #[must_use]
    pub fn with_base_url(self, url: impl Into<String>) -> Self {
        Self::for_base_url(&url.into(), self.timeout, self.environment)
    }

    /// Builder-style method to point one role at a different root
    #[must_use]
    pub fn with_role_url(mut self, role: Role, url: impl Into<String>) -> Self {
        let url = url.into().trim_end_matches('/').to_string();
        match role {
            Role::Admin => self.admin_url = url,
            Role::Vendor => self.vendor_url = url,
            Role::Client => self.client_url = url,
        }
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        for (name, url) in [
            ("base_url", &self.base_url),
            ("admin_url", &self.admin_url),
            ("vendor_url", &self.vendor_url),
            ("client_url", &self.client_url),
        ] {
            if url.is_empty() {
                return Err(ApiError::config(format!("{name} cannot be empty")));
            }
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ApiError::config(format!(
                    "{name} must start with http:// or https://"
                )));
            }
        }

        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        Ok(())
    }
}
