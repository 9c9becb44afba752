//! Portal roles and the in-memory access token holder
//!
//! Each role owns a storage key for its session marker, a login route, a
//! home route and a path segment on the backend.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, RwLock};

/// A portal role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Marketplace administrator
    Admin,
    /// Event vendor
    Vendor,
    /// Ticket-buying client
    Client,
}

impl Role {
    /// Every role, in display order
    pub const ALL: [Role; 3] = [Role::Admin, Role::Vendor, Role::Client];

    /// Lowercase name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Vendor => "vendor",
            Self::Client => "client",
        }
    }

    /// Key under which the role's identifier is persisted
    #[must_use]
    pub fn storage_key(self) -> &'static str {
        match self {
            Self::Admin => "adminId",
            Self::Vendor => "id",
            Self::Client => "clientId",
        }
    }

    /// Route of the role's login screen
    #[must_use]
    pub fn login_route(self) -> &'static str {
        match self {
            Self::Admin => "/admin/login",
            Self::Vendor => "/vendor/login",
            Self::Client => "/login",
        }
    }

    /// Route a freshly logged-in user lands on
    #[must_use]
    pub fn home_route(self) -> &'static str {
        match self {
            Self::Admin => "/admin/dashboard",
            Self::Vendor => "/vendor/home",
            Self::Client => "/home",
        }
    }

    /// Path segment of the role's API on the backend
    #[must_use]
    pub fn api_segment(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "vendor" => Ok(Self::Vendor),
            "client" | "user" => Ok(Self::Client),
            other => Err(crate::Error::validation(format!("Unknown role: {other}"))
                .with_suggestion("Use one of: admin, vendor, client")),
        }
    }
}

/// Per-role access tokens held in memory only.
///
/// Cloning shares the underlying map, so the API client and the session
/// manager see the same tokens.
#[derive(Debug, Clone, Default)]
pub struct TokenHolder {
    tokens: Arc<RwLock<HashMap<Role, String>>>,
}

impl TokenHolder {
    /// Create an empty holder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Token for a role, if one is held
    #[must_use]
    pub fn get(&self, role: Role) -> Option<String> {
        self.tokens.read().ok()?.get(&role).cloned()
    }

    /// Store the token for a role, replacing any previous one
    pub fn set(&self, role: Role, token: impl Into<String>) {
        if let Ok(mut tokens) = self.tokens.write() {
            tokens.insert(role, token.into());
        }
    }

    /// Drop the token for a role
    pub fn clear(&self, role: Role) {
        if let Ok(mut tokens) = self.tokens.write() {
            tokens.remove(&role);
        }
    }
}
