//! Session markers: who is signed in, per role
//!
//! Lifecycle of a marker: absent, written at login, read on every guarded
//! mount, cleared at logout. Presence is all that is checked; the backend
//! rejects stale tokens on its own.

use crate::error::{Result, SessionError};
use crate::store::KeyValueStore;
use eventmart_core::{Role, TokenHolder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Proof of login for one role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMarker {
    pub role: Role,
    pub id: String,
    pub access_token: Option<String>,
}

/// Reads and writes session markers.
///
/// The identifier lives in the key-value store under the role's storage key.
/// The access token lives in the shared [`TokenHolder`]; with
/// [`SessionManager::persisting_tokens`] it is also mirrored to the store so
/// a later process can [`restore`](SessionManager::restore) it.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn KeyValueStore>,
    tokens: TokenHolder,
    persist_tokens: bool,
}

fn token_key(role: Role) -> String {
    format!("{}AccessToken", role.as_str())
}

impl SessionManager {
    pub fn new(store: Arc<dyn KeyValueStore>, tokens: TokenHolder) -> Self {
        Self {
            store,
            tokens,
            persist_tokens: false,
        }
    }

    /// Also keep access tokens in the store
    #[must_use]
    pub fn persisting_tokens(mut self) -> Self {
        self.persist_tokens = true;
        self
    }

    /// Shared token holder
    pub fn tokens(&self) -> &TokenHolder {
        &self.tokens
    }

    /// Load persisted tokens into the holder for every signed-in role
    pub fn restore(&self) -> Result<()> {
        if !self.persist_tokens {
            return Ok(());
        }
        for role in Role::ALL {
            if let Some(token) = self.store.get(&token_key(role))? {
                self.tokens.set(role, token);
            }
        }
        Ok(())
    }

    /// Record a successful login
    pub fn sign_in(&self, role: Role, id: &str, access_token: &str) -> Result<SessionMarker> {
        if id.trim().is_empty() {
            return Err(SessionError::EmptyIdentifier(role.to_string()));
        }

        self.store.set(role.storage_key(), id)?;
        self.tokens.set(role, access_token);
        if self.persist_tokens {
            self.store.set(&token_key(role), access_token)?;
        }

        info!(%role, id, "Signed in");
        Ok(SessionMarker {
            role,
            id: id.to_string(),
            access_token: Some(access_token.to_string()),
        })
    }

    /// Clear the role's marker and token
    pub fn sign_out(&self, role: Role) -> Result<()> {
        self.store.remove(role.storage_key())?;
        self.tokens.clear(role);
        if self.persist_tokens {
            self.store.remove(&token_key(role))?;
        }
        info!(%role, "Signed out");
        Ok(())
    }

    /// Current marker for a role.
    ///
    /// A store read failure counts as "no marker".
    pub fn marker(&self, role: Role) -> Option<SessionMarker> {
        let id = match self.store.get(role.storage_key()) {
            Ok(id) => id?,
            Err(e) => {
                warn!(%role, error = %e, "Session store unreadable, treating as signed out");
                return None;
            }
        };
        if id.is_empty() {
            return None;
        }
        Some(SessionMarker {
            role,
            id,
            access_token: self.tokens.get(role),
        })
    }

    /// Token held for the role, if any
    pub fn access_token(&self, role: Role) -> Option<String> {
        self.tokens.get(role)
    }

    /// Whether the role's identifier is present
    pub fn is_authenticated(&self, role: Role) -> bool {
        self.marker(role).is_some()
    }
}
