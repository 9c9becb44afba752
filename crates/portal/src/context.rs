//! Shared collaborators for every screen controller

use crate::error::Result;
use crate::notify::Notifier;
use eventmart_api_client::{ClientConfig, MarketplaceClient};
use eventmart_core::{Role, TokenHolder};
use eventmart_session::{KeyValueStore, Navigator, PublicOnlyGuard, RouteGuard, SessionManager};
use std::sync::Arc;

/// What a controller needs from the outside world.
///
/// The API client and the session manager share one token holder, so a
/// token written at login is sent on the next request.
#[derive(Clone)]
pub struct PortalContext {
    pub client: MarketplaceClient,
    pub session: SessionManager,
    pub notifier: Arc<dyn Notifier>,
    pub navigator: Arc<dyn Navigator>,
}

impl PortalContext {
    /// Wire a client and session manager around one token holder
    pub fn new(
        config: ClientConfig,
        store: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let tokens = TokenHolder::new();
        let client = MarketplaceClient::with_tokens(config, tokens.clone())?;
        let session = SessionManager::new(store, tokens);
        Ok(Self {
            client,
            session,
            notifier,
            navigator,
        })
    }

    /// Same as [`new`](Self::new), but tokens survive between processes
    pub fn persistent(
        config: ClientConfig,
        store: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let mut ctx = Self::new(config, store, notifier, navigator)?;
        ctx.session = ctx.session.persisting_tokens();
        ctx.session.restore()?;
        Ok(ctx)
    }

    pub fn guard(&self, role: Role) -> RouteGuard {
        RouteGuard::new(role, self.session.clone())
    }

    pub fn public_only_guard(&self, role: Role) -> PublicOnlyGuard {
        PublicOnlyGuard::new(role, self.session.clone())
    }
}
