//! CLI command implementations

pub mod admin;
pub mod auth;
pub mod events;

use crate::output::{TerminalNavigator, TerminalNotifier};
use crate::{Cli, Format};
use anyhow::Result;
use eventmart_api_client::ClientConfig;
use eventmart_core::config::Config;
use eventmart_core::{Error, Role};
use eventmart_portal::PortalContext;
use eventmart_session::{FileStore, GuardDecision};
use serde::Serialize;
use std::sync::Arc;

/// Everything a command needs, built from config file, env and flags
pub struct Session {
    pub ctx: PortalContext,
    pub navigator: Arc<TerminalNavigator>,
}

impl Session {
    pub fn open(cli: &Cli) -> Result<Self> {
        let config = Config::load(cli.config.as_deref())?;

        let mut client_config = ClientConfig::from_section(&config.schema.api);
        if let Some(url) = &cli.api_url {
            client_config = client_config.with_base_url(url);
        }
        client_config.validate()?;

        let path = cli
            .session_file
            .clone()
            .unwrap_or_else(|| config.schema.session.resolved_storage_path());
        let store = FileStore::open(&path)?;
        tracing::debug!(path = %path.display(), "Session store opened");

        let navigator = Arc::new(TerminalNavigator::default());
        let ctx = PortalContext::persistent(
            client_config,
            Arc::new(store),
            Arc::new(TerminalNotifier),
            navigator.clone(),
        )?;
        Ok(Self { ctx, navigator })
    }

    /// Fail unless a session for `role` is stored
    pub fn require(&self, role: Role) -> Result<()> {
        match self.ctx.guard(role).check() {
            GuardDecision::Render => Ok(()),
            GuardDecision::Redirect(route) => {
                tracing::debug!(%role, route, "No session");
                Err(Error::not_authenticated(role.as_str()).into())
            }
        }
    }
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn is_json(cli: &Cli) -> bool {
    cli.format == Format::Json
}
