//! Login screen
//!
//! Same flow for all three roles: validate locally, call the role's login
//! endpoint, persist the session marker, toast, and go to the role home.

use crate::context::PortalContext;
use crate::error::{PortalError, Result};
use eventmart_api_client::{Credentials, LoginResponse};
use eventmart_core::validation::{validate_login, FieldErrors, LoginFields};
use eventmart_core::Role;
use eventmart_query::{admin, client, vendor, Mutation};
use eventmart_session::SessionMarker;
use tracing::{debug, info};

const LOGIN_SUCCESS: &str = "Login successful";

pub struct LoginForm {
    role: Role,
    fields: LoginFields,
    errors: FieldErrors,
    login: Mutation<Credentials, LoginResponse>,
    ctx: PortalContext,
}

impl LoginForm {
    pub fn new(role: Role, ctx: PortalContext) -> Self {
        let login = match role {
            Role::Admin => admin::login_mutation(ctx.client.admin()),
            Role::Vendor => vendor::login_mutation(ctx.client.vendor()),
            Role::Client => client::login_mutation(ctx.client.client()),
        };
        Self {
            role,
            fields: LoginFields::default(),
            errors: FieldErrors::new(),
            login,
            ctx,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.fields.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.fields.password = password.into();
    }

    pub fn fields(&self) -> &LoginFields {
        &self.fields
    }

    /// Field errors from the last submit
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_loading(&self) -> bool {
        self.login.is_loading()
    }

    /// Validate and log in.
    ///
    /// Invalid input never reaches the network. On backend failure the
    /// message is shown and the form keeps its values.
    pub async fn submit(&mut self) -> Result<SessionMarker> {
        self.errors = validate_login(&self.fields);
        if !self.errors.is_empty() {
            debug!(role = %self.role, fields = ?self.errors.keys().collect::<Vec<_>>(), "Login blocked by validation");
            return Err(PortalError::Invalid(self.errors.clone()));
        }

        let credentials = Credentials::new(self.fields.email.trim(), self.fields.password.clone());
        let response = match self.login.trigger(credentials).await {
            Ok(response) => response,
            Err(e) => {
                self.ctx.notifier.error(e.message());
                return Err(e.into());
            }
        };

        let marker = match self
            .ctx
            .session
            .sign_in(self.role, &response.account.id, &response.access_token)
        {
            Ok(marker) => marker,
            Err(e) => {
                self.ctx.notifier.error(&e.to_string());
                return Err(e.into());
            }
        };

        info!(role = %self.role, id = marker.id.as_str(), "Login complete");
        self.ctx
            .notifier
            .success(response.message.as_deref().unwrap_or(LOGIN_SUCCESS));
        self.ctx.navigator.navigate(self.role.home_route());
        Ok(marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{NoticeKind, RecordingNotifier};
    use eventmart_api_client::ClientConfig;
    use eventmart_session::{MemoryStore, RecordingNavigator};
    use std::sync::Arc;

    fn form(role: Role) -> (LoginForm, Arc<RecordingNotifier>, Arc<RecordingNavigator>) {
        let notifier = Arc::new(RecordingNotifier::new());
        let navigator = Arc::new(RecordingNavigator::new());
        // Nothing listens here; validation failures must not get that far
        let config = ClientConfig::default().with_base_url("http://127.0.0.1:9");
        let ctx = PortalContext::new(
            config,
            Arc::new(MemoryStore::new()),
            notifier.clone(),
            navigator.clone(),
        )
        .unwrap();
        (LoginForm::new(role, ctx), notifier, navigator)
    }

    #[tokio::test]
    async fn test_malformed_email_blocks_submit() {
        let (mut form, notifier, navigator) = form(Role::Vendor);
        form.set_email("not-an-email");
        form.set_password("Str0ng!Pass");

        let err = form.submit().await.unwrap_err();

        assert!(err.field_errors().unwrap().contains_key("email"));
        assert!(!form.is_loading());
        assert!(notifier.notices().is_empty());
        assert!(navigator.visits().is_empty());
    }

    #[tokio::test]
    async fn test_missing_password_blocks_submit() {
        let (mut form, _, _) = form(Role::Admin);
        form.set_email("root@eventmart.app");

        let err = form.submit().await.unwrap_err();
        assert!(form.errors().contains_key("password"));
        assert!(!form.errors().contains_key("email"));
        assert!(matches!(err, PortalError::Invalid(_)));
    }

    #[tokio::test]
    async fn test_weak_password_blocks_submit() {
        let (mut form, _, _) = form(Role::Client);
        form.set_email("sam@example.com");
        form.set_password("password");

        assert!(form.submit().await.is_err());
        assert!(form.errors().contains_key("password"));
        assert!(!form.is_loading());
    }

    #[tokio::test]
    async fn test_unreachable_backend_shows_fallback() {
        let (mut form, notifier, navigator) = form(Role::Vendor);
        form.set_email("hello@aurora.io");
        form.set_password("Str0ng!Pass");

        let err = form.submit().await.unwrap_err();

        assert!(matches!(err, PortalError::Api(_)));
        assert_eq!(notifier.count(NoticeKind::Error), 1);
        assert_eq!(notifier.last().unwrap().message, "Login failed");
        assert!(navigator.visits().is_empty());
        // Values are kept for another attempt
        assert_eq!(form.fields().email, "hello@aurora.io");
    }
}
