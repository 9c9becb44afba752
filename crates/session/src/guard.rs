//! Route guards
//!
//! A guard is a two-state decision with no network call: the role's
//! identifier is present (render) or it is not (redirect to the role's
//! login route). Nothing here validates the token.

use crate::manager::SessionManager;
use crate::navigation::Navigator;
use eventmart_core::Role;
use tracing::debug;

/// Outcome of evaluating a guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Mount the protected content
    Render,
    /// Send the user elsewhere instead
    Redirect(&'static str),
}

/// Protects a role's screens
#[derive(Clone)]
pub struct RouteGuard {
    role: Role,
    session: SessionManager,
}

impl RouteGuard {
    pub fn new(role: Role, session: SessionManager) -> Self {
        Self { role, session }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Decide without side effects
    pub fn check(&self) -> GuardDecision {
        if self.session.is_authenticated(self.role) {
            GuardDecision::Render
        } else {
            GuardDecision::Redirect(self.role.login_route())
        }
    }

    /// Render `content` if allowed, otherwise redirect.
    ///
    /// `content` is never evaluated on the redirect branch.
    pub fn guard<T>(&self, navigator: &dyn Navigator, content: impl FnOnce() -> T) -> Option<T> {
        apply(self.check(), self.role, navigator, content)
    }
}

/// Keeps signed-in users off their own login and signup screens
#[derive(Clone)]
pub struct PublicOnlyGuard {
    role: Role,
    session: SessionManager,
}

impl PublicOnlyGuard {
    pub fn new(role: Role, session: SessionManager) -> Self {
        Self { role, session }
    }

    pub fn check(&self) -> GuardDecision {
        if self.session.is_authenticated(self.role) {
            GuardDecision::Redirect(self.role.home_route())
        } else {
            GuardDecision::Render
        }
    }

    pub fn guard<T>(&self, navigator: &dyn Navigator, content: impl FnOnce() -> T) -> Option<T> {
        apply(self.check(), self.role, navigator, content)
    }
}

fn apply<T>(
    decision: GuardDecision,
    role: Role,
    navigator: &dyn Navigator,
    content: impl FnOnce() -> T,
) -> Option<T> {
    match decision {
        GuardDecision::Render => Some(content()),
        GuardDecision::Redirect(route) => {
            debug!(%role, route, "Guard redirect");
            navigator.navigate(route);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::RecordingNavigator;
    use crate::store::MemoryStore;
    use eventmart_core::TokenHolder;
    use std::cell::Cell;
    use std::sync::Arc;

    fn session(entries: &[(&'static str, &'static str)]) -> SessionManager {
        SessionManager::new(
            Arc::new(MemoryStore::with_entries(entries.iter().copied())),
            TokenHolder::new(),
        )
    }

    #[test]
    fn test_absent_key_redirects_without_rendering() {
        let guard = RouteGuard::new(Role::Vendor, session(&[]));
        let navigator = RecordingNavigator::new();
        let rendered = Cell::new(false);

        let out = guard.guard(&navigator, || rendered.set(true));

        assert!(out.is_none());
        assert!(!rendered.get());
        assert_eq!(navigator.visits(), vec!["/vendor/login".to_string()]);
    }

    #[test]
    fn test_present_key_renders_without_redirect() {
        let guard = RouteGuard::new(Role::Vendor, session(&[("id", "v1")]));
        let navigator = RecordingNavigator::new();

        let out = guard.guard(&navigator, || "vendor home");

        assert_eq!(out, Some("vendor home"));
        assert!(navigator.visits().is_empty());
    }

    #[test]
    fn test_other_roles_key_does_not_count() {
        let guard = RouteGuard::new(Role::Admin, session(&[("id", "v1")]));
        assert_eq!(guard.check(), GuardDecision::Redirect("/admin/login"));
    }

    #[test]
    fn test_empty_value_counts_as_absent() {
        let guard = RouteGuard::new(Role::Client, session(&[("clientId", "")]));
        assert_eq!(guard.check(), GuardDecision::Redirect("/login"));
    }

    #[test]
    fn test_guard_follows_later_login_and_logout() {
        let manager = session(&[]);
        let guard = RouteGuard::new(Role::Admin, manager.clone());
        assert_eq!(guard.check(), GuardDecision::Redirect("/admin/login"));

        manager.sign_in(Role::Admin, "a1", "tok").unwrap();
        assert_eq!(guard.check(), GuardDecision::Render);

        manager.sign_out(Role::Admin).unwrap();
        assert_eq!(guard.check(), GuardDecision::Redirect("/admin/login"));
    }

    #[test]
    fn test_public_only_guard_bounces_signed_in_users() {
        let navigator = RecordingNavigator::new();
        let guard = PublicOnlyGuard::new(Role::Vendor, session(&[("id", "v1")]));

        assert!(guard.guard(&navigator, || ()).is_none());
        assert_eq!(navigator.last().as_deref(), Some("/vendor/home"));

        let guard = PublicOnlyGuard::new(Role::Vendor, session(&[]));
        assert_eq!(guard.check(), GuardDecision::Render);
    }
}
