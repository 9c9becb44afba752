//! Role navigation sidebar

use crate::context::PortalContext;
use crate::error::Result;
use eventmart_core::Role;

/// One navigation entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub route: &'static str,
}

const ADMIN_ITEMS: &[NavItem] = &[
    NavItem { label: "Dashboard", route: "/admin/dashboard" },
    NavItem { label: "Clients", route: "/admin/clients" },
    NavItem { label: "Vendors", route: "/admin/vendors" },
    NavItem { label: "Pending vendors", route: "/admin/vendors/pending" },
    NavItem { label: "Rejected vendors", route: "/admin/vendors/rejected" },
];

const VENDOR_ITEMS: &[NavItem] = &[
    NavItem { label: "Home", route: "/vendor/home" },
    NavItem { label: "Events", route: "/vendor/events" },
    NavItem { label: "Create event", route: "/vendor/events/new" },
];

const CLIENT_ITEMS: &[NavItem] = &[
    NavItem { label: "Home", route: "/home" },
    NavItem { label: "Events", route: "/events" },
];

pub struct Sidebar {
    role: Role,
    collapsed: bool,
    ctx: PortalContext,
}

impl Sidebar {
    pub fn new(role: Role, ctx: PortalContext) -> Self {
        Self {
            role,
            collapsed: false,
            ctx,
        }
    }

    pub fn toggle(&mut self) {
        self.collapsed = !self.collapsed;
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn items(&self) -> &'static [NavItem] {
        match self.role {
            Role::Admin => ADMIN_ITEMS,
            Role::Vendor => VENDOR_ITEMS,
            Role::Client => CLIENT_ITEMS,
        }
    }

    pub fn select(&self, item: &NavItem) {
        self.ctx.navigator.navigate(item.route);
    }

    /// Clear the role's session and go to its login screen
    pub fn logout(&self) -> Result<()> {
        self.ctx.session.sign_out(self.role)?;
        self.ctx.notifier.success("Logged out");
        self.ctx.navigator.navigate(self.role.login_route());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use eventmart_api_client::ClientConfig;
    use eventmart_session::{MemoryStore, RecordingNavigator};
    use std::sync::Arc;

    fn sidebar(role: Role) -> (Sidebar, PortalContext, Arc<RecordingNavigator>) {
        let navigator = Arc::new(RecordingNavigator::new());
        let ctx = PortalContext::new(
            ClientConfig::default(),
            Arc::new(MemoryStore::new()),
            Arc::new(RecordingNotifier::new()),
            navigator.clone(),
        )
        .unwrap();
        (Sidebar::new(role, ctx.clone()), ctx, navigator)
    }

    #[test]
    fn test_logout_clears_session_and_redirects() {
        let (sidebar, ctx, navigator) = sidebar(Role::Vendor);
        ctx.session.sign_in(Role::Vendor, "v1", "tok").unwrap();

        sidebar.logout().unwrap();

        assert!(!ctx.session.is_authenticated(Role::Vendor));
        assert_eq!(ctx.session.access_token(Role::Vendor), None);
        assert_eq!(navigator.visits(), vec!["/vendor/login".to_string()]);
    }

    #[test]
    fn test_items_follow_role() {
        let (sidebar, _, navigator) = sidebar(Role::Admin);
        assert_eq!(sidebar.items()[0].route, Role::Admin.home_route());

        sidebar.select(&sidebar.items()[2]);
        assert_eq!(navigator.last().as_deref(), Some("/admin/vendors"));
    }

    #[test]
    fn test_toggle() {
        let (mut sidebar, _, _) = sidebar(Role::Client);
        assert!(!sidebar.is_collapsed());
        sidebar.toggle();
        assert!(sidebar.is_collapsed());
        assert_eq!(sidebar.items()[0].route, Role::Client.home_route());
    }
}
