//! Session state and route guards for the EventMart portals
//!
//! - [`KeyValueStore`]: the persistence seam (file-backed or in-memory)
//! - [`SessionManager`]: writes, reads and clears per-role session markers
//! - [`RouteGuard`]: renders protected content or redirects to login
//!
//! # Example
//!
//! ```rust
//! use eventmart_core::{Role, TokenHolder};
//! use eventmart_session::{GuardDecision, MemoryStore, RouteGuard, SessionManager};
//! use std::sync::Arc;
//!
//! let session = SessionManager::new(Arc::new(MemoryStore::new()), TokenHolder::new());
//! let guard = RouteGuard::new(Role::Vendor, session.clone());
//! assert_eq!(guard.check(), GuardDecision::Redirect("/vendor/login"));
//!
//! session.sign_in(Role::Vendor, "v1", "token").unwrap();
//! assert_eq!(guard.check(), GuardDecision::Render);
//! ```

pub mod error;
pub mod guard;
pub mod manager;
pub mod navigation;
pub mod store;

pub use error::{Result, SessionError};
pub use guard::{GuardDecision, PublicOnlyGuard, RouteGuard};
pub use manager::{SessionManager, SessionMarker};
pub use navigation::{Navigator, RecordingNavigator};
pub use store::{FileStore, KeyValueStore, MemoryStore};
