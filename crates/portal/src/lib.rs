//! Screen controllers for the EventMart portals
//!
//! A controller holds what one screen renders (field values, field errors,
//! loading flags, rows) and performs its actions through the query layer.
//! Rendering, toasts and routing are outside collaborators reached through
//! [`Notifier`] and [`Navigator`](eventmart_session::Navigator).
//!
//! | Controller | Screen |
//! |------------|--------|
//! | [`LoginForm`] | Admin, vendor and client login |
//! | [`SignupFlow`] | Vendor and client registration with OTP |
//! | [`EventForm`] | Vendor event create/edit with poster upload |
//! | [`EventList`] | Vendor and client event listings |
//! | [`VendorTable`], [`ClientTable`] | Admin account lists and row actions |
//! | [`RejectVendorModal`] | Reject-with-reason dialog |
//! | [`Sidebar`] | Role navigation and logout |

pub mod context;
pub mod error;
pub mod event_form;
pub mod events;
pub mod login;
pub mod modal;
pub mod notify;
pub mod sidebar;
pub mod signup;
pub mod tables;

pub use context::PortalContext;
pub use error::{PortalError, Result};
pub use event_form::{validate_event, EventFields, EventForm};
pub use events::EventList;
pub use login::LoginForm;
pub use modal::RejectVendorModal;
pub use notify::{Notice, NoticeKind, Notifier, RecordingNotifier};
pub use sidebar::{NavItem, Sidebar};
pub use signup::{SignupFlow, SignupStep};
pub use tables::{ClientTable, VendorList, VendorTable};
