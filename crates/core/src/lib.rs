//! Core utilities for the EventMart portals
//!
//! This crate provides the pieces shared by every portal (admin, vendor, client):
//!
//! - **Roles**: per-role storage keys, routes and the access token holder
//! - **Error handling**: errors with codes, context, and recovery suggestions
//! - **Validation**: a fluent field validator and the portal form rules
//! - **Configuration**: TOML-based configuration with defaults
//!
//! # Example
//!
//! ```rust
//! use eventmart_core::validation::{validate_login, LoginFields};
//!
//! let errors = validate_login(&LoginFields::new("vendor@example.com", "weak"));
//! assert!(errors.contains_key("password"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod auth;
pub mod config;
pub mod error;
pub mod validation;

pub use auth::{Role, TokenHolder};
pub use error::{exit_codes, Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::auth::{Role, TokenHolder};
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::validation::{FieldErrors, LoginFields, ValidationResult, Validator};
}
