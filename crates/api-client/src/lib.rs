//! Typed API client for the EventMart backend
//!
//! This crate provides one HTTP client with per-role wrappers (admin, vendor,
//! client). Every wrapper issues exactly one request and reports failure as a
//! single [`ApiError`] whose message is ready to show to a user.
//!
//! # Features
//!
//! - **Environment-based configuration**: load the backend URL and timeout from env
//! - **Uniform errors**: per-endpoint `error`/`message` keys normalized in one place
//! - **Shared tokens**: bearer tokens read from a [`TokenHolder`](eventmart_core::TokenHolder)
//! - **Request correlation**: every request carries an `X-Request-ID`
//!
//! # Example
//!
//! ```rust,no_run
//! use eventmart_api_client::{Credentials, MarketplaceClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MarketplaceClient::new()?;
//!
//!     let login = client
//!         .vendor()
//!         .login(&Credentials::new("hello@aurora.io", "Str0ng!Pass"))
//!         .await?;
//!     println!("Signed in as {}", login.account.id);
//!
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod models;

pub use client::MarketplaceClient;
pub use config::{ClientConfig, Environment};
pub use error::{ApiError, ApiResult, ErrorField, ErrorSpec};
pub use models::{
    AccountStatus, Ack, Client, Credentials, Event, EventStatus, EventUpdate, Location,
    LoginResponse, NewEvent, OtpVerification, Page, Principal, SignupRequest, Vendor,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::MarketplaceClient;
    pub use crate::config::{ClientConfig, Environment};
    pub use crate::endpoints::{AdminApi, ClientApi, VendorApi};
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::models::*;
}
