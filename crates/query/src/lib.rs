//! Query and mutation handles for the EventMart portals
//!
//! A [`Query`] caches paginated reads per [`QueryKey`]; a [`Mutation`] runs
//! imperative writes. Both expose a [`HookState`] snapshot and a
//! `tokio::sync::watch` receiver for screens that re-render on change.
//!
//! Neither handle issues a second request while one for the same key is
//! pending: later callers join the pending request and get its result.
//!
//! Factories bind each backend operation:
//!
//! ```rust,no_run
//! use eventmart_api_client::MarketplaceClient;
//! use eventmart_query::admin;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let api = MarketplaceClient::new()?.admin();
//! let vendors = admin::vendors_query(api.clone());
//! let block = admin::block_vendor_mutation(api);
//!
//! let list = vendors.clone();
//! block.on_success(move |_| list.invalidate());
//!
//! let page = vendors.fetch(1).await?;
//! if let Some(vendor) = page.items.first() {
//!     block.trigger(vendor.id.clone()).await?;
//! }
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::pin::Pin;

pub mod admin;
pub mod client;
mod inflight;
pub mod mutation;
pub mod query;
pub mod state;
pub mod vendor;

pub use mutation::Mutation;
pub use query::{Query, QueryKey};
pub use state::HookState;

/// Boxed, sendable future
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;
