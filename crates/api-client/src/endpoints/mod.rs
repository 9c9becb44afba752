//! Role-specific API wrappers
//!
//! Each wrapper issues one request to a fixed path under its role's API root
//! and normalizes failures with the endpoint's [`ErrorSpec`](crate::error::ErrorSpec).
//!
//! ## Mapping to the backend
//!
//! | Module | API root | Description |
//! |--------|----------|-------------|
//! | `admin` | `/admin` | Login, account lists, block/approve/reject |
//! | `vendor` | `/vendor` | Login, signup + OTP, events, media upload |
//! | `client` | `/client` | Login, signup + OTP, event browsing |

use crate::error::{ApiError, ApiResult};
use reqwest::Url;

pub mod admin;
pub mod client;
pub mod vendor;

pub use admin::AdminApi;
pub use client::ClientApi;
pub use vendor::VendorApi;

/// Path with the `pageNo` query the list endpoints expect
pub(crate) fn paged(path: &str, page: u32) -> String {
    format!("{path}?pageNo={page}")
}

/// `{path}/{id}` with `id` percent-encoded as a single path segment.
///
/// Ids that are empty or a dot segment would address another route and are
/// refused before anything is sent.
pub(crate) fn item(path: &str, id: &str) -> ApiResult<String> {
    if matches!(id, "" | "." | "..") {
        return Err(ApiError::config(format!("Invalid record id: {id:?}")));
    }
    let mut url = Url::parse("http://api.invalid/").map_err(|e| ApiError::config(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| ApiError::config("URL cannot hold a path"))?
        .push(path)
        .push(id);
    Ok(url.path().trim_start_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_encodes_the_id_as_one_segment() {
        assert_eq!(item("events", "665f1c2e").unwrap(), "events/665f1c2e");
        assert_eq!(item("events", "x?pageNo=1").unwrap(), "events/x%3FpageNo=1");
        assert_eq!(item("updateEvent", "a/b#c").unwrap(), "updateEvent/a%2Fb%23c");
    }

    #[test]
    fn test_item_refuses_dot_and_empty_ids() {
        assert!(matches!(item("events", ".."), Err(ApiError::Config(_))));
        assert!(matches!(item("events", ""), Err(ApiError::Config(_))));
    }
}
