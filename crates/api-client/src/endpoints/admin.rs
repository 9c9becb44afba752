//! Admin API endpoints
//!
//! Maps to the `/admin` routes:
//! - Login
//! - Paginated client and vendor lists (all, pending, rejected)
//! - Block / unblock clients and vendors
//! - Approve or reject pending vendors
//!
//! The error key differs between endpoints; each [`ErrorSpec`] below records
//! what that endpoint actually sends.

use crate::client::MarketplaceClient;
use crate::endpoints::paged;
use crate::error::{ApiResult, ErrorField, ErrorSpec};
use crate::models::{AccountStatus, Ack, Client, Credentials, LoginResponse, Page, Vendor};
use eventmart_core::Role;
use serde::{Deserialize, Serialize};

pub(crate) const LOGIN: ErrorSpec = ErrorSpec::new("admin.login", ErrorField::Error, "Login failed");
pub(crate) const CLIENTS: ErrorSpec =
    ErrorSpec::new("admin.clients", ErrorField::Message, "Failed to fetch clients");
pub(crate) const VENDORS: ErrorSpec =
    ErrorSpec::new("admin.vendors", ErrorField::Message, "Failed to fetch vendors");
pub(crate) const PENDING_VENDORS: ErrorSpec = ErrorSpec::new(
    "admin.pending_vendors",
    ErrorField::Message,
    "Failed to fetch pending vendors",
);
pub(crate) const REJECTED_VENDORS: ErrorSpec = ErrorSpec::new(
    "admin.rejected_vendors",
    ErrorField::Message,
    "Failed to fetch rejected vendors",
);
pub(crate) const BLOCK_CLIENT: ErrorSpec =
    ErrorSpec::new("admin.block_client", ErrorField::Error, "Failed to block client");
pub(crate) const UNBLOCK_CLIENT: ErrorSpec =
    ErrorSpec::new("admin.unblock_client", ErrorField::Error, "Failed to unblock client");
pub(crate) const BLOCK_VENDOR: ErrorSpec =
    ErrorSpec::new("admin.block_vendor", ErrorField::Message, "Failed to block vendor");
pub(crate) const UNBLOCK_VENDOR: ErrorSpec =
    ErrorSpec::new("admin.unblock_vendor", ErrorField::Message, "Failed to unblock vendor");
pub(crate) const UPDATE_VENDOR_STATUS: ErrorSpec = ErrorSpec::new(
    "admin.update_vendor_status",
    ErrorField::Error,
    "Failed to update vendor status",
);
pub(crate) const REJECT_VENDOR: ErrorSpec =
    ErrorSpec::new("admin.reject_vendor", ErrorField::Error, "Failed to reject vendor");

/// Admin API interface
#[derive(Clone)]
pub struct AdminApi {
    client: MarketplaceClient,
}

impl AdminApi {
    /// Create a new admin API interface
    pub(crate) fn new(client: MarketplaceClient) -> Self {
        Self { client }
    }

    /// Authenticate an admin
    ///
    /// POST /admin/login
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<LoginResponse> {
        self.client.post(Role::Admin, "login", credentials, LOGIN).await
    }

    /// GET /admin/clients?pageNo=n
    pub async fn clients(&self, page: u32) -> ApiResult<Page<Client>> {
        self.client.get(Role::Admin, &paged("clients", page), CLIENTS).await
    }

    /// GET /admin/vendors?pageNo=n
    pub async fn vendors(&self, page: u32) -> ApiResult<Page<Vendor>> {
        self.client.get(Role::Admin, &paged("vendors", page), VENDORS).await
    }

    /// GET /admin/pendingVendors?pageNo=n
    pub async fn pending_vendors(&self, page: u32) -> ApiResult<Page<Vendor>> {
        self.client
            .get(Role::Admin, &paged("pendingVendors", page), PENDING_VENDORS)
            .await
    }

    /// GET /admin/rejectedVendors?pageNo=n
    pub async fn rejected_vendors(&self, page: u32) -> ApiResult<Page<Vendor>> {
        self.client
            .get(Role::Admin, &paged("rejectedVendors", page), REJECTED_VENDORS)
            .await
    }

    /// PATCH /admin/blockClient
    pub async fn block_client(&self, client_id: &str) -> ApiResult<Ack> {
        self.client
            .patch(Role::Admin, "blockClient", &ClientRef::new(client_id), BLOCK_CLIENT)
            .await
    }

    /// PATCH /admin/unblockClient
    pub async fn unblock_client(&self, client_id: &str) -> ApiResult<Ack> {
        self.client
            .patch(Role::Admin, "unblockClient", &ClientRef::new(client_id), UNBLOCK_CLIENT)
            .await
    }

    /// PATCH /admin/blockVendor
    pub async fn block_vendor(&self, vendor_id: &str) -> ApiResult<Ack> {
        self.client
            .patch(Role::Admin, "blockVendor", &VendorRef::new(vendor_id), BLOCK_VENDOR)
            .await
    }

    /// PATCH /admin/unblockVendor
    pub async fn unblock_vendor(&self, vendor_id: &str) -> ApiResult<Ack> {
        self.client
            .patch(Role::Admin, "unblockVendor", &VendorRef::new(vendor_id), UNBLOCK_VENDOR)
            .await
    }

    /// Approve (or otherwise re-status) a pending vendor
    ///
    /// PATCH /admin/updateVendorStatus
    pub async fn update_vendor_status(&self, update: &VendorStatusUpdate) -> ApiResult<Ack> {
        self.client
            .patch(Role::Admin, "updateVendorStatus", update, UPDATE_VENDOR_STATUS)
            .await
    }

    /// PATCH /admin/rejectVendor
    pub async fn reject_vendor(&self, rejection: &VendorRejection) -> ApiResult<Ack> {
        self.client
            .patch(Role::Admin, "rejectVendor", rejection, REJECT_VENDOR)
            .await
    }
}

// ============================================================================
// Request Types
// ============================================================================

/// `{clientId}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRef {
    pub client_id: String,
}

impl ClientRef {
    fn new(id: &str) -> Self {
        Self {
            client_id: id.to_string(),
        }
    }
}

/// `{vendorId}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorRef {
    pub vendor_id: String,
}

impl VendorRef {
    fn new(id: &str) -> Self {
        Self {
            vendor_id: id.to_string(),
        }
    }
}

/// `{vendorId, newStatus}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorStatusUpdate {
    pub vendor_id: String,
    pub new_status: AccountStatus,
}

impl VendorStatusUpdate {
    /// Approve a pending vendor
    pub fn approve(vendor_id: impl Into<String>) -> Self {
        Self {
            vendor_id: vendor_id.into(),
            new_status: AccountStatus::Active,
        }
    }
}

/// `{vendorId, newStatus, rejectionReason}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorRejection {
    pub vendor_id: String,
    pub new_status: AccountStatus,
    pub rejection_reason: String,
}

impl VendorRejection {
    /// Reject a vendor with a reason
    pub fn new(vendor_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            vendor_id: vendor_id.into(),
            new_status: AccountStatus::Rejected,
            rejection_reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_update_wire_shape() {
        let json = serde_json::to_value(VendorStatusUpdate::approve("v1")).unwrap();
        assert_eq!(json, serde_json::json!({"vendorId": "v1", "newStatus": "active"}));
    }

    #[test]
    fn test_rejection_wire_shape() {
        let json = serde_json::to_value(VendorRejection::new("v2", "Incomplete KYC documents")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "vendorId": "v2",
                "newStatus": "rejected",
                "rejectionReason": "Incomplete KYC documents"
            })
        );
    }

    #[test]
    fn test_error_fields_follow_backend() {
        assert_eq!(BLOCK_CLIENT.field, ErrorField::Error);
        assert_eq!(BLOCK_VENDOR.field, ErrorField::Message);
        assert_eq!(VENDORS.fallback, "Failed to fetch vendors");
    }
}
