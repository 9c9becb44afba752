//! Reject-vendor dialog

use crate::error::{PortalError, Result};
use crate::tables::VendorTable;
use eventmart_api_client::Ack;
use eventmart_core::validation::{validate_rejection_reason, FieldErrors};

/// Open/closed state plus the reason being typed
#[derive(Debug, Default)]
pub struct RejectVendorModal {
    vendor_id: Option<String>,
    reason: String,
    errors: FieldErrors,
}

impl RejectVendorModal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open for a vendor, clearing anything left from last time
    pub fn open(&mut self, vendor_id: impl Into<String>) {
        self.vendor_id = Some(vendor_id.into());
        self.reason.clear();
        self.errors.clear();
    }

    pub fn close(&mut self) {
        self.vendor_id = None;
    }

    pub fn is_open(&self) -> bool {
        self.vendor_id.is_some()
    }

    pub fn vendor_id(&self) -> Option<&str> {
        self.vendor_id.as_deref()
    }

    pub fn set_reason(&mut self, reason: impl Into<String>) {
        self.reason = reason.into();
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Send the rejection. The dialog closes only on success.
    pub async fn submit(&mut self, table: &VendorTable) -> Result<Ack> {
        let Some(vendor_id) = self.vendor_id.clone() else {
            return Err(PortalError::State("No vendor selected"));
        };
        self.errors = validate_rejection_reason(&self.reason);
        if !self.errors.is_empty() {
            return Err(PortalError::Invalid(self.errors.clone()));
        }

        let ack = table.reject(&vendor_id, &self.reason).await?;
        self.close();
        Ok(ack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_resets_reason() {
        let mut modal = RejectVendorModal::new();
        assert!(!modal.is_open());

        modal.open("v1");
        modal.set_reason("Incomplete documents");
        modal.close();
        modal.open("v2");

        assert!(modal.is_open());
        assert_eq!(modal.vendor_id(), Some("v2"));
        assert!(modal.reason.is_empty());
    }
}
