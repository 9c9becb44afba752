//! Vendor API endpoints
//!
//! Maps to the `/vendor` routes: login, signup with OTP confirmation, event
//! management and poster image upload.

use crate::client::MarketplaceClient;
use crate::endpoints::{item, paged};
use crate::error::{ApiResult, ErrorField, ErrorSpec};
use crate::models::{
    Ack, Credentials, Event, EventUpdate, LoginResponse, NewEvent, OtpVerification, Page,
    SignupRequest,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use eventmart_core::Role;
use serde::{Deserialize, Serialize};

pub(crate) const LOGIN: ErrorSpec = ErrorSpec::new("vendor.login", ErrorField::Error, "Login failed");
pub(crate) const SIGNUP: ErrorSpec = ErrorSpec::new("vendor.signup", ErrorField::Error, "Signup failed");
pub(crate) const VERIFY_OTP: ErrorSpec =
    ErrorSpec::new("vendor.verify_otp", ErrorField::Error, "OTP verification failed");
pub(crate) const RESEND_OTP: ErrorSpec =
    ErrorSpec::new("vendor.resend_otp", ErrorField::Error, "Failed to resend OTP");
pub(crate) const CREATE_EVENT: ErrorSpec =
    ErrorSpec::new("vendor.create_event", ErrorField::Message, "Failed to create event");
pub(crate) const UPDATE_EVENT: ErrorSpec =
    ErrorSpec::new("vendor.update_event", ErrorField::Message, "Failed to update event");
pub(crate) const EVENTS: ErrorSpec =
    ErrorSpec::new("vendor.events", ErrorField::Message, "Failed to fetch events");
pub(crate) const UPLOAD_MEDIA: ErrorSpec =
    ErrorSpec::new("vendor.upload_media", ErrorField::Error, "Image upload failed");

/// Vendor API interface
#[derive(Clone)]
pub struct VendorApi {
    client: MarketplaceClient,
}

impl VendorApi {
    /// Create a new vendor API interface
    pub(crate) fn new(client: MarketplaceClient) -> Self {
        Self { client }
    }

    /// POST /vendor/login
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<LoginResponse> {
        self.client.post(Role::Vendor, "login", credentials, LOGIN).await
    }

    /// Register a vendor; the backend mails an OTP
    ///
    /// POST /vendor/signup
    pub async fn signup(&self, request: &SignupRequest) -> ApiResult<Ack> {
        self.client.post(Role::Vendor, "signup", request, SIGNUP).await
    }

    /// POST /vendor/verify with `{formdata, enteredOtp}`
    pub async fn verify_otp(&self, verification: &OtpVerification) -> ApiResult<Ack> {
        self.client
            .post(Role::Vendor, "verify", verification, VERIFY_OTP)
            .await
    }

    /// POST /vendor/resendOtp with `{email}`
    pub async fn resend_otp(&self, email: &str) -> ApiResult<Ack> {
        self.client
            .post(Role::Vendor, "resendOtp", &EmailRef::new(email), RESEND_OTP)
            .await
    }

    /// POST /vendor/createEvent
    pub async fn create_event(&self, event: &NewEvent) -> ApiResult<EventEnvelope> {
        self.client
            .post(Role::Vendor, "createEvent", event, CREATE_EVENT)
            .await
    }

    /// PATCH /vendor/updateEvent/{id}
    pub async fn update_event(&self, event_id: &str, update: &EventUpdate) -> ApiResult<EventEnvelope> {
        self.client
            .patch(Role::Vendor, &item("updateEvent", event_id)?, update, UPDATE_EVENT)
            .await
    }

    /// The signed-in vendor's events
    ///
    /// GET /vendor/events?pageNo=n
    pub async fn events(&self, page: u32) -> ApiResult<Page<Event>> {
        self.client.get(Role::Vendor, &paged("events", page), EVENTS).await
    }

    /// Upload a poster image; returns the hosted URL
    ///
    /// POST /vendor/uploadImage with the file base64-encoded
    pub async fn upload_media(&self, upload: &MediaUpload) -> ApiResult<UploadedMedia> {
        self.client
            .post(Role::Vendor, "uploadImage", upload, UPLOAD_MEDIA)
            .await
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// `{email}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailRef {
    pub email: String,
}

impl EmailRef {
    fn new(email: &str) -> Self {
        Self {
            email: email.to_string(),
        }
    }
}

/// `{message?, event}` returned by create/update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    #[serde(default)]
    pub message: Option<String>,
    pub event: Event,
}

/// Image upload body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaUpload {
    pub file_name: String,
    pub content_type: String,
    /// Base64 (standard alphabet, padded) file contents
    pub data: String,
}

impl MediaUpload {
    /// Encode raw image bytes
    pub fn from_bytes(file_name: impl Into<String>, content_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data: STANDARD.encode(bytes),
        }
    }

    /// Guess the content type from the file extension
    #[must_use]
    pub fn content_type_for(file_name: &str) -> &'static str {
        let ext = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "webp" => "image/webp",
            "gif" => "image/gif",
            _ => "application/octet-stream",
        }
    }
}

/// `{url}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedMedia {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_upload_encodes_base64() {
        let upload = MediaUpload::from_bytes("poster.png", "image/png", b"hello");
        assert_eq!(upload.data, "aGVsbG8=");

        let json = serde_json::to_value(&upload).unwrap();
        assert_eq!(json["fileName"], "poster.png");
        assert_eq!(json["contentType"], "image/png");
    }

    #[test]
    fn test_content_type_guess() {
        assert_eq!(MediaUpload::content_type_for("a.JPG"), "image/jpeg");
        assert_eq!(MediaUpload::content_type_for("b.webp"), "image/webp");
        assert_eq!(MediaUpload::content_type_for("noext"), "application/octet-stream");
    }

    #[test]
    fn test_otp_verification_wire_shape() {
        let verification = OtpVerification {
            formdata: SignupRequest {
                name: "Aurora Events".into(),
                email: "hello@aurora.io".into(),
                phone: "9876543210".into(),
                password: "Str0ng!Pass".into(),
                address: None,
            },
            entered_otp: "123456".into(),
        };
        let json = serde_json::to_value(&verification).unwrap();
        assert_eq!(json["enteredOtp"], "123456");
        assert_eq!(json["formdata"]["email"], "hello@aurora.io");
        assert!(json["formdata"].get("address").is_none());
    }
}
