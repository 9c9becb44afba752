//! Backend-owned records and shared payloads
//!
//! The backend stores records with a `_id` key and camelCase fields. These
//! types mirror that wire shape; the client never mutates them locally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account status for vendors and clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Inactive,
    Pending,
    Blocked,
    /// Vendor application turned down by an admin
    Rejected,
}

impl AccountStatus {
    /// Wire name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Pending => "pending",
            Self::Blocked => "blocked",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vendor record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub status: AccountStatus,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Client (ticket buyer) record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
}

/// Event lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Upcoming,
    Completed,
    Cancelled,
}

/// Venue coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub longitude: f64,
    pub latitude: f64,
}

/// Event record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: Location,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub poster_image: Vec<String>,
    pub price_per_ticket: f64,
    pub max_tickets_per_user: u32,
    pub total_ticket: u32,
    #[serde(default)]
    pub date: Vec<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub ticket_purchased: u32,
    pub category: String,
    pub hosted_by: String,
    pub status: EventStatus,
}

impl Event {
    /// Tickets still on sale
    #[must_use]
    pub fn tickets_left(&self) -> u32 {
        self.total_ticket.saturating_sub(self.ticket_purchased)
    }
}

/// Payload for creating an event; the backend assigns identity and ownership
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub location: Location,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub poster_image: Vec<String>,
    pub price_per_ticket: f64,
    pub max_tickets_per_user: u32,
    pub total_ticket: u32,
    pub date: Vec<DateTime<Utc>>,
    pub category: String,
}

/// Payload for updating an event. Identity and ownership fields are absent
/// and location is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventUpdate {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub poster_image: Vec<String>,
    pub price_per_ticket: f64,
    pub max_tickets_per_user: u32,
    pub total_ticket: u32,
    pub date: Vec<DateTime<Utc>>,
    pub category: String,
    pub status: EventStatus,
}

impl From<&Event> for EventUpdate {
    fn from(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            description: event.description.clone(),
            location: Some(event.location),
            start_time: event.start_time,
            end_time: event.end_time,
            poster_image: event.poster_image.clone(),
            price_per_ticket: event.price_per_ticket,
            max_tickets_per_user: event.max_tickets_per_user,
            total_ticket: event.total_ticket,
            date: event.date.clone(),
            category: event.category.clone(),
            status: event.status,
        }
    }
}

/// One page of a list endpoint.
///
/// The backend names the item array after the entity (`clients`, `vendors`,
/// `events`); all of them land in `items`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(alias = "clients", alias = "vendors", alias = "events")]
    pub items: Vec<T>,
    #[serde(default = "first_page")]
    pub total_pages: u32,
    #[serde(default = "first_page")]
    pub current_page: u32,
}

fn first_page() -> u32 {
    1
}

impl<T> Page<T> {
    /// Whether a later page exists
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// Authenticated principal as returned by the login endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Email and password
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Create credentials
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Successful login: `{accessToken, admin | vendor | client}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(alias = "admin", alias = "vendor", alias = "client")]
    pub account: Principal,
    #[serde(default)]
    pub message: Option<String>,
}

/// Registration payload shared by vendors and clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// OTP confirmation: `{formdata, enteredOtp}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpVerification {
    pub formdata: SignupRequest,
    pub entered_otp: String,
}

/// Generic acknowledgement: `{message?}`; other keys are ignored
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_deserialize() {
        let json = r#"{
            "_id": "v1",
            "name": "Aurora Events",
            "email": "hello@aurora.io",
            "status": "pending",
            "createdAt": "2024-03-01T10:00:00Z"
        }"#;

        let vendor: Vendor = serde_json::from_str(json).unwrap();
        assert_eq!(vendor.id, "v1");
        assert_eq!(vendor.status, AccountStatus::Pending);
        assert!(vendor.phone.is_none());
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let json = r#"{"_id":"c1","name":"A","email":"a@b.co","status":"deleted","createdAt":"2024-03-01T10:00:00Z"}"#;
        assert!(serde_json::from_str::<Client>(json).is_err());
    }

    #[test]
    fn test_page_aliases() {
        let json = r#"{"vendors": [], "totalPages": 3, "currentPage": 2}"#;
        let page: Page<Vendor> = serde_json::from_str(json).unwrap();
        assert!(page.items.is_empty());
        assert!(page.has_next());

        let json = r#"{"clients": []}"#;
        let page: Page<Client> = serde_json::from_str(json).unwrap();
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_next());
    }

    #[test]
    fn test_login_response_accepts_any_role_key() {
        let vendor: LoginResponse =
            serde_json::from_str(r#"{"accessToken":"t","vendor":{"_id":"v9"}}"#).unwrap();
        assert_eq!(vendor.account.id, "v9");

        let admin: LoginResponse =
            serde_json::from_str(r#"{"accessToken":"t","admin":{"_id":"a1","email":"root@em.app"}}"#)
                .unwrap();
        assert_eq!(admin.account.email.as_deref(), Some("root@em.app"));
    }

    #[test]
    fn test_event_update_omits_missing_location() {
        let event: Event = serde_json::from_str(
            r#"{
                "_id": "e1",
                "title": "Jazz Night",
                "description": "Live quartet",
                "location": {"longitude": 76.26, "latitude": 9.93},
                "startTime": "2024-06-01T18:00:00Z",
                "endTime": "2024-06-01T22:00:00Z",
                "posterImage": ["https://img.test/p.jpg"],
                "pricePerTicket": 499.0,
                "maxTicketsPerUser": 4,
                "totalTicket": 200,
                "date": ["2024-06-01T00:00:00Z"],
                "createdAt": "2024-05-01T00:00:00Z",
                "ticketPurchased": 150,
                "category": "music",
                "hostedBy": "v1",
                "status": "upcoming"
            }"#,
        )
        .unwrap();
        assert_eq!(event.tickets_left(), 50);

        let mut update = EventUpdate::from(&event);
        update.location = None;
        let json = serde_json::to_value(&update).unwrap();
        assert!(json.get("location").is_none());
        assert!(json.get("hostedBy").is_none());
        assert_eq!(json["pricePerTicket"], 499.0);
    }
}
