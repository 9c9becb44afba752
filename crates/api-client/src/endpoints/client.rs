//! Client (ticket buyer) API endpoints
//!
//! Maps to the `/client` routes: login, signup with OTP confirmation and
//! browsing upcoming events.

use crate::client::MarketplaceClient;
use crate::endpoints::{item, paged};
use crate::endpoints::vendor::EmailRef;
use crate::error::{ApiResult, ErrorField, ErrorSpec};
use crate::models::{Ack, Credentials, Event, LoginResponse, OtpVerification, Page, SignupRequest};
use eventmart_core::Role;

pub(crate) const LOGIN: ErrorSpec = ErrorSpec::new("client.login", ErrorField::Error, "Login failed");
pub(crate) const SIGNUP: ErrorSpec = ErrorSpec::new("client.signup", ErrorField::Error, "Signup failed");
pub(crate) const VERIFY_OTP: ErrorSpec =
    ErrorSpec::new("client.verify_otp", ErrorField::Error, "OTP verification failed");
pub(crate) const RESEND_OTP: ErrorSpec =
    ErrorSpec::new("client.resend_otp", ErrorField::Error, "Failed to resend OTP");
pub(crate) const EVENTS: ErrorSpec =
    ErrorSpec::new("client.events", ErrorField::Message, "Failed to fetch events");
pub(crate) const EVENT: ErrorSpec =
    ErrorSpec::new("client.event", ErrorField::Message, "Failed to fetch event");

/// Client API interface
#[derive(Clone)]
pub struct ClientApi {
    client: MarketplaceClient,
}

impl ClientApi {
    /// Create a new client API interface
    pub(crate) fn new(client: MarketplaceClient) -> Self {
        Self { client }
    }

    /// POST /client/login
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<LoginResponse> {
        self.client.post(Role::Client, "login", credentials, LOGIN).await
    }

    /// POST /client/signup
    pub async fn signup(&self, request: &SignupRequest) -> ApiResult<Ack> {
        self.client.post(Role::Client, "signup", request, SIGNUP).await
    }

    /// POST /client/verify
    pub async fn verify_otp(&self, verification: &OtpVerification) -> ApiResult<Ack> {
        self.client
            .post(Role::Client, "verify", verification, VERIFY_OTP)
            .await
    }

    /// POST /client/resendOtp
    pub async fn resend_otp(&self, email: &str) -> ApiResult<Ack> {
        self.client
            .post(
                Role::Client,
                "resendOtp",
                &EmailRef {
                    email: email.to_string(),
                },
                RESEND_OTP,
            )
            .await
    }

    /// GET /client/events?pageNo=n
    pub async fn events(&self, page: u32) -> ApiResult<Page<Event>> {
        self.client.get(Role::Client, &paged("events", page), EVENTS).await
    }

    /// GET /client/events/{id}
    pub async fn event(&self, event_id: &str) -> ApiResult<Event> {
        self.client
            .get(Role::Client, &item("events", event_id)?, EVENT)
            .await
    }
}
