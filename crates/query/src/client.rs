//! Client (ticket buyer) hooks

use crate::{Mutation, Query};
use eventmart_api_client::endpoints::ClientApi;
use eventmart_api_client::{
    Ack, Credentials, Event, LoginResponse, OtpVerification, Page, SignupRequest,
};

pub fn login_mutation(api: ClientApi) -> Mutation<Credentials, LoginResponse> {
    Mutation::new("client.login", move |credentials: Credentials| {
        let api = api.clone();
        async move { api.login(&credentials).await }
    })
}

pub fn signup_mutation(api: ClientApi) -> Mutation<SignupRequest, Ack> {
    Mutation::new("client.signup", move |request: SignupRequest| {
        let api = api.clone();
        async move { api.signup(&request).await }
    })
}

pub fn verify_otp_mutation(api: ClientApi) -> Mutation<OtpVerification, Ack> {
    Mutation::new("client.verify_otp", move |verification: OtpVerification| {
        let api = api.clone();
        async move { api.verify_otp(&verification).await }
    })
}

pub fn resend_otp_mutation(api: ClientApi) -> Mutation<String, Ack> {
    Mutation::new("client.resend_otp", move |email: String| {
        let api = api.clone();
        async move { api.resend_otp(&email).await }
    })
}

pub fn events_query(api: ClientApi) -> Query<Page<Event>> {
    Query::new("client.events", move |page| {
        let api = api.clone();
        async move { api.events(page).await }
    })
}

/// Single event detail. The page argument is unused; the event id is part
/// of the operation name so each event caches separately.
pub fn event_query(api: ClientApi, event_id: impl Into<String>) -> Query<Event> {
    let event_id = event_id.into();
    Query::new(format!("client.event:{event_id}"), move |_| {
        let api = api.clone();
        let event_id = event_id.clone();
        async move { api.event(&event_id).await }
    })
}
