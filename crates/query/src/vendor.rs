//! Vendor hooks

use crate::{Mutation, Query};
use eventmart_api_client::endpoints::vendor::{EventEnvelope, MediaUpload, UploadedMedia};
use eventmart_api_client::endpoints::VendorApi;
use eventmart_api_client::{
    Ack, Credentials, Event, EventUpdate, LoginResponse, NewEvent, OtpVerification, Page,
    SignupRequest,
};

pub fn login_mutation(api: VendorApi) -> Mutation<Credentials, LoginResponse> {
    Mutation::new("vendor.login", move |credentials: Credentials| {
        let api = api.clone();
        async move { api.login(&credentials).await }
    })
}

pub fn signup_mutation(api: VendorApi) -> Mutation<SignupRequest, Ack> {
    Mutation::new("vendor.signup", move |request: SignupRequest| {
        let api = api.clone();
        async move { api.signup(&request).await }
    })
}

pub fn verify_otp_mutation(api: VendorApi) -> Mutation<OtpVerification, Ack> {
    Mutation::new("vendor.verify_otp", move |verification: OtpVerification| {
        let api = api.clone();
        async move { api.verify_otp(&verification).await }
    })
}

pub fn resend_otp_mutation(api: VendorApi) -> Mutation<String, Ack> {
    Mutation::new("vendor.resend_otp", move |email: String| {
        let api = api.clone();
        async move { api.resend_otp(&email).await }
    })
}

pub fn create_event_mutation(api: VendorApi) -> Mutation<NewEvent, EventEnvelope> {
    Mutation::new("vendor.create_event", move |event: NewEvent| {
        let api = api.clone();
        async move { api.create_event(&event).await }
    })
}

/// Input is `(event id, update)`; keyed by event id
pub fn update_event_mutation(api: VendorApi) -> Mutation<(String, EventUpdate), EventEnvelope> {
    Mutation::new("vendor.update_event", move |(id, update): (String, EventUpdate)| {
        let api = api.clone();
        async move { api.update_event(&id, &update).await }
    })
    .keyed_by(|(id, _)| id.clone())
}

pub fn events_query(api: VendorApi) -> Query<Page<Event>> {
    Query::new("vendor.events", move |page| {
        let api = api.clone();
        async move { api.events(page).await }
    })
}

/// Keyed by file name, so distinct posters upload in parallel
pub fn upload_media_mutation(api: VendorApi) -> Mutation<MediaUpload, UploadedMedia> {
    Mutation::new("vendor.upload_media", move |upload: MediaUpload| {
        let api = api.clone();
        async move { api.upload_media(&upload).await }
    })
    .keyed_by(|upload| upload.file_name.clone())
}
