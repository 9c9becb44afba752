//! Admin hooks

use crate::{Mutation, Query};
use eventmart_api_client::endpoints::admin::{VendorRejection, VendorStatusUpdate};
use eventmart_api_client::endpoints::AdminApi;
use eventmart_api_client::{Ack, Client, Credentials, LoginResponse, Page, Vendor};

pub fn login_mutation(api: AdminApi) -> Mutation<Credentials, LoginResponse> {
    Mutation::new("admin.login", move |credentials: Credentials| {
        let api = api.clone();
        async move { api.login(&credentials).await }
    })
}

pub fn clients_query(api: AdminApi) -> Query<Page<Client>> {
    Query::new("admin.clients", move |page| {
        let api = api.clone();
        async move { api.clients(page).await }
    })
}

pub fn vendors_query(api: AdminApi) -> Query<Page<Vendor>> {
    Query::new("admin.vendors", move |page| {
        let api = api.clone();
        async move { api.vendors(page).await }
    })
}

pub fn pending_vendors_query(api: AdminApi) -> Query<Page<Vendor>> {
    Query::new("admin.pending_vendors", move |page| {
        let api = api.clone();
        async move { api.pending_vendors(page).await }
    })
}

pub fn rejected_vendors_query(api: AdminApi) -> Query<Page<Vendor>> {
    Query::new("admin.rejected_vendors", move |page| {
        let api = api.clone();
        async move { api.rejected_vendors(page).await }
    })
}

/// Keyed by client id
pub fn block_client_mutation(api: AdminApi) -> Mutation<String, Ack> {
    Mutation::new("admin.block_client", move |id: String| {
        let api = api.clone();
        async move { api.block_client(&id).await }
    })
    .keyed_by(String::clone)
}

/// Keyed by client id
pub fn unblock_client_mutation(api: AdminApi) -> Mutation<String, Ack> {
    Mutation::new("admin.unblock_client", move |id: String| {
        let api = api.clone();
        async move { api.unblock_client(&id).await }
    })
    .keyed_by(String::clone)
}

/// Keyed by vendor id
pub fn block_vendor_mutation(api: AdminApi) -> Mutation<String, Ack> {
    Mutation::new("admin.block_vendor", move |id: String| {
        let api = api.clone();
        async move { api.block_vendor(&id).await }
    })
    .keyed_by(String::clone)
}

/// Keyed by vendor id
pub fn unblock_vendor_mutation(api: AdminApi) -> Mutation<String, Ack> {
    Mutation::new("admin.unblock_vendor", move |id: String| {
        let api = api.clone();
        async move { api.unblock_vendor(&id).await }
    })
    .keyed_by(String::clone)
}

/// Keyed by vendor id
pub fn update_vendor_status_mutation(api: AdminApi) -> Mutation<VendorStatusUpdate, Ack> {
    Mutation::new("admin.update_vendor_status", move |update: VendorStatusUpdate| {
        let api = api.clone();
        async move { api.update_vendor_status(&update).await }
    })
    .keyed_by(|update| update.vendor_id.clone())
}

/// Keyed by vendor id
pub fn reject_vendor_mutation(api: AdminApi) -> Mutation<VendorRejection, Ack> {
    Mutation::new("admin.reject_vendor", move |rejection: VendorRejection| {
        let api = api.clone();
        async move { api.reject_vendor(&rejection).await }
    })
    .keyed_by(|rejection| rejection.vendor_id.clone())
}
