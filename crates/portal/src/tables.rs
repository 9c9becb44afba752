//! Admin account tables
//!
//! Each table owns a paginated list query plus the mutations its row
//! actions trigger. A successful action drops the cached pages and reloads
//! the page on screen, so the displayed status always comes from the
//! backend.

use crate::context::PortalContext;
use crate::error::{PortalError, Result};
use eventmart_api_client::endpoints::admin::{VendorRejection, VendorStatusUpdate};
use eventmart_api_client::{AccountStatus, Ack, ApiResult, Client, Page, Vendor};
use eventmart_core::validation::validate_rejection_reason;
use eventmart_query::{admin, Mutation, Query};
use tracing::debug;

/// Which vendor list a table shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendorList {
    All,
    Pending,
    Rejected,
}

fn invalidate_on_success<I, T>(mutation: &Mutation<I, Ack>, query: &Query<T>)
where
    I: Send + 'static,
    T: Clone + Send + Sync + 'static,
{
    let query = query.clone();
    mutation.on_success(move |_| query.invalidate());
}

/// Shared pagination over a list query
async fn show_page<T>(query: &Query<Page<T>>, page: u32) -> ApiResult<Page<T>>
where
    T: Clone + Send + Sync + 'static,
{
    query.set_page(page.max(1)).await
}

pub struct VendorTable {
    list: VendorList,
    query: Query<Page<Vendor>>,
    block: Mutation<String, Ack>,
    unblock: Mutation<String, Ack>,
    approve: Mutation<VendorStatusUpdate, Ack>,
    reject: Mutation<VendorRejection, Ack>,
    ctx: PortalContext,
}

impl VendorTable {
    pub fn new(list: VendorList, ctx: PortalContext) -> Self {
        let api = ctx.client.admin();
        let query = match list {
            VendorList::All => admin::vendors_query(api.clone()),
            VendorList::Pending => admin::pending_vendors_query(api.clone()),
            VendorList::Rejected => admin::rejected_vendors_query(api.clone()),
        };
        let table = Self {
            list,
            block: admin::block_vendor_mutation(api.clone()),
            unblock: admin::unblock_vendor_mutation(api.clone()),
            approve: admin::update_vendor_status_mutation(api.clone()),
            reject: admin::reject_vendor_mutation(api),
            query,
            ctx,
        };
        invalidate_on_success(&table.block, &table.query);
        invalidate_on_success(&table.unblock, &table.query);
        invalidate_on_success(&table.approve, &table.query);
        invalidate_on_success(&table.reject, &table.query);
        table
    }

    pub fn list(&self) -> VendorList {
        self.list
    }

    pub fn query(&self) -> &Query<Page<Vendor>> {
        &self.query
    }

    /// Rows of the page on screen
    pub fn rows(&self) -> Vec<Vendor> {
        self.query.data().map(|page| page.items).unwrap_or_default()
    }

    pub fn is_loading(&self) -> bool {
        self.query.is_loading()
    }

    pub fn is_busy(&self) -> bool {
        self.block.is_loading()
            || self.unblock.is_loading()
            || self.approve.is_loading()
            || self.reject.is_loading()
    }

    pub async fn load(&self, page: u32) -> Result<Page<Vendor>> {
        self.report(show_page(&self.query, page).await)
    }

    pub async fn next_page(&self) -> Result<Page<Vendor>> {
        self.load(self.query.page() + 1).await
    }

    pub async fn previous_page(&self) -> Result<Page<Vendor>> {
        self.load(self.query.page().saturating_sub(1)).await
    }

    /// Block an active vendor, unblock a blocked one
    pub async fn toggle_block(&self, vendor: &Vendor) -> Result<Ack> {
        if vendor.status == AccountStatus::Blocked {
            self.unblock(&vendor.id).await
        } else {
            self.block(&vendor.id).await
        }
    }

    pub async fn block(&self, vendor_id: &str) -> Result<Ack> {
        self.run(&self.block, vendor_id.to_string(), "Vendor blocked").await
    }

    pub async fn unblock(&self, vendor_id: &str) -> Result<Ack> {
        self.run(&self.unblock, vendor_id.to_string(), "Vendor unblocked").await
    }

    pub async fn approve(&self, vendor_id: &str) -> Result<Ack> {
        self.run(&self.approve, VendorStatusUpdate::approve(vendor_id), "Vendor approved")
            .await
    }

    /// Reject with a reason; the reason is validated before sending
    pub async fn reject(&self, vendor_id: &str, reason: &str) -> Result<Ack> {
        let errors = validate_rejection_reason(reason);
        if !errors.is_empty() {
            return Err(PortalError::Invalid(errors));
        }
        self.run(
            &self.reject,
            VendorRejection::new(vendor_id, reason.trim()),
            "Vendor rejected",
        )
        .await
    }

    async fn run<I>(&self, mutation: &Mutation<I, Ack>, input: I, done: &str) -> Result<Ack>
    where
        I: Send + 'static,
    {
        let ack = self.report(mutation.trigger(input).await)?;
        self.ctx.notifier.success(ack.message.as_deref().unwrap_or(done));
        debug!(operation = mutation.operation(), "Reloading vendors after action");
        // The action already succeeded; a failed reload is shown on its own
        let _ = self.load(self.query.page()).await;
        Ok(ack)
    }

    fn report<T>(&self, result: ApiResult<T>) -> Result<T> {
        result.map_err(|e| {
            self.ctx.notifier.error(e.message());
            e.into()
        })
    }
}

pub struct ClientTable {
    query: Query<Page<Client>>,
    block: Mutation<String, Ack>,
    unblock: Mutation<String, Ack>,
    ctx: PortalContext,
}

impl ClientTable {
    pub fn new(ctx: PortalContext) -> Self {
        let api = ctx.client.admin();
        let table = Self {
            query: admin::clients_query(api.clone()),
            block: admin::block_client_mutation(api.clone()),
            unblock: admin::unblock_client_mutation(api),
            ctx,
        };
        invalidate_on_success(&table.block, &table.query);
        invalidate_on_success(&table.unblock, &table.query);
        table
    }

    pub fn query(&self) -> &Query<Page<Client>> {
        &self.query
    }

    pub fn rows(&self) -> Vec<Client> {
        self.query.data().map(|page| page.items).unwrap_or_default()
    }

    pub fn is_loading(&self) -> bool {
        self.query.is_loading()
    }

    pub async fn load(&self, page: u32) -> Result<Page<Client>> {
        self.report(show_page(&self.query, page).await)
    }

    pub async fn next_page(&self) -> Result<Page<Client>> {
        self.load(self.query.page() + 1).await
    }

    pub async fn previous_page(&self) -> Result<Page<Client>> {
        self.load(self.query.page().saturating_sub(1)).await
    }

    pub async fn toggle_block(&self, client: &Client) -> Result<Ack> {
        if client.status == AccountStatus::Blocked {
            self.unblock(&client.id).await
        } else {
            self.block(&client.id).await
        }
    }

    pub async fn block(&self, client_id: &str) -> Result<Ack> {
        self.run(&self.block, client_id, "Client blocked").await
    }

    pub async fn unblock(&self, client_id: &str) -> Result<Ack> {
        self.run(&self.unblock, client_id, "Client unblocked").await
    }

    async fn run(&self, mutation: &Mutation<String, Ack>, client_id: &str, done: &str) -> Result<Ack> {
        let ack = self.report(mutation.trigger(client_id.to_string()).await)?;
        self.ctx.notifier.success(ack.message.as_deref().unwrap_or(done));
        let _ = self.load(self.query.page()).await;
        Ok(ack)
    }

    fn report<T>(&self, result: ApiResult<T>) -> Result<T> {
        result.map_err(|e| {
            self.ctx.notifier.error(e.message());
            e.into()
        })
    }
}
