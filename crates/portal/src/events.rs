//! Event listings for vendors (their own events) and clients (upcoming events)

use crate::context::PortalContext;
use crate::error::Result;
use eventmart_api_client::{ApiResult, Event, Page};
use eventmart_core::Role;
use eventmart_query::{client, vendor, Query};

pub struct EventList {
    role: Role,
    query: Query<Page<Event>>,
    ctx: PortalContext,
}

impl EventList {
    /// The signed-in vendor's events
    pub fn vendor(ctx: PortalContext) -> Self {
        Self {
            role: Role::Vendor,
            query: vendor::events_query(ctx.client.vendor()),
            ctx,
        }
    }

    /// Events open to ticket buyers
    pub fn client(ctx: PortalContext) -> Self {
        Self {
            role: Role::Client,
            query: client::events_query(ctx.client.client()),
            ctx,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// The underlying query, e.g. for an [`EventForm`](crate::EventForm) to invalidate
    pub fn query(&self) -> &Query<Page<Event>> {
        &self.query
    }

    pub fn rows(&self) -> Vec<Event> {
        self.query.data().map(|page| page.items).unwrap_or_default()
    }

    pub fn is_loading(&self) -> bool {
        self.query.is_loading()
    }

    pub async fn load(&self, page: u32) -> Result<Page<Event>> {
        self.report(self.query.set_page(page.max(1)).await)
    }

    pub async fn next_page(&self) -> Result<Page<Event>> {
        self.load(self.query.page() + 1).await
    }

    pub async fn previous_page(&self) -> Result<Page<Event>> {
        self.load(self.query.page().saturating_sub(1)).await
    }

    /// One event's detail page (client portal)
    pub async fn details(&self, event_id: &str) -> Result<Event> {
        let query = client::event_query(self.ctx.client.client(), event_id);
        self.report(query.fetch(1).await)
    }

    fn report<T>(&self, result: ApiResult<T>) -> Result<T> {
        result.map_err(|e| {
            self.ctx.notifier.error(e.message());
            e.into()
        })
    }
}
