//! Paginated, cached reads
//!
//! Results are cached per [`QueryKey`]. Switching pages fetches under the
//! new key and never shows the previous page's data while it loads.
//!
//! [`Query::invalidate`] starts a new cache generation. Requests that were
//! already pending belong to the old generation: their results are neither
//! cached nor shown, and their callers re-request under the new one.

use crate::inflight::InFlight;
use crate::state::{HookState, Pending};
use crate::BoxFuture;
use eventmart_api_client::ApiResult;
use eventmart_telemetry::stats;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU32, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::watch;
use tracing::debug;

type Fetch<T> = dyn Fn(u32) -> BoxFuture<ApiResult<T>> + Send + Sync;

/// Cache identity: operation name plus page number
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub operation: String,
    pub page: u32,
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}?page={}", self.operation, self.page)
    }
}

/// Handle to a cached query. Clones share cache and state.
pub struct Query<T> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    operation: String,
    fetch: Box<Fetch<T>>,
    page: AtomicU32,
    cache: RwLock<HashMap<QueryKey, T>>,
    in_flight: InFlight<T>,
    generation: AtomicU64,
    active: AtomicUsize,
    state: watch::Sender<HookState<T>>,
}

impl<T> Clone for Query<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Query<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Bind a page fetcher. Nothing is requested until [`fetch`](Self::fetch).
    pub fn new<F, Fut>(operation: impl Into<String>, fetch: F) -> Self
    where
        F: Fn(u32) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ApiResult<T>> + Send + 'static,
    {
        let (state, _) = watch::channel(HookState::Idle);
        Self {
            inner: Arc::new(Inner {
                operation: operation.into(),
                fetch: Box::new(move |page| Box::pin(fetch(page))),
                page: AtomicU32::new(1),
                cache: RwLock::new(HashMap::new()),
                in_flight: InFlight::new(),
                generation: AtomicU64::new(0),
                active: AtomicUsize::new(0),
                state,
            }),
        }
    }

    pub fn operation(&self) -> &str {
        &self.inner.operation
    }

    /// Page the handle currently shows
    pub fn page(&self) -> u32 {
        self.inner.page.load(Ordering::SeqCst)
    }

    pub fn key(&self) -> QueryKey {
        self.key_for(self.page())
    }

    fn key_for(&self, page: u32) -> QueryKey {
        QueryKey {
            operation: self.inner.operation.clone(),
            page,
        }
    }

    pub fn state(&self) -> HookState<T> {
        self.inner.state.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().is_loading()
    }

    /// Data for the current page, if loaded
    pub fn data(&self) -> Option<T> {
        self.inner.state.borrow().data().cloned()
    }

    pub fn subscribe(&self) -> watch::Receiver<HookState<T>> {
        self.inner.state.subscribe()
    }

    /// Cached data for a key, without touching state
    pub fn cached(&self, page: u32) -> Option<T> {
        self.inner
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&self.key_for(page))
            .cloned()
    }

    /// Show `page`, from cache when present
    pub async fn fetch(&self, page: u32) -> ApiResult<T> {
        self.inner.page.store(page, Ordering::SeqCst);

        if let Some(hit) = self.cached(page) {
            debug!(key = %self.key_for(page), "Query cache hit");
            stats().record_cache_hit(&self.inner.operation);
            self.inner.state.send_replace(HookState::Success(hit.clone()));
            return Ok(hit);
        }

        self.request(page).await
    }

    /// Re-request the current page, ignoring the cache
    pub async fn refetch(&self) -> ApiResult<T> {
        self.request(self.page()).await
    }

    /// Switch to another page
    pub async fn set_page(&self, page: u32) -> ApiResult<T> {
        self.fetch(page).await
    }

    /// Drop every cached page of this operation.
    ///
    /// State is left as is; the next fetch goes to the network, even when a
    /// request for the same page is still pending.
    pub fn invalidate(&self) {
        let mut cache = self.inner.cache.write().unwrap_or_else(PoisonError::into_inner);
        let dropped = cache.len();
        cache.clear();
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(operation = self.inner.operation.as_str(), dropped, generation, "Query invalidated");
    }

    fn generation(&self) -> u64 {
        self.inner.generation.load(Ordering::SeqCst)
    }

    async fn request(&self, page: u32) -> ApiResult<T> {
        let inner = &self.inner;
        let key = self.key_for(page);

        inner.state.send_replace(HookState::Loading);
        let (settled, generation) = loop {
            let generation = self.generation();
            let settled = inner
                .in_flight
                .run(&format!("{key}#{generation}"), || {
                    debug!(key = %key, generation, "Query started");
                    let pending = Pending::enter(&inner.state, &inner.active);
                    let fetch = (inner.fetch)(page);
                    async move {
                        let result = fetch.await;
                        pending.settle();
                        result
                    }
                })
                .await;

            if !settled.issued {
                stats().record_joined(&inner.operation);
            }
            if generation == self.generation() {
                break (settled, generation);
            }
            debug!(key = %key, generation, "Discarding result from before invalidation");
        };

        // Only the issuer stores; joiners got the same value
        if settled.issued {
            if let Ok(data) = &settled.result {
                let mut cache = inner.cache.write().unwrap_or_else(PoisonError::into_inner);
                // invalidate() bumps the generation under this lock
                if generation == self.generation() {
                    cache.insert(key.clone(), data.clone());
                }
            }
        }

        // A response for a page the user already left must not replace what
        // they are looking at now.
        if self.page() == page {
            inner.state.send_replace(match &settled.result {
                Ok(data) => HookState::Success(data.clone()),
                Err(e) => HookState::Error(e.message().to_string()),
            });
        } else {
            debug!(key = %key, current = self.page(), "Discarding stale page result");
        }

        settled.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventmart_api_client::ApiError;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    /// Query returning `page * 10`, counting calls
    fn counting(calls: Arc<AtomicUsize>, delay_ms: u64) -> Query<u32> {
        Query::new("admin.vendors", move |page| {
            let calls = Arc::clone(&calls);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                Ok(page * 10)
            }
        })
    }

    #[tokio::test]
    async fn test_fetch_caches_per_page() {
        let calls = Arc::new(AtomicUsize::new(0));
        let query = counting(Arc::clone(&calls), 0);

        assert_eq!(query.fetch(1).await, Ok(10));
        assert_eq!(query.fetch(1).await, Ok(10));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        assert_eq!(query.fetch(2).await, Ok(20));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(query.cached(1), Some(10));
    }

    #[tokio::test]
    async fn test_refetch_bypasses_cache() {
        let calls = Arc::new(AtomicUsize::new(0));
        let query = counting(Arc::clone(&calls), 0);

        query.fetch(3).await.unwrap();
        query.refetch().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(query.page(), 3);
    }

    #[tokio::test]
    async fn test_invalidate_drops_every_page() {
        let calls = Arc::new(AtomicUsize::new(0));
        let query = counting(Arc::clone(&calls), 0);

        query.fetch(1).await.unwrap();
        query.fetch(2).await.unwrap();
        query.invalidate();
        assert_eq!(query.cached(1), None);
        assert_eq!(query.cached(2), None);

        query.fetch(2).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_set_page_never_shows_previous_page() {
        let query = counting(Arc::new(AtomicUsize::new(0)), 20);
        query.fetch(1).await.unwrap();
        assert_eq!(query.data(), Some(10));

        let (_, during) = tokio::join!(query.set_page(2), async {
            tokio::task::yield_now().await;
            query.state()
        });

        assert_eq!(during, HookState::Loading);
        assert_eq!(query.data(), Some(20));
        assert_eq!(query.key().to_string(), "admin.vendors?page=2");
    }

    #[tokio::test]
    async fn test_concurrent_fetches_share_one_request() {
        let calls = Arc::new(AtomicUsize::new(0));
        let query = counting(Arc::clone(&calls), 20);

        let other = query.clone();
        let (a, b) = tokio::join!(query.fetch(1), other.fetch(1));
        assert_eq!(a, b);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_stale_page_result_is_not_shown() {
        let query: Query<u32> = Query::new("vendor.events", |page| async move {
            // Page 1 is slow, page 2 is fast
            let delay = if page == 1 { 40 } else { 0 };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(page)
        });

        let (one, two) = tokio::join!(query.fetch(1), async {
            tokio::task::yield_now().await;
            query.fetch(2).await
        });

        assert_eq!(one, Ok(1));
        assert_eq!(two, Ok(2));
        assert_eq!(query.data(), Some(2));
        assert_eq!(query.cached(1), Some(1));
    }

    #[tokio::test]
    async fn test_error_state_carries_message() {
        let query: Query<u32> = Query::new("admin.clients", |_| async {
            Err(ApiError::Transport {
                message: "Failed to fetch clients".into(),
                detail: "connection refused".into(),
            })
        });

        assert!(query.fetch(1).await.is_err());
        assert_eq!(query.state().error(), Some("Failed to fetch clients"));
        assert_eq!(query.cached(1), None);
    }

    #[tokio::test]
    async fn test_refetch_after_invalidate_skips_pending_request() {
        // The backend value is read when a request starts
        let backend = Arc::new(AtomicU32::new(1));
        let calls = Arc::new(AtomicUsize::new(0));
        let (seen, counter) = (Arc::clone(&backend), Arc::clone(&calls));
        let query: Query<u32> = Query::new("admin.vendors", move |_| {
            let value = seen.load(Ordering::SeqCst);
            counter.fetch_add(1, Ordering::SeqCst);
            async move {
                tokio::time::sleep(Duration::from_millis(30)).await;
                Ok(value)
            }
        });

        let (before, after) = tokio::join!(query.fetch(1), async {
            tokio::task::yield_now().await;
            backend.store(2, Ordering::SeqCst);
            query.invalidate();
            query.refetch().await
        });

        assert_eq!(after, Ok(2));
        assert_eq!(before, Ok(2));
        assert_eq!(query.data(), Some(2));
        assert_eq!(query.cached(1), Some(2));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_cancelled_fetch_does_not_stay_loading() {
        let calls = Arc::new(AtomicUsize::new(0));
        let query = counting(Arc::clone(&calls), 50);

        let timed_out = tokio::time::timeout(Duration::from_millis(5), query.fetch(1)).await;
        assert!(timed_out.is_err());
        assert!(query.state().is_idle());
        assert_eq!(query.cached(1), None);

        assert_eq!(query.fetch(1).await, Ok(10));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
