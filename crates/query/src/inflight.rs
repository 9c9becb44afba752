//! In-flight request sharing
//!
//! While a request for a key is pending, later callers with the same key
//! wait for it instead of issuing their own. The entry is dropped once the
//! request settles, so the next call after that goes to the network again.

use eventmart_api_client::ApiResult;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::OnceCell;
use tracing::debug;

type Slot<O> = Arc<OnceCell<ApiResult<O>>>;

/// Outcome of [`InFlight::run`]
pub(crate) struct Settled<O> {
    pub result: ApiResult<O>,
    /// This caller issued the request (as opposed to joining one)
    pub issued: bool,
}

pub(crate) struct InFlight<O> {
    pending: Mutex<HashMap<String, Slot<O>>>,
}

impl<O: Clone> InFlight<O> {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Number of keys currently pending
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub async fn run<F, Fut>(&self, key: &str, request: F) -> Settled<O>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<O>>,
    {
        let entry = {
            let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
            let slot = pending
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone();
            Entry {
                pending: &self.pending,
                key,
                slot,
            }
        };

        let mut issued = false;
        let result = entry
            .slot
            .get_or_init(|| {
                issued = true;
                request()
            })
            .await
            .clone();

        if !issued {
            debug!(key, "Joined in-flight request");
        }

        Settled { result, issued }
    }
}

/// One caller's hold on a pending slot
struct Entry<'a, O> {
    pending: &'a Mutex<HashMap<String, Slot<O>>>,
    key: &'a str,
    slot: Slot<O>,
}

impl<O> Drop for Entry<'_, O> {
    // Runs on settle and on cancellation. A cancelled caller leaves the slot
    // to any callers still waiting on it.
    fn drop(&mut self) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        let ours = pending
            .get(self.key)
            .is_some_and(|current| Arc::ptr_eq(current, &self.slot));
        if ours && (self.slot.initialized() || Arc::strong_count(&self.slot) == 2) {
            pending.remove(self.key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_key_shares_one_request() {
        let flights = InFlight::<u32>::new();
        let calls = &AtomicUsize::new(0);
        let request = move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok(7)
        };

        let (a, b) = tokio::join!(flights.run("k", request), flights.run("k", request));

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(a.result, Ok(7));
        assert_eq!(b.result, Ok(7));
        assert!(a.issued ^ b.issued);
        assert_eq!(flights.len(), 0);
    }

    #[tokio::test]
    async fn test_distinct_keys_run_separately() {
        let flights = InFlight::<u32>::new();
        let calls = &AtomicUsize::new(0);
        let request = move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(1)
        };

        tokio::join!(flights.run("a", request), flights.run("b", request));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_settled_key_is_requested_again() {
        let flights = InFlight::<u32>::new();
        let calls = &AtomicUsize::new(0);
        let request = move || async move { Ok(calls.fetch_add(1, Ordering::SeqCst) as u32) };

        assert_eq!(flights.run("k", request).await.result, Ok(0));
        assert_eq!(flights.run("k", request).await.result, Ok(1));
    }

    #[tokio::test]
    async fn test_cancelled_request_frees_its_key() {
        let flights = InFlight::<u32>::new();
        let slow = || async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(1)
        };

        let cancelled = tokio::time::timeout(Duration::from_millis(5), flights.run("k", slow)).await;
        assert!(cancelled.is_err());
        assert_eq!(flights.len(), 0);

        let fast = || async { Ok(2) };
        assert_eq!(flights.run("k", fast).await.result, Ok(2));
    }
}
