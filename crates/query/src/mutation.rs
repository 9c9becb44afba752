//! Imperative, uncached operations (login, block, approve, create)

use crate::inflight::InFlight;
use crate::state::{HookState, Pending};
use crate::BoxFuture;
use eventmart_api_client::ApiResult;
use eventmart_telemetry::stats;
use std::future::Future;
use std::sync::atomic::AtomicUsize;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use tokio::sync::watch;
use tracing::{debug, warn};

type Call<I, O> = dyn Fn(I) -> BoxFuture<ApiResult<O>> + Send + Sync;
type KeyFn<I> = dyn Fn(&I) -> String + Send + Sync;
type Callback<O> = Box<dyn Fn(&O) + Send + Sync>;

/// Handle to a mutation.
///
/// Clones share state. A trigger whose key matches a pending trigger joins
/// it: both receive the same result and only one request is made.
pub struct Mutation<I, O> {
    inner: Arc<Inner<I, O>>,
}

struct Inner<I, O> {
    operation: String,
    call: Box<Call<I, O>>,
    key: OnceLock<Box<KeyFn<I>>>,
    in_flight: InFlight<O>,
    active: AtomicUsize,
    state: watch::Sender<HookState<O>>,
    on_success: Mutex<Vec<Callback<O>>>,
}

impl<I, O> Clone for Mutation<I, O> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<I, O> Mutation<I, O>
where
    I: Send + 'static,
    O: Clone + Send + Sync + 'static,
{
    /// Bind an operation. Every trigger shares one key.
    pub fn new<F, Fut>(operation: impl Into<String>, call: F) -> Self
    where
        F: Fn(I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ApiResult<O>> + Send + 'static,
    {
        let (state, _) = watch::channel(HookState::Idle);
        Self {
            inner: Arc::new(Inner {
                operation: operation.into(),
                call: Box::new(move |input| Box::pin(call(input))),
                key: OnceLock::new(),
                in_flight: InFlight::new(),
                active: AtomicUsize::new(0),
                state,
                on_success: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Refine the de-duplication key by input, e.g. the target id.
    ///
    /// Applies to every clone of the handle. Only the first key function
    /// is kept.
    #[must_use]
    pub fn keyed_by(self, key: impl Fn(&I) -> String + Send + Sync + 'static) -> Self {
        if self.inner.key.set(Box::new(key)).is_err() {
            warn!(operation = self.inner.operation.as_str(), "Mutation key already set; keeping the first");
        }
        self
    }

    /// Run `callback` after every successful request
    pub fn on_success(&self, callback: impl Fn(&O) + Send + Sync + 'static) {
        self.inner
            .on_success
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Box::new(callback));
    }

    pub fn operation(&self) -> &str {
        &self.inner.operation
    }

    /// Current state snapshot
    pub fn state(&self) -> HookState<O> {
        self.inner.state.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().is_loading()
    }

    /// Watch state transitions
    pub fn subscribe(&self) -> watch::Receiver<HookState<O>> {
        self.inner.state.subscribe()
    }

    /// Back to idle, dropping the last result
    pub fn reset(&self) {
        self.inner.state.send_replace(HookState::Idle);
    }

    fn key_for(&self, input: &I) -> String {
        match self.inner.key.get() {
            Some(key) => format!("{}:{}", self.inner.operation, key(input)),
            None => self.inner.operation.clone(),
        }
    }

    /// Run the operation, or join the pending one with the same key
    pub async fn trigger(&self, input: I) -> ApiResult<O> {
        let inner = &self.inner;
        let key = self.key_for(&input);

        let settled = inner
            .in_flight
            .run(&key, || {
                debug!(key = key.as_str(), "Mutation started");
                let pending = Pending::enter(&inner.state, &inner.active);
                let call = (inner.call)(input);
                async move {
                    let result = call.await;
                    pending.settle();
                    result
                }
            })
            .await;

        if !settled.issued {
            stats().record_joined(&inner.operation);
            return settled.result;
        }

        match &settled.result {
            Ok(output) => {
                inner.state.send_replace(HookState::Success(output.clone()));
                let callbacks = inner.on_success.lock().unwrap_or_else(PoisonError::into_inner);
                for callback in callbacks.iter() {
                    callback(output);
                }
            }
            Err(e) => {
                inner.state.send_replace(HookState::Error(e.message().to_string()));
            }
        }
        settled.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventmart_api_client::ApiError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn rejected(message: &str) -> ApiError {
        ApiError::Rejected {
            status: 400,
            message: message.to_string(),
        }
    }

    fn slow_echo(calls: Arc<AtomicUsize>) -> Mutation<String, String> {
        Mutation::new("admin.block_vendor", move |id: String| {
            let calls = Arc::clone(&calls);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(20)).await;
                Ok(format!("blocked {id}"))
            }
        })
    }

    #[tokio::test]
    async fn test_duplicate_trigger_joins_pending_request() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mutation = slow_echo(Arc::clone(&calls));

        let (a, b) = tokio::join!(
            mutation.trigger("v1".to_string()),
            mutation.trigger("v1".to_string())
        );

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(a, Ok("blocked v1".to_string()));
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_keyed_triggers_for_different_ids_both_run() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mutation = slow_echo(Arc::clone(&calls)).keyed_by(|id: &String| id.clone());

        let (a, b) = tokio::join!(
            mutation.trigger("v1".to_string()),
            mutation.trigger("v2".to_string())
        );

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(a.unwrap(), "blocked v1");
        assert_eq!(b.unwrap(), "blocked v2");
    }

    #[tokio::test]
    async fn test_loading_spans_the_request() {
        let mutation = slow_echo(Arc::new(AtomicUsize::new(0)));
        assert!(!mutation.is_loading());

        let (_, during) = tokio::join!(mutation.trigger("v1".to_string()), async {
            tokio::task::yield_now().await;
            mutation.is_loading()
        });

        assert!(during);
        assert!(!mutation.is_loading());
        assert_eq!(mutation.state().data().map(String::as_str), Some("blocked v1"));
    }

    #[tokio::test]
    async fn test_error_is_set_on_rejection_and_cleared_on_retry() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&attempts);
        let mutation: Mutation<(), String> = Mutation::new("vendor.login", move |()| {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                tokio::time::sleep(Duration::from_millis(20)).await;
                if n == 0 {
                    Err(rejected("Invalid email or password"))
                } else {
                    Ok("token".to_string())
                }
            }
        });

        let err = mutation.trigger(()).await.unwrap_err();
        assert_eq!(err.message(), "Invalid email or password");
        assert_eq!(mutation.state().error(), Some("Invalid email or password"));

        let (_, during) = tokio::join!(mutation.trigger(()), async {
            tokio::task::yield_now().await;
            mutation.state()
        });
        assert_eq!(during, HookState::Loading);
        assert_eq!(mutation.state().error(), None);
        assert!(mutation.state().is_success());
    }

    #[tokio::test]
    async fn test_on_success_runs_once_per_request() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mutation = slow_echo(calls);
        let fired = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&fired);
        mutation.on_success(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        tokio::join!(
            mutation.trigger("v1".to_string()),
            mutation.trigger("v1".to_string())
        );
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_on_success_skipped_on_error() {
        let mutation: Mutation<(), ()> =
            Mutation::new("admin.reject_vendor", |()| async { Err(rejected("nope")) });
        let fired = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&fired);
        mutation.on_success(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        assert!(mutation.trigger(()).await.is_err());
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_subscribers_see_transitions() {
        let mutation = slow_echo(Arc::new(AtomicUsize::new(0)));
        let mut rx = mutation.subscribe();

        let trigger = mutation.clone();
        let handle = tokio::spawn(async move { trigger.trigger("v1".to_string()).await });

        let state = rx.wait_for(HookState::is_success).await.unwrap().clone();
        assert_eq!(state.data().map(String::as_str), Some("blocked v1"));
        handle.await.unwrap().unwrap();
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mutation: Mutation<(), ()> = Mutation::new("client.login", |()| async { Ok(()) });
        mutation.inner.state.send_replace(HookState::Error("x".into()));
        mutation.reset();
        assert!(mutation.state().is_idle());
    }

    #[tokio::test]
    async fn test_key_set_after_clone_still_applies() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mutation = slow_echo(Arc::clone(&calls));
        let shared = mutation.clone();
        let mutation = mutation.keyed_by(|id: &String| id.clone());

        let (a, b) = tokio::join!(
            mutation.trigger("v1".to_string()),
            shared.trigger("v2".to_string())
        );

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(a.unwrap(), "blocked v1");
        assert_eq!(b.unwrap(), "blocked v2");
    }

    #[tokio::test]
    async fn test_cancelled_trigger_does_not_stay_loading() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mutation: Mutation<(), ()> = Mutation::new("vendor.create_event", move |()| {
            let calls = Arc::clone(&calls);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(50)).await;
                Ok(())
            }
        });

        let timed_out = tokio::time::timeout(Duration::from_millis(5), mutation.trigger(())).await;
        assert!(timed_out.is_err());
        assert!(mutation.state().is_idle());

        // Nothing is left pending: the next trigger issues its own request
        assert_eq!(mutation.trigger(()).await, Ok(()));
        assert!(mutation.state().is_success());
    }

    #[tokio::test]
    async fn test_joiner_takes_over_when_issuer_is_cancelled() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mutation = slow_echo(Arc::clone(&calls));

        let issuer = tokio::time::timeout(Duration::from_millis(5), mutation.trigger("v1".to_string()));
        let joiner = async {
            tokio::task::yield_now().await;
            mutation.trigger("v1".to_string()).await
        };
        let (cancelled, joined) = tokio::join!(issuer, joiner);

        assert!(cancelled.is_err());
        assert_eq!(joined, Ok("blocked v1".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(!mutation.is_loading());
    }
}
