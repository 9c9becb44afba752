//! Observable hook state

use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::watch;

/// What a screen bound to a query or mutation renders
#[derive(Debug, Clone, Default, PartialEq)]
pub enum HookState<T> {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A request is in flight
    Loading,
    /// Last request resolved
    Success(T),
    /// Last request rejected; holds the user-facing message
    Error(String),
}

impl<T> HookState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Marks one issued request as pending on a handle.
///
/// Dropped without [`settle`](Self::settle) means the issuing future was
/// cancelled; once no other request of the handle is pending the state
/// goes back to `Idle` instead of staying `Loading`.
pub(crate) struct Pending<'a, T> {
    state: &'a watch::Sender<HookState<T>>,
    active: &'a AtomicUsize,
    settled: bool,
}

impl<'a, T> Pending<'a, T> {
    pub fn enter(state: &'a watch::Sender<HookState<T>>, active: &'a AtomicUsize) -> Self {
        active.fetch_add(1, Ordering::SeqCst);
        state.send_replace(HookState::Loading);
        Self {
            state,
            active,
            settled: false,
        }
    }

    /// The request finished; the caller publishes its outcome
    pub fn settle(mut self) {
        self.settled = true;
    }
}

impl<T> Drop for Pending<'_, T> {
    fn drop(&mut self) {
        let remaining = self.active.fetch_sub(1, Ordering::SeqCst) - 1;
        if !self.settled && remaining == 0 {
            self.state.send_if_modified(|state| {
                if state.is_loading() {
                    *state = HookState::Idle;
                    true
                } else {
                    false
                }
            });
        }
    }
}
