//! Navigation seam
//!
//! The router is an external collaborator; guards and controllers only ask
//! it to go somewhere.

use std::sync::Mutex;

/// Something that can change the current route
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

/// Navigator that remembers every route it was sent to
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes in the order they were visited
    pub fn visits(&self) -> Vec<String> {
        self.visits.lock().map(|v| v.clone()).unwrap_or_default()
    }

    /// Most recent route
    pub fn last(&self) -> Option<String> {
        self.visits().pop()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &str) {
        if let Ok(mut visits) = self.visits.lock() {
            visits.push(route.to_string());
        }
    }
}
