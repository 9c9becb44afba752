//! Toast notifications
//!
//! Rendering belongs to the UI; controllers only say what to show.

use std::sync::Mutex;

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// One notification as shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Notifier that keeps every notice, for tests and the CLI summary
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().map(|n| n.clone()).unwrap_or_default()
    }

    pub fn count(&self, kind: NoticeKind) -> usize {
        self.notices().iter().filter(|n| n.kind == kind).count()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices().pop()
    }

    fn push(&self, kind: NoticeKind, message: &str) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(Notice {
                kind,
                message: message.to_string(),
            });
        }
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.push(NoticeKind::Success, message);
    }

    fn error(&self, message: &str) {
        self.push(NoticeKind::Error, message);
    }
}
