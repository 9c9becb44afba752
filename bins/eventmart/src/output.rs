//! Terminal output
//!
//! Notices from the portal controllers are printed as they happen; routing
//! has no terminal equivalent and is only logged.

use eventmart_portal::Notifier;
use eventmart_session::Navigator;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::sync::Mutex;
use std::time::Duration;

/// Status message helpers
pub struct Status;

impl Status {
    pub fn success(message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

/// Spinner shown while a request is in flight (hidden when stderr is not a terminal)
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Notifier printing each notice to stderr
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn success(&self, message: &str) {
        Status::success(message);
    }

    fn error(&self, message: &str) {
        Status::error(message);
    }
}

/// Navigator that logs route changes and remembers the last one
#[derive(Debug, Default)]
pub struct TerminalNavigator {
    last: Mutex<Option<String>>,
}

impl TerminalNavigator {
    pub fn last(&self) -> Option<String> {
        self.last.lock().ok().and_then(|last| last.clone())
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: &str) {
        tracing::debug!(route, "Navigate");
        if let Ok(mut last) = self.last.lock() {
            *last = Some(route.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(1, "vendor", "vendors"), "1 vendor");
        assert_eq!(format_count(0, "vendor", "vendors"), "0 vendors");
    }

    #[test]
    fn test_navigator_keeps_last_route() {
        let navigator = TerminalNavigator::default();
        assert_eq!(navigator.last(), None);
        navigator.navigate("/vendor/home");
        navigator.navigate("/vendor/login");
        assert_eq!(navigator.last().as_deref(), Some("/vendor/login"));
    }

    #[test]
    fn test_spinner_creation() {
        let pb = spinner("Loading vendors...");
        pb.finish_and_clear();
    }
}
