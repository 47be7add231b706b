//! Terminal notifier and navigator

use dsa_core::{Navigator, Notification, Notifier, Severity};

/// Prints notifications to stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        let marker = match notification.severity {
            Severity::Success => "ok",
            Severity::Warning => "warning",
            Severity::Failure => "error",
        };
        eprintln!("{marker}: {}", notification.message);
    }
}

/// A terminal has nowhere to navigate; record the request in the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNavigator;

impl Navigator for LoggingNavigator {
    fn back(&self) {
        tracing::info!("done, returning");
    }

    fn go_to(&self, path: &str) {
        tracing::info!(path, "done, next view");
    }
}
