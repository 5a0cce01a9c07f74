//! Notification Sink
//!
//! Fire-and-forget user-facing error reporting.

/// Presentation-only error reporting capability
pub trait NotificationSink: Send + Sync {
    fn show_error(&self, message: &str);
}

/// Sink that routes notifications through the log facade.
///
/// In a headless process there is no toast to show; the log is the
/// user-facing channel.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn show_error(&self, message: &str) {
        log::error!("{}", message);
    }
}
