use tracing::warn;

/// User-visible, blocking notifications (the alert box of a UI)
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Prints notifications to stderr
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        eprintln!("⚠️  {message}");
    }
}

/// Logs notifications; used when the caller receives errors directly
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        warn!("Notification: {}", message);
    }
}
