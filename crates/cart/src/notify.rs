//! Fire-and-forget shopper notifications.
//!
//! Cart operations emit short human-readable notices (out-of-stock,
//! failures) on a broadcast channel. Delivery is best-effort: with no
//! subscriber the notice is dropped.

use tokio::sync::broadcast;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A short human-readable message for the shopper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Broadcast sender for notices.
///
/// Cheaply cloneable; clones feed the same channel.
#[derive(Clone)]
pub struct Notifier {
    tx: broadcast::Sender<Notice>,
}

impl Notifier {
    /// Create a notifier with room for `capacity` undelivered notices.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to notices emitted after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.tx.subscribe()
    }

    /// Emit an informational notice.
    pub fn info(&self, message: impl Into<String>) {
        self.send(NoticeLevel::Info, message.into());
    }

    /// Emit an error notice.
    pub fn error(&self, message: impl Into<String>) {
        self.send(NoticeLevel::Error, message.into());
    }

    fn send(&self, level: NoticeLevel, message: String) {
        // A send error just means nobody is listening right now
        let _ = self.tx.send(Notice { level, message });
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(16)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_subscriber_receives_notice() {
        let notifier = Notifier::default();
        let mut rx = notifier.subscribe();

        notifier.error("Requested quantity is out of stock");

        let notice = rx.try_recv().unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.message, "Requested quantity is out of stock");
    }

    #[test]
    fn test_send_without_subscriber_is_dropped() {
        let notifier = Notifier::default();
        // Must not panic or block
        notifier.info("cart loaded");
    }

    #[test]
    fn test_subscriber_only_sees_later_notices() {
        let notifier = Notifier::default();
        notifier.error("before subscribe");

        let mut rx = notifier.subscribe();
        notifier.info("after subscribe");

        let notice = rx.try_recv().unwrap();
        assert_eq!(notice.level, NoticeLevel::Info);
        assert!(rx.try_recv().is_err());
    }
}
