//! Delivery of visitor-facing notifications.

use edupay_types::notification::{Notification, Severity};
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 64;

/// Fans notifications out to subscribers and the log.
///
/// Notifications are fire-and-forget: with no subscriber attached they are only logged.
#[derive(Debug, Clone)]
pub struct Notifier {
    sender: broadcast::Sender<Notification>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    pub fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Info => tracing::info!(
                title = %notification.title,
                description = %notification.description,
                "notification"
            ),
            Severity::Destructive => tracing::warn!(
                title = %notification.title,
                description = %notification.description,
                "notification"
            ),
        }
        let _ = self.sender.send(notification);
    }
}
