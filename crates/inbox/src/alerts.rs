//! Outbound alerting seam
//!
//! The engine reports badge counts and newly arrived notifications
//! through this trait; rendering layers decide how to surface them.

use log::info;

use crate::models::Notification;

/// Receives engine-side events worth surfacing to the user
pub trait AlertSink: Send + Sync {
    /// The unread count changed
    fn update_badge(&self, unread: usize);

    /// Notifications arrived that were not in the previous round
    fn notify_new_items(&self, notifications: &[Notification]);
}

/// Sink that only logs, useful for headless use and tests
#[derive(Debug, Default)]
pub struct LogAlertSink;

impl AlertSink for LogAlertSink {
    fn update_badge(&self, unread: usize) {
        info!("Unread count: {unread}");
    }

    fn notify_new_items(&self, notifications: &[Notification]) {
        for notification in notifications {
            info!(
                "New notification in {}: {}",
                notification.repository.full_name, notification.subject.title
            );
        }
    }
}
