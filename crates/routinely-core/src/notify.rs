//! Notification delivery seam.
//!
//! The core only hands out plain-text messages; whether and how they are
//! shown is up to the notifier. Delivery is best-effort.

use crate::events::Event;

pub trait Notifier {
    fn notify(&self, message: &str);

    /// Forward the event's message, if it has one.
    fn notify_event(&self, event: &Event) {
        if let Some(message) = event.notification_text() {
            self.notify(&message);
        }
    }
}

/// Emits messages as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        tracing::info!(target: "routinely::notify", "{message}");
    }
}

/// Drops every message. Used when notifications are disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _message: &str) {}
}
