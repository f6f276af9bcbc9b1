//! Notifier - User-Visible Notifications
//!
//! Feature controllers push success/error toasts here; the shell drains them.

use crossbeam_channel::{Receiver, Sender};

/// Toast level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

/// Multi-producer notification queue
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: Sender<Notification>,
    rx: Receiver<Notification>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier {
    pub fn new() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self { tx, rx }
    }

    pub fn success(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(%message, "notify success");
        self.push(NotificationLevel::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(%message, "notify error");
        self.push(NotificationLevel::Error, message);
    }

    fn push(&self, level: NotificationLevel, message: String) {
        // Both ends live in self, the channel cannot be disconnected here
        let _ = self.tx.send(Notification { level, message });
    }

    /// Receiver for consumers that poll on their own
    pub fn receiver(&self) -> Receiver<Notification> {
        self.rx.clone()
    }

    /// Take every queued notification
    pub fn drain(&self) -> Vec<Notification> {
        self.rx.try_iter().collect()
    }
}
