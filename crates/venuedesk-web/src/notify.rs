//! User-facing notifications raised by dashboard actions

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    /// The action completed
    Success,
    /// The action completed with some failures
    Warning,
    /// The action did not run
    Error,
    /// Neutral information
    Info,
}

/// Message shown to the user after an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Severity
    pub level: NotificationLevel,
    /// Text in the active language
    pub message: String,
}

impl Notification {
    /// Success notification
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, message)
    }

    /// Warning notification
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Warning, message)
    }

    /// Error notification
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, message)
    }

    /// Info notification
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Info, message)
    }

    fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Sink for notifications
pub trait Notifier: Send + Sync {
    /// Deliver one notification
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        let message = notification.message.as_str();
        match notification.level {
            NotificationLevel::Success | NotificationLevel::Info => {
                info!(level = ?notification.level, message, "notification");
            }
            NotificationLevel::Warning => warn!(message, "notification"),
            NotificationLevel::Error => error!(message, "notification"),
        }
    }
}

/// Logs notifications and keeps them until taken
///
/// The dashboard API returns the buffered notifications with the response so
/// the front end can display them.
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    log: TracingNotifier,
    buffer: Mutex<Vec<Notification>>,
}

impl CollectingNotifier {
    /// Empty buffer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything collected so far
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.buffer.lock())
    }

    /// Copy of everything collected so far
    #[must_use]
    pub fn snapshot(&self) -> Vec<Notification> {
        self.buffer.lock().clone()
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, notification: Notification) {
        self.log.notify(notification.clone());
        self.buffer.lock().push(notification);
    }
}
