//! Transient notifications
//!
//! Views report progress through a [`Notifier`] instead of printing, so the
//! terminal front-end can draw spinners and tests can record what was shown.

use std::fmt;

/// A transient status message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Work started; replaced by the next success or error
    Loading(String),
    Success(String),
    Error(String),
}

impl Notification {
    pub fn message(&self) -> &str {
        match self {
            Notification::Loading(m) | Notification::Success(m) | Notification::Error(m) => m,
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Sink for notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);

    fn loading(&self, message: &str) {
        self.notify(Notification::Loading(message.to_string()));
    }

    fn success(&self, message: &str) {
        self.notify(Notification::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.notify(Notification::Error(message.to_string()));
    }
}
