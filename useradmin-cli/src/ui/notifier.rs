use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use useradmin::notify::{Notification, Notifier};

use super::{error, success};

/// Spinner while work is in flight, then a coloured status line
///
/// Each notification replaces the previous one, like a toast.
pub struct TerminalNotifier {
    spinner: Mutex<Option<ProgressBar>>,
}

impl TerminalNotifier {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner(message: String) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ");
        pb.set_style(style);
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    }
}

impl Default for TerminalNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        let mut current = self.spinner.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(pb) = current.take() {
            pb.finish_and_clear();
        }

        match notification {
            Notification::Loading(message) => *current = Some(Self::spinner(message)),
            Notification::Success(message) => success(&message),
            Notification::Error(message) => error(&message),
        }
    }
}

impl Drop for TerminalNotifier {
    fn drop(&mut self) {
        let current = self.spinner.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(pb) = current.take() {
            pb.finish_and_clear();
        }
    }
}
