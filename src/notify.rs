//! User-visible notifications.
//!
//! The connection reports unexpected request failures here, and views report
//! the outcome of user actions. Implementations decide how to surface them.

use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

pub trait Notifier: Send + Sync {
    fn notify(&self, level: Level, message: &str);

    fn success(&self, message: &str) {
        self.notify(Level::Success, message);
    }

    fn error(&self, message: &str) {
        self.notify(Level::Error, message);
    }
}

/// Routes notifications to `tracing`. Used when no other notifier is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, level: Level, message: &str) {
        match level {
            Level::Success => info!(target: "price_tracker::notify", "{message}"),
            Level::Error => warn!(target: "price_tracker::notify", "{message}"),
        }
    }
}

/// Prints notifications to stderr, for interactive use.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, level: Level, message: &str) {
        match level {
            Level::Success => eprintln!("ok: {message}"),
            Level::Error => eprintln!("error: {message}"),
        }
    }
}
