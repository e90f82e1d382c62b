//! Transient user notifications

use crate::ui::{self, UiContext};
use std::sync::Mutex;

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Info,
    Error,
}

/// A message meant for the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }
}

/// Sink for notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Renders notifications to the terminal
pub struct ConsoleNotifier {
    ctx: UiContext,
}

impl ConsoleNotifier {
    pub fn new(ctx: UiContext) -> Self {
        Self { ctx }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            Level::Success => ui::step_ok(&self.ctx, &notification.message),
            Level::Info => ui::step_info(&self.ctx, &notification.message),
            Level::Error => ui::step_error(&self.ctx, &notification.message),
        }
    }
}

/// Keeps notifications in memory
#[derive(Debug, Default)]
pub struct NotificationLog {
    entries: Mutex<Vec<Notification>>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications so far, oldest first
    pub fn entries(&self) -> Vec<Notification> {
        self.lock().clone()
    }

    /// Number of notifications at a level
    pub fn count(&self, level: Level) -> usize {
        self.lock().iter().filter(|n| n.level == level).count()
    }

    pub fn last(&self) -> Option<Notification> {
        self.lock().last().cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Notification>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Notifier for NotificationLog {
    fn notify(&self, notification: Notification) {
        self.lock().push(notification);
    }
}
