//! User-visible notifications.
//!
//! Every outcome of a console action ends up here: a success banner or
//! an error banner titled with the error code.

pub mod terminal;

use std::fmt;

use crate::constants::UNKNOWN_ERROR_MESSAGE;

pub use terminal::TerminalNotifier;

/// Banner style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A titled message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub content: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: "Success.".to_string(),
            content: message.into(),
        }
    }

    /// Error banner titled `Error - {code}`; an empty message reads as
    /// an unknown error. A zero code is shown as no code.
    pub fn error(code: Option<u16>, message: &str) -> Self {
        let code = code
            .filter(|&c| c != 0)
            .map(|c| c.to_string())
            .unwrap_or_default();
        let content = if message.trim().is_empty() {
            UNKNOWN_ERROR_MESSAGE.to_string()
        } else {
            message.to_string()
        };
        Self {
            kind: NotificationKind::Error,
            title: format!("Error - {code}"),
            content,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.title, self.content)
    }
}

/// Sink for notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
