//! Terminal notifier: one styled banner line per notification on stderr.

use std::io::Write;

use colored::Colorize;

use super::{Notification, NotificationKind, Notifier};

/// Writes notifications to stderr so stdout stays machine-readable.
pub struct TerminalNotifier {
    /// When false, success banners are suppressed. Errors always print.
    verbose: bool,
}

impl TerminalNotifier {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Format a banner line.
    pub fn format(notification: &Notification) -> String {
        match notification.kind {
            NotificationKind::Success => format!(
                "  {} {} {}",
                "✔".green().bold(),
                notification.title.green().bold(),
                notification.content,
            ),
            NotificationKind::Error => format!(
                "  {} {} {}",
                "✖".red().bold(),
                notification.title.red().bold(),
                notification.content.red(),
            ),
        }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        if notification.kind == NotificationKind::Success && !self.verbose {
            return;
        }
        let stderr = std::io::stderr();
        let mut handle = stderr.lock();
        let _ = writeln!(handle, "{}", Self::format(&notification));
        let _ = handle.flush();
    }
}
