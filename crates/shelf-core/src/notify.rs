// ── Transient notifications ──
//
// One slot, no queue: a new notification replaces the previous one. The
// channel owns no timer; whoever renders it reads `duration` and calls
// `hide()` when it is done.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tokio::sync::watch;

pub const DEFAULT_DURATION: Duration = Duration::from_millis(3000);

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Severity {
    #[default]
    Success,
    Error,
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub visible: bool,
    pub message: String,
    pub severity: Severity,
    pub duration: Duration,
}

impl Default for Notification {
    fn default() -> Self {
        Self {
            visible: false,
            message: String::new(),
            severity: Severity::Success,
            duration: DEFAULT_DURATION,
        }
    }
}

/// Single-slot notification channel, shared through the owning `Catalog`.
#[derive(Debug)]
pub struct Notifier {
    slot: watch::Sender<Notification>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier {
    pub fn new() -> Self {
        let (slot, _) = watch::channel(Notification::default());
        Self { slot }
    }

    /// Overwrite the active notification and make it visible.
    pub fn show(&self, message: impl Into<String>, severity: Severity, duration: Duration) {
        let message = message.into();
        self.slot.send_modify(|n| {
            *n = Notification {
                visible: true,
                message,
                severity,
                duration,
            };
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(message, Severity::Success, DEFAULT_DURATION);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(message, Severity::Error, DEFAULT_DURATION);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.show(message, Severity::Info, DEFAULT_DURATION);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.show(message, Severity::Warning, DEFAULT_DURATION);
    }

    /// Hide the notification, keeping its text for a fade-out.
    pub fn hide(&self) {
        self.slot.send_modify(|n| n.visible = false);
    }

    pub fn current(&self) -> Notification {
        self.slot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Notification> {
        self.slot.subscribe()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn starts_hidden() {
        let n = Notifier::new().current();
        assert!(!n.visible);
        assert_eq!(n.duration, DEFAULT_DURATION);
    }

    #[test]
    fn show_overwrites_previous() {
        let notifier = Notifier::new();
        notifier.success("Book added");
        notifier.show("Delete failed", Severity::Error, Duration::from_secs(5));

        let n = notifier.current();
        assert!(n.visible);
        assert_eq!(n.message, "Delete failed");
        assert_eq!(n.severity, Severity::Error);
        assert_eq!(n.duration, Duration::from_secs(5));
    }

    #[test]
    fn hide_keeps_last_message() {
        let notifier = Notifier::new();
        notifier.warning("Careful");
        notifier.hide();

        let n = notifier.current();
        assert!(!n.visible);
        assert_eq!(n.message, "Careful");
        assert_eq!(n.severity, Severity::Warning);
    }

    #[test]
    fn severity_parses_case_insensitively() {
        assert_eq!("ERROR".parse::<Severity>().unwrap(), Severity::Error);
        assert_eq!(Severity::Info.to_string(), "info");
    }

    #[test]
    fn subscribers_are_notified() {
        let notifier = Notifier::new();
        let mut rx = notifier.subscribe();
        notifier.info("Loaded");
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().message, "Loaded");
    }
}
