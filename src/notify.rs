use notify_rust::Notification;

use crate::console::render::completion_message;
use crate::error::{ClockError, Result};
use crate::pomodoro::timer::PhaseChange;

const NOTIFICATION_SUMMARY: &str = "Pomodoro Clock";

pub fn send_notification(message: &str) -> Result<()> {
    Notification::new()
        .summary(NOTIFICATION_SUMMARY)
        .body(message)
        .timeout(0) // Stays until acknowledged
        .show()
        .map_err(|e| ClockError::Notification(e.to_string()))?;
    Ok(())
}

/// Desktop notifications for phase completions; can be switched off.
pub struct Notifier {
    enabled: bool,
}

impl Notifier {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn phase_completed(&self, change: &PhaseChange) {
        if !self.enabled {
            return;
        }
        let message = format!(
            "{} Time for: {}",
            completion_message(change.from),
            change.to
        );
        if let Err(e) = send_notification(&message) {
            tracing::warn!("{}", e);
        }
    }
}
