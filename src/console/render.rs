use serde::Serialize;

use crate::pomodoro::phase::{Phase, format_clock};
use crate::pomodoro::timer::{PhaseChange, TimerSnapshot};
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Text,
    Json,
}

/// One line of machine-readable output in `--json` mode.
#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ConsoleEvent<'a> {
    Clock {
        clock: String,
        #[serde(flatten)]
        snapshot: &'a TimerSnapshot,
    },
    PhaseCompleted {
        #[serde(flatten)]
        change: &'a PhaseChange,
        message: String,
    },
    Message {
        text: &'a str,
    },
    Error {
        text: &'a str,
    },
}

pub struct Renderer {
    mode: OutputMode,
    theme: &'static Theme,
}

impl Renderer {
    pub fn new(mode: OutputMode, theme: &'static Theme) -> Self {
        Self { mode, theme }
    }

    pub fn theme(&self) -> &'static Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: &'static Theme) {
        self.theme = theme;
    }

    pub fn clock(&self, snapshot: &TimerSnapshot) -> String {
        let clock = format_clock(snapshot.remaining_seconds);
        match self.mode {
            OutputMode::Json => to_json(&ConsoleEvent::Clock { clock, snapshot }),
            OutputMode::Text => {
                let state = if snapshot.running { "▶" } else { "⏸" };
                format!(
                    "{}{}{}{}",
                    self.theme.frame("┃"),
                    self.theme
                        .label(&format!(" {} {} ", snapshot.phase.emoji(), snapshot.phase)),
                    self.theme.body(&format!(
                        " {} {}  🍅×{} ",
                        clock, state, snapshot.completed_work_phases
                    )),
                    self.theme.frame("┃"),
                )
            }
        }
    }

    pub fn phase_completed(&self, change: &PhaseChange) -> String {
        let message = completion_message(change.from);
        match self.mode {
            OutputMode::Json => to_json(&ConsoleEvent::PhaseCompleted { change, message }),
            OutputMode::Text => format!(
                "\n🔔 {} Next up: {} {}",
                message,
                change.to.emoji(),
                change.to
            ),
        }
    }

    pub fn message(&self, text: &str) -> String {
        match self.mode {
            OutputMode::Json => to_json(&ConsoleEvent::Message { text }),
            OutputMode::Text => text.to_string(),
        }
    }

    pub fn error(&self, text: &str) -> String {
        match self.mode {
            OutputMode::Json => to_json(&ConsoleEvent::Error { text }),
            OutputMode::Text => format!("Error: {}", text),
        }
    }
}

pub fn completion_message(phase: Phase) -> String {
    format!("{} finished!", phase)
}

fn to_json(event: &ConsoleEvent<'_>) -> String {
    serde_json::to_string(event).unwrap_or_else(|e| {
        tracing::warn!("failed to serialize console event: {}", e);
        String::new()
    })
}
