use thiserror::Error;

/// Errors surfaced by the console host. The timer core itself has none.
#[derive(Error, Debug)]
pub enum ClockError {
    #[error("Unknown command: {0} (type 'help' for a list)")]
    UnknownCommand(String),

    #[error("Missing argument for '{command}': expected {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("Invalid minutes: {0} (expected a whole number of at least 1)")]
    InvalidMinutes(String),

    #[error("Unknown phase: {0} (expected work, short or long)")]
    UnknownPhase(String),

    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Notification failed: {0}")]
    Notification(String),
}

pub type Result<T> = std::result::Result<T, ClockError>;
