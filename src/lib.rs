//! pomodoro_clock - a Pomodoro countdown timer for the terminal
//!
//! The cycle is Work -> Short Break -> Work -> ..., with every fourth
//! completed Work phase followed by a Long Break. The timer core
//! (`pomodoro`) is independent of any presentation: it arms one tick at a
//! time through a `Scheduler` and reports what changed, while `console`
//! renders the clock, handles commands and raises notifications.

pub mod config;
pub mod console;
pub mod error;
pub mod notify;
pub mod pomodoro;
pub mod session_log;
pub mod theme;

pub use error::{ClockError, Result};
pub use pomodoro::phase::{Durations, Phase};
pub use pomodoro::scheduler::{ManualScheduler, Scheduler, TickEvent, TickHandle, TokioScheduler};
pub use pomodoro::timer::{PhaseChange, PhaseTimer, TickOutcome, TimerSnapshot};
pub use theme::Theme;
