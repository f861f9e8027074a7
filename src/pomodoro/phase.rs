use serde::{Deserialize, Serialize};

pub const TICK_INTERVAL_MS: u64 = 1000; // One countdown step per second
pub const DEFAULT_WORK_MINUTES: u32 = 25;
pub const DEFAULT_SHORT_BREAK_MINUTES: u32 = 5;
pub const DEFAULT_LONG_BREAK_MINUTES: u32 = 15;
pub const LONG_BREAK_EVERY: u32 = 4; // Every 4th completed work phase earns a long break

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Work,
    ShortBreak,
    LongBreak,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Work, Phase::ShortBreak, Phase::LongBreak];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Work => "Work",
            Phase::ShortBreak => "Short Break",
            Phase::LongBreak => "Long Break",
        }
    }

    /// Short name used by the console grammar.
    pub fn key(&self) -> &'static str {
        match self {
            Phase::Work => "work",
            Phase::ShortBreak => "short",
            Phase::LongBreak => "long",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Phase::Work => "🍅",
            Phase::ShortBreak => "☕",
            Phase::LongBreak => "🌴",
        }
    }

    pub fn is_break(&self) -> bool {
        !matches!(self, Phase::Work)
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "work" | "pomodoro" => Some(Phase::Work),
            "short" | "short-break" | "short_break" => Some(Phase::ShortBreak),
            "long" | "long-break" | "long_break" => Some(Phase::LongBreak),
            _ => None,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configured length of each phase, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Durations {
    pub work: u32,
    pub short_break: u32,
    pub long_break: u32,
}

impl Durations {
    pub fn from_minutes(work: u32, short_break: u32, long_break: u32) -> Self {
        Self {
            work: minutes_to_seconds(work),
            short_break: minutes_to_seconds(short_break),
            long_break: minutes_to_seconds(long_break),
        }
    }

    pub fn get(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Work => self.work,
            Phase::ShortBreak => self.short_break,
            Phase::LongBreak => self.long_break,
        }
    }

    pub fn set(&mut self, phase: Phase, seconds: u32) {
        match phase {
            Phase::Work => self.work = seconds,
            Phase::ShortBreak => self.short_break = seconds,
            Phase::LongBreak => self.long_break = seconds,
        }
    }
}

impl Default for Durations {
    fn default() -> Self {
        Self::from_minutes(
            DEFAULT_WORK_MINUTES,
            DEFAULT_SHORT_BREAK_MINUTES,
            DEFAULT_LONG_BREAK_MINUTES,
        )
    }
}

pub fn minutes_to_seconds(minutes: u32) -> u32 {
    minutes.saturating_mul(60)
}

/// Formats seconds as `MM:SS`; minutes keep counting past 59.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
