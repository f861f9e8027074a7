use clap::Parser;
use std::path::PathBuf;

use crate::pomodoro::phase::{
    DEFAULT_LONG_BREAK_MINUTES, DEFAULT_SHORT_BREAK_MINUTES, DEFAULT_WORK_MINUTES, Durations,
};
use crate::theme::{DEFAULT_THEME, Theme};

/// Pomodoro Clock - a terminal countdown timer for focused work
#[derive(Parser, Debug)]
#[command(name = "pomodoro_clock")]
#[command(about = "Terminal Pomodoro timer with work, short break and long break phases")]
#[command(version)]
#[command(after_help = r#"CYCLE:
    Work -> Short Break -> Work -> ... every 4th completed Work phase
    is followed by a Long Break instead. A finished phase waits for
    'start' before the next countdown begins.

EXAMPLES:
    pomodoro_clock                          # 25 / 5 / 15 minutes
    pomodoro_clock --work 30 --long-break 20
    pomodoro_clock --theme Ocean --no-notify
    pomodoro_clock --json                   # one JSON object per line

Type 'help' at the prompt for interactive commands."#)]
pub struct Cli {
    /// Work phase length in minutes
    #[arg(long, value_name = "MIN", default_value_t = DEFAULT_WORK_MINUTES,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub work: u32,

    /// Short break length in minutes
    #[arg(long, value_name = "MIN", default_value_t = DEFAULT_SHORT_BREAK_MINUTES,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub short_break: u32,

    /// Long break length in minutes
    #[arg(long, value_name = "MIN", default_value_t = DEFAULT_LONG_BREAK_MINUTES,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub long_break: u32,

    /// Colour theme (Default, Purple Harmony, Simple, Sunset, Ocean)
    #[arg(long, default_value = DEFAULT_THEME, value_parser = parse_theme)]
    pub theme: &'static Theme,

    /// Activity log file
    #[arg(short, long, value_name = "PATH")]
    pub log: Option<PathBuf>,

    /// Don't write an activity log
    #[arg(long, conflicts_with = "log")]
    pub no_log: bool,

    /// Don't show desktop notifications
    #[arg(long)]
    pub no_notify: bool,

    /// Emit machine-readable JSON lines instead of coloured text
    #[arg(long)]
    pub json: bool,

    /// Verbose diagnostics on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn durations(&self) -> Durations {
        Durations::from_minutes(self.work, self.short_break, self.long_break)
    }

    /// The activity log location, if logging is enabled.
    pub fn log_path(&self) -> Option<PathBuf> {
        if self.no_log {
            return None;
        }
        self.log.clone().or_else(default_log_path)
    }
}

pub fn default_log_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("pomodoro_clock").join("activity.log"))
}

fn parse_theme(name: &str) -> Result<&'static Theme, String> {
    Theme::by_name(name).ok_or_else(|| {
        format!(
            "unknown theme '{}' (available: {})",
            name,
            Theme::names().collect::<Vec<_>>().join(", ")
        )
    })
}
