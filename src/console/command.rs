use regex::Regex;

use crate::error::{ClockError, Result};
use crate::pomodoro::phase::Phase;
use crate::theme::Theme;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Reset,
    Skip,
    SetDuration { phase: Phase, minutes: u32 },
    Theme(&'static Theme),
    Themes,
    Status,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  start, s                 start or resume the countdown
  pause, p                 pause the countdown
  reset, r                 restart the current phase
  skip, n                  jump to the next phase
  set <phase> <minutes>    change a phase length (phase: work, short, long)
  theme <name>             switch colour theme
  themes                   list available themes
  status                   show the clock
  help, ?                  show this help
  quit, q                  leave";

/// Parses one console line into a [`Command`].
pub struct CommandParser {
    line_pattern: Regex,
    set_pattern: Regex,
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandParser {
    pub fn new() -> Self {
        Self {
            line_pattern: Regex::new(r"^\s*(\S+)(?:\s+(.*?))?\s*$").expect("valid line pattern"),
            set_pattern: Regex::new(r"^(\S+)\s+(\S+)$").expect("valid set pattern"),
        }
    }

    /// Blank lines yield `Ok(None)`.
    pub fn parse(&self, line: &str) -> Result<Option<Command>> {
        let Some(captures) = self.line_pattern.captures(line) else {
            return Ok(None);
        };
        let verb = captures[1].to_lowercase();
        let rest = captures.get(2).map(|m| m.as_str()).unwrap_or("");

        let command = match verb.as_str() {
            "start" | "s" => Command::Start,
            "pause" | "p" => Command::Pause,
            "reset" | "r" => Command::Reset,
            "skip" | "n" => Command::Skip,
            "set" => self.parse_set(rest)?,
            "theme" => {
                if rest.is_empty() {
                    return Err(ClockError::MissingArgument {
                        command: "theme",
                        expected: "<name>",
                    });
                }
                let theme = Theme::by_name(rest)
                    .ok_or_else(|| ClockError::UnknownTheme(rest.to_string()))?;
                Command::Theme(theme)
            }
            "themes" => Command::Themes,
            "status" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            _ => return Err(ClockError::UnknownCommand(verb)),
        };

        Ok(Some(command))
    }

    fn parse_set(&self, args: &str) -> Result<Command> {
        let captures = self
            .set_pattern
            .captures(args)
            .ok_or(ClockError::MissingArgument {
                command: "set",
                expected: "<phase> <minutes>",
            })?;

        let phase = Phase::parse(&captures[1])
            .ok_or_else(|| ClockError::UnknownPhase(captures[1].to_string()))?;
        let minutes = parse_minutes(&captures[2])?;

        Ok(Command::SetDuration { phase, minutes })
    }
}

pub fn parse_minutes(value: &str) -> Result<u32> {
    match value.parse::<u32>() {
        Ok(minutes) if minutes >= 1 => Ok(minutes),
        _ => Err(ClockError::InvalidMinutes(value.to_string())),
    }
}
