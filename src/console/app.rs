//! The interactive console host.
//!
//! Owns the timer and everything around it: parses commands, renders the
//! clock after every change, and turns phase completions into notifications
//! and activity-log entries.

use chrono::{DateTime, Local};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::command::{Command, CommandParser, HELP};
use super::render::{Renderer, completion_message};
use crate::error::Result;
use crate::notify::Notifier;
use crate::pomodoro::scheduler::{Scheduler, TickEvent, TickReceiver};
use crate::pomodoro::timer::{PhaseTimer, TickOutcome};
use crate::session_log::SessionLog;
use crate::theme::Theme;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// The clock display; text mode redraws it in place.
    Clock(String),
    Line(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct ClockApp<S: Scheduler> {
    timer: PhaseTimer<S>,
    renderer: Renderer,
    notifier: Notifier,
    log: SessionLog,
    parser: CommandParser,
    started_at: DateTime<Local>,
}

impl<S: Scheduler> ClockApp<S> {
    pub fn new(
        timer: PhaseTimer<S>,
        renderer: Renderer,
        notifier: Notifier,
        log: SessionLog,
    ) -> Self {
        Self {
            timer,
            renderer,
            notifier,
            log,
            parser: CommandParser::new(),
            started_at: Local::now(),
        }
    }

    pub fn timer(&self) -> &PhaseTimer<S> {
        &self.timer
    }

    pub fn theme(&self) -> &'static Theme {
        self.renderer.theme()
    }

    pub fn clock(&self) -> Output {
        Output::Clock(self.renderer.clock(&self.timer.snapshot()))
    }

    pub fn handle_line(&mut self, line: &str) -> (Flow, Vec<Output>) {
        match self.parser.parse(line) {
            Ok(Some(Command::Quit)) => (Flow::Quit, Vec::new()),
            Ok(Some(command)) => (Flow::Continue, self.execute(command)),
            Ok(None) => (Flow::Continue, Vec::new()),
            Err(e) => (
                Flow::Continue,
                vec![Output::Line(self.renderer.error(&e.to_string()))],
            ),
        }
    }

    fn execute(&mut self, command: Command) -> Vec<Output> {
        let mut out = Vec::new();
        match command {
            Command::Start => {
                if !self.timer.start() {
                    out.push(self.line("Already running."));
                }
            }
            Command::Pause => {
                if !self.timer.pause() {
                    out.push(self.line("Not running."));
                }
            }
            Command::Reset => self.timer.reset(),
            Command::Skip => {
                let change = self.timer.skip();
                self.log
                    .log(&format!("Skipped {}, now {}", change.from, change.to));
            }
            Command::SetDuration { phase, minutes } => {
                self.timer.set_duration(phase, minutes);
                let msg = format!("{} duration set to {} minutes.", phase, minutes);
                self.log.log(&msg);
                out.push(self.line(&msg));
            }
            Command::Theme(theme) => {
                self.renderer.set_theme(theme);
                out.push(self.line(&format!("Theme '{}' applied.", theme.name)));
            }
            Command::Themes => {
                let active = self.renderer.theme().name;
                let list = Theme::names()
                    .map(|name| {
                        let marker = if name == active { "*" } else { " " };
                        format!(" {} {}", marker, name)
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                out.push(self.line(&format!("Themes:\n{}", list)));
            }
            Command::Status => {}
            Command::Help => out.push(self.line(HELP)),
            Command::Quit => return out,
        }
        out.push(self.clock());
        out
    }

    pub fn handle_tick(&mut self, event: TickEvent) -> Vec<Output> {
        match self.timer.tick(event.handle) {
            TickOutcome::Stale => Vec::new(),
            TickOutcome::Counted(_) => vec![self.clock()],
            TickOutcome::Completed(change) => {
                self.log.log(&format!(
                    "{} Next: {}",
                    completion_message(change.from),
                    change.to
                ));
                self.notifier.phase_completed(&change);
                vec![
                    Output::Line(self.renderer.phase_completed(&change)),
                    self.clock(),
                ]
            }
        }
    }

    /// Closing line for the session; also written to the activity log.
    pub fn finish(&self) -> Output {
        let elapsed = Local::now() - self.started_at;
        let msg = format!(
            "Session over: {} work phase(s) completed in {}h {:02}m.",
            self.timer.completed_work_phases(),
            elapsed.num_hours(),
            elapsed.num_minutes() % 60
        );
        self.log.log(&msg);
        self.line(&msg)
    }

    fn line(&self, text: &str) -> Output {
        Output::Line(self.renderer.message(text))
    }
}

/// Writes outputs to stdout. In text mode the clock is redrawn in place.
struct Screen {
    redraw_clock: bool,
    on_clock_line: bool,
}

impl Screen {
    fn write(&mut self, outputs: Vec<Output>) -> std::io::Result<()> {
        let mut stdout = std::io::stdout().lock();
        for output in outputs {
            match output {
                Output::Clock(text) if self.redraw_clock => {
                    write!(stdout, "\r{}", text)?;
                    self.on_clock_line = true;
                }
                Output::Clock(text) | Output::Line(text) => {
                    if self.on_clock_line {
                        writeln!(stdout)?;
                        self.on_clock_line = false;
                    }
                    writeln!(stdout, "{}", text)?;
                }
            }
        }
        stdout.flush()
    }
}

/// Drives the app until `quit` or end of input.
pub async fn run<S: Scheduler>(
    mut app: ClockApp<S>,
    mut ticks: TickReceiver,
    redraw_clock: bool,
) -> Result<()> {
    let mut screen = Screen {
        redraw_clock,
        on_clock_line: false,
    };
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    screen.write(vec![app.clock()])?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::debug!("stdin closed");
                    break;
                };
                // The user's Enter already moved the cursor off the clock line.
                screen.on_clock_line = false;
                let (flow, outputs) = app.handle_line(&line);
                screen.write(outputs)?;
                if flow == Flow::Quit {
                    break;
                }
            }
            Some(event) = ticks.recv() => {
                screen.write(app.handle_tick(event))?;
            }
        }
    }

    screen.write(vec![app.finish()])?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::render::OutputMode;
    use crate::pomodoro::phase::{Durations, Phase};
    use crate::pomodoro::scheduler::ManualScheduler;

    fn app() -> ClockApp<ManualScheduler> {
        ClockApp::new(
            PhaseTimer::new(Durations::from_minutes(1, 1, 1), ManualScheduler::new()),
            Renderer::new(OutputMode::Json, Theme::default_theme()),
            Notifier::new(false),
            SessionLog::disabled(),
        )
    }

    fn fire(app: &mut ClockApp<ManualScheduler>) -> Vec<Output> {
        let handle = app.timer().scheduler().last_armed().unwrap();
        app.handle_tick(TickEvent { handle })
    }

    fn text(output: &Output) -> &str {
        match output {
            Output::Clock(s) | Output::Line(s) => s,
        }
    }

    #[test]
    fn test_start_renders_running_clock() {
        let mut app = app();
        let (flow, out) = app.handle_line("start");
        assert_eq!(flow, Flow::Continue);
        assert_eq!(out.len(), 1);
        assert!(text(&out[0]).contains("\"running\":true"));
        assert!(app.timer().is_running());
    }

    #[test]
    fn test_double_start_reports_already_running() {
        let mut app = app();
        app.handle_line("start");
        let (_, out) = app.handle_line("start");
        assert!(text(&out[0]).contains("Already running."));
        assert_eq!(app.timer().scheduler().armed.len(), 1);
    }

    #[test]
    fn test_quit_and_blank_lines() {
        let mut app = app();
        assert_eq!(app.handle_line("quit"), (Flow::Quit, Vec::new()));
        assert_eq!(app.handle_line(""), (Flow::Continue, Vec::new()));
    }

    #[test]
    fn test_bad_command_is_recoverable() {
        let mut app = app();
        let (flow, out) = app.handle_line("set work zero");
        assert_eq!(flow, Flow::Continue);
        assert!(text(&out[0]).contains("\"event\":\"error\""));
        assert!(text(&out[0]).contains("Invalid minutes"));
    }

    #[test]
    fn test_tick_until_completion() {
        let mut app = app();
        app.handle_line("start");
        for _ in 0..59 {
            let out = fire(&mut app);
            assert!(matches!(out.as_slice(), [Output::Clock(_)]));
        }
        let out = fire(&mut app);
        assert_eq!(out.len(), 2);
        assert!(text(&out[0]).contains("\"event\":\"phase_completed\""));
        assert!(text(&out[0]).contains("Work finished!"));
        assert_eq!(app.timer().phase(), Phase::ShortBreak);
        assert!(!app.timer().is_running());
    }

    #[test]
    fn test_stale_tick_renders_nothing() {
        let mut app = app();
        app.handle_line("start");
        let old = app.timer().scheduler().last_armed().unwrap();
        app.handle_line("pause");
        assert!(app.handle_tick(TickEvent { handle: old }).is_empty());
    }

    #[test]
    fn test_set_duration_and_theme() {
        let mut app = app();
        let (_, out) = app.handle_line("set work 30");
        assert!(text(&out[0]).contains("Work duration set to 30 minutes."));
        assert_eq!(app.timer().remaining_seconds(), 1800);

        let (_, out) = app.handle_line("theme simple");
        assert!(text(&out[0]).contains("Theme 'Simple' applied."));
        assert_eq!(app.theme().name, "Simple");
    }

    #[test]
    fn test_themes_marks_active() {
        let mut app = app();
        let (_, out) = app.handle_line("themes");
        assert!(text(&out[0]).contains("* Default"));
    }

    #[test]
    fn test_finish_reports_completed_work_phases() {
        let mut app = app();
        app.handle_line("skip");
        let out = app.finish();
        assert!(text(&out).contains("1 work phase(s) completed"));
    }
}
