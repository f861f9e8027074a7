use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pomodoro_clock::config::Cli;
use pomodoro_clock::console::app::{self, ClockApp};
use pomodoro_clock::console::command::HELP;
use pomodoro_clock::console::render::{OutputMode, Renderer};
use pomodoro_clock::notify::Notifier;
use pomodoro_clock::pomodoro::phase::format_clock;
use pomodoro_clock::pomodoro::scheduler::{TokioScheduler, create_tick_channel};
use pomodoro_clock::session_log::SessionLog;
use pomodoro_clock::{Phase, PhaseTimer};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let log = match cli.log_path() {
        Some(path) => SessionLog::open(&path)
            .with_context(|| format!("Failed to open activity log: {}", path.display()))?,
        None => SessionLog::disabled(),
    };

    let durations = cli.durations();
    let mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Text
    };

    if mode == OutputMode::Text {
        println!("🍅 Pomodoro Clock");
        println!("======================================================");
        println!(
            "Durations: {} work / {} short break / {} long break",
            format_clock(durations.get(Phase::Work)),
            format_clock(durations.get(Phase::ShortBreak)),
            format_clock(durations.get(Phase::LongBreak)),
        );
        if let Some(path) = log.path() {
            println!("Logging to: {}", path.display());
        }
        println!("{}\n", HELP);
    }

    let (tick_tx, tick_rx) = create_tick_channel();
    let timer = PhaseTimer::new(durations, TokioScheduler::new(tick_tx));
    let clock = ClockApp::new(
        timer,
        Renderer::new(mode, cli.theme),
        Notifier::new(!cli.no_notify),
        log,
    );

    app::run(clock, tick_rx, mode == OutputMode::Text).await?;
    Ok(())
}
