//! Pong entry point
//!
//! Parses the command line, sets up logging and the terminal, then runs the
//! fixed-timestep game loop until the match ends or the players quit.

use std::fs::File;
use std::io::stdout;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::terminal;

use pong::consts::*;
use pong::platform::{Keyboard, TerminalGuard};
use pong::renderer::{Renderer, Snapshot, TerminalRenderer};
use pong::{Session, SessionEvent, Settings};

#[derive(Parser, Debug)]
#[command(name = "pong", version, about = "Two-player Pong in the terminal")]
struct Cli {
    /// JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Points needed to win (overrides the settings file)
    #[arg(short, long)]
    win_score: Option<u32>,

    /// Simulation ticks per second (overrides the settings file)
    #[arg(long)]
    fps: Option<u32>,

    /// Write the log to this file. Without it, log output on stderr is
    /// muted while the game owns the terminal.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        None => env_logger::init(),
    }
    Ok(())
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)
            .inspect_err(|e| log::warn!("Rejected settings file: {}", e))
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => {
            log::info!("No settings file given, using defaults");
            Settings::default()
        }
    };

    if let Some(win_score) = cli.win_score {
        settings.win_score = win_score;
    }
    if let Some(fps) = cli.fps {
        settings.tick_rate = fps;
    }
    settings
        .validate()
        .inspect_err(|e| log::warn!("Command line overrides rejected: {}", e))
        .context("invalid settings")?;
    Ok(settings)
}

/// Run `f` with logging switched off if `mute` is set
///
/// stderr shares the screen with the game, so anything logged there while
/// the terminal is in raw mode would draw over the field.
fn with_logging_muted<T>(mute: bool, f: impl FnOnce() -> T) -> T {
    let level = log::max_level();
    if mute {
        log::set_max_level(log::LevelFilter::Off);
    }
    let result = f();
    log::set_max_level(level);
    result
}

/// Run the game until it finishes or the players quit
///
/// Returns the session so the caller can report the result once the
/// terminal is back to normal.
fn run(settings: &Settings) -> Result<Session> {
    let guard = TerminalGuard::new().context("failed to set up terminal")?;
    let mut keyboard = Keyboard::new(guard.release_events());
    let (cols, rows) = terminal::size().context("failed to read terminal size")?;
    let mut renderer = TerminalRenderer::new(stdout(), cols, rows);

    let mut session = Session::new(settings);
    let tick = 1.0 / settings.tick_rate as f32;
    let mut accumulator = 0.0f32;
    let mut last_time = Instant::now();

    loop {
        let now = Instant::now();
        let dt = now.duration_since(last_time).as_secs_f32().min(MAX_FRAME_DELTA);
        last_time = now;
        accumulator += dt;

        let input = keyboard.poll().context("failed to read keyboard")?;
        if input.quit {
            log::info!("Quit requested");
            break;
        }

        let mut ticks = 0;
        while accumulator >= tick && ticks < MAX_TICKS_PER_FRAME {
            if let Some(SessionEvent::Won { side }) = session.frame(&input.keys) {
                log::debug!("Victory banner up for {}", side.as_str());
            }
            accumulator -= tick;
            ticks += 1;
        }
        // Don't carry a backlog we refused to run
        if ticks == MAX_TICKS_PER_FRAME {
            accumulator = accumulator.min(tick);
        }

        if session.is_finished() {
            break;
        }

        let (cols, rows) = terminal::size().context("failed to read terminal size")?;
        renderer.resize(cols, rows);
        renderer
            .render(&Snapshot::capture(&session))
            .context("failed to draw frame")?;

        let left = Duration::from_secs_f32((tick - accumulator).max(0.0));
        thread::sleep(left);
    }

    drop(guard);
    Ok(session)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;
    log::info!("Pong starting...");

    let settings = load_settings(&cli)?;
    let session = with_logging_muted(cli.log_file.is_none(), || run(&settings))?;
    log::info!("Final score {:?}", session.state().scores());

    println!("{}", outcome(&session));
    Ok(())
}

/// Result line printed once the terminal is restored
///
/// A winner counts even if the players quit during the victory banner.
fn outcome(session: &Session) -> String {
    let state = session.state();
    let (left, right) = state.scores();
    match state.winner(session.win_score()) {
        Some(winner) => format!("{} won ({} - {})", winner.name, left, right),
        None => format!("Match abandoned at {} - {}", left, right),
    }
}
