mod app;
mod controller;
mod domain;
mod error;
mod input;
mod notifications;
mod persistence;
mod sound;
mod ticker;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use clap::{Parser, Subcommand};
use controller::SessionController;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::Settings;
use persistence::{
    data_file, ensure_data_dir, get_data_dir, init_local_data_dir, load_or_default, JsonFileStorage, Storage,
    LOG_FILE_NAME,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use sound::{SilentPlayer, SoundPlayer, SystemSoundPlayer};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

/// Directory holding `focus_end.mp3` and `break_end.mp3`
const SOUNDS_DIR: &str = "sounds";

/// Environment variable overriding the log filter
const LOG_ENV_VAR: &str = "POMOTODO_LOG";

#[derive(Parser)]
#[command(name = "pomotodo")]
#[command(about = "A terminal Pomodoro timer with a to-do list that tracks focus sessions per task", long_about = None)]
struct Cli {
    /// Use this data file instead of the one in the data directory
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    /// Do not play sounds when a phase ends
    #[arg(long)]
    mute: bool,

    /// Log filter, e.g. "debug" or "pomotodo=trace". Overrides POMOTODO_LOG.
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .pomotodo directory in the current directory
    Init,
    /// Print settings and tasks, then exit
    Status,
    /// Restore default timer settings, keeping tasks
    ResetSettings,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let data_dir = init_local_data_dir()?;
            println!("Initialized pomotodo directory: {}", data_dir.display());
            println!();
            println!("Pomotodo will now use this local directory for its data.");
            println!("Run 'pomotodo' to start a session.");
            Ok(())
        }
        Some(Commands::Status) => {
            let storage = JsonFileStorage::new(resolve_data_file(cli.data_file)?);
            print_status(&storage);
            Ok(())
        }
        Some(Commands::ResetSettings) => {
            let storage = JsonFileStorage::new(resolve_data_file(cli.data_file)?);
            let mut state = load_or_default(&storage);
            state.settings = Settings::default();
            storage
                .save(&state)
                .with_context(|| format!("Failed to write {}", storage.path().display()))?;
            println!("Settings restored to defaults in {}", storage.path().display());
            Ok(())
        }
        None => run_tui(cli),
    }
}

fn resolve_data_file(data_file_arg: Option<PathBuf>) -> Result<PathBuf> {
    match data_file_arg {
        Some(path) => Ok(path),
        None => {
            ensure_data_dir()?;
            data_file()
        }
    }
}

/// Install the file logger. The returned guard flushes it on drop.
fn init_tracing(log_dir: &Path, log_level: Option<&str>) -> Result<WorkerGuard> {
    let filter = match log_level {
        Some(level) => EnvFilter::try_new(level).with_context(|| format!("Invalid log level '{}'", level))?,
        None => EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let (writer, guard) = tracing_appender::non_blocking(log_appender(log_dir)?);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}

/// Single, never-rotated log file in `log_dir`
fn log_appender(log_dir: &Path) -> Result<RollingFileAppender> {
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_NAME)
        .build(log_dir)
        .with_context(|| format!("Failed to open log file in {}", log_dir.display()))
}

fn print_status(storage: &JsonFileStorage) {
    let state = load_or_default(storage);
    let settings = &state.settings;

    println!("Data file: {}", storage.path().display());
    println!();
    println!(
        "Focus {} min · Short break {} min · Long break {} min · Long break every {} pomodoros",
        settings.focus_time_min,
        settings.short_break_time_min,
        settings.long_break_time_min,
        settings.long_break_interval
    );
    println!("Dark mode: {}", if settings.dark_mode_enabled { "on" } else { "off" });
    println!();

    if state.tasks.is_empty() {
        println!("No tasks.");
    }
    for (i, task) in state.tasks.iter().enumerate() {
        println!(
            "{:>3}. [{}] {} ({})",
            i + 1,
            if task.done { "x" } else { " " },
            task.text,
            task.progress_label()
        );
    }
}

fn run_tui(cli: Cli) -> Result<()> {
    let data_file = resolve_data_file(cli.data_file)?;
    let log_dir = match data_file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => get_data_dir()?,
    };
    let _guard = init_tracing(&log_dir, cli.log_level.as_deref())?;

    eprintln!("Using data file: {}", data_file.display());
    info!(path = %data_file.display(), muted = cli.mute, "starting pomotodo");

    let sound: Box<dyn SoundPlayer> = if cli.mute {
        Box::new(SilentPlayer)
    } else {
        Box::new(SystemSoundPlayer::new(SOUNDS_DIR))
    };
    let controller = SessionController::load(Box::new(JsonFileStorage::new(data_file)), sound);
    let mut app = AppState::new(controller);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // A running countdown is not resumed on the next start
    app.controller.pause();
    info!("exiting");

    // Save on exit
    if let Err(e) = app.controller.save() {
        eprintln!("Error saving state: {}", e);
    }

    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    loop {
        app.process_notifications();
        terminal.draw(|f| ui::render(f, app))?;

        // Wait for input, but never past the next due tick
        let timeout = app.controller.poll_timeout(Instant::now());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    return Ok(());
                }
            }
        }

        app.controller.poll_ticks(Instant::now());
    }
}
