//! catalog-admin binary entry point.
//!
//! Parses the CLI, loads configuration, initializes the terminal in raw
//! mode, runs the TUI event loop, and restores the terminal state on exit.
//!
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing_subscriber::EnvFilter;

use catalog_admin::app;
use catalog_admin::config::Config;

/// Terminal admin client for a library catalog REST backend.
#[derive(Parser, Debug)]
#[command(name = "catalog-admin", version, about)]
struct Cli {
    /// Path to the key=value config file (created with defaults if missing).
    #[arg(long, default_value = "catalog.conf")]
    config: String,

    /// Backend base URL; overrides the config file.
    #[arg(long, env = "CATALOG_BASE_URL")]
    base_url: Option<String>,

    /// Log file path. Logs go to a file so they do not corrupt the
    /// alternate screen; filter with RUST_LOG.
    #[arg(long, default_value = "catalog-admin.log")]
    log_file: String,
}

fn init_logging(path: &str) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {path}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Program entry point: run the TUI and report any top-level error to stderr.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_file)?;

    let mut config = Config::load_or_init(&cli.config);
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    tracing::info!(base_url = %config.base_url, "starting catalog-admin");

    let mut terminal = init_terminal().context("init terminal")?;

    let res = app::run(&mut terminal, config);

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    if let Err(err) = res {
        eprintln!("application error: {err}");
    }
    Ok(())
}
