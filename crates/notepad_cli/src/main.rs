//! notepad: a note list and editor in the terminal.
//!
//! # Usage
//!
//! ```bash
//! notepad
//! notepad --data-dir ./notes --log-level warn
//! ```

mod repl;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use notepad_core::{default_data_dir, init_logging, AppConfig, NotesApp};
use std::io;
use std::path::PathBuf;

/// Take notes in a persisted list with an explicit save/cancel editor.
#[derive(Parser, Debug)]
#[command(name = "notepad", version, about, long_about = None)]
struct Cli {
    /// Directory holding the note database (default: ~/.notepad)
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Do not write log files
    #[arg(long)]
    no_log: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;

    std::fs::create_dir_all(&config.data_dir).with_context(|| {
        format!(
            "failed to create data directory `{}`",
            config.data_dir.display()
        )
    })?;
    if config.logging_enabled {
        init_logging(config.log_level, &config.log_dir).context("failed to start logging")?;
    }

    let mut app = NotesApp::open_sqlite(&config).with_context(|| {
        format!("failed to open note storage `{}`", config.db_path().display())
    })?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    repl::run(&mut app, stdin.lock(), &mut stdout)?;
    info!("event=app_exit module=cli status=ok");
    Ok(())
}

fn build_config(cli: &Cli) -> Result<AppConfig> {
    let data_dir = cli.data_dir.clone().unwrap_or_else(default_data_dir);
    let mut config = AppConfig::new(data_dir).with_logging(!cli.no_log);
    if let Some(level) = cli.log_level.as_deref() {
        config = config.with_log_level(level)?;
    }
    let cwd = std::env::current_dir().context("failed to read working directory")?;
    Ok(config.resolve_against(&cwd))
}
