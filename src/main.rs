use std::ffi::CString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use tabplexer::app::{App, Outcome};
use tabplexer::services::tabs::TabManager;

/// Tab wrapper for Alacritty
#[derive(Parser, Debug)]
#[command(name = "tabplexer", about = "Tab wrapper for Alacritty", version)]
struct Args {
    /// Do not call setlocale before starting the terminal UI
    #[arg(long)]
    no_locale: bool,

    /// Append tracing output (filtered by RUST_LOG) to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

/// Pick up the user's locale so the terminal UI renders non-ASCII titles
/// correctly.
fn init_locale() {
    let locale = CString::default();
    unsafe {
        libc::setlocale(libc::LC_ALL, locale.as_ptr());
    }
}

/// Log to a file; the TUI owns stdout and stderr.
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }
    if !args.no_locale {
        init_locale();
    }

    // Construct the manager before touching the terminal, so a missing
    // emulator is reported as a plain error message.
    let manager = TabManager::new()?;

    let mut terminal = ratatui::init();
    let result = App::new(manager).run(&mut terminal);
    ratatui::restore();

    match result? {
        Outcome::Interrupted => std::process::exit(1),
        Outcome::Quit => Ok(()),
    }
}
