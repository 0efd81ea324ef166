//! LeetCycle - spaced repetition for coding problems
//!
//! A terminal tracker that schedules solved problems for review on a
//! fixed-interval ladder, so the patterns stay fresh.

mod calendar;
mod catalog;
mod config;
mod models;
mod srs;
mod stats;
mod storage;
mod ui;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use storage::Storage;
use ui::App;

// ══════════════════════════════════════════════════════════════════════════
// CLI Arguments
// ══════════════════════════════════════════════════════════════════════════

#[derive(Parser, Debug)]
#[command(name = "leetcycle")]
#[command(author, version, about = "Spaced repetition tracker for coding problems", long_about = None)]
struct Args {
    /// Directory containing problem and stats files
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Export a backup to the given file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Import a backup from the given file and exit
    #[arg(short, long)]
    import: Option<PathBuf>,
}

// ══════════════════════════════════════════════════════════════════════════
// Main Entry Point
// ══════════════════════════════════════════════════════════════════════════

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    // Determine data directory
    let data_dir = args.data_dir.unwrap_or_else(Storage::default_path);

    // Initialize storage
    let storage = Storage::new(data_dir)?;

    // Headless backup paths
    if let Some(path) = args.export {
        let count = storage.export_backup(&path)?;
        println!("✓ Exported {} problems to {}", count, path.display());
        return Ok(());
    }
    if let Some(path) = args.import {
        let count = storage.import_backup(&path)?;
        println!("✓ Imported {} problems from {}", count, path.display());
        return Ok(());
    }

    // Run TUI
    run_tui(storage)
}

fn run_tui(storage: Storage) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Load config
    let config = config::Config::load().unwrap_or_default();

    // Create app
    let mut app = App::new(storage, config);

    // Run main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {}", err);
        return Err(err);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| app.render(frame))?;
        app.handle_events()?;
    }
    Ok(())
}
