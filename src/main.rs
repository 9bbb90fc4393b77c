use std::{fs::File, io::stdout};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{error, info};
use ratatui::{Terminal, backend::CrosstermBackend};
use simplelog::{LevelFilter, WriteLogger};

use skimmer::event_source::KeyboardEventSource;
use skimmer::main_app::{App, run_app_with_event_source};
use skimmer::panic_handler;
use skimmer::session::Session;
use skimmer::settings;
use skimmer::theme::load_theme_from_settings;

/// Skim a web page in the terminal: readable text and selectable links
#[derive(Parser, Debug)]
#[command(name = "skimmer", version, about)]
struct Args {
    /// Page to open; https:// is assumed when no scheme is given
    url: String,
}

fn main() -> Result<()> {
    // Exits with usage and a non-zero status when the URL is missing
    let args = Args::parse();

    panic_handler::initialize_panic_handler();

    // Initialize logging with html5ever DEBUG logs filtered out
    WriteLogger::init(
        LevelFilter::Debug,
        simplelog::ConfigBuilder::new()
            .set_max_level(LevelFilter::Debug)
            .add_filter_ignore_str("html5ever")
            .build(),
        File::create("skimmer.log")?,
    )?;

    info!("Starting skimmer for {}", args.url);

    // Load settings from ~/.skimmer_settings.yaml
    settings::load_settings();
    load_theme_from_settings();

    // The document is fetched and transformed before the terminal is taken
    let session = Session::load(&args.url, &settings::current())?;

    enable_raw_mode()?;
    let mut stdout = stdout();

    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session);
    let mut event_source = KeyboardEventSource;
    let res = run_app_with_event_source(&mut terminal, &mut app, &mut event_source);

    // Restore terminal state
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("Application error: {err:?}");
        println!("{err:?}");
        std::process::exit(1);
    }

    info!("Shutting down skimmer");
    Ok(())
}
