use std::io::stdout;
use std::panic;

use crossterm::{
    event::DisableMouseCapture,
    execute,
    terminal::{LeaveAlternateScreen, disable_raw_mode},
};
use log::error;

/// Install a panic hook that gives the terminal back before reporting.
///
/// Debug builds print a full backtrace through `better-panic`; release builds
/// write a crash report with `human-panic`.
pub fn initialize_panic_handler() {
    panic::set_hook(Box::new(|panic_info| {
        restore_terminal();
        error!("Panic: {panic_info}");

        if cfg!(debug_assertions) {
            better_panic::Settings::auto()
                .most_recent_first(false)
                .lineno_suffix(true)
                .verbosity(better_panic::Verbosity::Full)
                .create_panic_handler()(panic_info);
        } else {
            let metadata = human_panic::metadata!();
            let file_path = human_panic::handle_dump(&metadata, panic_info);
            if let Err(e) = human_panic::print_msg(file_path, &metadata) {
                eprintln!("Failed to print crash report: {e}");
            }
        }

        std::process::exit(1);
    }));
}

pub fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        eprintln!("Failed to disable raw mode: {e}");
    }
    if let Err(e) = execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture) {
        eprintln!("Failed to leave alternate screen: {e}");
    }
}
