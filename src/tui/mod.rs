//! Terminal User Interface (TUI) for stretch925.
//!
//! Shows the running session and maps key presses to session actions.
//! Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::{App, HELP};
pub use event::{map_key, Action};

use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::Stretch925Error;
use crate::features::session::Clock;

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the settings are invalid or the TUI fails to initialize or run.
pub fn run(config: &Config) -> Result<(), Stretch925Error> {
    // Build the session before touching the terminal so bad settings print cleanly
    let mut app = App::new(config)?;

    // Setup terminal
    enable_raw_mode()
        .map_err(|e| Stretch925Error::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| Stretch925Error::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| Stretch925Error::Terminal(format!("Failed to create terminal: {e}")))?;

    info!(
        sessions = config.timer.session_count,
        work = config.timer.work_seconds,
        "session started"
    );
    let result = run_app(&mut terminal, &mut app);
    app.shutdown();

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    info!("session ended");
    result
}

/// Run the main application loop.
fn run_app<B: Backend, C: Clock>(
    terminal: &mut Terminal<B>,
    app: &mut App<C>,
) -> Result<(), Stretch925Error> {
    loop {
        // Draw UI
        if app.take_dirty() {
            terminal
                .draw(|frame| ui::render(frame, app))
                .map_err(|e| Stretch925Error::Terminal(format!("Failed to draw: {e}")))?;
        }

        // Handle events
        if let Some(action) = event::next_action()? {
            debug!(?action, "key action");
            if app.handle(action) {
                break;
            }
        }

        app.on_tick();
    }

    Ok(())
}
