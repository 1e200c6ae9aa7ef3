//! Terminal User Interface (TUI) for datefixer.
//!
//! A log panel with Open / Update / Exit buttons; questions appear as modal
//! dialogs. Built with ratatui and crossterm.

mod app;
mod dialog;
mod event;
mod interaction;
mod ui;

pub use app::App;
pub use interaction::TuiInteraction;

use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::cli::args::TuiArgs;
use crate::cli::commands::RunOptions;
use crate::error::DateFixerError;
use event::{Action, TerminalKeys};

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub fn run(options: &RunOptions, args: &TuiArgs) -> Result<(), DateFixerError> {
    // Setup terminal
    enable_raw_mode()
        .map_err(|e| DateFixerError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| DateFixerError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| DateFixerError::Terminal(format!("Failed to create terminal: {e}")))?;

    // Create app state and run main loop
    let mut app = App::new(options.shifter(), options.start_dir.clone());
    if let Some(ref path) = args.path {
        app.open_path(path);
    }
    let result = run_app(&mut terminal, &mut app);
    app.quit();

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

/// Run the main application loop.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), DateFixerError> {
    while !app.should_quit {
        let screen = app.screen();
        terminal
            .draw(|frame| ui::render(frame, &screen))
            .map_err(|e| DateFixerError::Terminal(format!("Failed to draw: {e}")))?;

        match event::handle_events(app)? {
            Some(Action::Quit) => app.quit(),
            Some(Action::Open) => {
                let mut dialogs =
                    TuiInteraction::new(terminal, TerminalKeys, screen, app.start_dir.clone());
                app.open(&mut dialogs);
            }
            Some(Action::Update) => {
                let mut dialogs =
                    TuiInteraction::new(terminal, TerminalKeys, screen, app.start_dir.clone());
                app.update(&mut dialogs);
            }
            None => {}
        }
    }

    Ok(())
}
