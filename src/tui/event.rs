//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::DateFixerError;
use crate::tui::app::App;

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Choose and open a database.
    Open,
    /// Shift the open database.
    Update,
}

/// Somewhere key presses come from.
pub trait KeySource {
    /// Wait for the next key press.
    ///
    /// # Errors
    ///
    /// Returns `DateFixerError::Terminal` if the terminal cannot be read.
    fn next_key(&mut self) -> Result<KeyEvent, DateFixerError>;
}

/// Key presses from the real terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn next_key(&mut self) -> Result<KeyEvent, DateFixerError> {
        loop {
            if let Some(key) = poll_key()? {
                return Ok(key);
            }
        }
    }
}

/// Wait briefly for a key press.
fn poll_key() -> Result<Option<KeyEvent>, DateFixerError> {
    if event::poll(Duration::from_millis(100))
        .map_err(|e| DateFixerError::Terminal(format!("Event poll failed: {e}")))?
    {
        if let Event::Key(key) =
            event::read().map_err(|e| DateFixerError::Terminal(format!("Event read failed: {e}")))?
        {
            if key.kind == KeyEventKind::Press {
                return Ok(Some(key));
            }
        }
    }
    Ok(None)
}


/// Handle terminal events.
///
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events(app: &mut App) -> Result<Option<Action>, DateFixerError> {
    Ok(poll_key()?.and_then(|key| map_key(app, key)))
}

/// Translate a key press on the main screen.
pub fn map_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('o') => Some(Action::Open),
        KeyCode::Char('u') if app.can_update() => Some(Action::Update),
        KeyCode::Char('u') => {
            app.status = Some("Update is available once a database with future messages is open".to_string());
            None
        }
        KeyCode::Char('?') => {
            app.status = Some("o:open | u:update | q:exit".to_string());
            None
        }
        _ => None,
    }
}
