//! Modal dialogs as an [`Interaction`].

use std::path::{PathBuf, MAIN_SEPARATOR};

use ratatui::{backend::Backend, Terminal};

use crate::core::{FileFilter, Interaction};
use crate::error::DateFixerError;
use crate::tui::dialog::{render_dialog, Dialog, DialogResult};
use crate::tui::event::KeySource;
use crate::tui::ui::{self, Screen};

/// Asks questions in popups drawn over a frozen copy of the main screen.
pub struct TuiInteraction<'t, B: Backend, K: KeySource> {
    terminal: &'t mut Terminal<B>,
    keys: K,
    screen: Screen,
    start_dir: PathBuf,
}

impl<'t, B: Backend, K: KeySource> TuiInteraction<'t, B, K> {
    /// Create dialogs drawn on `terminal` over `screen`.
    pub fn new(terminal: &'t mut Terminal<B>, keys: K, screen: Screen, start_dir: PathBuf) -> Self {
        Self {
            terminal,
            keys,
            screen,
            start_dir,
        }
    }

    /// Show `dialog` until it is answered. Terminal failures count as cancel.
    fn ask(&mut self, dialog: &mut Dialog) -> DialogResult {
        match self.run(dialog) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(error = %e, "dialog aborted");
                DialogResult::Cancelled
            }
        }
    }

    fn run(&mut self, dialog: &mut Dialog) -> Result<DialogResult, DateFixerError> {
        loop {
            let screen = &self.screen;
            self.terminal
                .draw(|frame| {
                    ui::render(frame, screen);
                    render_dialog(frame, dialog);
                })
                .map_err(|e| DateFixerError::Terminal(format!("Failed to draw: {e}")))?;

            match dialog.handle_key(self.keys.next_key()?) {
                DialogResult::Pending => {}
                done => return Ok(done),
            }
        }
    }
}

impl<B: Backend, K: KeySource> Interaction for TuiInteraction<'_, B, K> {
    fn choose_file(&mut self, filter: &FileFilter) -> Option<PathBuf> {
        let initial = format!("{}{MAIN_SEPARATOR}", self.start_dir.display());
        let mut dialog = Dialog::text(
            "Open chat database",
            format!("Path to the chat history file, {filter}:"),
            initial,
        );

        loop {
            match self.ask(&mut dialog) {
                DialogResult::Submitted(value) if value.is_empty() => return None,
                DialogResult::Submitted(value) => {
                    let path = PathBuf::from(value);
                    if path.is_dir() {
                        dialog.error = Some(format!("'{}' is a directory", path.display()));
                        continue;
                    }
                    return Some(path);
                }
                _ => return None,
            }
        }
    }

    fn ask_integer(&mut self, title: &str, prompt: &str, default: Option<i64>) -> Option<i64> {
        let mut dialog = Dialog::integer(title, prompt, default);

        loop {
            match self.ask(&mut dialog) {
                DialogResult::Submitted(value) if value.is_empty() => return None,
                DialogResult::Submitted(value) => match value.parse::<i64>() {
                    Ok(number) => return Some(number),
                    Err(_) => dialog.error = Some("Please enter a whole number".to_string()),
                },
                _ => return None,
            }
        }
    }

    fn confirm(&mut self, title: &str, message: &str) -> bool {
        let mut dialog = Dialog::confirm(title, message);
        matches!(self.ask(&mut dialog), DialogResult::Answered(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::event::scripted::ScriptedKeys;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;

    fn terminal() -> Terminal<TestBackend> {
        Terminal::new(TestBackend::new(80, 24)).unwrap()
    }

    fn ui<'t>(
        terminal: &'t mut Terminal<TestBackend>,
        keys: ScriptedKeys,
    ) -> TuiInteraction<'t, TestBackend, ScriptedKeys> {
        TuiInteraction::new(terminal, keys, Screen::default(), PathBuf::from("/data"))
    }

    #[test]
    fn test_ask_integer_accepts_default() {
        let mut terminal = terminal();
        let mut ui = ui(&mut terminal, ScriptedKeys::typed("\n"));
        assert_eq!(ui.ask_integer("Days to shift", "How many?", Some(40)), Some(40));
    }

    #[test]
    fn test_ask_integer_typed_value() {
        let mut terminal = terminal();
        let keys = ScriptedKeys::new(
            [
                KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL),
                KeyEvent::new(KeyCode::Char('1'), KeyModifiers::NONE),
                KeyEvent::new(KeyCode::Char('2'), KeyModifiers::NONE),
                KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            ],
        );
        let mut ui = ui(&mut terminal, keys);
        assert_eq!(ui.ask_integer("Days to shift", "How many?", Some(40)), Some(12));
    }

    #[test]
    fn test_ask_integer_empty_cancels() {
        let mut terminal = terminal();
        let mut ui = ui(&mut terminal, ScriptedKeys::typed("\n"));
        assert_eq!(ui.ask_integer("Days to shift", "How many?", None), None);
    }

    #[test]
    fn test_ask_integer_lone_minus_reprompts() {
        let mut terminal = terminal();
        let mut ui = ui(&mut terminal, ScriptedKeys::typed("-\n"));
        // Runs out of keys on the second prompt, which cancels.
        assert_eq!(ui.ask_integer("Days to shift", "How many?", None), None);
    }

    #[test]
    fn test_choose_file_prefills_start_dir() {
        let mut terminal = terminal();
        let mut ui = ui(&mut terminal, ScriptedKeys::typed("main.db\n"));
        let chosen = ui.choose_file(&FileFilter::default());
        assert_eq!(
            chosen,
            Some(PathBuf::from(format!("/data{MAIN_SEPARATOR}main.db")))
        );
    }

    #[test]
    fn test_choose_file_escape() {
        let mut terminal = terminal();
        let keys = ScriptedKeys::new([KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)]);
        let mut ui = ui(&mut terminal, keys);
        assert_eq!(ui.choose_file(&FileFilter::default()), None);
    }

    #[test]
    fn test_confirm_yes() {
        let mut terminal = terminal();
        let mut ui = ui(&mut terminal, ScriptedKeys::typed("y"));
        assert!(ui.confirm("Proceed?", "Shift 3 messages 40 days into the past?"));
    }

    #[test]
    fn test_confirm_no() {
        let mut terminal = terminal();
        let mut ui = ui(&mut terminal, ScriptedKeys::typed("n"));
        assert!(!ui.confirm("Proceed?", "Shift?"));
    }

    #[test]
    fn test_dialog_is_drawn() {
        let mut terminal = terminal();
        {
            let mut ui = ui(&mut terminal, ScriptedKeys::typed("n"));
            ui.confirm("Proceed?", "Shift 3 messages?");
        }
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Proceed?"));
        assert!(text.contains("Shift 3 messages?"));
    }
}
