//! Application state for the TUI.

use std::path::{Path, PathBuf};

use crate::core::Interaction;
use crate::shifter::{DateShifter, OpenOutcome, UpdateOutcome};
use crate::tui::ui::Screen;

/// Application state.
pub struct App {
    /// The shifting workflow and its log.
    pub shifter: DateShifter,
    /// Where the open dialog starts.
    pub start_dir: PathBuf,
    /// Status message to display.
    pub status: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl App {
    /// Create a new app instance and greet the user.
    #[must_use]
    pub fn new(mut shifter: DateShifter, start_dir: PathBuf) -> Self {
        shifter.welcome();
        Self {
            shifter,
            start_dir,
            status: Some("Press ? for help".to_string()),
            should_quit: false,
        }
    }

    /// Whether the update button is enabled.
    #[must_use]
    pub const fn can_update(&self) -> bool {
        self.shifter.can_update()
    }

    /// Everything the main screen shows.
    #[must_use]
    pub fn screen(&self) -> Screen {
        Screen {
            log: self.shifter.log().entries().to_vec(),
            file: self.shifter.summary().map(|s| s.path.clone()),
            target: format!("{}, {}", self.shifter.schema(), self.shifter.scope()),
            state: self.shifter.state(),
            can_update: self.can_update(),
            status: self.status.clone(),
        }
    }

    /// Ask for a database and open it.
    pub fn open(&mut self, ui: &mut dyn Interaction) {
        let outcome = self.shifter.open_with(ui);
        self.report_open(outcome);
    }

    /// Open `path` directly.
    pub fn open_path(&mut self, path: &Path) {
        let outcome = self.shifter.open_store(path);
        self.report_open(outcome);
    }

    fn report_open(&mut self, outcome: Result<OpenOutcome, crate::error::DateFixerError>) {
        self.status = Some(match outcome {
            Ok(OpenOutcome::Cancelled) => "No file chosen".to_string(),
            Ok(OpenOutcome::NothingToDo(_)) => "Nothing needs doing".to_string(),
            Ok(OpenOutcome::ShiftAvailable(summary)) => format!(
                "{} messages are in the future, press u to update",
                summary.count_messages
            ),
            Err(e) => {
                tracing::debug!(error = %e, "open failed");
                "Could not open the file".to_string()
            }
        });
    }

    /// Ask for a day count and shift the open database.
    pub fn update(&mut self, ui: &mut dyn Interaction) {
        self.status = Some(match self.shifter.update(ui) {
            Ok(UpdateOutcome::Applied(report)) => {
                format!("Shifted {} messages {} days", report.count_messages, report.days)
            }
            Ok(UpdateOutcome::Aborted) => "Not proceeding".to_string(),
            Err(e) => {
                tracing::debug!(error = %e, "update failed");
                "Update failed".to_string()
            }
        });
    }

    /// Close the database and stop the main loop.
    pub fn quit(&mut self) {
        self.shifter.exit();
        self.should_quit = true;
    }
}
