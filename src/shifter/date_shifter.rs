//! The date shifter itself.

use std::path::Path;

use crate::core::{
    days_to_seconds, format_optional_timestamp, format_timestamp, Clock, FileFilter, Interaction,
    SystemClock,
};
use crate::error::DateFixerError;
use crate::store::{MessageSchema, MessageStore, ShiftScope};

use super::session::{
    OpenOutcome, Session, SessionState, ShiftReport, ShiftRequest, StoreSummary, UpdateOutcome,
};
use super::transcript::Transcript;

/// Label of the update action, referenced in log hints.
pub const UPDATE_ACTION: &str = "Update database";

/// Shifts future-dated messages of one database at a time.
///
/// At most one database is open. Opening another file closes the current
/// one first. Every operation records its outcome in the transcript, and
/// failures leave the shifter usable.
#[derive(Debug)]
pub struct DateShifter<C = SystemClock> {
    schema: MessageSchema,
    scope: ShiftScope,
    clock: C,
    session: Option<Session>,
    summary: Option<StoreSummary>,
    state: SessionState,
    log: Transcript,
}

impl DateShifter<SystemClock> {
    /// Create a shifter using the system clock.
    #[must_use]
    pub const fn new(schema: MessageSchema, scope: ShiftScope) -> Self {
        Self::with_clock(schema, scope, SystemClock)
    }
}

impl<C: Clock> DateShifter<C> {
    /// Create a shifter with an explicit clock.
    #[must_use]
    pub const fn with_clock(schema: MessageSchema, scope: ShiftScope, clock: C) -> Self {
        Self {
            schema,
            scope,
            clock,
            session: None,
            summary: None,
            state: SessionState::NoFileOpen,
            log: Transcript::new(),
        }
    }

    /// Log the introductory instructions shown when a front-end starts.
    pub fn welcome(&mut self) {
        self.log.info(
            "Will let you re-date chat messages that have future timestamps. \
             Shut down the chat client and choose its chat history file \
             (for Skype this is main.db inside the Skype profile folder).",
        );
        if self.scope == ShiftScope::Future {
            self.log
                .info("Only messages newer than the current time will be shifted.");
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Whether the update action is enabled.
    #[must_use]
    pub const fn can_update(&self) -> bool {
        self.state.can_update()
    }

    /// Summary of the most recently opened database, kept after it closes.
    #[must_use]
    pub const fn summary(&self) -> Option<&StoreSummary> {
        self.summary.as_ref()
    }

    /// The log panel contents.
    #[must_use]
    pub const fn log(&self) -> &Transcript {
        &self.log
    }

    /// Which rows an update will touch.
    #[must_use]
    pub const fn scope(&self) -> ShiftScope {
        self.scope
    }

    /// The table and column being inspected.
    #[must_use]
    pub const fn schema(&self) -> &MessageSchema {
        &self.schema
    }

    /// Ask the user for a file and open it.
    ///
    /// # Errors
    ///
    /// Returns `DateFixerError::Open` if the chosen file cannot be inspected.
    pub fn open_with(&mut self, ui: &mut dyn Interaction) -> Result<OpenOutcome, DateFixerError> {
        match ui.choose_file(&FileFilter::default()) {
            Some(path) => self.open_store(&path),
            None => {
                tracing::debug!("file selection cancelled");
                Ok(OpenOutcome::Cancelled)
            }
        }
    }

    /// Open `path`, replacing any open database, and inspect its timestamps.
    ///
    /// On failure the cause is logged, the session is reset, and the error is
    /// returned; the shifter can be used again right away.
    ///
    /// # Errors
    ///
    /// Returns `DateFixerError::Open` if the file is not a valid message store,
    /// is locked, or cannot be queried.
    pub fn open_store(&mut self, path: &Path) -> Result<OpenOutcome, DateFixerError> {
        self.close_session();
        self.summary = None;
        self.state = SessionState::NoFileOpen;

        let now = self.clock.now();
        self.log.info(format!("Opening file '{}'.", path.display()));

        let session = match self.inspect(path, now) {
            Ok(session) => session,
            Err(e) => {
                let cause = match &e {
                    DateFixerError::Open { cause, .. } => cause.clone(),
                    other => other.to_string(),
                };
                self.log.error(format!(
                    "Either the chat client is still running or '{}' is not a valid chat history file (error '{cause}').",
                    path.display()
                ));
                return Err(e);
            }
        };

        let summary = session.summary.clone();
        self.log_summary(&summary);
        self.summary = Some(summary.clone());

        if summary.needs_fix {
            self.log.info(format!(
                "Choose '{UPDATE_ACTION}' to specify the number of days to shift."
            ));
            self.session = Some(session);
            self.state = SessionState::ShiftAvailable;
            Ok(OpenOutcome::ShiftAvailable(summary))
        } else {
            self.log.info("Nothing needs doing in this database.");
            self.release(session);
            self.state = SessionState::NothingToDo;
            Ok(OpenOutcome::NothingToDo(summary))
        }
    }

    fn inspect(&self, path: &Path, now: i64) -> Result<Session, DateFixerError> {
        let as_open_failure = |e: DateFixerError| match e {
            open @ DateFixerError::Open { .. } => open,
            other => DateFixerError::open(path, other),
        };

        let store = MessageStore::open(path, self.schema.clone())?;
        let max_timestamp = store.max_timestamp().map_err(as_open_failure)?;
        let count_messages = store.count_newer_than(now).map_err(as_open_failure)?;
        tracing::debug!(?max_timestamp, now, count_messages, "inspected message store");

        let summary = StoreSummary::new(path, max_timestamp, now, count_messages);
        Ok(Session::new(store, summary))
    }

    fn log_summary(&mut self, summary: &StoreSummary) {
        match summary.day_delta {
            Some(delta) => {
                self.log.info(format!(
                    "Latest message timestamp in database is '{}', current datetime is '{}'.",
                    format_optional_timestamp(summary.max_timestamp),
                    format_timestamp(summary.now_timestamp)
                ));
                self.log.info(format!(
                    "Maximum difference is {delta} days, {} messages are newer than now.",
                    summary.count_messages
                ));
            }
            None => self.log.info(format!(
                "Table '{}' contains no messages, current datetime is '{}'.",
                self.schema.table(),
                format_timestamp(summary.now_timestamp)
            )),
        }
    }

    /// Ask how many days to shift and confirm with the user.
    ///
    /// Cancelling, entering nothing, or entering a non-positive number aborts
    /// without changing anything, as does declining the confirmation.
    ///
    /// # Errors
    ///
    /// Returns `DateFixerError::InvalidState` if no shift is available.
    pub fn request_shift(
        &mut self,
        ui: &mut dyn Interaction,
    ) -> Result<ShiftRequest, DateFixerError> {
        let (delta, count) = {
            let session = self.shift_target()?;
            (
                session.summary.day_delta.unwrap_or(0),
                session.summary.count_messages,
            )
        };

        let prompt = format!(
            "Enter the number of days to shift messages, newer than the current time, into the past \
             (delta between now and latest timestamp is {delta} days):"
        );
        let suggested = Some(delta).filter(|d| *d > 0);

        match ui.ask_integer("Days to shift", &prompt, suggested) {
            Some(days) if days > 0 => {
                let question = format!("Shift {count} messages {days} days into the past?");
                if ui.confirm("Proceed?", &question) {
                    Ok(ShiftRequest::Confirmed(days))
                } else {
                    self.log
                        .info(format!("Shift of {days} days declined, not proceeding."));
                    Ok(ShiftRequest::Aborted)
                }
            }
            entered => {
                let shown = entered.map_or_else(|| "None".to_string(), |d| d.to_string());
                self.log.info(format!("'{shown}' entered, not proceeding."));
                Ok(ShiftRequest::Aborted)
            }
        }
    }

    /// Move timestamps `days` days into the past and close the database.
    ///
    /// The update runs in one transaction. Afterwards the update action is
    /// disabled until another file is opened.
    ///
    /// # Errors
    ///
    /// Returns `DateFixerError::InvalidState` if no shift is available,
    /// `DateFixerError::InvalidShift` if `days` is not positive, and
    /// `DateFixerError::Database` if the update fails (nothing is changed).
    pub fn apply_shift(&mut self, days: i64) -> Result<ShiftReport, DateFixerError> {
        self.shift_target()?;
        if days <= 0 || days_to_seconds(days).is_none() {
            return Err(DateFixerError::InvalidShift(days));
        }
        let Some(mut session) = self.session.take() else {
            return Err(Self::no_target_error());
        };

        self.log.info("Updating..");
        let now = session.summary.now_timestamp;

        match session.store.shift(days, self.scope, now) {
            Ok(rows_updated) => {
                let report = ShiftReport {
                    path: session.path().to_path_buf(),
                    days,
                    count_messages: session.summary.count_messages,
                    rows_updated,
                    scope: self.scope,
                };
                self.release(session);
                self.state = SessionState::ShiftApplied;

                self.log.info(format!(
                    "Shifted {} messages {days} days into the past. All complete.",
                    report.count_messages
                ));
                if u64::try_from(rows_updated).ok() != Some(report.count_messages) {
                    self.log.info(format!(
                        "{rows_updated} rows were updated in total ({}).",
                        self.scope
                    ));
                }
                Ok(report)
            }
            Err(e) => {
                self.release(session);
                self.state = SessionState::NoFileOpen;
                self.log
                    .error(format!("Update failed, no messages were changed (error '{e}')."));
                Err(e)
            }
        }
    }

    /// Request a shift and apply it if the user confirms.
    ///
    /// # Errors
    ///
    /// Returns an error if no shift is available or the update fails.
    pub fn update(&mut self, ui: &mut dyn Interaction) -> Result<UpdateOutcome, DateFixerError> {
        match self.request_shift(ui)? {
            ShiftRequest::Confirmed(days) => self.apply_shift(days).map(UpdateOutcome::Applied),
            ShiftRequest::Aborted => Ok(UpdateOutcome::Aborted),
        }
    }

    /// Close any open database and end the session.
    pub fn exit(&mut self) {
        self.close_session();
        self.state = SessionState::Closed;
    }

    fn shift_target(&self) -> Result<&Session, DateFixerError> {
        match (&self.session, self.state) {
            (Some(session), SessionState::ShiftAvailable) => Ok(session),
            _ => Err(Self::no_target_error()),
        }
    }

    fn no_target_error() -> DateFixerError {
        DateFixerError::InvalidState(
            "no database with future messages is open; open a file first".to_string(),
        )
    }

    fn close_session(&mut self) {
        if let Some(session) = self.session.take() {
            self.release(session);
        }
    }

    fn release(&mut self, session: Session) {
        let path = session.path().to_path_buf();
        if let Err(e) = session.store.close() {
            self.log
                .warn(format!("Could not cleanly close '{}': {e}", path.display()));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::core::{FixedClock, MockInteraction, SECONDS_PER_DAY};
    use crate::store::test_support::{read_timestamps, temp_messages_db};

    const T: i64 = 1_700_000_000;
    const DAY: i64 = SECONDS_PER_DAY;

    fn shifter(scope: ShiftScope) -> DateShifter<FixedClock> {
        DateShifter::with_clock(MessageSchema::default(), scope, FixedClock(T))
    }

    fn answering(days: Option<i64>, confirm: bool) -> MockInteraction {
        let mut ui = MockInteraction::new();
        ui.expect_ask_integer().returning(move |_, _, _| days);
        ui.expect_confirm().returning(move |_, _| confirm);
        ui
    }

    #[test]
    fn test_scenario_forty_days() {
        let (_dir, path) = temp_messages_db(&[T + 10 * DAY, T + 2 * DAY, T + 40 * DAY]);
        let mut shifter = shifter(ShiftScope::All);

        let outcome = shifter.open_store(&path).unwrap();
        let OpenOutcome::ShiftAvailable(summary) = outcome else {
            panic!("expected a shift to be available");
        };
        assert_eq!(summary.max_timestamp, Some(T + 40 * DAY));
        assert_eq!(summary.now_timestamp, T);
        assert_eq!(summary.count_messages, 3);
        assert_eq!(summary.day_delta, Some(40));
        assert!(shifter.can_update());

        let mut ui = MockInteraction::new();
        ui.expect_ask_integer()
            .withf(|title, prompt, default| {
                title == "Days to shift" && prompt.contains("is 40 days") && *default == Some(40)
            })
            .times(1)
            .returning(|_, _, _| Some(40));
        ui.expect_confirm()
            .withf(|_, message| message == "Shift 3 messages 40 days into the past?")
            .times(1)
            .returning(|_, _| true);

        let outcome = shifter.update(&mut ui).unwrap();
        let UpdateOutcome::Applied(report) = outcome else {
            panic!("expected the shift to be applied");
        };
        assert_eq!(report.days, 40);
        assert_eq!(report.count_messages, 3);
        assert_eq!(report.rows_updated, 3);

        assert_eq!(
            read_timestamps(&path),
            vec![T - 30 * DAY, T - 38 * DAY, T]
        );
        assert!(shifter
            .log()
            .contains("Shifted 3 messages 40 days into the past."));
        assert_eq!(shifter.state(), SessionState::ShiftApplied);
        assert!(!shifter.can_update());
        assert!(!shifter.session.is_some());
    }

    #[test]
    fn test_scenario_nothing_needs_doing() {
        let (_dir, path) = temp_messages_db(&[T - 5 * DAY, T - DAY]);
        let mut shifter = shifter(ShiftScope::All);

        let outcome = shifter.open_store(&path).unwrap();
        assert!(matches!(outcome, OpenOutcome::NothingToDo(_)));
        assert!(shifter.log().contains("Nothing needs doing in this database."));
        assert_eq!(shifter.state(), SessionState::NothingToDo);
        assert!(!shifter.can_update());
        assert!(!shifter.session.is_some());

        // No mutation is possible without opening a file again.
        assert!(matches!(
            shifter.apply_shift(5),
            Err(DateFixerError::InvalidState(_))
        ));
        let mut ui = MockInteraction::new();
        assert!(shifter.request_shift(&mut ui).is_err());
        assert_eq!(read_timestamps(&path), vec![T - 5 * DAY, T - DAY]);
    }

    #[test]
    fn test_empty_table_is_nothing_to_do() {
        let (_dir, path) = temp_messages_db(&[]);
        let mut shifter = shifter(ShiftScope::All);

        let outcome = shifter.open_store(&path).unwrap();
        assert!(matches!(outcome, OpenOutcome::NothingToDo(_)));
        assert!(shifter.log().contains("contains no messages"));
    }

    #[test]
    fn test_count_is_strictly_greater_than_now() {
        let (_dir, path) = temp_messages_db(&[T - 1, T, T + 1, T + 2]);
        let mut shifter = shifter(ShiftScope::All);

        shifter.open_store(&path).unwrap();
        assert_eq!(shifter.summary().unwrap().count_messages, 2);
    }

    #[test]
    fn test_decline_confirmation_leaves_rows_unchanged() {
        let stamps = [T + 10 * DAY, T + 2 * DAY, T + 40 * DAY];
        let (_dir, path) = temp_messages_db(&stamps);
        let mut shifter = shifter(ShiftScope::All);
        shifter.open_store(&path).unwrap();

        let mut ui = answering(Some(40), false);
        let outcome = shifter.update(&mut ui).unwrap();

        assert_eq!(outcome, UpdateOutcome::Aborted);
        assert_eq!(read_timestamps(&path), stamps.to_vec());
        assert!(shifter.can_update());
        assert!(shifter.log().contains("declined, not proceeding"));
    }

    #[test]
    fn test_cancelled_day_entry_leaves_rows_unchanged() {
        let stamps = [T + 3 * DAY];
        let (_dir, path) = temp_messages_db(&stamps);
        let mut shifter = shifter(ShiftScope::All);
        shifter.open_store(&path).unwrap();

        let mut ui = MockInteraction::new();
        ui.expect_ask_integer().returning(|_, _, _| None);
        ui.expect_confirm().never();

        assert_eq!(shifter.request_shift(&mut ui).unwrap(), ShiftRequest::Aborted);
        assert!(shifter.log().contains("'None' entered, not proceeding."));
        assert_eq!(read_timestamps(&path), stamps.to_vec());
        assert_eq!(shifter.state(), SessionState::ShiftAvailable);
    }

    #[test]
    fn test_non_positive_day_entry_aborts() {
        let stamps = [T + 3 * DAY];
        let (_dir, path) = temp_messages_db(&stamps);
        let mut shifter = shifter(ShiftScope::All);
        shifter.open_store(&path).unwrap();

        for entered in [0, -7] {
            let mut ui = MockInteraction::new();
            ui.expect_ask_integer().returning(move |_, _, _| Some(entered));
            ui.expect_confirm().never();
            assert_eq!(shifter.request_shift(&mut ui).unwrap(), ShiftRequest::Aborted);
        }
        assert!(shifter.log().contains("'-7' entered, not proceeding."));
        assert_eq!(read_timestamps(&path), stamps.to_vec());
    }

    #[test]
    fn test_apply_shift_rejects_non_positive_days() {
        let (_dir, path) = temp_messages_db(&[T + DAY]);
        let mut shifter = shifter(ShiftScope::All);
        shifter.open_store(&path).unwrap();

        assert!(matches!(
            shifter.apply_shift(0),
            Err(DateFixerError::InvalidShift(0))
        ));
        // Still open and usable.
        assert!(shifter.can_update());
        shifter.apply_shift(1).unwrap();
        assert_eq!(read_timestamps(&path), vec![T]);
    }

    #[test]
    fn test_repeated_shift_compounds() {
        let (_dir, path) = temp_messages_db(&[T + 40 * DAY]);
        let mut shifter = shifter(ShiftScope::All);

        shifter.open_store(&path).unwrap();
        shifter.apply_shift(40).unwrap();
        assert_eq!(read_timestamps(&path), vec![T]);

        // Latest message now equals "now", which is not in the past.
        shifter.open_store(&path).unwrap();
        assert!(shifter.can_update());
        shifter.apply_shift(40).unwrap();
        assert_eq!(read_timestamps(&path), vec![T - 40 * DAY]);
    }

    #[test]
    fn test_shift_all_versus_shift_future_only() {
        let stamps = [T - 10 * DAY, T + 5 * DAY];

        let (_dir_all, path_all) = temp_messages_db(&stamps);
        let mut all = shifter(ShiftScope::All);
        all.open_store(&path_all).unwrap();
        let report = all.apply_shift(5).unwrap();
        assert_eq!(report.rows_updated, 2);
        assert_eq!(read_timestamps(&path_all), vec![T - 15 * DAY, T]);
        assert!(all.log().contains("2 rows were updated in total"));

        let (_dir_future, path_future) = temp_messages_db(&stamps);
        let mut future = shifter(ShiftScope::Future);
        future.open_store(&path_future).unwrap();
        let report = future.apply_shift(5).unwrap();
        assert_eq!(report.rows_updated, 1);
        assert_eq!(read_timestamps(&path_future), vec![T - 10 * DAY, T]);
    }

    #[test]
    fn test_open_failure_is_recoverable() {
        let dir = tempfile::TempDir::new().unwrap();
        let bogus = dir.path().join("not-a-db.db");
        std::fs::write(&bogus, "definitely not sqlite ".repeat(100)).unwrap();
        let mut shifter = shifter(ShiftScope::All);

        let err = shifter.open_store(&bogus).unwrap_err();
        assert!(matches!(err, DateFixerError::Open { .. }));
        assert!(shifter.log().contains("is not a valid chat history file"));
        assert_eq!(shifter.state(), SessionState::NoFileOpen);
        assert!(shifter.summary().is_none());

        let (_good_dir, good) = temp_messages_db(&[T + DAY]);
        assert!(matches!(
            shifter.open_store(&good).unwrap(),
            OpenOutcome::ShiftAvailable(_)
        ));
    }

    #[test]
    fn test_missing_column_on_empty_table_is_open_failure() {
        let (_dir, path) = temp_messages_db(&[]);
        let schema = MessageSchema::new("Messages", "sent_at").unwrap();
        let mut shifter = DateShifter::with_clock(schema, ShiftScope::All, FixedClock(T));

        let err = shifter.open_store(&path).unwrap_err();
        assert!(matches!(err, DateFixerError::Open { .. }));
        assert!(shifter.log().contains("(error 'no such column: sent_at')"));
        assert!(!shifter.log().contains("Nothing needs doing"));
        assert_eq!(shifter.state(), SessionState::NoFileOpen);
    }

    #[test]
    fn test_failed_update_rolls_back() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("main.db");
        {
            let conn = rusqlite::Connection::open(&path).unwrap();
            conn.execute_batch(&format!(
                "CREATE TABLE Messages (
                    id INTEGER PRIMARY KEY,
                    timestamp INTEGER CHECK (timestamp > 0)
                );
                INSERT INTO Messages (timestamp) VALUES ({}), ({});",
                T + 2 * DAY,
                DAY
            ))
            .unwrap();
        }
        let mut shifter = shifter(ShiftScope::All);
        shifter.open_store(&path).unwrap();

        // The second row would drop below zero and violate the CHECK.
        let err = shifter.apply_shift(2).unwrap_err();
        assert!(matches!(err, DateFixerError::Database(_)));
        assert_eq!(read_timestamps(&path), vec![T + 2 * DAY, DAY]);
        assert_eq!(shifter.state(), SessionState::NoFileOpen);
        assert!(shifter.session.is_none());
        assert!(!shifter.can_update());
        assert!(shifter.log().contains("Update failed, no messages were changed"));

        // The file is released and can be opened again.
        assert!(matches!(
            shifter.open_store(&path).unwrap(),
            OpenOutcome::ShiftAvailable(_)
        ));
    }

    #[test]
    fn test_opening_second_file_replaces_first() {
        let (_dir_a, path_a) = temp_messages_db(&[T + DAY]);
        let (_dir_b, path_b) = temp_messages_db(&[T + 2 * DAY, T + 3 * DAY]);
        let mut shifter = shifter(ShiftScope::All);

        shifter.open_store(&path_a).unwrap();
        shifter.open_store(&path_b).unwrap();

        assert_eq!(
            shifter.session.as_ref().map(Session::path),
            Some(path_b.as_path())
        );
        shifter.apply_shift(3).unwrap();
        assert_eq!(read_timestamps(&path_a), vec![T + DAY]);
        assert_eq!(read_timestamps(&path_b), vec![T - DAY, T]);
    }

    #[test]
    fn test_open_with_cancelled_chooser() {
        let mut shifter = shifter(ShiftScope::All);
        let mut ui = MockInteraction::new();
        ui.expect_choose_file().times(1).returning(|_| None);

        assert_eq!(shifter.open_with(&mut ui).unwrap(), OpenOutcome::Cancelled);
        assert_eq!(shifter.state(), SessionState::NoFileOpen);
        assert!(shifter.log().is_empty());
    }

    #[test]
    fn test_open_with_chosen_file() {
        let (_dir, path) = temp_messages_db(&[T + DAY]);
        let chosen: PathBuf = path.clone();
        let mut shifter = shifter(ShiftScope::All);
        let mut ui = MockInteraction::new();
        ui.expect_choose_file()
            .withf(|filter| filter.extensions.iter().any(|e| e == "db"))
            .returning(move |_| Some(chosen.clone()));

        assert!(matches!(
            shifter.open_with(&mut ui).unwrap(),
            OpenOutcome::ShiftAvailable(_)
        ));
    }

    #[test]
    fn test_exit_closes_session() {
        let (_dir, path) = temp_messages_db(&[T + DAY]);
        let mut shifter = shifter(ShiftScope::All);
        shifter.open_store(&path).unwrap();
        assert!(shifter.session.is_some());

        shifter.exit();
        assert!(!shifter.session.is_some());
        assert_eq!(shifter.state(), SessionState::Closed);
        assert!(shifter.apply_shift(1).is_err());
        assert_eq!(read_timestamps(&path), vec![T + DAY]);
    }

    #[test]
    fn test_welcome_mentions_scope() {
        let mut future = shifter(ShiftScope::Future);
        future.welcome();
        assert!(future.log().contains("Only messages newer than the current time"));

        let mut all = shifter(ShiftScope::All);
        all.welcome();
        assert_eq!(all.log().len(), 1);
    }
}
