//! Session state and the values it reports.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::day_delta;
use crate::store::{MessageStore, ShiftScope};

/// Where the shifter is in its open → update → close cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No database has been opened yet, or the last open failed.
    #[default]
    NoFileOpen,
    /// The database was inspected and has no future messages; it is closed.
    NothingToDo,
    /// The database is open and a shift may be requested.
    ShiftAvailable,
    /// A shift was committed and the database closed.
    ShiftApplied,
    /// The session was ended by the user.
    Closed,
}

impl SessionState {
    /// Whether the update action is enabled.
    #[must_use]
    pub const fn can_update(self) -> bool {
        matches!(self, Self::ShiftAvailable)
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoFileOpen => write!(f, "no file open"),
            Self::NothingToDo => write!(f, "nothing to do"),
            Self::ShiftAvailable => write!(f, "shift available"),
            Self::ShiftApplied => write!(f, "shift applied"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// Values computed when a database is opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreSummary {
    /// The inspected file.
    pub path: PathBuf,
    /// Latest message timestamp, `None` for an empty table.
    pub max_timestamp: Option<i64>,
    /// Wall-clock time when the file was opened.
    pub now_timestamp: i64,
    /// Whole days from now to the latest message.
    pub day_delta: Option<i64>,
    /// Messages with a timestamp strictly after `now_timestamp`.
    pub count_messages: u64,
    /// Whether the latest message is not in the past.
    pub needs_fix: bool,
}

impl StoreSummary {
    /// Build a summary, deriving the day delta and whether a fix is needed.
    #[must_use]
    pub fn new(
        path: impl Into<PathBuf>,
        max_timestamp: Option<i64>,
        now_timestamp: i64,
        count_messages: u64,
    ) -> Self {
        Self {
            path: path.into(),
            max_timestamp,
            now_timestamp,
            day_delta: max_timestamp.map(|max| day_delta(max, now_timestamp)),
            count_messages,
            needs_fix: max_timestamp.is_some_and(|max| max >= now_timestamp),
        }
    }
}

/// An open database together with what was learned about it.
#[derive(Debug)]
pub struct Session {
    pub(crate) store: MessageStore,
    pub(crate) summary: StoreSummary,
}

impl Session {
    pub(crate) const fn new(store: MessageStore, summary: StoreSummary) -> Self {
        Self { store, summary }
    }

    /// The open file.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.store.path()
    }

    /// The values computed on open.
    #[must_use]
    pub const fn summary(&self) -> &StoreSummary {
        &self.summary
    }
}

/// Result of opening a database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    /// The user dismissed the file chooser.
    Cancelled,
    /// The latest message is already in the past; the file was closed.
    NothingToDo(StoreSummary),
    /// Future messages exist; the file stays open for an update.
    ShiftAvailable(StoreSummary),
}

/// Result of asking the user how far to shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftRequest {
    /// The user entered a positive number of days and confirmed.
    Confirmed(i64),
    /// The user cancelled, entered nothing, or declined.
    Aborted,
}

/// A committed shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShiftReport {
    /// The updated file.
    pub path: PathBuf,
    /// Days the timestamps were moved into the past.
    pub days: i64,
    /// Future messages counted when the file was opened.
    pub count_messages: u64,
    /// Rows actually changed by the update.
    pub rows_updated: usize,
    /// Which rows the update applied to.
    pub scope: ShiftScope,
}

/// Result of a full update round (request then apply).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The shift was committed.
    Applied(ShiftReport),
    /// Nothing was changed.
    Aborted,
}
