//! Date shifting workflow.
//!
//! [`DateShifter`] walks one database at a time through
//! open → inspect → prompt → confirm → update → close, keeping a
//! [`Transcript`] of every outcome for the front-end's log panel.

mod date_shifter;
mod session;
mod transcript;

pub use date_shifter::{DateShifter, UPDATE_ACTION};
pub use session::{
    OpenOutcome, Session, SessionState, ShiftReport, ShiftRequest, StoreSummary, UpdateOutcome,
};
pub use transcript::{LogEntry, LogLevel, Transcript};
