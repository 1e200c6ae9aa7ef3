//! Core abstractions for datefixer.
//!
//! This module provides the epoch arithmetic and the traits that decouple the
//! date shifter from the clock and from whoever answers its questions.

mod datetime;
mod traits;

pub use datetime::{
    day_delta, days_to_seconds, format_optional_timestamp, format_timestamp, DISPLAY_FORMAT,
    SECONDS_PER_DAY,
};
pub use traits::{Clock, FileFilter, FixedClock, Interaction, SystemClock};

#[cfg(test)]
pub use traits::MockInteraction;
