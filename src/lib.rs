//! datefixer - shift future-dated chat messages back into the past
//!
//! Opens a chat history SQLite database, reports how far in the future its
//! latest message is, and moves timestamps back by a chosen number of days
//! in a single transaction.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod interactive;
pub mod output;
pub mod shifter;
pub mod store;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::DateFixerError;
pub use shifter::DateShifter;
pub use store::{MessageSchema, MessageStore, ShiftScope};
