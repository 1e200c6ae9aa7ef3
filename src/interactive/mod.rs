//! Terminal implementations of the [`Interaction`](crate::core::Interaction) trait.
//!
//! - [`TerminalInteraction`]: line-based prompts on stdin/stdout with a
//!   fuzzy file picker.
//! - [`PresetInteraction`]: answers taken from command-line flags, falling
//!   back to another interaction for anything not preset.

mod picker;
mod preset;
mod terminal;

pub use picker::{collect_candidates, pick_file, FilePick};
pub use preset::PresetInteraction;
pub use terminal::{read_key, KeyInput, TerminalInteraction};
