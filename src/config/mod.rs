//! Configuration management for datefixer.
//!
//! This module handles loading and saving configuration from `~/.datefixer/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{ColorSetting, Config, GeneralConfig, ShiftConfig, StoreConfig};
