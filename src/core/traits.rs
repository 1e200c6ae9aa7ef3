//! Seams between the date shifter and the outside world.
//!
//! The shifter never reads the system clock or the terminal directly. It asks
//! a [`Clock`] for the time and an [`Interaction`] for every user decision, so
//! the same logic drives the terminal session, the TUI, scripted commands and
//! headless tests.

use std::path::{Path, PathBuf};

/// Source of the current time in epoch seconds.
pub trait Clock {
    /// Current wall-clock time as UNIX epoch seconds.
    fn now(&self) -> i64;
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// A clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.0
    }
}

/// Extension filter offered by the file chooser.
///
/// The filter is a hint for the user only; any file may still be chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    /// Human-readable label, e.g. "SQLite databases".
    pub label: String,
    /// Extensions without the leading dot.
    pub extensions: Vec<String>,
}

impl FileFilter {
    /// Create a filter from a label and a list of extensions.
    #[must_use]
    pub fn new(label: impl Into<String>, extensions: &[&str]) -> Self {
        Self {
            label: label.into(),
            extensions: extensions.iter().map(|e| (*e).to_string()).collect(),
        }
    }

    /// Check whether a path carries one of the filter's extensions.
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    /// Glob-style pattern list, e.g. `*.db`.
    #[must_use]
    pub fn patterns(&self) -> String {
        self.extensions
            .iter()
            .map(|e| format!("*.{e}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for FileFilter {
    fn default() -> Self {
        Self::new("SQLite databases", &["db", "sqlite", "sqlite3"])
    }
}

impl std::fmt::Display for FileFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.label, self.patterns())
    }
}

/// Synchronous questions the shifter asks the user.
///
/// Every method blocks until the user answers. `None` and `false` mean the
/// user cancelled.
#[cfg_attr(test, mockall::automock)]
pub trait Interaction {
    /// Ask the user to pick a database file.
    fn choose_file(&mut self, filter: &FileFilter) -> Option<PathBuf>;

    /// Ask the user for an integer, offering `default` as a suggestion.
    fn ask_integer(&mut self, title: &str, prompt: &str, default: Option<i64>) -> Option<i64>;

    /// Ask the user a yes/no question.
    fn confirm(&mut self, title: &str, message: &str) -> bool;
}
