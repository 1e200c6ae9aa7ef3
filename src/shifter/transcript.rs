//! Append-only operation log shown in the log panel.
//!
//! Entries live for the duration of the process only. Each entry is also
//! forwarded to `tracing` at info level, so `RUST_LOG=info` captures it
//! without doubling the transcript on stderr by default.

use serde::Serialize;

/// Severity of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Normal progress.
    Info,
    /// Something the user should notice.
    Warn,
    /// A failed operation.
    Error,
}

/// One line of the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    /// Severity.
    pub level: LogLevel,
    /// Human-readable text.
    pub message: String,
}

/// The session's log panel contents.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<LogEntry>,
}

impl Transcript {
    /// Create an empty transcript.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an informational entry.
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Info, message.into());
    }

    /// Append a warning.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Warn, message.into());
    }

    /// Append an error.
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Error, message.into());
    }

    fn push(&mut self, level: LogLevel, message: String) {
        tracing::info!(?level, "{message}");
        self.entries.push(LogEntry { level, message });
    }

    /// All entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Entries appended after the first `cursor` entries.
    ///
    /// Front-ends that stream the log keep the length they last printed and
    /// ask for everything after it.
    #[must_use]
    pub fn since(&self, cursor: usize) -> &[LogEntry] {
        self.entries.get(cursor..).unwrap_or(&[])
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been logged yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any entry contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|e| e.message.contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_only_order() {
        let mut log = Transcript::new();
        log.info("first");
        log.warn("second");
        log.error("third");

        let levels: Vec<_> = log.entries().iter().map(|e| e.level).collect();
        assert_eq!(levels, vec![LogLevel::Info, LogLevel::Warn, LogLevel::Error]);
        assert_eq!(log.entries().last().unwrap().message, "third");
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_since_cursor() {
        let mut log = Transcript::new();
        log.info("a");
        log.info("b");
        let cursor = log.len();
        log.info("c");

        assert_eq!(log.since(cursor).len(), 1);
        assert_eq!(log.since(cursor)[0].message, "c");
        assert!(log.since(10).is_empty());
        assert_eq!(log.since(0).len(), 3);
    }

    #[test]
    fn test_contains() {
        let mut log = Transcript::new();
        assert!(log.is_empty());
        log.info("Nothing needs doing in this database.");
        assert!(log.contains("Nothing needs doing"));
        assert!(!log.contains("Shifted"));
    }
}
