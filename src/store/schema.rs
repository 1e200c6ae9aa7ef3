//! Table and column names of the message store.
//!
//! Names come from configuration and CLI flags and end up inside SQL text,
//! so they are restricted to plain identifiers and always quoted.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::DateFixerError;

static IDENTIFIER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$")
        .unwrap_or_else(|e| panic!("Invalid identifier regex: {e}"))
});

/// Default message table (Skype `main.db` layout).
pub const DEFAULT_TABLE: &str = "Messages";

/// Default timestamp column (Skype `main.db` layout).
pub const DEFAULT_TIMESTAMP_COLUMN: &str = "timestamp";

/// Location of the timestamp column inside the message store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSchema {
    table: String,
    timestamp_column: String,
}

impl MessageSchema {
    /// Create a schema description, validating both identifiers.
    ///
    /// # Errors
    ///
    /// Returns `DateFixerError::Schema` if either name is not a plain identifier.
    pub fn new(
        table: impl Into<String>,
        timestamp_column: impl Into<String>,
    ) -> Result<Self, DateFixerError> {
        let table = table.into();
        let timestamp_column = timestamp_column.into();
        validate_identifier("table", &table)?;
        validate_identifier("column", &timestamp_column)?;
        Ok(Self {
            table,
            timestamp_column,
        })
    }

    /// The table name.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// The timestamp column name.
    #[must_use]
    pub fn timestamp_column(&self) -> &str {
        &self.timestamp_column
    }

    /// `SELECT MAX(ts) FROM t`
    #[must_use]
    pub fn max_timestamp_sql(&self) -> String {
        format!(
            "SELECT MAX({col}) FROM {table}",
            col = quote(&self.timestamp_column),
            table = quote(&self.table)
        )
    }

    /// True when the table has the timestamp column.
    ///
    /// Quoted names that match no column are read by `SQLite` as string
    /// literals, so preparing a query is not enough to detect them.
    #[must_use]
    pub fn column_exists_sql(&self) -> String {
        format!(
            "SELECT COUNT(*) > 0 FROM pragma_table_info('{table}') WHERE name = '{col}' COLLATE NOCASE",
            table = self.table,
            col = self.timestamp_column
        )
    }

    /// `SELECT COUNT(*) FROM t WHERE ts > ?1`
    #[must_use]
    pub fn count_newer_sql(&self) -> String {
        format!(
            "SELECT COUNT(*) FROM {table} WHERE {col} > ?1",
            col = quote(&self.timestamp_column),
            table = quote(&self.table)
        )
    }

    /// `UPDATE t SET ts = ts - (?1 * 86400)` for every row.
    #[must_use]
    pub fn shift_all_sql(&self) -> String {
        format!(
            "UPDATE {table} SET {col} = {col} - (?1 * 86400)",
            col = quote(&self.timestamp_column),
            table = quote(&self.table)
        )
    }

    /// `UPDATE t SET ts = ts - (?1 * 86400) WHERE ts > ?2`
    #[must_use]
    pub fn shift_newer_sql(&self) -> String {
        format!(
            "UPDATE {table} SET {col} = {col} - (?1 * 86400) WHERE {col} > ?2",
            col = quote(&self.timestamp_column),
            table = quote(&self.table)
        )
    }
}

impl Default for MessageSchema {
    fn default() -> Self {
        Self {
            table: DEFAULT_TABLE.to_string(),
            timestamp_column: DEFAULT_TIMESTAMP_COLUMN.to_string(),
        }
    }
}

impl std::fmt::Display for MessageSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.table, self.timestamp_column)
    }
}

fn validate_identifier(kind: &str, name: &str) -> Result<(), DateFixerError> {
    if IDENTIFIER_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(DateFixerError::Schema(format!(
            "{kind} name '{name}' must start with a letter or underscore and contain only letters, digits and underscores"
        )))
    }
}

fn quote(identifier: &str) -> String {
    format!("\"{identifier}\"")
}
