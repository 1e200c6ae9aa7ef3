//! `SQLite` connection to a chat history database.
//!
//! The file is opened read-write but never created: pointing the tool at a
//! path that does not exist must not leave an empty database behind.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OpenFlags};
use serde::{Deserialize, Serialize};

use crate::core::days_to_seconds;
use crate::error::DateFixerError;

use super::MessageSchema;

/// Which rows a shift applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftScope {
    /// Every row in the table, including rows already in the past.
    #[default]
    All,
    /// Only rows newer than the time the store was inspected.
    #[serde(alias = "future-only")]
    Future,
}

impl std::fmt::Display for ShiftScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all messages"),
            Self::Future => write!(f, "future messages only"),
        }
    }
}

/// An open message store.
pub struct MessageStore {
    conn: Connection,
    path: PathBuf,
    schema: MessageSchema,
}

impl std::fmt::Debug for MessageStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageStore")
            .field("path", &self.path)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

impl MessageStore {
    /// Open the store at `path` and check that the schema is present.
    ///
    /// # Errors
    ///
    /// Returns `DateFixerError::Open` if the file does not exist, is not a
    /// database, is locked, or lacks the configured table or column.
    pub fn open(path: &Path, schema: MessageSchema) -> Result<Self, DateFixerError> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| DateFixerError::open(path, e))?;

        // Preparing the query reads the schema, which fails for non-databases
        // and for missing tables or columns.
        conn.prepare(&schema.max_timestamp_sql())
            .map_err(|e| DateFixerError::open(path, e))?;

        let has_column: bool = conn
            .query_row(&schema.column_exists_sql(), [], |row| row.get(0))
            .map_err(|e| DateFixerError::open(path, e))?;
        if !has_column {
            return Err(DateFixerError::open(
                path,
                format!("no such column: {}", schema.timestamp_column()),
            ));
        }

        Ok(Self {
            conn,
            path: path.to_path_buf(),
            schema,
        })
    }

    /// The file this store was opened from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Latest timestamp in the table, or `None` if the table is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the column is not an integer.
    pub fn max_timestamp(&self) -> Result<Option<i64>, DateFixerError> {
        self.conn
            .query_row(&self.schema.max_timestamp_sql(), [], |row| row.get(0))
            .map_err(|e| DateFixerError::Database(format!("Failed to read latest timestamp: {e}")))
    }

    /// Number of rows with a timestamp strictly greater than `timestamp`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_newer_than(&self, timestamp: i64) -> Result<u64, DateFixerError> {
        let count: i64 = self
            .conn
            .query_row(&self.schema.count_newer_sql(), params![timestamp], |row| {
                row.get(0)
            })
            .map_err(|e| DateFixerError::Database(format!("Failed to count messages: {e}")))?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    /// Move timestamps `days` days into the past inside one transaction.
    ///
    /// With [`ShiftScope::Future`] only rows newer than `now` are touched.
    /// Returns the number of rows updated. On failure the transaction is
    /// rolled back and no row changes.
    ///
    /// # Errors
    ///
    /// Returns `DateFixerError::InvalidShift` if `days` is not positive or
    /// overflows, and `DateFixerError::Database` if the update fails.
    pub fn shift(&mut self, days: i64, scope: ShiftScope, now: i64) -> Result<usize, DateFixerError> {
        if days <= 0 || days_to_seconds(days).is_none() {
            return Err(DateFixerError::InvalidShift(days));
        }

        let tx = self
            .conn
            .transaction()
            .map_err(|e| DateFixerError::Database(format!("Failed to begin transaction: {e}")))?;

        let updated = match scope {
            ShiftScope::All => tx.execute(&self.schema.shift_all_sql(), params![days]),
            ShiftScope::Future => tx.execute(&self.schema.shift_newer_sql(), params![days, now]),
        }
        .map_err(|e| DateFixerError::Database(format!("Failed to shift timestamps: {e}")))?;

        tx.commit()
            .map_err(|e| DateFixerError::Database(format!("Failed to commit shift: {e}")))?;

        Ok(updated)
    }

    /// Close the connection, reporting any error from `SQLite`.
    ///
    /// # Errors
    ///
    /// Returns an error if `SQLite` refuses to close the handle.
    pub fn close(self) -> Result<(), DateFixerError> {
        self.conn
            .close()
            .map_err(|(_, e)| DateFixerError::Database(format!("Failed to close database: {e}")))
    }
}
