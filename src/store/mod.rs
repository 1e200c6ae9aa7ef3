//! Access to the external message store.
//!
//! The store is a `SQLite` file owned by a chat client. datefixer never
//! creates it or changes its schema; it only reads the timestamp column and
//! shifts it in place.

mod database;
mod schema;

pub use database::{MessageStore, ShiftScope};
pub use schema::MessageSchema;

#[cfg(test)]
pub(crate) use database::test_support;
