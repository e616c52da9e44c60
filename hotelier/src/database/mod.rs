//! Database layer for persistent storage of the room catalog and
//! reservation ledger.
//!
//! This module provides a SQLite-based storage layer, including connection
//! management, schema versioning, and CRUD operations for room types,
//! rooms, and reservations.
//!
//! Mutating operations open their own `Immediate` transaction; for
//! composition inside an already-open transaction every mutation also has a
//! `*_tx` variant taking a raw connection. Queries return detached value
//! snapshots (a [`crate::Room`] carries a copy of its type, never a live
//! reference into the store).
//!
//! # Examples
//!
//! ```no_run
//! use hotelier::database::{Database, DatabaseConfig};
//! use hotelier::RoomType;
//!
//! let config = DatabaseConfig::new("/tmp/hotelier.db");
//! let mut db = Database::open(config).unwrap();
//!
//! let standard = RoomType::new("STD", "Standard", 25_000.0, 2).unwrap();
//! let standard = db.save_room_type(&standard).unwrap();
//! assert!(standard.id().is_some());
//! ```

use chrono::{NaiveDate, NaiveDateTime};

mod config;
mod connection;
pub mod migrations;
mod reservations;
mod room_types;
mod rooms;
mod schema;

#[cfg(test)]
pub mod test_util;

// Re-export public API
pub use config::{default_data_dir, resolve_database_path, DatabaseConfig};
pub use connection::Database;

// Re-export migration functions for advanced use cases
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};

use schema::{DATETIME_FORMAT, DATE_FORMAT};

/// Formats a datetime for storage.
pub(crate) fn fmt_datetime(value: NaiveDateTime) -> String {
    value.format(DATETIME_FORMAT).to_string()
}

/// Parses a stored datetime, mapping failures into a `rusqlite` error so
/// row mappers can propagate them.
pub(crate) fn parse_datetime(value: &str) -> rusqlite::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

/// Formats a date for storage.
pub(crate) fn fmt_date(value: NaiveDate) -> String {
    value.format(DATE_FORMAT).to_string()
}

/// Parses a stored date, mapping failures into a `rusqlite` error.
pub(crate) fn parse_date(value: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}
