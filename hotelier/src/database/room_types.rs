//! Database CRUD operations for room types.

use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};

use crate::catalog::RoomType;
use crate::error::Result;

use super::connection::Database;

const INSERT_ROOM_TYPE: &str = r"
    INSERT INTO room_types (code, label, nightly_rate, capacity, description)
    VALUES (?, ?, ?, ?, ?)
";

const UPDATE_ROOM_TYPE: &str = r"
    UPDATE room_types
    SET code = ?, label = ?, nightly_rate = ?, capacity = ?, description = ?
    WHERE id = ?
";

const SELECT_ROOM_TYPE: &str = r"
    SELECT id, code, label, nightly_rate, capacity, description
    FROM room_types
    WHERE id = ?
";

const SELECT_ROOM_TYPE_BY_CODE: &str = r"
    SELECT id, code, label, nightly_rate, capacity, description
    FROM room_types
    WHERE code = ?
";

const LIST_ROOM_TYPES: &str = r"
    SELECT id, code, label, nightly_rate, capacity, description
    FROM room_types
    ORDER BY code
";

const DELETE_ROOM_TYPE: &str = "DELETE FROM room_types WHERE id = ?";

const COUNT_ROOMS_OF_TYPE: &str = "SELECT COUNT(*) FROM rooms WHERE room_type_id = ?";

/// Deserializes a room type from a database row.
///
/// Expects row fields in this order: id, code, label, `nightly_rate`,
/// capacity, description.
fn row_to_room_type(row: &rusqlite::Row<'_>) -> rusqlite::Result<RoomType> {
    let id: i64 = row.get(0)?;
    let code: String = row.get(1)?;
    let label: String = row.get(2)?;
    let nightly_rate: f64 = row.get(3)?;
    let capacity: u32 = row.get(4)?;
    let description: Option<String> = row.get(5)?;

    let mut room_type = RoomType::new(&code, &label, nightly_rate, capacity)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?
        .with_id(id);
    if let Some(description) = description {
        room_type = room_type.with_description(description);
    }
    Ok(room_type)
}

impl Database {
    /// Creates or updates a room type in the database.
    ///
    /// A type without an identifier is inserted; one with an identifier is
    /// updated in place. Returns the saved type with its identifier set.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails, or if the unique
    /// constraint on the code is violated.
    pub fn save_room_type(&mut self, room_type: &RoomType) -> Result<RoomType> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let saved = Self::save_room_type_tx(&tx, room_type)?;
        tx.commit()?;
        Ok(saved)
    }

    /// Creates or updates a room type using an existing transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert or update fails.
    pub fn save_room_type_tx(conn: &Connection, room_type: &RoomType) -> Result<RoomType> {
        match room_type.id() {
            None => {
                conn.execute(
                    INSERT_ROOM_TYPE,
                    params![
                        room_type.code(),
                        room_type.label(),
                        room_type.nightly_rate(),
                        room_type.capacity(),
                        room_type.description(),
                    ],
                )?;
                Ok(room_type.clone().with_id(conn.last_insert_rowid()))
            }
            Some(id) => {
                conn.execute(
                    UPDATE_ROOM_TYPE,
                    params![
                        room_type.code(),
                        room_type.label(),
                        room_type.nightly_rate(),
                        room_type.capacity(),
                        room_type.description(),
                        id,
                    ],
                )?;
                Ok(room_type.clone())
            }
        }
    }

    /// Retrieves a room type by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails (other than "not found").
    pub fn get_room_type(conn: &Connection, id: i64) -> Result<Option<RoomType>> {
        let mut stmt = conn.prepare(SELECT_ROOM_TYPE)?;
        stmt.query_row(params![id], row_to_room_type)
            .optional()
            .map_err(Into::into)
    }

    /// Retrieves a room type by its unique code.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails (other than "not found").
    pub fn get_room_type_by_code(conn: &Connection, code: &str) -> Result<Option<RoomType>> {
        let mut stmt = conn.prepare(SELECT_ROOM_TYPE_BY_CODE)?;
        stmt.query_row(params![code.trim().to_uppercase()], row_to_room_type)
            .optional()
            .map_err(Into::into)
    }

    /// Lists all room types, ordered by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_room_types(conn: &Connection) -> Result<Vec<RoomType>> {
        let mut stmt = conn.prepare(LIST_ROOM_TYPES)?;
        let types = stmt
            .query_map([], row_to_room_type)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(types)
    }

    /// Counts the rooms referencing a room type.
    ///
    /// Used by the catalog guard that refuses to delete a referenced type.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_rooms_of_type(conn: &Connection, room_type_id: i64) -> Result<i64> {
        let count: i64 =
            conn.query_row(COUNT_ROOMS_OF_TYPE, params![room_type_id], |row| row.get(0))?;
        Ok(count)
    }

    /// Deletes a room type using an existing transaction.
    ///
    /// This is the raw delete; the referential-integrity guard lives in the
    /// catalog operations layer.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the type was found and deleted
    /// - `Ok(false)` if the type was not found
    pub fn delete_room_type_tx(conn: &Connection, id: i64) -> Result<bool> {
        let rows_affected = conn.execute(DELETE_ROOM_TYPE, params![id])?;
        Ok(rows_affected > 0)
    }
}
