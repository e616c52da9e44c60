//! Database CRUD operations for rooms.
//!
//! Room queries join the referenced room type and return it as a detached
//! snapshot on the [`Room`] value, so derived capacity and rate never
//! require further lookups.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};

use crate::catalog::{Room, RoomStatus, RoomType};
use crate::error::{Error, Result};

use super::connection::Database;
use super::{fmt_date, parse_date};

const ROOM_COLUMNS: &str = r"
    r.id, r.number, r.room_type_id, r.floor,
    r.air_conditioning, r.balcony, r.ocean_view,
    r.last_renovated, r.created_at, r.status,
    t.id, t.code, t.label, t.nightly_rate, t.capacity, t.description
";

const INSERT_ROOM: &str = r"
    INSERT INTO rooms
    (number, room_type_id, floor, air_conditioning, balcony, ocean_view,
     last_renovated, created_at, status)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
";

const UPDATE_ROOM: &str = r"
    UPDATE rooms
    SET number = ?, room_type_id = ?, floor = ?, air_conditioning = ?,
        balcony = ?, ocean_view = ?, last_renovated = ?, status = ?
    WHERE id = ?
";

const UPDATE_ROOM_STATUS: &str = "UPDATE rooms SET status = ? WHERE id = ?";

const DELETE_ROOM: &str = "DELETE FROM rooms WHERE id = ?";

const LIST_ROOM_NUMBERS: &str = "SELECT number FROM rooms ORDER BY number";

const COUNT_ROOMS: &str = "SELECT COUNT(*) FROM rooms";

/// Deserializes a room (with its joined type snapshot) from a database row.
///
/// Expects the column order of [`ROOM_COLUMNS`].
fn row_to_room(row: &rusqlite::Row<'_>) -> rusqlite::Result<Room> {
    let id: i64 = row.get(0)?;
    let number: String = row.get(1)?;
    let room_type_id: i64 = row.get(2)?;
    let floor: i32 = row.get(3)?;
    let air_conditioning: bool = row.get(4)?;
    let balcony: bool = row.get(5)?;
    let ocean_view: bool = row.get(6)?;
    let last_renovated: Option<String> = row.get(7)?;
    let created_at: String = row.get(8)?;
    let status: String = row.get(9)?;

    let status = RoomStatus::parse(&status)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    let mut builder = Room::builder(room_type_id)
        .id(id)
        .number(number)
        .floor(floor)
        .air_conditioning(air_conditioning)
        .balcony(balcony)
        .ocean_view(ocean_view)
        .created_at(parse_date(&created_at)?)
        .status(status);

    if let Some(date) = last_renovated {
        builder = builder.last_renovated(parse_date(&date)?);
    }

    // The LEFT JOIN leaves the type columns NULL for a dangling reference;
    // the room is still loadable and reports zero capacity and rate.
    let type_id: Option<i64> = row.get(10)?;
    if let Some(type_id) = type_id {
        let code: String = row.get(11)?;
        let label: String = row.get(12)?;
        let nightly_rate: f64 = row.get(13)?;
        let capacity: u32 = row.get(14)?;
        let description: Option<String> = row.get(15)?;

        let mut room_type = RoomType::new(&code, &label, nightly_rate, capacity)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?
            .with_id(type_id);
        if let Some(description) = description {
            room_type = room_type.with_description(description);
        }
        builder = builder.room_type(room_type);
    }

    builder
        .build()
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

impl Database {
    /// Inserts a room using an existing transaction.
    ///
    /// The room must carry a number; generation happens in the catalog
    /// operations layer before the insert. `created_at` defaults to the
    /// supplied date.
    ///
    /// # Errors
    ///
    /// Returns an error if the room has no number, or if the insert fails
    /// (for instance on a duplicate number).
    pub fn insert_room_tx(conn: &Connection, room: &Room, created_at: NaiveDate) -> Result<Room> {
        let number = room.number().ok_or_else(|| Error::Validation {
            field: "number".into(),
            message: "a room number is required before inserting".into(),
        })?;

        conn.execute(
            INSERT_ROOM,
            params![
                number,
                room.room_type_id(),
                room.floor(),
                room.air_conditioning(),
                room.balcony(),
                room.ocean_view(),
                room.last_renovated().map(fmt_date),
                fmt_date(room.created_at().unwrap_or(created_at)),
                room.status().as_str(),
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_room(conn, id)?.ok_or_else(|| Error::NotFound {
            resource: format!("room {id}"),
        })
    }

    /// Updates a room in place using an existing transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the room has no identifier or number, or if the
    /// update fails.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the room was found and updated
    /// - `Ok(false)` if the room was not found
    pub fn update_room_tx(conn: &Connection, room: &Room) -> Result<bool> {
        let id = room.id().ok_or_else(|| Error::Validation {
            field: "id".into(),
            message: "a persisted identifier is required to update a room".into(),
        })?;
        let number = room.number().ok_or_else(|| Error::Validation {
            field: "number".into(),
            message: "a room number is required".into(),
        })?;

        let rows_affected = conn.execute(
            UPDATE_ROOM,
            params![
                number,
                room.room_type_id(),
                room.floor(),
                room.air_conditioning(),
                room.balcony(),
                room.ocean_view(),
                room.last_renovated().map(fmt_date),
                room.status().as_str(),
                id,
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Updates only a room's status using an existing transaction.
    ///
    /// Used by the booking and lifecycle engines to mirror reservation
    /// state onto the room.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_room_status_tx(conn: &Connection, room_id: i64, status: RoomStatus) -> Result<bool> {
        let rows_affected = conn.execute(UPDATE_ROOM_STATUS, params![status.as_str(), room_id])?;
        Ok(rows_affected > 0)
    }

    /// Deletes a room using an existing transaction.
    ///
    /// This is the raw delete; the future-reservation guard lives in the
    /// catalog operations layer.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_room_tx(conn: &Connection, id: i64) -> Result<bool> {
        let rows_affected = conn.execute(DELETE_ROOM, params![id])?;
        Ok(rows_affected > 0)
    }

    /// Retrieves a room by identifier, with its type snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails (other than "not found").
    pub fn get_room(conn: &Connection, id: i64) -> Result<Option<Room>> {
        let sql = format!(
            "SELECT {ROOM_COLUMNS} FROM rooms r
             LEFT JOIN room_types t ON t.id = r.room_type_id
             WHERE r.id = ?"
        );
        let mut stmt = conn.prepare(&sql)?;
        stmt.query_row(params![id], row_to_room)
            .optional()
            .map_err(Into::into)
    }

    /// Retrieves a room by its unique number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails (other than "not found").
    pub fn get_room_by_number(conn: &Connection, number: &str) -> Result<Option<Room>> {
        let sql = format!(
            "SELECT {ROOM_COLUMNS} FROM rooms r
             LEFT JOIN room_types t ON t.id = r.room_type_id
             WHERE r.number = ?"
        );
        let mut stmt = conn.prepare(&sql)?;
        stmt.query_row(params![number], row_to_room)
            .optional()
            .map_err(Into::into)
    }

    /// Lists all rooms, ordered by number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_rooms(conn: &Connection) -> Result<Vec<Room>> {
        let sql = format!(
            "SELECT {ROOM_COLUMNS} FROM rooms r
             LEFT JOIN room_types t ON t.id = r.room_type_id
             ORDER BY r.number"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rooms = stmt
            .query_map([], row_to_room)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(rooms)
    }

    /// Lists rooms filtered by type label and/or status.
    ///
    /// `None` on either axis means no filter on that axis.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn filter_rooms(
        conn: &Connection,
        type_label: Option<&str>,
        status: Option<RoomStatus>,
    ) -> Result<Vec<Room>> {
        let mut sql = format!(
            "SELECT {ROOM_COLUMNS} FROM rooms r
             LEFT JOIN room_types t ON t.id = r.room_type_id
             WHERE 1=1"
        );
        let mut bindings: Vec<String> = Vec::new();
        if let Some(label) = type_label {
            sql.push_str(" AND t.label = ?");
            bindings.push(label.to_string());
        }
        if let Some(status) = status {
            sql.push_str(" AND r.status = ?");
            bindings.push(status.as_str().to_string());
        }
        sql.push_str(" ORDER BY r.number");

        let mut stmt = conn.prepare(&sql)?;
        let rooms = stmt
            .query_map(rusqlite::params_from_iter(bindings.iter()), row_to_room)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(rooms)
    }

    /// Lists every room number in the catalog.
    ///
    /// Feeds the room-number generator's sequence scan.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_room_numbers(conn: &Connection) -> Result<Vec<String>> {
        let mut stmt = conn.prepare(LIST_ROOM_NUMBERS)?;
        let numbers = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(numbers)
    }

    /// Counts all rooms in the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_rooms(conn: &Connection) -> Result<i64> {
        let count: i64 = conn.query_row(COUNT_ROOMS, [], |row| row.get(0))?;
        Ok(count)
    }

    /// Updates only a room's status in its own transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction or update fails.
    pub fn set_room_status(&mut self, room_id: i64, status: RoomStatus) -> Result<bool> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let updated = Self::update_room_status_tx(&tx, room_id, status)?;
        tx.commit()?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, seed_room, seed_room_type};

    #[test]
    fn test_insert_and_get_room() {
        let mut db = create_test_database();
        let room_type = seed_room_type(&mut db, "STD", "Standard", 25_000.0, 2);
        let room = seed_room(&mut db, &room_type, "CH-STD-01-001", 1);

        let loaded = Database::get_room(db.connection(), room.id().unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(loaded.number(), Some("CH-STD-01-001"));
        assert_eq!(loaded.status(), RoomStatus::Free);
        assert_eq!(loaded.effective_capacity(), 2);
        assert_eq!(loaded.nightly_rate(), 25_000.0);
    }

    #[test]
    fn test_get_room_not_found() {
        let db = create_test_database();
        assert!(Database::get_room(db.connection(), 42).unwrap().is_none());
    }

    #[test]
    fn test_get_room_by_number() {
        let mut db = create_test_database();
        let room_type = seed_room_type(&mut db, "STD", "Standard", 25_000.0, 2);
        seed_room(&mut db, &room_type, "CH-STD-01-001", 1);

        let loaded = Database::get_room_by_number(db.connection(), "CH-STD-01-001")
            .unwrap()
            .unwrap();
        assert_eq!(loaded.number(), Some("CH-STD-01-001"));
        assert!(Database::get_room_by_number(db.connection(), "CH-STD-01-099")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_duplicate_number_rejected() {
        let mut db = create_test_database();
        let room_type = seed_room_type(&mut db, "STD", "Standard", 25_000.0, 2);
        seed_room(&mut db, &room_type, "CH-STD-01-001", 1);

        let duplicate = Room::builder(room_type.id().unwrap())
            .number("CH-STD-01-001")
            .floor(1)
            .build()
            .unwrap();
        let today = chrono::NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let result = Database::insert_room_tx(db.connection(), &duplicate, today);
        assert!(result.is_err());
    }

    #[test]
    fn test_list_rooms_ordered_by_number() {
        let mut db = create_test_database();
        let room_type = seed_room_type(&mut db, "STD", "Standard", 25_000.0, 2);
        seed_room(&mut db, &room_type, "CH-STD-01-002", 1);
        seed_room(&mut db, &room_type, "CH-STD-01-001", 1);

        let rooms = Database::list_rooms(db.connection()).unwrap();
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].number(), Some("CH-STD-01-001"));
        assert_eq!(rooms[1].number(), Some("CH-STD-01-002"));
    }

    #[test]
    fn test_filter_rooms_by_label_and_status() {
        let mut db = create_test_database();
        let standard = seed_room_type(&mut db, "STD", "Standard", 25_000.0, 2);
        let deluxe = seed_room_type(&mut db, "DLX", "Deluxe", 45_000.0, 3);
        seed_room(&mut db, &standard, "CH-STD-01-001", 1);
        let occupied = seed_room(&mut db, &deluxe, "CH-DLX-01-001", 1);
        db.set_room_status(occupied.id().unwrap(), RoomStatus::Occupied)
            .unwrap();

        // No filters: everything
        let all = Database::filter_rooms(db.connection(), None, None).unwrap();
        assert_eq!(all.len(), 2);

        // By label
        let deluxe_only = Database::filter_rooms(db.connection(), Some("Deluxe"), None).unwrap();
        assert_eq!(deluxe_only.len(), 1);
        assert_eq!(deluxe_only[0].number(), Some("CH-DLX-01-001"));

        // By status
        let free_only =
            Database::filter_rooms(db.connection(), None, Some(RoomStatus::Free)).unwrap();
        assert_eq!(free_only.len(), 1);
        assert_eq!(free_only[0].number(), Some("CH-STD-01-001"));

        // Both axes
        let both =
            Database::filter_rooms(db.connection(), Some("Deluxe"), Some(RoomStatus::Occupied))
                .unwrap();
        assert_eq!(both.len(), 1);

        let none =
            Database::filter_rooms(db.connection(), Some("Deluxe"), Some(RoomStatus::Free))
                .unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_update_room() {
        let mut db = create_test_database();
        let room_type = seed_room_type(&mut db, "STD", "Standard", 25_000.0, 2);
        let room = seed_room(&mut db, &room_type, "CH-STD-01-001", 1);

        let edited = Room::builder(room_type.id().unwrap())
            .id(room.id().unwrap())
            .number("CH-STD-01-001")
            .floor(1)
            .balcony(true)
            .status(RoomStatus::Maintenance)
            .build()
            .unwrap();
        assert!(Database::update_room_tx(db.connection(), &edited).unwrap());

        let loaded = Database::get_room(db.connection(), room.id().unwrap())
            .unwrap()
            .unwrap();
        assert!(loaded.balcony());
        assert_eq!(loaded.status(), RoomStatus::Maintenance);
    }

    #[test]
    fn test_set_room_status() {
        let mut db = create_test_database();
        let room_type = seed_room_type(&mut db, "STD", "Standard", 25_000.0, 2);
        let room = seed_room(&mut db, &room_type, "CH-STD-01-001", 1);

        assert!(db
            .set_room_status(room.id().unwrap(), RoomStatus::Occupied)
            .unwrap());
        let loaded = Database::get_room(db.connection(), room.id().unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(loaded.status(), RoomStatus::Occupied);

        // Unknown room id is reported, not an error
        assert!(!db.set_room_status(999, RoomStatus::Free).unwrap());
    }

    #[test]
    fn test_delete_room() {
        let mut db = create_test_database();
        let room_type = seed_room_type(&mut db, "STD", "Standard", 25_000.0, 2);
        let room = seed_room(&mut db, &room_type, "CH-STD-01-001", 1);

        assert!(Database::delete_room_tx(db.connection(), room.id().unwrap()).unwrap());
        assert!(Database::get_room(db.connection(), room.id().unwrap())
            .unwrap()
            .is_none());
        assert!(!Database::delete_room_tx(db.connection(), room.id().unwrap()).unwrap());
    }

    #[test]
    fn test_list_room_numbers_and_count() {
        let mut db = create_test_database();
        let room_type = seed_room_type(&mut db, "STD", "Standard", 25_000.0, 2);
        seed_room(&mut db, &room_type, "CH-STD-01-001", 1);
        seed_room(&mut db, &room_type, "CH-STD-02-001", 2);

        let numbers = Database::list_room_numbers(db.connection()).unwrap();
        assert_eq!(numbers, vec!["CH-STD-01-001", "CH-STD-02-001"]);
        assert_eq!(Database::count_rooms(db.connection()).unwrap(), 2);
    }
}
