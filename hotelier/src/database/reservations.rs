//! Database CRUD operations for reservations.

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Error, Result};
use crate::reservation::{Guest, Reservation, ReservationStatus};

use super::connection::Database;
use super::{fmt_date, fmt_datetime, parse_datetime};

const RESERVATION_COLUMNS: &str = r"
    id, number, booked_at, surname, name, phone, email,
    arrival, departure, party_size, nights, total_amount, deposit,
    status, room_id
";

const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations
    (number, booked_at, surname, name, phone, email, arrival, departure,
     party_size, nights, total_amount, deposit, status, room_id)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
";

const UPDATE_RESERVATION_STATUS: &str = "UPDATE reservations SET status = ? WHERE id = ?";

/// Overlap test against every reservation of a room whose status still
/// blocks the calendar: `arrival < r.departure AND departure > r.arrival`.
const COUNT_BLOCKING_OVERLAPS: &str = r"
    SELECT COUNT(*) FROM reservations
    WHERE room_id = ?
      AND status IN ('CONFIRMED', 'IN_PROGRESS')
      AND ? < departure
      AND ? > arrival
";

const COUNT_BOOKED_ON: &str = r"
    SELECT COUNT(*) FROM reservations
    WHERE booked_at >= ? AND booked_at < ?
";

const COUNT_FUTURE_ACTIVE_FOR_ROOM: &str = r"
    SELECT COUNT(*) FROM reservations
    WHERE room_id = ?
      AND status <> 'CANCELLED'
      AND arrival >= ?
";

/// Deserializes a reservation from a database row.
///
/// Expects the column order of [`RESERVATION_COLUMNS`].
fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let id: i64 = row.get(0)?;
    let number: String = row.get(1)?;
    let booked_at: String = row.get(2)?;
    let surname: String = row.get(3)?;
    let name: String = row.get(4)?;
    let phone: String = row.get(5)?;
    let email: Option<String> = row.get(6)?;
    let arrival: String = row.get(7)?;
    let departure: String = row.get(8)?;
    let party_size: u32 = row.get(9)?;
    let nights: i64 = row.get(10)?;
    let total_amount: f64 = row.get(11)?;
    let deposit: f64 = row.get(12)?;
    let status: String = row.get(13)?;
    let room_id: i64 = row.get(14)?;

    let wrap = |e: crate::reservation::ValidationError| {
        rusqlite::Error::ToSqlConversionFailure(Box::new(e))
    };

    let guest = Guest::new(&surname, &name, &phone, email).map_err(wrap)?;
    let status = ReservationStatus::parse(&status).map_err(wrap)?;

    Reservation::builder(guest, room_id, parse_datetime(&arrival)?, parse_datetime(&departure)?)
        .id(id)
        .number(number)
        .booked_at(parse_datetime(&booked_at)?)
        .party_size(party_size)
        .nights(nights)
        .total_amount(total_amount)
        .deposit(deposit)
        .status(status)
        .build()
        .map_err(wrap)
}

impl Database {
    /// Inserts a reservation using an existing transaction.
    ///
    /// The reservation must already carry its number, booking timestamp,
    /// and computed pricing; the booking engine fills those in before the
    /// insert. Returns the persisted reservation with its identifier set.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing or the insert fails
    /// (for instance on a duplicate number).
    pub fn insert_reservation_tx(conn: &Connection, reservation: &Reservation) -> Result<Reservation> {
        let number = reservation.number().ok_or_else(|| Error::Validation {
            field: "number".into(),
            message: "a reservation number is required before inserting".into(),
        })?;
        let booked_at = reservation.booked_at().ok_or_else(|| Error::Validation {
            field: "booked_at".into(),
            message: "a booking timestamp is required before inserting".into(),
        })?;

        conn.execute(
            INSERT_RESERVATION,
            params![
                number,
                fmt_datetime(booked_at),
                reservation.guest().surname(),
                reservation.guest().name(),
                reservation.guest().phone(),
                reservation.guest().email(),
                fmt_datetime(reservation.arrival()),
                fmt_datetime(reservation.departure()),
                reservation.party_size(),
                reservation.nights(),
                reservation.total_amount(),
                reservation.deposit(),
                reservation.status().as_str(),
                reservation.room_id(),
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_reservation(conn, id)?.ok_or_else(|| Error::NotFound {
            resource: format!("reservation {id}"),
        })
    }

    /// Retrieves a reservation by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails (other than "not found").
    pub fn get_reservation(conn: &Connection, id: i64) -> Result<Option<Reservation>> {
        let sql = format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = ?");
        let mut stmt = conn.prepare(&sql)?;
        stmt.query_row(params![id], row_to_reservation)
            .optional()
            .map_err(Into::into)
    }

    /// Retrieves a reservation by its unique number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails (other than "not found").
    pub fn get_reservation_by_number(conn: &Connection, number: &str) -> Result<Option<Reservation>> {
        let sql = format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE number = ?");
        let mut stmt = conn.prepare(&sql)?;
        stmt.query_row(params![number], row_to_reservation)
            .optional()
            .map_err(Into::into)
    }

    /// Lists all reservations, newest booking first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservations(conn: &Connection) -> Result<Vec<Reservation>> {
        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations ORDER BY booked_at DESC, id DESC"
        );
        let mut stmt = conn.prepare(&sql)?;
        let reservations = stmt
            .query_map([], row_to_reservation)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(reservations)
    }

    /// Lists all reservations of one room, ordered by arrival.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservations_for_room(conn: &Connection, room_id: i64) -> Result<Vec<Reservation>> {
        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE room_id = ? ORDER BY arrival"
        );
        let mut stmt = conn.prepare(&sql)?;
        let reservations = stmt
            .query_map(params![room_id], row_to_reservation)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(reservations)
    }

    /// Counts reservations of a room whose stay overlaps the half-open
    /// interval `[arrival, departure)` and whose status still blocks the
    /// room (`CONFIRMED` or `IN_PROGRESS`).
    ///
    /// This is the commit-time conflict re-check the booking engine runs
    /// inside its transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_blocking_overlaps(
        conn: &Connection,
        room_id: i64,
        arrival: NaiveDateTime,
        departure: NaiveDateTime,
    ) -> Result<i64> {
        let count: i64 = conn.query_row(
            COUNT_BLOCKING_OVERLAPS,
            params![room_id, fmt_datetime(arrival), fmt_datetime(departure)],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Counts reservations booked on the given calendar date.
    ///
    /// Feeds the daily reservation-number sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_booked_on(conn: &Connection, date: NaiveDate) -> Result<u32> {
        let start = format!("{} 00:00:00", fmt_date(date));
        let end = format!(
            "{} 00:00:00",
            fmt_date(date.succ_opt().unwrap_or(date))
        );
        let count: u32 =
            conn.query_row(COUNT_BOOKED_ON, params![start, end], |row| row.get(0))?;
        Ok(count)
    }

    /// Counts non-cancelled reservations of a room arriving at or after the
    /// given instant.
    ///
    /// Feeds the guard that refuses to edit or delete a room with upcoming
    /// stays.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_future_active_for_room(
        conn: &Connection,
        room_id: i64,
        now: NaiveDateTime,
    ) -> Result<i64> {
        let count: i64 = conn.query_row(
            COUNT_FUTURE_ACTIVE_FOR_ROOM,
            params![room_id, fmt_datetime(now)],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Lists reservations with the given status arriving on a date.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_arrivals_on(
        conn: &Connection,
        date: NaiveDate,
        status: ReservationStatus,
    ) -> Result<Vec<Reservation>> {
        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations
             WHERE status = ? AND arrival >= ? AND arrival < ?
             ORDER BY arrival"
        );
        let start = format!("{} 00:00:00", fmt_date(date));
        let end = format!("{} 00:00:00", fmt_date(date.succ_opt().unwrap_or(date)));
        let mut stmt = conn.prepare(&sql)?;
        let reservations = stmt
            .query_map(params![status.as_str(), start, end], row_to_reservation)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(reservations)
    }

    /// Lists reservations with the given status departing on a date.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_departures_on(
        conn: &Connection,
        date: NaiveDate,
        status: ReservationStatus,
    ) -> Result<Vec<Reservation>> {
        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations
             WHERE status = ? AND departure >= ? AND departure < ?
             ORDER BY departure"
        );
        let start = format!("{} 00:00:00", fmt_date(date));
        let end = format!("{} 00:00:00", fmt_date(date.succ_opt().unwrap_or(date)));
        let mut stmt = conn.prepare(&sql)?;
        let reservations = stmt
            .query_map(params![status.as_str(), start, end], row_to_reservation)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(reservations)
    }

    /// Updates a reservation's status using an existing transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the reservation was found and updated
    /// - `Ok(false)` if the reservation was not found
    pub fn update_reservation_status_tx(
        conn: &Connection,
        id: i64,
        status: ReservationStatus,
    ) -> Result<bool> {
        let rows_affected =
            conn.execute(UPDATE_RESERVATION_STATUS, params![status.as_str(), id])?;
        Ok(rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{
        create_test_database, seed_reservation, seed_room, seed_room_type,
    };

    fn dt(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_insert_and_get_reservation() {
        let mut db = create_test_database();
        let room_type = seed_room_type(&mut db, "STD", "Standard", 25_000.0, 2);
        let room = seed_room(&mut db, &room_type, "CH-STD-01-001", 1);

        let reservation = seed_reservation(
            &mut db,
            &room,
            "RSV-20250601-001",
            dt(1, 14),
            dt(3, 12),
            ReservationStatus::Confirmed,
        );
        let id = reservation.id().unwrap();

        let loaded = Database::get_reservation(db.connection(), id)
            .unwrap()
            .unwrap();
        assert_eq!(loaded.number(), Some("RSV-20250601-001"));
        assert_eq!(loaded.arrival(), dt(1, 14));
        assert_eq!(loaded.departure(), dt(3, 12));
        assert_eq!(loaded.status(), ReservationStatus::Confirmed);
        assert_eq!(loaded.room_id(), room.id().unwrap());
    }

    #[test]
    fn test_get_reservation_by_number() {
        let mut db = create_test_database();
        let room_type = seed_room_type(&mut db, "STD", "Standard", 25_000.0, 2);
        let room = seed_room(&mut db, &room_type, "CH-STD-01-001", 1);
        seed_reservation(
            &mut db,
            &room,
            "RSV-20250601-001",
            dt(1, 14),
            dt(3, 12),
            ReservationStatus::Confirmed,
        );

        let loaded = Database::get_reservation_by_number(db.connection(), "RSV-20250601-001")
            .unwrap()
            .unwrap();
        assert_eq!(loaded.number(), Some("RSV-20250601-001"));
        assert!(
            Database::get_reservation_by_number(db.connection(), "RSV-20250601-099")
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_duplicate_number_rejected() {
        let mut db = create_test_database();
        let room_type = seed_room_type(&mut db, "STD", "Standard", 25_000.0, 2);
        let room = seed_room(&mut db, &room_type, "CH-STD-01-001", 1);
        let first = seed_reservation(
            &mut db,
            &room,
            "RSV-20250601-001",
            dt(1, 14),
            dt(3, 12),
            ReservationStatus::Confirmed,
        );

        let duplicate = Reservation::builder(
            first.guest().clone(),
            room.id().unwrap(),
            dt(10, 14),
            dt(12, 12),
        )
        .number("RSV-20250601-001")
        .booked_at(dt(1, 9))
        .build()
        .unwrap();
        let result = Database::insert_reservation_tx(db.connection(), &duplicate);
        assert!(result.is_err());
    }

    #[test]
    fn test_count_blocking_overlaps() {
        let mut db = create_test_database();
        let room_type = seed_room_type(&mut db, "STD", "Standard", 25_000.0, 2);
        let room = seed_room(&mut db, &room_type, "CH-STD-01-001", 1);
        let room_id = room.id().unwrap();
        seed_reservation(
            &mut db,
            &room,
            "RSV-20250601-001",
            dt(1, 14),
            dt(3, 12),
            ReservationStatus::Confirmed,
        );

        let conn = db.connection();
        // Overlapping query interval
        assert_eq!(
            Database::count_blocking_overlaps(conn, room_id, dt(2, 10), dt(5, 10)).unwrap(),
            1
        );
        // Exact back-to-back boundary is not an overlap
        assert_eq!(
            Database::count_blocking_overlaps(conn, room_id, dt(3, 12), dt(5, 10)).unwrap(),
            0
        );
        // A different room is unaffected
        assert_eq!(
            Database::count_blocking_overlaps(conn, room_id + 1, dt(2, 10), dt(5, 10)).unwrap(),
            0
        );
    }

    #[test]
    fn test_completed_and_cancelled_do_not_block() {
        let mut db = create_test_database();
        let room_type = seed_room_type(&mut db, "STD", "Standard", 25_000.0, 2);
        let room = seed_room(&mut db, &room_type, "CH-STD-01-001", 1);
        let room_id = room.id().unwrap();
        seed_reservation(
            &mut db,
            &room,
            "RSV-20250601-001",
            dt(1, 14),
            dt(3, 12),
            ReservationStatus::Completed,
        );
        seed_reservation(
            &mut db,
            &room,
            "RSV-20250601-002",
            dt(1, 14),
            dt(3, 12),
            ReservationStatus::Cancelled,
        );

        assert_eq!(
            Database::count_blocking_overlaps(db.connection(), room_id, dt(1, 0), dt(5, 0))
                .unwrap(),
            0
        );
    }

    #[test]
    fn test_count_booked_on() {
        let mut db = create_test_database();
        let room_type = seed_room_type(&mut db, "STD", "Standard", 25_000.0, 2);
        let room = seed_room(&mut db, &room_type, "CH-STD-01-001", 1);
        seed_reservation(
            &mut db,
            &room,
            "RSV-20250601-001",
            dt(10, 14),
            dt(12, 12),
            ReservationStatus::Confirmed,
        );

        let conn = db.connection();
        // Seeded bookings are stamped on 2025-06-01
        assert_eq!(
            Database::count_booked_on(conn, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()).unwrap(),
            1
        );
        assert_eq!(
            Database::count_booked_on(conn, NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()).unwrap(),
            0
        );
    }

    #[test]
    fn test_count_future_active_for_room() {
        let mut db = create_test_database();
        let room_type = seed_room_type(&mut db, "STD", "Standard", 25_000.0, 2);
        let room = seed_room(&mut db, &room_type, "CH-STD-01-001", 1);
        let room_id = room.id().unwrap();
        seed_reservation(
            &mut db,
            &room,
            "RSV-20250601-001",
            dt(10, 14),
            dt(12, 12),
            ReservationStatus::Confirmed,
        );
        seed_reservation(
            &mut db,
            &room,
            "RSV-20250601-002",
            dt(20, 14),
            dt(22, 12),
            ReservationStatus::Cancelled,
        );

        let conn = db.connection();
        // Only the confirmed future stay counts
        assert_eq!(
            Database::count_future_active_for_room(conn, room_id, dt(5, 0)).unwrap(),
            1
        );
        // After that stay has begun, nothing is upcoming
        assert_eq!(
            Database::count_future_active_for_room(conn, room_id, dt(15, 0)).unwrap(),
            0
        );
    }

    #[test]
    fn test_arrivals_and_departures_on() {
        let mut db = create_test_database();
        let room_type = seed_room_type(&mut db, "STD", "Standard", 25_000.0, 2);
        let room = seed_room(&mut db, &room_type, "CH-STD-01-001", 1);
        seed_reservation(
            &mut db,
            &room,
            "RSV-20250601-001",
            dt(10, 14),
            dt(12, 12),
            ReservationStatus::Confirmed,
        );
        seed_reservation(
            &mut db,
            &room,
            "RSV-20250601-002",
            dt(8, 14),
            dt(10, 12),
            ReservationStatus::InProgress,
        );

        let conn = db.connection();
        let june10 = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();

        let arrivals =
            Database::list_arrivals_on(conn, june10, ReservationStatus::Confirmed).unwrap();
        assert_eq!(arrivals.len(), 1);
        assert_eq!(arrivals[0].number(), Some("RSV-20250601-001"));

        let departures =
            Database::list_departures_on(conn, june10, ReservationStatus::InProgress).unwrap();
        assert_eq!(departures.len(), 1);
        assert_eq!(departures[0].number(), Some("RSV-20250601-002"));
    }

    #[test]
    fn test_update_reservation_status() {
        let mut db = create_test_database();
        let room_type = seed_room_type(&mut db, "STD", "Standard", 25_000.0, 2);
        let room = seed_room(&mut db, &room_type, "CH-STD-01-001", 1);
        let reservation = seed_reservation(
            &mut db,
            &room,
            "RSV-20250601-001",
            dt(1, 14),
            dt(3, 12),
            ReservationStatus::Confirmed,
        );
        let id = reservation.id().unwrap();

        assert!(Database::update_reservation_status_tx(
            db.connection(),
            id,
            ReservationStatus::InProgress
        )
        .unwrap());
        let loaded = Database::get_reservation(db.connection(), id)
            .unwrap()
            .unwrap();
        assert_eq!(loaded.status(), ReservationStatus::InProgress);

        assert!(!Database::update_reservation_status_tx(
            db.connection(),
            999,
            ReservationStatus::Completed
        )
        .unwrap());
    }

    #[test]
    fn test_list_reservations_newest_first() {
        let mut db = create_test_database();
        let room_type = seed_room_type(&mut db, "STD", "Standard", 25_000.0, 2);
        let room = seed_room(&mut db, &room_type, "CH-STD-01-001", 1);
        seed_reservation(
            &mut db,
            &room,
            "RSV-20250601-001",
            dt(1, 14),
            dt(3, 12),
            ReservationStatus::Completed,
        );
        seed_reservation(
            &mut db,
            &room,
            "RSV-20250601-002",
            dt(10, 14),
            dt(12, 12),
            ReservationStatus::Confirmed,
        );

        let all = Database::list_reservations(db.connection()).unwrap();
        assert_eq!(all.len(), 2);
        // Same booked_at: the later insert wins on the id tiebreak
        assert_eq!(all[0].number(), Some("RSV-20250601-002"));
    }
}
