//! Shared test utilities for database unit tests.
//!
//! This module provides helper functions used across multiple database and
//! operations test modules.

use chrono::{NaiveDate, NaiveDateTime};
use tempfile::tempdir;

use crate::catalog::{Room, RoomType};
use crate::database::{Database, DatabaseConfig};
use crate::reservation::{Guest, Reservation, ReservationStatus};
use crate::{night_count, Error};

/// Creates a temporary test database that will be cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
/// This is acceptable in test code where we want to fail fast.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let config = DatabaseConfig::new(path);
    let db = Database::open(config).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// Saves a room type and returns it with its identifier set.
///
/// # Panics
///
/// Panics on any validation or database failure.
pub fn seed_room_type(
    db: &mut Database,
    code: &str,
    label: &str,
    nightly_rate: f64,
    capacity: u32,
) -> RoomType {
    let room_type = RoomType::new(code, label, nightly_rate, capacity).unwrap();
    db.save_room_type(&room_type).unwrap()
}

/// Inserts a free room of the given type and returns it.
///
/// # Panics
///
/// Panics on any validation or database failure.
pub fn seed_room(db: &mut Database, room_type: &RoomType, number: &str, floor: i32) -> Room {
    let room = Room::builder(room_type.id().unwrap())
        .number(number)
        .floor(floor)
        .build()
        .unwrap();
    let created = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    Database::insert_room_tx(db.connection(), &room, created).unwrap()
}

/// Inserts a reservation for the room with a fixed guest and a booking
/// timestamp of 2025-06-01 09:00. Nights and total are computed from the
/// stay and the room's nightly rate.
///
/// # Panics
///
/// Panics on any validation or database failure.
pub fn seed_reservation(
    db: &mut Database,
    room: &Room,
    number: &str,
    arrival: NaiveDateTime,
    departure: NaiveDateTime,
    status: ReservationStatus,
) -> Reservation {
    let guest = Guest::new("Diop", "Awa", "771234567", None).unwrap();
    let nights = night_count(arrival, departure);
    #[allow(clippy::cast_precision_loss)]
    let total = nights as f64 * room.nightly_rate();
    let booked_at = NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();

    let reservation = Reservation::builder(guest, room.id().unwrap(), arrival, departure)
        .number(number)
        .booked_at(booked_at)
        .nights(nights)
        .total_amount(total)
        .deposit(total)
        .status(status)
        .build()
        .unwrap();
    Database::insert_reservation_tx(db.connection(), &reservation).unwrap()
}

/// Asserts that nothing about a reservation ledger changed, used by tests
/// verifying rollback-on-error behavior.
///
/// # Panics
///
/// Panics if the reservation count differs from `expected`.
pub fn assert_reservation_count(db: &Database, expected: usize) {
    let all = Database::list_reservations(db.connection()).unwrap();
    assert_eq!(all.len(), expected);
}

/// Convenience matcher for validation errors naming a specific field.
///
/// # Panics
///
/// Panics if the error is not a validation error for the given field.
pub fn assert_validation_error(err: &Error, field: &str) {
    match err {
        Error::Validation { field: f, .. } => assert_eq!(f, field),
        other => panic!("expected validation error for '{field}', got: {other}"),
    }
}
