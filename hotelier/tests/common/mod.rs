//! Shared fixtures for integration tests.

use chrono::{NaiveDate, NaiveDateTime};
use tempfile::TempDir;

use hotelier::database::{Database, DatabaseConfig};
use hotelier::operations::add_room_at;
use hotelier::{Guest, Reservation, Room, RoomType};

/// An on-disk test database living in a temporary directory.
pub struct TestDb {
    pub db: Database,
    _dir: TempDir,
}

/// Opens a fresh database in a temporary directory.
pub fn open_test_db() -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let config = DatabaseConfig::new(dir.path().join("hotelier.db"));
    TestDb {
        db: Database::open(config).unwrap(),
        _dir: dir,
    }
}

/// A fixed reference instant: 2025-06-01 09:00.
pub fn now() -> NaiveDateTime {
    dt(6, 1, 9)
}

/// Builds a 2025 timestamp from month, day, and hour.
pub fn dt(month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, month, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

/// Saves a room type through the public API.
pub fn add_type(db: &mut Database, code: &str, label: &str, rate: f64, capacity: u32) -> RoomType {
    db.save_room_type(&RoomType::new(code, label, rate, capacity).unwrap())
        .unwrap()
}

/// Adds an auto-numbered room on the given floor.
pub fn add_room_on_floor(db: &mut Database, room_type: &RoomType, floor: i32) -> Room {
    let room = Room::builder(room_type.id().unwrap())
        .floor(floor)
        .build()
        .unwrap();
    add_room_at(db, &room, now()).unwrap()
}

/// A valid guest.
pub fn guest() -> Guest {
    Guest::new("Diop", "Awa", "771234567", Some("awa@example.sn".into())).unwrap()
}

/// A booking draft for the room over `[arrival, departure)`.
pub fn draft(
    room: &Room,
    arrival: NaiveDateTime,
    departure: NaiveDateTime,
    party_size: u32,
    deposit: f64,
) -> Reservation {
    Reservation::builder(guest(), room.id().unwrap(), arrival, departure)
        .party_size(party_size)
        .deposit(deposit)
        .build()
        .unwrap()
}
