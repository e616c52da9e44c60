//! Database schema definitions and SQL constants.
//!
//! This module contains all SQL table definitions, indices, and constants
//! related to the database schema for the hotel catalog and reservation
//! ledger. Datetimes are stored as `%Y-%m-%d %H:%M:%S` text and dates as
//! `%Y-%m-%d`, both of which order lexicographically.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
///
/// The metadata table stores key-value pairs for database configuration
/// and versioning information.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the room types table.
pub const CREATE_ROOM_TYPES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS room_types (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        code TEXT NOT NULL UNIQUE,
        label TEXT NOT NULL,
        nightly_rate REAL NOT NULL,
        capacity INTEGER NOT NULL,
        description TEXT
    )";

/// SQL statement to create the rooms table.
///
/// The room number carries a UNIQUE constraint; the room type reference is
/// guarded explicitly by the catalog operations (no cascading delete).
pub const CREATE_ROOMS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS rooms (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        number TEXT NOT NULL UNIQUE,
        room_type_id INTEGER NOT NULL REFERENCES room_types(id),
        floor INTEGER NOT NULL,
        air_conditioning INTEGER NOT NULL DEFAULT 0,
        balcony INTEGER NOT NULL DEFAULT 0,
        ocean_view INTEGER NOT NULL DEFAULT 0,
        last_renovated TEXT,
        created_at TEXT NOT NULL,
        status TEXT NOT NULL
    )";

/// SQL statement to create the reservations table.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        number TEXT NOT NULL UNIQUE,
        booked_at TEXT NOT NULL,
        surname TEXT NOT NULL,
        name TEXT NOT NULL,
        phone TEXT NOT NULL,
        email TEXT,
        arrival TEXT NOT NULL,
        departure TEXT NOT NULL,
        party_size INTEGER NOT NULL,
        nights INTEGER NOT NULL,
        total_amount REAL NOT NULL,
        deposit REAL NOT NULL,
        status TEXT NOT NULL,
        room_id INTEGER NOT NULL REFERENCES rooms(id)
    )";

/// Index speeding up per-room overlap checks.
pub const CREATE_RESERVATION_ROOM_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_room ON reservations(room_id)";

/// Index speeding up arrival-range reporting queries.
pub const CREATE_RESERVATION_ARRIVAL_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_arrival ON reservations(arrival)";

/// Index speeding up status-filtered lifecycle queries.
pub const CREATE_RESERVATION_STATUS_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_status ON reservations(status)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// Datetime storage format for the `booked_at`, `arrival`, and `departure`
/// columns.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date storage format for the `last_renovated` and `created_at` columns.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
