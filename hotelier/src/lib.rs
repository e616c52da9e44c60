#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # hotelier
//!
//! A library for hotel room inventory, reservation booking, and occupancy
//! reporting, backed by SQLite.
//!
//! The booking engine is the heart of the crate: it validates guest and
//! stay data, re-checks interval overlaps at commit time, prices the stay,
//! and keeps room status synchronized with the reservation lifecycle — all
//! inside a single transaction per operation.
//!
//! ## Core Types
//!
//! - [`RoomType`], [`Room`], [`RoomStatus`]: the room catalog
//! - [`Guest`], [`Reservation`], [`ReservationStatus`]: the booking domain
//! - [`Database`]: the SQLite storage handle, passed explicitly to every
//!   operation
//! - [`Error`] and [`Result`]: error handling types
//!
//! ## Examples
//!
//! ```
//! use hotelier::{Guest, night_count, overlaps};
//! use chrono::NaiveDate;
//!
//! // Guest fields are validated at construction
//! let guest = Guest::new("Diop", "Awa", "771234567", None).unwrap();
//! assert_eq!(guest.phone(), "771234567");
//!
//! // Half-open stay intervals allow same-day turnover
//! let d = |day: u32, hour: u32| {
//!     NaiveDate::from_ymd_opt(2025, 6, day).unwrap().and_hms_opt(hour, 0, 0).unwrap()
//! };
//! assert!(!overlaps(d(1, 14), d(3, 12), d(3, 12), d(5, 10)));
//! assert_eq!(night_count(d(1, 14), d(3, 12)), 2);
//! ```

pub mod catalog;
pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod numbering;
pub mod operations;
pub mod reporting;
pub mod reservation;

// Re-export key types at crate root for convenience
pub use catalog::{Room, RoomBuilder, RoomStatus, RoomType};
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{
    add_room, book, book_at, cancel, check_in, check_out, delete_room, delete_room_type,
    find_available_rooms, update_room, BookingPolicy,
};
pub use reservation::{
    night_count, overlaps, Guest, Reservation, ReservationBuilder, ReservationStatus,
    ValidationError,
};
