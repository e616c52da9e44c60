//! High-level operations: availability, booking, lifecycle, and catalog
//! management.
//!
//! Each mutating operation acquires its own transactional scope, performs
//! its reads and writes, and commits or rolls back before returning. Every
//! now-dependent operation has an `*_at` variant taking an explicit instant
//! for deterministic tests; the plain variants stamp the local wall clock.

mod availability;
mod booking;
mod catalog;
mod lifecycle;

pub use availability::find_available_rooms;
pub use booking::{book, book_at, BookingPolicy};
pub use catalog::{
    add_room, add_room_at, delete_room, delete_room_at, delete_room_type, update_room,
    update_room_at,
};
pub use lifecycle::{
    arrivals_on, arrivals_today, cancel, check_in, check_in_at, check_out, check_out_at,
    departures_on, departures_today,
};
