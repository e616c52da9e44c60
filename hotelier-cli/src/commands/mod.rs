//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `rooms`: list rooms with optional type/status filters
//! - `add_room` / `remove_room`: catalog management for rooms
//! - `room_types` / `add_room_type` / `remove_room_type`: type management
//! - `available`: find rooms free for a stay
//! - `book`: book a reservation
//! - `check_in` / `check_out` / `cancel`: lifecycle transitions
//! - `reservations`: list the reservation ledger
//! - `arrivals` / `departures`: today's expected movements
//! - `stats`: aggregate statistics over a date range

pub mod add_room;
pub mod add_room_type;
pub mod arrivals;
pub mod available;
pub mod book;
pub mod cancel;
pub mod check_in;
pub mod check_out;
pub mod departures;
pub mod remove_room;
pub mod remove_room_type;
pub mod reservations;
pub mod room_types;
pub mod rooms;
pub mod stats;

pub use add_room::AddRoomCommand;
pub use add_room_type::AddRoomTypeCommand;
pub use arrivals::ArrivalsCommand;
pub use available::AvailableCommand;
pub use book::BookCommand;
pub use cancel::CancelCommand;
pub use check_in::CheckInCommand;
pub use check_out::CheckOutCommand;
pub use departures::DeparturesCommand;
pub use remove_room::RemoveRoomCommand;
pub use remove_room_type::RemoveRoomTypeCommand;
pub use reservations::ReservationsCommand;
pub use room_types::RoomTypesCommand;
pub use rooms::RoomsCommand;
pub use stats::StatsCommand;
