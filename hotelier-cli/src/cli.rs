//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AddRoomCommand, AddRoomTypeCommand, ArrivalsCommand, AvailableCommand, BookCommand,
    CancelCommand, CheckInCommand, CheckOutCommand, DeparturesCommand, RemoveRoomCommand,
    RemoveRoomTypeCommand, ReservationsCommand, RoomTypesCommand, RoomsCommand, StatsCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line front-end for the hotelier reservation system.
#[derive(Parser)]
#[command(name = "hotelier")]
#[command(version, about = "Manage hotel rooms and reservations", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "HOTELIER_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "HOTELIER_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization
    #[arg(long, global = true, env = "HOTELIER_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// List rooms, optionally filtered by type or status
    Rooms(RoomsCommand),

    /// Add a room to the catalog (auto-numbered)
    AddRoom(AddRoomCommand),

    /// Remove a room from the catalog
    RemoveRoom(RemoveRoomCommand),

    /// List room types
    RoomTypes(RoomTypesCommand),

    /// Add or update a room type
    AddRoomType(AddRoomTypeCommand),

    /// Remove a room type
    RemoveRoomType(RemoveRoomTypeCommand),

    /// Find rooms available for a stay
    Available(AvailableCommand),

    /// Book a reservation
    Book(BookCommand),

    /// Check a reservation in
    CheckIn(CheckInCommand),

    /// Check a reservation out
    CheckOut(CheckOutCommand),

    /// Cancel a confirmed reservation
    Cancel(CancelCommand),

    /// List reservations
    Reservations(ReservationsCommand),

    /// List confirmed arrivals for today
    Arrivals(ArrivalsCommand),

    /// List in-progress departures for today
    Departures(DeparturesCommand),

    /// Report statistics over a date range
    Stats(StatsCommand),
}
