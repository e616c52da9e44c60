//! Book command implementation.

use crate::error::CliError;
use crate::utils::{format_amount, load_configuration, open_database, parse_datetime_arg, GlobalOptions};
use clap::Args;
use hotelier::operations::book;
use hotelier::{Database, Guest, Reservation};

/// Book a reservation.
#[derive(Args)]
pub struct BookCommand {
    /// Room number (e.g. CH-STD-01-001)
    #[arg(long, value_name = "NUMBER")]
    pub room: String,

    /// Guest surname
    #[arg(long)]
    pub surname: String,

    /// Guest first name
    #[arg(long)]
    pub name: String,

    /// Guest phone (9 digits, prefix 70/75/76/77/78)
    #[arg(long)]
    pub phone: String,

    /// Guest email (optional)
    #[arg(long)]
    pub email: Option<String>,

    /// Arrival (YYYY-MM-DD or YYYY-MM-DDTHH:MM)
    #[arg(long)]
    pub arrival: String,

    /// Departure (YYYY-MM-DD or YYYY-MM-DDTHH:MM)
    #[arg(long)]
    pub departure: String,

    /// Number of guests
    #[arg(long, default_value_t = 1)]
    pub party_size: u32,

    /// Deposit amount (30% to 100% of the total)
    #[arg(long)]
    pub deposit: f64,
}

impl BookCommand {
    /// Execute the book command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;
        let policy = config.booking_policy().map_err(CliError::from)?;

        let room = Database::get_room_by_number(db.connection(), &self.room)
            .map_err(CliError::from)?
            .ok_or_else(|| {
                CliError::Library(hotelier::Error::NotFound {
                    resource: format!("room {}", self.room),
                })
            })?;
        let room_id = room.id().ok_or_else(|| {
            CliError::Library(hotelier::Error::NotFound {
                resource: format!("room {}", self.room),
            })
        })?;

        let guest = Guest::new(&self.surname, &self.name, &self.phone, self.email.clone())
            .map_err(|e| CliError::Library(e.into()))?;

        let arrival = parse_datetime_arg(&self.arrival)?;
        let departure = parse_datetime_arg(&self.departure)?;

        let draft = Reservation::builder(guest, room_id, arrival, departure)
            .party_size(self.party_size)
            .deposit(self.deposit)
            .build()
            .map_err(|e| CliError::Library(e.into()))?;

        let booked = book(&mut db, &policy, &draft).map_err(CliError::from)?;

        if !global.quiet {
            println!(
                "Booked {} in room {} for {} {}: {} night(s), total {}, deposit {}",
                booked.number().unwrap_or("-"),
                self.room,
                booked.guest().name(),
                booked.guest().surname(),
                booked.nights(),
                format_amount(booked.total_amount()),
                format_amount(booked.deposit()),
            );
        }
        Ok(())
    }
}
