//! Available command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, parse_datetime_arg, GlobalOptions};
use clap::Args;
use hotelier::operations::find_available_rooms;
use std::io::Write;

/// Find rooms available for a stay.
#[derive(Args)]
pub struct AvailableCommand {
    /// Arrival (YYYY-MM-DD or YYYY-MM-DDTHH:MM)
    #[arg(value_name = "ARRIVAL")]
    pub arrival: String,

    /// Departure (YYYY-MM-DD or YYYY-MM-DDTHH:MM)
    #[arg(value_name = "DEPARTURE")]
    pub departure: String,

    /// Number of guests
    #[arg(long, default_value_t = 1)]
    pub party_size: u32,
}

impl AvailableCommand {
    /// Execute the available command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;
        let policy = config.booking_policy().map_err(CliError::from)?;

        // Apply the same midnight normalization the booking engine uses, so
        // availability and booking agree on date-only input
        let arrival = policy.normalize_arrival(parse_datetime_arg(&self.arrival)?);
        let departure = policy.normalize_departure(parse_datetime_arg(&self.departure)?);

        if departure <= arrival {
            return Err(CliError::InvalidArguments(
                "departure must be after arrival".to_string(),
            ));
        }

        let rooms = find_available_rooms(&db, arrival, departure, self.party_size)
            .map_err(CliError::from)?;

        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "NUMBER\tTYPE\tCAPACITY\tNIGHTLY_RATE")?;
        for room in rooms {
            writeln!(
                handle,
                "{}\t{}\t{}\t{:.2}",
                room.number().unwrap_or("-"),
                room.room_type().map_or("-", |t| t.label()),
                room.effective_capacity(),
                room.nightly_rate(),
            )?;
        }

        Ok(())
    }
}
