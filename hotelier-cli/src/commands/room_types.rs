//! Room-types command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use hotelier::Database;
use std::io::Write;

/// List room types.
#[derive(Args)]
pub struct RoomTypesCommand {}

impl RoomTypesCommand {
    /// Execute the room-types command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let types = Database::list_room_types(db.connection()).map_err(CliError::from)?;

        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "CODE\tLABEL\tNIGHTLY_RATE\tCAPACITY\tDESCRIPTION")?;
        for t in types {
            writeln!(
                handle,
                "{}\t{}\t{:.2}\t{}\t{}",
                t.code(),
                t.label(),
                t.nightly_rate(),
                t.capacity(),
                t.description().unwrap_or("-"),
            )?;
        }

        Ok(())
    }
}
