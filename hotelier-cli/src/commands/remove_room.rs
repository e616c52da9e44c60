//! Remove-room command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use hotelier::operations::delete_room;
use hotelier::Database;

/// Remove a room from the catalog.
///
/// Refused while the room has upcoming, non-cancelled reservations.
#[derive(Args)]
pub struct RemoveRoomCommand {
    /// Room number (e.g. CH-STD-01-001)
    #[arg(value_name = "NUMBER")]
    pub number: String,
}

impl RemoveRoomCommand {
    /// Execute the remove-room command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let room = Database::get_room_by_number(db.connection(), &self.number)
            .map_err(CliError::from)?
            .ok_or_else(|| {
                CliError::Library(hotelier::Error::NotFound {
                    resource: format!("room {}", self.number),
                })
            })?;

        let room_id = room.id().ok_or_else(|| {
            CliError::Library(hotelier::Error::NotFound {
                resource: format!("room {}", self.number),
            })
        })?;
        delete_room(&mut db, room_id).map_err(CliError::from)?;

        if !global.quiet {
            println!("Removed room {}", self.number);
        }
        Ok(())
    }
}
