//! Remove-room-type command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use hotelier::operations::delete_room_type;
use hotelier::Database;

/// Remove a room type.
///
/// Refused while any room references the type.
#[derive(Args)]
pub struct RemoveRoomTypeCommand {
    /// Room type code (e.g. STD)
    #[arg(value_name = "CODE")]
    pub code: String,
}

impl RemoveRoomTypeCommand {
    /// Execute the remove-room-type command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let room_type = Database::get_room_type_by_code(db.connection(), &self.code)
            .map_err(CliError::from)?
            .ok_or_else(|| {
                CliError::Library(hotelier::Error::NotFound {
                    resource: format!("room type {}", self.code),
                })
            })?;

        let type_id = room_type.id().ok_or_else(|| {
            CliError::Library(hotelier::Error::NotFound {
                resource: format!("room type {}", self.code),
            })
        })?;
        delete_room_type(&mut db, type_id).map_err(CliError::from)?;

        if !global.quiet {
            println!("Removed room type {}", self.code);
        }
        Ok(())
    }
}
