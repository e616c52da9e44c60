//! Add-room-type command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use hotelier::{Database, RoomType};

/// Add or update a room type.
///
/// An existing type with the same code is updated in place.
#[derive(Args)]
pub struct AddRoomTypeCommand {
    /// Unique short code (e.g. STD)
    #[arg(value_name = "CODE")]
    pub code: String,

    /// Display label (e.g. Standard)
    #[arg(long)]
    pub label: String,

    /// Nightly rate
    #[arg(long)]
    pub rate: f64,

    /// Guest capacity
    #[arg(long)]
    pub capacity: u32,

    /// Free-text description
    #[arg(long)]
    pub description: Option<String>,
}

impl AddRoomTypeCommand {
    /// Execute the add-room-type command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let mut room_type = RoomType::new(&self.code, &self.label, self.rate, self.capacity)
            .map_err(|e| CliError::Library(e.into()))?;
        if let Some(ref description) = self.description {
            room_type = room_type.with_description(description.clone());
        }

        // Same code: update in place
        if let Some(existing) = Database::get_room_type_by_code(db.connection(), &self.code)
            .map_err(CliError::from)?
        {
            if let Some(id) = existing.id() {
                room_type = room_type.with_id(id);
            }
        }

        let saved = db.save_room_type(&room_type).map_err(CliError::from)?;

        if !global.quiet {
            println!("Saved room type {} ({})", saved.code(), saved.label());
        }
        Ok(())
    }
}
