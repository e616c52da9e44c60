//! Add-room command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, parse_date_arg, GlobalOptions};
use clap::Args;
use hotelier::operations::add_room;
use hotelier::{Database, Room};

/// Add a room to the catalog.
///
/// The room number is generated from the type code and floor unless one is
/// supplied explicitly.
#[derive(Args)]
pub struct AddRoomCommand {
    /// Room type code (e.g. STD)
    #[arg(long = "type", value_name = "CODE")]
    pub type_code: String,

    /// Floor number
    #[arg(long)]
    pub floor: i32,

    /// Explicit room number (generated when omitted)
    #[arg(long, value_name = "NUMBER")]
    pub number: Option<String>,

    /// The room has air conditioning
    #[arg(long)]
    pub air_conditioning: bool,

    /// The room has a balcony
    #[arg(long)]
    pub balcony: bool,

    /// The room has an ocean view
    #[arg(long)]
    pub ocean_view: bool,

    /// Last renovation date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub last_renovated: Option<String>,
}

impl AddRoomCommand {
    /// Execute the add-room command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let room_type = Database::get_room_type_by_code(db.connection(), &self.type_code)
            .map_err(CliError::from)?
            .ok_or_else(|| {
                CliError::InvalidArguments(format!("unknown room type code: {}", self.type_code))
            })?;

        let mut builder = Room::builder(room_type.id().unwrap_or_default())
            .floor(self.floor)
            .air_conditioning(self.air_conditioning)
            .balcony(self.balcony)
            .ocean_view(self.ocean_view);
        if let Some(ref number) = self.number {
            builder = builder.number(number.clone());
        }
        if let Some(ref date) = self.last_renovated {
            builder = builder.last_renovated(parse_date_arg(date)?);
        }
        let room = builder
            .build()
            .map_err(|e| CliError::Library(e.into()))?;

        let added = add_room(&mut db, &room).map_err(CliError::from)?;

        if !global.quiet {
            println!("Added {added}");
        }
        Ok(())
    }
}
