//! Check-in command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use hotelier::operations::check_in;
use hotelier::Database;

/// Check a reservation in.
///
/// Fires only for a confirmed reservation on its arrival day; anything else
/// is reported as a no-op, never an error.
#[derive(Args)]
pub struct CheckInCommand {
    /// Reservation number (e.g. RSV-20250601-001)
    #[arg(value_name = "NUMBER")]
    pub number: String,
}

impl CheckInCommand {
    /// Execute the check-in command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let reservation = Database::get_reservation_by_number(db.connection(), &self.number)
            .map_err(CliError::from)?
            .ok_or_else(|| {
                CliError::Library(hotelier::Error::NotFound {
                    resource: format!("reservation {}", self.number),
                })
            })?;

        let id = reservation.id().ok_or_else(|| {
            CliError::Library(hotelier::Error::NotFound {
                resource: format!("reservation {}", self.number),
            })
        })?;
        let transitioned = check_in(&mut db, id).map_err(CliError::from)?;

        if !global.quiet {
            if transitioned {
                println!("Checked in {}", self.number);
            } else {
                println!(
                    "No change: {} is not a confirmed reservation arriving today",
                    self.number
                );
            }
        }
        Ok(())
    }
}
