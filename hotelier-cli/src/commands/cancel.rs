//! Cancel command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use hotelier::operations::cancel;
use hotelier::Database;

/// Cancel a confirmed reservation.
#[derive(Args)]
pub struct CancelCommand {
    /// Reservation number (e.g. RSV-20250601-001)
    #[arg(value_name = "NUMBER")]
    pub number: String,
}

impl CancelCommand {
    /// Execute the cancel command.
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
        let cancelled = cancel(&mut db, id).map_err(CliError::from)?;

        if !global.quiet {
            if cancelled {
                println!("Cancelled {}", self.number);
            } else {
                println!("No change: {} is not a confirmed reservation", self.number);
            }
        }
        Ok(())
    }
}
