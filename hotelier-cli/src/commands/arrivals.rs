//! Arrivals command implementation.

use crate::commands::reservations::print_reservations;
use crate::commands::rooms::OutputFormat;
use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use hotelier::operations::arrivals_today;

/// List confirmed reservations arriving today.
#[derive(Args)]
pub struct ArrivalsCommand {
    /// Output format
    #[arg(long, value_enum, default_value = "table", ignore_case = true)]
    pub format: OutputFormat,
}

impl ArrivalsCommand {
    /// Execute the arrivals command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let arrivals = arrivals_today(&db).map_err(CliError::from)?;
        print_reservations(&arrivals, self.format)
    }
}
