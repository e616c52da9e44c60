//! Departures command implementation.

use crate::commands::reservations::print_reservations;
use crate::commands::rooms::OutputFormat;
use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use hotelier::operations::departures_today;

/// List in-progress reservations departing today.
#[derive(Args)]
pub struct DeparturesCommand {
    /// Output format
    #[arg(long, value_enum, default_value = "table", ignore_case = true)]
    pub format: OutputFormat,
}

impl DeparturesCommand {
    /// Execute the departures command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let departures = departures_today(&db).map_err(CliError::from)?;
        print_reservations(&departures, self.format)
    }
}
