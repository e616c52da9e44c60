//! Stats command implementation.
//!
//! This module implements the `stats` command, which prints the aggregate
//! statistics for a date range: revenue, occupancy, rankings, average stay,
//! cancellations, nights sold, and per-month breakdowns.

use crate::error::CliError;
use crate::utils::{format_amount, load_configuration, open_database, parse_date_arg, GlobalOptions};
use clap::Args;
use chrono::{Datelike, Local};
use hotelier::reporting;
use std::io::Write;

/// Report statistics over a date range.
#[derive(Args)]
pub struct StatsCommand {
    /// Start of the range (YYYY-MM-DD), defaults to the first of this month
    #[arg(long, value_name = "DATE")]
    pub from: Option<String>,

    /// End of the range (YYYY-MM-DD), inclusive, defaults to today
    #[arg(long, value_name = "DATE")]
    pub to: Option<String>,
}

impl StatsCommand {
    /// Execute the stats command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let today = Local::now().date_naive();
        let start = match self.from {
            Some(ref value) => parse_date_arg(value)?,
            None => today.with_day(1).unwrap_or(today),
        };
        let end = match self.to {
            Some(ref value) => parse_date_arg(value)?,
            None => today,
        };
        if end < start {
            return Err(CliError::InvalidArguments(
                "--to must not be before --from".to_string(),
            ));
        }

        let revenue = reporting::revenue_between(&db, start, end).map_err(CliError::from)?;
        let occupancy = reporting::occupancy_rate(&db, start, end).map_err(CliError::from)?;
        let most_room = reporting::most_reserved_room(&db, start, end).map_err(CliError::from)?;
        let least_room = reporting::least_reserved_room(&db, start, end).map_err(CliError::from)?;
        let top_type =
            reporting::most_requested_room_type(&db, start, end).map_err(CliError::from)?;
        let top_client = reporting::most_frequent_client(&db, start, end).map_err(CliError::from)?;
        let avg_stay = reporting::average_stay(&db, start, end).map_err(CliError::from)?;
        let cancellations =
            reporting::cancellation_count(&db, start, end).map_err(CliError::from)?;
        let nights = reporting::nights_sold(&db, start, end).map_err(CliError::from)?;
        let by_month = reporting::reservations_by_month(&db, start, end).map_err(CliError::from)?;
        let monthly_occupancy =
            reporting::monthly_occupancy(&db, start, end).map_err(CliError::from)?;

        let stdout = std::io::stdout();
        let mut handle = stdout.lock();

        writeln!(handle, "Statistics {start} .. {end}")?;
        writeln!(handle, "Revenue:             {}", format_amount(revenue))?;
        writeln!(handle, "Occupancy rate:      {occupancy:.2} %")?;
        writeln!(handle, "Most reserved room:  {}", ranking(most_room))?;
        writeln!(handle, "Least reserved room: {}", ranking(least_room))?;
        writeln!(handle, "Top room type:       {}", ranking(top_type))?;
        writeln!(handle, "Top client:          {}", ranking(top_client))?;
        writeln!(handle, "Average stay:        {avg_stay:.1} night(s)")?;
        writeln!(handle, "Cancellations:       {cancellations}")?;
        writeln!(handle, "Nights sold:         {nights}")?;

        if !by_month.is_empty() {
            writeln!(handle, "Reservations by month:")?;
            for (month, count) in &by_month {
                writeln!(handle, "  {month}: {count}")?;
            }
        }
        if !monthly_occupancy.is_empty() {
            writeln!(handle, "Occupancy by month:")?;
            for (month, rate) in &monthly_occupancy {
                writeln!(handle, "  {month}: {rate:.2} %")?;
            }
        }

        Ok(())
    }
}

/// Renders an optional `(label, count)` ranking with a `-` placeholder.
fn ranking(entry: Option<(String, i64)>) -> String {
    entry.map_or_else(
        || "-".to_string(),
        |(label, count)| format!("{label} ({count})"),
    )
}
