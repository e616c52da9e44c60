//! Reservations command implementation.
//!
//! This module implements the `reservations` command, which displays the
//! reservation ledger in various formats (table, JSON, CSV).

use crate::commands::rooms::{csv_error, OutputFormat};
use crate::error::CliError;
use crate::utils::{
    format_amount, format_optional_datetime, load_configuration, open_database, GlobalOptions,
};
use clap::Args;
use hotelier::{Database, Reservation, ReservationStatus};
use std::io::Write;

/// Column headers for CSV output.
const COLUMN_HEADERS: [&str; 9] = [
    "number",
    "guest",
    "phone",
    "arrival",
    "departure",
    "nights",
    "total_amount",
    "deposit",
    "status",
];

/// List reservations.
#[derive(Args)]
pub struct ReservationsCommand {
    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "table",
        env = "HOTELIER_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: OutputFormat,

    /// Filter by status: confirmed, in-progress, completed, cancelled
    #[arg(long, value_name = "STATUS")]
    pub status: Option<String>,
}

impl ReservationsCommand {
    /// Execute the reservations command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let mut reservations =
            Database::list_reservations(db.connection()).map_err(CliError::from)?;

        if let Some(ref status) = self.status {
            let canonical = status.to_uppercase().replace('-', "_");
            let wanted = ReservationStatus::parse(&canonical).map_err(|_| {
                CliError::InvalidArguments(format!("unknown reservation status: {status}"))
            })?;
            reservations.retain(|r| r.status() == wanted);
        }

        print_reservations(&reservations, self.format)
    }
}

/// Render a list of reservations in the requested format.
pub fn print_reservations(
    reservations: &[Reservation],
    format: OutputFormat,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Table => format_as_table(reservations),
        OutputFormat::Json => format_as_json(reservations),
        OutputFormat::Csv => format_as_csv(reservations),
    }
}

fn guest_display(reservation: &Reservation) -> String {
    format!(
        "{} {}",
        reservation.guest().name(),
        reservation.guest().surname()
    )
}

/// Format reservations as a human-readable table.
fn format_as_table(reservations: &[Reservation]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let header_line = COLUMN_HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(handle, "{header_line}")?;

    for res in reservations {
        writeln!(
            handle,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            res.number().unwrap_or("-"),
            guest_display(res),
            res.guest().phone(),
            format_optional_datetime(Some(res.arrival())),
            format_optional_datetime(Some(res.departure())),
            res.nights(),
            format_amount(res.total_amount()),
            format_amount(res.deposit()),
            res.status(),
        )?;
    }

    Ok(())
}

/// Format reservations as JSON.
fn format_as_json(reservations: &[Reservation]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let json_data: Vec<serde_json::Value> = reservations
        .iter()
        .map(|res| {
            serde_json::json!({
                "number": res.number(),
                "guest": guest_display(res),
                "phone": res.guest().phone(),
                "email": res.guest().email(),
                "arrival": format_optional_datetime(Some(res.arrival())),
                "departure": format_optional_datetime(Some(res.departure())),
                "party_size": res.party_size(),
                "nights": res.nights(),
                "total_amount": res.total_amount(),
                "deposit": res.deposit(),
                "status": res.status().as_str(),
            })
        })
        .collect();

    serde_json::to_writer_pretty(&mut handle, &json_data)
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    writeln!(handle)?;

    Ok(())
}

/// Format reservations as CSV.
fn format_as_csv(reservations: &[Reservation]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let handle = stdout.lock();
    let mut writer = csv::Writer::from_writer(handle);

    writer.write_record(COLUMN_HEADERS).map_err(csv_error)?;

    for res in reservations {
        writer
            .write_record(&[
                res.number().unwrap_or("").to_string(),
                guest_display(res),
                res.guest().phone().to_string(),
                format_optional_datetime(Some(res.arrival())),
                format_optional_datetime(Some(res.departure())),
                res.nights().to_string(),
                format_amount(res.total_amount()),
                format_amount(res.deposit()),
                res.status().as_str().to_string(),
            ])
            .map_err(csv_error)?;
    }

    writer.flush()?;

    Ok(())
}
