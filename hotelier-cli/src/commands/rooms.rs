//! Rooms command implementation.
//!
//! This module implements the `rooms` command, which displays the room
//! catalog in various formats (table, JSON, CSV), optionally filtered by
//! type label and/or status. The literal `all` on either filter means no
//! filter on that axis.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::{Args, ValueEnum};
use hotelier::{Database, Room, RoomStatus};
use std::io::Write;

/// Column headers for CSV output.
const COLUMN_HEADERS: [&str; 7] = [
    "number",
    "type",
    "floor",
    "capacity",
    "nightly_rate",
    "status",
    "amenities",
];

/// List rooms, optionally filtered by type or status.
#[derive(Args)]
pub struct RoomsCommand {
    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "table",
        env = "HOTELIER_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: OutputFormat,

    /// Filter by room type label ("all" for no filter)
    #[arg(long = "type", value_name = "LABEL")]
    pub type_label: Option<String>,

    /// Filter by status: free, occupied, maintenance, out-of-service
    /// ("all" for no filter)
    #[arg(long, value_name = "STATUS")]
    pub status: Option<String>,
}

/// Output format for list commands.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

/// Parses a CLI status filter, treating `all` as no filter.
pub fn parse_status_filter(value: Option<&str>) -> Result<Option<RoomStatus>, CliError> {
    match value {
        None => Ok(None),
        Some(s) if s.eq_ignore_ascii_case("all") => Ok(None),
        Some(s) => {
            let canonical = s.to_uppercase().replace('-', "_");
            RoomStatus::parse(&canonical)
                .map(Some)
                .map_err(|_| CliError::InvalidArguments(format!("unknown room status: {s}")))
        }
    }
}

impl RoomsCommand {
    /// Execute the rooms command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let type_filter = match self.type_label.as_deref() {
            None => None,
            Some(label) if label.eq_ignore_ascii_case("all") => None,
            Some(label) => Some(label),
        };
        let status_filter = parse_status_filter(self.status.as_deref())?;

        let rooms =
            Database::filter_rooms(db.connection(), type_filter, status_filter).map_err(CliError::from)?;

        match self.format {
            OutputFormat::Table => format_as_table(&rooms)?,
            OutputFormat::Json => format_as_json(&rooms)?,
            OutputFormat::Csv => format_as_csv(&rooms)?,
        }

        Ok(())
    }
}

fn amenities(room: &Room) -> String {
    let mut parts = Vec::new();
    if room.air_conditioning() {
        parts.push("ac");
    }
    if room.balcony() {
        parts.push("balcony");
    }
    if room.ocean_view() {
        parts.push("ocean-view");
    }
    if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join("+")
    }
}

/// Format rooms as a human-readable table.
fn format_as_table(rooms: &[Room]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let header_line = COLUMN_HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(handle, "{header_line}")?;

    for room in rooms {
        writeln!(
            handle,
            "{}\t{}\t{}\t{}\t{:.2}\t{}\t{}",
            room.number().unwrap_or("-"),
            room.room_type().map_or("-", |t| t.label()),
            room.floor(),
            room.effective_capacity(),
            room.nightly_rate(),
            room.status(),
            amenities(room),
        )?;
    }

    Ok(())
}

/// Format rooms as JSON.
fn format_as_json(rooms: &[Room]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let json_data: Vec<serde_json::Value> = rooms
        .iter()
        .map(|room| {
            serde_json::json!({
                "number": room.number(),
                "type": room.room_type().map(|t| t.label()),
                "floor": room.floor(),
                "capacity": room.effective_capacity(),
                "nightly_rate": room.nightly_rate(),
                "status": room.status().as_str(),
                "air_conditioning": room.air_conditioning(),
                "balcony": room.balcony(),
                "ocean_view": room.ocean_view(),
            })
        })
        .collect();

    serde_json::to_writer_pretty(&mut handle, &json_data)
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    writeln!(handle)?;

    Ok(())
}

/// Convert csv::Error to CliError.
pub fn csv_error(e: csv::Error) -> CliError {
    CliError::Io(std::io::Error::other(e))
}

/// Format rooms as CSV.
fn format_as_csv(rooms: &[Room]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let handle = stdout.lock();
    let mut writer = csv::Writer::from_writer(handle);

    writer.write_record(COLUMN_HEADERS).map_err(csv_error)?;

    for room in rooms {
        writer
            .write_record(&[
                room.number().unwrap_or("").to_string(),
                room.room_type().map_or(String::new(), |t| t.label().to_string()),
                room.floor().to_string(),
                room.effective_capacity().to_string(),
                format!("{:.2}", room.nightly_rate()),
                room.status().as_str().to_string(),
                amenities(room),
            ])
            .map_err(csv_error)?;
    }

    writer.flush()?;

    Ok(())
}
