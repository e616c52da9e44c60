//! Main entry point for the hotelier CLI.
//!
//! This is the command-line interface for the hotelier reservation system.
//! It provides commands for managing the room catalog, querying
//! availability, booking stays, driving the check-in/check-out lifecycle,
//! and reporting statistics.

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    let _logger = hotelier::init_logger(cli.verbose, cli.quiet);

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
        disable_autoinit: cli.disable_autoinit,
    };

    let result = match cli.command {
        cli::Command::Rooms(cmd) => cmd.execute(&global),
        cli::Command::AddRoom(cmd) => cmd.execute(&global),
        cli::Command::RemoveRoom(cmd) => cmd.execute(&global),
        cli::Command::RoomTypes(cmd) => cmd.execute(&global),
        cli::Command::AddRoomType(cmd) => cmd.execute(&global),
        cli::Command::RemoveRoomType(cmd) => cmd.execute(&global),
        cli::Command::Available(cmd) => cmd.execute(&global),
        cli::Command::Book(cmd) => cmd.execute(&global),
        cli::Command::CheckIn(cmd) => cmd.execute(&global),
        cli::Command::CheckOut(cmd) => cmd.execute(&global),
        cli::Command::Cancel(cmd) => cmd.execute(&global),
        cli::Command::Reservations(cmd) => cmd.execute(&global),
        cli::Command::Arrivals(cmd) => cmd.execute(&global),
        cli::Command::Departures(cmd) => cmd.execute(&global),
        cli::Command::Stats(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
