//! HOS Logbook - Driver's daily log generator
//!
//! Plans a truck trip and produces one hours-of-service log per day.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
