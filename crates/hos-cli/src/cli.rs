//! CLI definition using clap

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use hos_domain::service::{CycleRule, TimelineLayout};
use hos_types::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hos-logbook")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Generate FMCSA-style driver's daily logs for a truck trip")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output (debug logging on stderr)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Mapbox access token (overrides HOS_MAPBOX_TOKEN and config)
    #[arg(long, global = true)]
    pub token: Option<String>,
}

/// Options shared by the log-producing commands
#[derive(Args, Debug, Clone, Default)]
pub struct TripOptions {
    /// First log date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Truck / tractor and trailer numbers
    #[arg(long)]
    pub truck: Option<String>,

    /// Carrier name
    #[arg(long)]
    pub carrier: Option<String>,

    /// DVL or manifest number
    #[arg(long)]
    pub manifest: Option<String>,

    /// Shipper and commodity
    #[arg(long)]
    pub commodity: Option<String>,

    /// Cycle rule (70 or 60). Uses config value if not specified.
    #[arg(long)]
    pub cycle_rule: Option<CycleRule>,

    /// Timeline layout (driving-exclusive, overlapping)
    #[arg(long)]
    pub layout: Option<TimelineLayout>,

    /// Also save the result as JSON to this path
    #[arg(long)]
    pub save: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Route a trip and generate its daily logs
    Plan {
        /// Waypoints as "lat,lng;lat,lng[;lat,lng]". With three or more the
        /// first is the current location, then pickup, ..., dropoff.
        #[arg(allow_hyphen_values = true)]
        locations: String,

        /// Hours already used in the current cycle
        #[arg(long, default_value_t = 0.0)]
        cycle: f64,

        #[command(flatten)]
        trip: TripOptions,
    },

    /// Generate daily logs for a known driving duration (no routing)
    Logs {
        /// Total driving hours
        #[arg(long, allow_hyphen_values = true)]
        duration: f64,

        /// Hours already used in the current cycle
        #[arg(long, default_value_t = 0.0)]
        cycle: f64,

        /// Pickup location as "lat,lng"
        #[arg(long, allow_hyphen_values = true)]
        pickup: String,

        /// Dropoff location as "lat,lng"
        #[arg(long, allow_hyphen_values = true)]
        dropoff: String,

        #[command(flatten)]
        trip: TripOptions,
    },

    /// Export saved logs to Excel (or CSV)
    Export {
        /// Path to JSON file written by `plan --save` or `logs --save`
        input: PathBuf,

        /// Output file path
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Write the hourly grid as CSV instead of Excel
        #[arg(long)]
        csv: bool,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set Mapbox access token
        #[arg(long)]
        set_token: Option<String>,

        /// Set Mapbox API base URL
        #[arg(long)]
        set_base_url: Option<String>,

        /// Set HTTP timeout in seconds
        #[arg(long)]
        set_timeout: Option<u64>,

        /// Set default cycle rule (70 or 60)
        #[arg(long)]
        set_cycle_rule: Option<CycleRule>,

        /// Set default timeline layout
        #[arg(long)]
        set_layout: Option<TimelineLayout>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set default truck / trailer numbers
        #[arg(long)]
        set_truck: Option<String>,

        /// Set default carrier name
        #[arg(long)]
        set_carrier: Option<String>,

        /// Set main office address
        #[arg(long)]
        set_main_office: Option<String>,

        /// Set home terminal address
        #[arg(long)]
        set_home_terminal: Option<String>,

        /// Reset configuration to defaults
        #[arg(long)]
        reset: bool,
    },
}
