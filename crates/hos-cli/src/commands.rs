//! Command handlers

use crate::cli::{Cli, Commands, TripOptions};
use crate::output::output_plan;
use chrono::{Local, NaiveDate};
use hos_app::app::{parse_locations, TripPlan, TripPlanner, TripRequest};
use hos_app::config::Config;
use hos_app::export::{export_to_csv, export_to_excel, load_trip_logs};
use hos_app::logging;
use hos_app::providers::{open_geocoder, open_route_provider};
use hos_domain::model::TripMetadata;
use hos_domain::service::{CycleRule, HosRules, TimelineLayout};
use hos_infra::FixedRoute;
use hos_types::{Coordinates, OutputFormat, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    logging::init(cli.verbose);

    let config = Config::load()?;
    let output_format = cli.format.unwrap_or(config.output_format);
    let token = cli.token.as_deref();

    match cli.command {
        Commands::Plan {
            locations,
            cycle,
            trip,
        } => cmd_plan(&config, token, &locations, cycle, &trip, output_format),

        Commands::Logs {
            duration,
            cycle,
            pickup,
            dropoff,
            trip,
        } => cmd_logs(&config, token, duration, cycle, &pickup, &dropoff, &trip, output_format),

        Commands::Export { input, output, csv } => cmd_export(input, output, csv),

        Commands::Config {
            show,
            set_token,
            set_base_url,
            set_timeout,
            set_cycle_rule,
            set_layout,
            set_output,
            set_truck,
            set_carrier,
            set_main_office,
            set_home_terminal,
            reset,
        } => cmd_config(
            ConfigChanges {
                token: set_token,
                base_url: set_base_url,
                timeout_secs: set_timeout,
                cycle_rule: set_cycle_rule,
                layout: set_layout,
                output_format: set_output,
                truck: set_truck,
                carrier: set_carrier,
                main_office: set_main_office,
                home_terminal: set_home_terminal,
            },
            show,
            reset,
        ),
    }
}

/// Rules from config, with per-run overrides
fn rules_for(config: &Config, trip: &TripOptions) -> HosRules {
    let mut rules = config.rules();
    if let Some(rule) = trip.cycle_rule {
        rules = rules.with_cycle_rule(rule);
    }
    if let Some(layout) = trip.layout {
        rules = rules.with_layout(layout);
    }
    rules
}

fn metadata_for(config: &Config, trip: &TripOptions) -> TripMetadata {
    let mut metadata = config.metadata.clone();
    if let Some(ref truck) = trip.truck {
        metadata.truck_info = truck.clone();
    }
    if let Some(ref carrier) = trip.carrier {
        metadata.carrier_info = carrier.clone();
    }
    if let Some(ref manifest) = trip.manifest {
        metadata.shipping_info.dvl_or_manifest_no = manifest.clone();
    }
    if let Some(ref commodity) = trip.commodity {
        metadata.shipping_info.shipper_commodity = commodity.clone();
    }
    metadata
}

fn start_date(trip: &TripOptions) -> NaiveDate {
    trip.start_date
        .unwrap_or_else(|| Local::now().date_naive())
}

fn save_plan(path: Option<&Path>, plan: &TripPlan) -> Result<()> {
    if let Some(path) = path {
        let content = serde_json::to_string_pretty(plan)?;
        std::fs::write(path, content)?;
        eprintln!("Saved to: {}", path.display());
    }
    Ok(())
}

fn cmd_plan(
    config: &Config,
    token: Option<&str>,
    locations: &str,
    cycle: f64,
    trip: &TripOptions,
    output_format: OutputFormat,
) -> Result<()> {
    let waypoints = parse_locations(locations)?;
    let router = open_route_provider(config, token)?;
    let geocoder = open_geocoder(config, token)?;
    let planner = TripPlanner::new(router, geocoder, rules_for(config, trip));

    let request = TripRequest::new(waypoints, cycle, start_date(trip))
        .with_metadata(metadata_for(config, trip));
    debug!(waypoints = request.waypoints.len(), start = %request.start_date, "planning trip");

    let plan = planner.plan(&request)?;
    save_plan(trip.save.as_deref(), &plan)?;
    output_plan(output_format, &plan)
}

#[allow(clippy::too_many_arguments)]
fn cmd_logs(
    config: &Config,
    token: Option<&str>,
    duration: f64,
    cycle: f64,
    pickup: &str,
    dropoff: &str,
    trip: &TripOptions,
    output_format: OutputFormat,
) -> Result<()> {
    let pickup: Coordinates = pickup.parse()?;
    let dropoff: Coordinates = dropoff.parse()?;

    let geocoder = open_geocoder(config, token)?;
    let planner = TripPlanner::new(FixedRoute::new(duration), geocoder, rules_for(config, trip));

    let request = TripRequest::new(vec![pickup, dropoff], cycle, start_date(trip))
        .with_metadata(metadata_for(config, trip));
    let plan = planner.plan(&request)?;
    save_plan(trip.save.as_deref(), &plan)?;
    output_plan(output_format, &plan)
}

fn cmd_export(input: PathBuf, output: Option<PathBuf>, csv: bool) -> Result<()> {
    let logs = load_trip_logs(&input)?;

    let extension = if csv { "csv" } else { "xlsx" };
    let output_path = output.unwrap_or_else(|| {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("logs");
        input.with_file_name(format!("{}.{}", stem, extension))
    });

    if csv {
        export_to_csv(&logs, &output_path)?;
    } else {
        export_to_excel(&logs, &output_path)?;
    }

    println!("Exported to: {}", output_path.display());
    Ok(())
}

/// Values requested by `config --set-*`
#[derive(Debug, Default)]
struct ConfigChanges {
    token: Option<String>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    cycle_rule: Option<CycleRule>,
    layout: Option<TimelineLayout>,
    output_format: Option<OutputFormat>,
    truck: Option<String>,
    carrier: Option<String>,
    main_office: Option<String>,
    home_terminal: Option<String>,
}

impl ConfigChanges {
    /// Apply to `config`; returns whether anything changed.
    fn apply(self, config: &mut Config) -> bool {
        let mut modified = false;

        if let Some(token) = self.token {
            config.mapbox_token = Some(token).filter(|t| !t.trim().is_empty());
            modified = true;
        }

        if let Some(base_url) = self.base_url {
            config.mapbox_base_url = base_url;
            modified = true;
        }

        if let Some(timeout_secs) = self.timeout_secs {
            config.request_timeout_secs = timeout_secs;
            modified = true;
        }

        if let Some(cycle_rule) = self.cycle_rule {
            config.cycle_rule = cycle_rule;
            modified = true;
        }

        if let Some(layout) = self.layout {
            config.timeline_layout = layout;
            modified = true;
        }

        if let Some(output_format) = self.output_format {
            config.output_format = output_format;
            modified = true;
        }

        if let Some(truck) = self.truck {
            config.metadata.truck_info = truck;
            modified = true;
        }

        if let Some(carrier) = self.carrier {
            config.metadata.carrier_info = carrier;
            modified = true;
        }

        if let Some(main_office) = self.main_office {
            config.metadata.main_office_address = Some(main_office);
            modified = true;
        }

        if let Some(home_terminal) = self.home_terminal {
            config.metadata.home_terminal_address = Some(home_terminal);
            modified = true;
        }

        modified
    }
}

fn cmd_config(changes: ConfigChanges, show: bool, reset: bool) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let modified = changes.apply(&mut config);

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trip_options_override_config() {
        let mut config = Config::default();
        config.metadata.truck_info = "CFG-1".to_string();
        config.metadata.carrier_info = "Config Carrier".to_string();

        let trip = TripOptions {
            truck: Some("CLI-2".to_string()),
            manifest: Some("M-77".to_string()),
            cycle_rule: Some(CycleRule::SixtySevenDay),
            ..Default::default()
        };
        let metadata = metadata_for(&config, &trip);
        assert_eq!(metadata.truck_info, "CLI-2");
        assert_eq!(metadata.carrier_info, "Config Carrier");
        assert_eq!(metadata.shipping_info.dvl_or_manifest_no, "M-77");
        assert_eq!(metadata.shipping_info.shipper_commodity, "N/A");

        let rules = rules_for(&config, &trip);
        assert_eq!(rules.cycle_limit_hours, 60.0);
        assert_eq!(rules.layout, TimelineLayout::DrivingExclusive);
    }

    #[test]
    fn test_config_changes() {
        let mut config = Config::default();
        assert!(!ConfigChanges::default().apply(&mut config));

        let changes = ConfigChanges {
            token: Some("pk.new".to_string()),
            layout: Some(TimelineLayout::Overlapping),
            home_terminal: Some("9 Depot Rd".to_string()),
            ..Default::default()
        };
        assert!(changes.apply(&mut config));
        assert_eq!(config.mapbox_token.as_deref(), Some("pk.new"));
        assert_eq!(config.timeline_layout, TimelineLayout::Overlapping);
        assert_eq!(config.metadata.home_terminal_address(), "9 Depot Rd");

        let clear = ConfigChanges {
            token: Some(String::new()),
            ..Default::default()
        };
        assert!(clear.apply(&mut config));
        assert_eq!(config.mapbox_token, None);
    }

    #[test]
    fn test_explicit_start_date_is_used() {
        let trip = TripOptions {
            start_date: NaiveDate::from_ymd_opt(2024, 12, 31),
            ..Default::default()
        };
        assert_eq!(start_date(&trip), NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }
}
