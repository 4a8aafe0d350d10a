//! Domain services

pub mod hos_rules;
pub mod locations;
pub mod log_generator;
pub mod rounding;
pub mod summary;

pub use hos_rules::{CycleRule, HosRules, TimelineLayout};
pub use locations::{resolve_address, resolve_locations, TripLocations};
pub use log_generator::{generate_trip_logs, DayAllocation, LogGenerator};
pub use rounding::{format_hours, overlap, round_to_quarter};
pub use summary::{generate_trip_report, summarize};
