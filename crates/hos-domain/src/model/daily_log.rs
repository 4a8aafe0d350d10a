//! Daily log sheet types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{DutyStatus, ShippingDocuments};

/// One cell of the 24-hour grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlyStatus {
    pub hour: u8,
    pub status: DutyStatus,
    /// Quarter-rounded portion of the hour spent in `status`
    pub fraction: f64,
}

/// One driver's daily log (record of duty status).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLog {
    pub date: NaiveDate,
    pub driving_hours: f64,
    pub on_duty_hours: f64,
    pub off_duty_hours: f64,
    pub sleeper_hours: f64,
    pub total_miles_driving_today: f64,
    pub total_mileage_today: f64,
    pub from_location: String,
    pub to_location: String,
    pub truck_or_tractor_trailer_numbers: String,
    pub carrier_name: String,
    pub main_office_address: String,
    pub home_terminal_address: String,
    pub shipping_documents: ShippingDocuments,
    pub remarks: Vec<String>,
    pub log_data: Vec<HourlyStatus>,
}

impl DailyLog {
    /// Number of grid hours assigned to `status`.
    pub fn grid_hours(&self, status: DutyStatus) -> usize {
        self.log_data.iter().filter(|h| h.status == status).count()
    }

    /// Grid rendered as 24 status symbols, hour 0 first.
    pub fn grid_line(&self) -> String {
        self.log_data.iter().map(|h| h.status.symbol()).collect()
    }
}

/// How a generation run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripOutcome {
    /// All driving time was allocated.
    Completed,
    /// Logs were produced, but the cycle ran out before the driving did.
    CycleExhausted,
    /// The driver was already at the cycle limit; no day could start.
    CycleLimitReached,
    /// There was no driving to allocate.
    NoDriving,
}

impl TripOutcome {
    pub fn label(self) -> &'static str {
        match self {
            TripOutcome::Completed => "completed",
            TripOutcome::CycleExhausted => "cycle exhausted before arrival",
            TripOutcome::CycleLimitReached => "cycle limit already reached",
            TripOutcome::NoDriving => "no driving required",
        }
    }
}

/// Totals over all generated days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripSummary {
    pub days: usize,
    pub total_driving_hours: f64,
    pub total_on_duty_hours: f64,
    pub total_miles: f64,
    pub cycle_limit_hours: f64,
    pub cycle_used_start: f64,
    pub cycle_used_end: f64,
    pub remaining_driving_hours: f64,
    pub outcome: TripOutcome,
}

/// Result of one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripLogs {
    pub trip_logs: Vec<DailyLog>,
    pub summary: TripSummary,
}

impl TripLogs {
    pub fn is_empty(&self) -> bool {
        self.trip_logs.is_empty()
    }
}
