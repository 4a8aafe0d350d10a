//! Export of generated logs to spreadsheet formats

mod csv_export;
mod excel;

pub use csv_export::{export_to_csv, GridRow};
pub use excel::export_to_excel;

use std::path::Path;

use hos_domain::model::TripLogs;
use hos_types::Result;

use crate::app::TripPlan;

/// Read logs saved by the `plan` or `logs` command.
///
/// Accepts either a full trip plan or a bare `{trip_logs, summary}` object.
pub fn load_trip_logs(path: &Path) -> Result<TripLogs> {
    let content = std::fs::read_to_string(path)?;
    let plan: TripPlan = serde_json::from_str(&content)?;
    Ok(plan.logs)
}
