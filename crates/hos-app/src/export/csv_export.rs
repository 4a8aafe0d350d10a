//! CSV export: one row per day-hour

use std::path::Path;

use serde::Serialize;

use hos_domain::model::TripLogs;
use hos_types::Result;

/// A single grid cell of a daily log
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridRow {
    pub date: String,
    pub hour: u8,
    pub status: u8,
    pub status_label: &'static str,
    pub fraction: f64,
}

fn grid_rows(logs: &TripLogs) -> impl Iterator<Item = GridRow> + '_ {
    logs.trip_logs.iter().flat_map(|log| {
        let date = log.date.format("%Y-%m-%d").to_string();
        log.log_data.iter().map(move |cell| GridRow {
            date: date.clone(),
            hour: cell.hour,
            status: cell.status.code(),
            status_label: cell.status.label(),
            fraction: cell.fraction,
        })
    })
}

/// Write the hourly grid of every day to a CSV file
pub fn export_to_csv(logs: &TripLogs, output_path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(output_path)?;
    for row in grid_rows(logs) {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
