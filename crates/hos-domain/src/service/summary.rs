//! Trip totals and the plain-text trip report

use super::hos_rules::{HosRules, HOURS_EPSILON};
use super::rounding::{format_hours, round_to_quarter};
use crate::model::{DailyLog, DutyStatus, TripLogs, TripOutcome, TripParameters, TripSummary};

/// Totals for a finished generation run.
pub fn summarize(
    params: &TripParameters,
    rules: &HosRules,
    logs: &[DailyLog],
    remaining_driving: f64,
    cycle_used_end: f64,
) -> TripSummary {
    let outcome = if params.total_driving_duration_hours <= HOURS_EPSILON {
        TripOutcome::NoDriving
    } else if logs.is_empty() {
        TripOutcome::CycleLimitReached
    } else if remaining_driving > HOURS_EPSILON {
        TripOutcome::CycleExhausted
    } else {
        TripOutcome::Completed
    };

    TripSummary {
        days: logs.len(),
        total_driving_hours: logs.iter().map(|l| l.driving_hours).sum(),
        total_on_duty_hours: logs.iter().map(|l| l.on_duty_hours).sum(),
        total_miles: logs.iter().map(|l| l.total_miles_driving_today).sum(),
        cycle_limit_hours: rules.cycle_limit_hours,
        cycle_used_start: params.initial_cycle_used_hours,
        cycle_used_end: round_to_quarter(cycle_used_end),
        remaining_driving_hours: round_to_quarter(remaining_driving.max(0.0)),
        outcome,
    }
}

/// Render all days as a fixed-width text report with a 24-hour grid per day.
pub fn generate_trip_report(logs: &TripLogs) -> String {
    let summary = &logs.summary;
    let mut report = String::new();
    report.push_str("==================================================\n");
    report.push_str("            Driver's Daily Log Summary            \n");
    report.push_str("==================================================\n\n");

    if let Some(first) = logs.trip_logs.first() {
        report.push_str(&format!("  From:     {}\n", first.from_location));
        report.push_str(&format!("  To:       {}\n", first.to_location));
        report.push_str(&format!("  Truck:    {}\n", first.truck_or_tractor_trailer_numbers));
        report.push_str(&format!("  Carrier:  {}\n\n", first.carrier_name));
    }

    report.push_str(&format!("  Days:            {}\n", summary.days));
    report.push_str(&format!(
        "  Driving:         {}h\n",
        format_hours(summary.total_driving_hours)
    ));
    report.push_str(&format!(
        "  On duty:         {}h\n",
        format_hours(summary.total_on_duty_hours)
    ));
    report.push_str(&format!("  Miles:           {}\n", summary.total_miles));
    report.push_str(&format!(
        "  Cycle:           {} -> {} / {}h\n",
        format_hours(summary.cycle_used_start),
        format_hours(summary.cycle_used_end),
        format_hours(summary.cycle_limit_hours)
    ));
    if summary.remaining_driving_hours > 0.0 {
        report.push_str(&format!(
            "  Undriven:        {}h\n",
            format_hours(summary.remaining_driving_hours)
        ));
    }
    report.push_str(&format!("  Outcome:         {}\n\n", summary.outcome.label()));

    if logs.trip_logs.is_empty() {
        report.push_str("  No daily logs generated.\n\n");
    } else {
        report.push_str(&format!(
            "{:<12} {:>7} {:>7} {:>7} {:>7} {:>8}  {}\n",
            "Date", "Drive", "OnDuty", "Off", "Sleep", "Miles", "Grid 00-23"
        ));
        report.push_str("-".repeat(80).as_str());
        report.push('\n');
        for log in &logs.trip_logs {
            report.push_str(&format!(
                "{:<12} {:>7} {:>7} {:>7} {:>7} {:>8}  {}\n",
                log.date.format("%Y-%m-%d").to_string(),
                format_hours(log.driving_hours),
                format_hours(log.on_duty_hours),
                format_hours(log.off_duty_hours),
                format_hours(log.sleeper_hours),
                log.total_miles_driving_today,
                log.grid_line()
            ));
        }
        report.push('\n');
        let legend: Vec<String> = DutyStatus::ALL
            .iter()
            .map(|s| format!("{} = {}", s.symbol(), s.label()))
            .collect();
        report.push_str(&format!("  Legend: {}\n", legend.join(", ")));
    }

    report.push_str("==================================================\n");
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::{LogGenerator, TripLocations};
    use chrono::NaiveDate;

    fn run(duration: f64, cycle_used: f64) -> TripLogs {
        let params = TripParameters::new(
            duration,
            cycle_used,
            "40.0,-75.0".parse().unwrap(),
            "41.0,-76.0".parse().unwrap(),
        )
        .unwrap();
        let locations = TripLocations::from_coordinates(params.pickup_location, params.dropoff_location);
        LogGenerator::default()
            .generate(&params, &locations, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
            .unwrap()
    }

    #[test]
    fn test_outcomes() {
        assert_eq!(run(25.0, 0.0).summary.outcome, TripOutcome::Completed);
        assert_eq!(run(10.0, 69.0).summary.outcome, TripOutcome::CycleExhausted);
        assert_eq!(run(10.0, 70.0).summary.outcome, TripOutcome::CycleLimitReached);
        assert_eq!(run(0.0, 0.0).summary.outcome, TripOutcome::NoDriving);
        assert_eq!(run(-4.0, 0.0).summary.outcome, TripOutcome::NoDriving);
    }

    #[test]
    fn test_totals() {
        let summary = run(25.0, 0.0).summary;
        assert_eq!(summary.days, 3);
        assert_eq!(summary.total_driving_hours, 25.0);
        assert_eq!(summary.total_on_duty_hours, 12.5 + 12.5 + 4.5);
        assert_eq!(summary.total_miles, 1250.0);
        assert_eq!(summary.cycle_used_end, 29.5);
        assert_eq!(summary.remaining_driving_hours, 0.0);
    }

    #[test]
    fn test_remaining_after_cycle_exhausted() {
        let summary = run(10.0, 69.0).summary;
        assert_eq!(summary.remaining_driving_hours, 9.0);
        assert_eq!(summary.cycle_used_end, 70.0);
    }

    #[test]
    fn test_report_lists_each_day() {
        let report = generate_trip_report(&run(25.0, 0.0));
        assert!(report.contains("2024-01-01"));
        assert!(report.contains("2024-01-03"));
        assert!(report.contains("completed"));
        assert!(report.contains("DDDDDDDDDDD"));
    }

    #[test]
    fn test_report_for_empty_trip() {
        let report = generate_trip_report(&run(10.0, 70.0));
        assert!(report.contains("No daily logs generated."));
        assert!(report.contains("cycle limit already reached"));
    }
}
