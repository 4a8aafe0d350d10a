//! Output formatting module

use hos_app::app::TripPlan;
use hos_domain::model::TripOutcome;
use hos_domain::service::{format_hours, generate_trip_report};
use hos_types::{OutputFormat, Result};

fn cycle_limit_message(plan: &TripPlan) -> String {
    let summary = &plan.logs.summary;
    format!(
        "Cycle limit already reached ({} of {} hours used). No driving is possible until hours are recovered.",
        format_hours(summary.cycle_used_start),
        format_hours(summary.cycle_limit_hours)
    )
}

pub fn output_plan(output_format: OutputFormat, plan: &TripPlan) -> Result<()> {
    let limit_reached = plan.logs.summary.outcome == TripOutcome::CycleLimitReached;

    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(plan)?;
        println!("{}", content);
        if limit_reached {
            eprintln!("{}", cycle_limit_message(plan));
        }
        return Ok(());
    }

    if limit_reached {
        println!("\n{}", cycle_limit_message(plan));
        return Ok(());
    }

    println!("{}", generate_trip_report(&plan.logs));

    if plan.approach_hours > 0.0 {
        println!(
            "Approach to pickup: {}h (not included in the logs)",
            format_hours(plan.approach_hours)
        );
    }

    if plan.logs.summary.outcome == TripOutcome::CycleExhausted {
        println!(
            "Warning: cycle ran out with {}h of driving left",
            format_hours(plan.logs.summary.remaining_driving_hours)
        );
    }

    Ok(())
}
