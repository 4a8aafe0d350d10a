//! Daily log generation
//!
//! Walks the trip one calendar day at a time. Each day gets up to the daily
//! driving cap, a fixed block of non-driving work, the mandatory off-duty
//! rest, and whatever is left as sleeper berth, all bounded by the hours
//! still available in the duty cycle. Each day's split is then projected onto
//! a 24-cell hourly grid.

use chrono::NaiveDate;
use tracing::debug;

use hos_types::{Error, Result};

use super::hos_rules::{HosRules, TimelineLayout, HOURS_EPSILON, HOURS_PER_DAY};
use super::locations::{resolve_locations, TripLocations};
use super::rounding::{format_hours, overlap, round_to_quarter};
use super::summary::summarize;
use crate::model::{DailyLog, DutyStatus, HourlyStatus, TripLogs, TripParameters};
use crate::provider::ReverseGeocoder;

/// One day's split of hours, unrounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayAllocation {
    /// Behind-the-wheel time
    pub driving: f64,
    /// Total on-duty time, driving included
    pub on_duty: f64,
    pub off_duty: f64,
    pub sleeper: f64,
    driving_end: f64,
    on_duty_end: f64,
    off_duty_end: f64,
}

impl DayAllocation {
    /// Allocate the next day, or `None` when no on-duty time is left in the
    /// cycle.
    pub fn plan(remaining_driving: f64, cycle_used: f64, rules: &HosRules) -> Option<Self> {
        if cycle_used >= rules.cycle_limit_hours - HOURS_EPSILON {
            return None;
        }

        let mut driving = remaining_driving.min(rules.max_driving_hours_per_day);
        let mut on_duty =
            (driving + rules.non_driving_work_hours()).min(rules.max_on_duty_hours_per_day);

        let available_cycle = rules.cycle_limit_hours - cycle_used;
        if on_duty > available_cycle {
            on_duty = available_cycle;
            if driving > on_duty {
                driving = on_duty;
            }
        }

        if on_duty <= HOURS_EPSILON {
            return None;
        }

        let on_duty_block = match rules.layout {
            TimelineLayout::DrivingExclusive => on_duty - driving,
            TimelineLayout::Overlapping => on_duty,
        };
        let driving_end = driving;
        let on_duty_end = driving_end + on_duty_block;
        let off_duty_end = on_duty_end + rules.off_duty_hours;
        let sleeper = (HOURS_PER_DAY - off_duty_end).max(0.0);

        Some(Self {
            driving,
            on_duty,
            off_duty: rules.off_duty_hours,
            sleeper,
            driving_end,
            on_duty_end,
            off_duty_end,
        })
    }

    /// Lengths of the driving, on-duty, off-duty and sleeper blocks as laid
    /// out on the timeline.
    pub fn block_lengths(&self) -> [f64; 4] {
        [
            self.driving_end,
            self.on_duty_end - self.driving_end,
            self.off_duty_end - self.on_duty_end,
            self.sleeper,
        ]
    }

    /// Project the day onto 24 hourly cells.
    ///
    /// Each hour takes the status it overlaps most. Ties go to the earlier
    /// entry of: driving, sleeper, on duty, off duty.
    pub fn hourly_statuses(&self) -> Vec<HourlyStatus> {
        (0..24u8)
            .map(|hour| {
                let start = f64::from(hour);
                let end = start + 1.0;
                let candidates = [
                    (DutyStatus::Driving, overlap(start, end, 0.0, self.driving_end)),
                    (
                        DutyStatus::Sleeper,
                        overlap(start, end, self.off_duty_end, HOURS_PER_DAY),
                    ),
                    (
                        DutyStatus::OnDutyNotDriving,
                        overlap(start, end, self.driving_end, self.on_duty_end),
                    ),
                    (
                        DutyStatus::OffDuty,
                        overlap(start, end, self.on_duty_end, self.off_duty_end),
                    ),
                ];

                let (status, max_overlap) = candidates
                    .into_iter()
                    .fold(candidates[0], |best, candidate| {
                        if candidate.1 > best.1 {
                            candidate
                        } else {
                            best
                        }
                    });

                HourlyStatus {
                    hour,
                    status,
                    fraction: round_to_quarter(max_overlap),
                }
            })
            .collect()
    }
}

/// Generates daily logs under a fixed set of rules.
#[derive(Debug, Clone, Default)]
pub struct LogGenerator {
    rules: HosRules,
}

impl LogGenerator {
    pub fn new(rules: HosRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &HosRules {
        &self.rules
    }

    /// Produce one log per day until the driving is done or the cycle is
    /// used up.
    pub fn generate(
        &self,
        params: &TripParameters,
        locations: &TripLocations,
        start_date: NaiveDate,
    ) -> Result<TripLogs> {
        self.rules.validate()?;

        let limit = self.rules.cycle_limit_hours;
        let mut remaining = params.total_driving_duration_hours;
        let mut cycle_used = params.initial_cycle_used_hours;
        let mut date = start_date;
        let mut logs = Vec::new();

        while remaining > HOURS_EPSILON {
            let Some(day) = DayAllocation::plan(remaining, cycle_used, &self.rules) else {
                break;
            };
            if !logs.is_empty() {
                date = date.succ_opt().ok_or_else(|| {
                    Error::DateOutOfRange(format!("no calendar day after {}", date))
                })?;
            }

            let next_remaining = remaining - day.driving;
            let next_cycle_used = cycle_used + day.on_duty;
            ensure_progress(
                logs.len() + 1,
                limit,
                (remaining, cycle_used),
                (next_remaining, next_cycle_used),
            )?;

            debug!(
                date = %date,
                driving = day.driving,
                on_duty = day.on_duty,
                sleeper = day.sleeper,
                cycle_used,
                "allocated day"
            );
            logs.push(self.build_log(&day, date, cycle_used, params, locations));

            remaining = next_remaining;
            cycle_used = next_cycle_used;
        }

        let summary = summarize(params, &self.rules, &logs, remaining, cycle_used);
        Ok(TripLogs {
            trip_logs: logs,
            summary,
        })
    }

    fn build_log(
        &self,
        day: &DayAllocation,
        date: NaiveDate,
        cycle_used: f64,
        params: &TripParameters,
        locations: &TripLocations,
    ) -> DailyLog {
        let rules = &self.rules;
        let driving_hours = round_to_quarter(day.driving);
        let on_duty_hours = round_to_quarter(day.on_duty);
        let off_duty_hours = round_to_quarter(day.off_duty);
        let sleeper_hours = round_to_quarter(day.sleeper);

        let miles_driven = round_to_quarter(day.driving * rules.avg_driving_speed_mph);
        let total_mileage = round_to_quarter(
            miles_driven + rules.non_driving_work_hours() * rules.non_driving_speed_mph,
        );

        let remarks = vec![
            "Log starts at 00:00".to_string(),
            format!("From: {}", locations.from_address),
            format!("To: {}", locations.to_address),
            format!(
                "Driving: {}h, On Duty: {}h, Off Duty: {}h, Sleeper: {}h",
                format_hours(driving_hours),
                format_hours(on_duty_hours),
                format_hours(off_duty_hours),
                format_hours(sleeper_hours)
            ),
            format!(
                "Cycle used so far: {} / {}",
                format_hours(round_to_quarter(cycle_used)),
                format_hours(rules.cycle_limit_hours)
            ),
        ];

        let meta = &params.metadata;
        DailyLog {
            date,
            driving_hours,
            on_duty_hours,
            off_duty_hours,
            sleeper_hours,
            total_miles_driving_today: miles_driven,
            total_mileage_today: total_mileage,
            from_location: locations.from_address.clone(),
            to_location: locations.to_address.clone(),
            truck_or_tractor_trailer_numbers: meta.truck_info.clone(),
            carrier_name: meta.carrier_info.clone(),
            main_office_address: meta.main_office_address().to_string(),
            home_terminal_address: meta.home_terminal_address().to_string(),
            shipping_documents: meta.shipping_info.clone(),
            remarks,
            log_data: day.hourly_statuses(),
        }
    }
}

/// Fail when a day reduces neither the driving left nor the cycle room.
///
/// `before` and `after` are `(remaining_driving, cycle_used)` pairs.
fn ensure_progress(day: usize, limit: f64, before: (f64, f64), after: (f64, f64)) -> Result<()> {
    let (remaining, cycle_used) = before;
    let (next_remaining, next_cycle_used) = after;
    if next_remaining < remaining || limit - next_cycle_used < limit - cycle_used {
        return Ok(());
    }
    Err(Error::InvariantViolation(format!(
        "day {} made no progress (remaining {:.4}h, cycle used {:.4}h)",
        day, remaining, cycle_used
    )))
}

/// Resolve both addresses, then generate the trip's logs.
pub fn generate_trip_logs<G: ReverseGeocoder + ?Sized>(
    params: &TripParameters,
    geocoder: &G,
    start_date: NaiveDate,
    rules: &HosRules,
) -> Result<TripLogs> {
    let locations = resolve_locations(geocoder, params.pickup_location, params.dropoff_location);
    LogGenerator::new(*rules).generate(params, &locations, start_date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exclusive() -> HosRules {
        HosRules::default()
    }

    fn overlapping() -> HosRules {
        HosRules::default().with_layout(TimelineLayout::Overlapping)
    }

    #[test]
    fn test_short_day_blocks() {
        let day = DayAllocation::plan(5.0, 0.0, &exclusive()).unwrap();
        assert_eq!(day.driving, 5.0);
        assert_eq!(day.on_duty, 6.5);
        assert_eq!(day.block_lengths(), [5.0, 1.5, 10.0, 7.5]);
    }

    #[test]
    fn test_overlapping_layout_blocks() {
        let day = DayAllocation::plan(5.0, 0.0, &overlapping()).unwrap();
        assert_eq!(day.block_lengths(), [5.0, 6.5, 10.0, 2.5]);

        let long = DayAllocation::plan(20.0, 0.0, &overlapping()).unwrap();
        assert_eq!(long.driving, 11.0);
        assert_eq!(long.on_duty, 12.5);
        assert_eq!(long.sleeper, 0.0);
    }

    #[test]
    fn test_on_duty_capped_at_fourteen() {
        let rules = HosRules {
            fueling_time_hours: 3.0,
            ..exclusive()
        };
        let day = DayAllocation::plan(11.0, 0.0, &rules).unwrap();
        assert_eq!(day.on_duty, 14.0);
        assert_eq!(day.sleeper, 0.0);
    }

    #[test]
    fn test_cycle_clamp_limits_driving() {
        let day = DayAllocation::plan(10.0, 69.0, &exclusive()).unwrap();
        assert_eq!(day.on_duty, 1.0);
        assert_eq!(day.driving, 1.0);
        assert_eq!(day.block_lengths()[1], 0.0);
    }

    #[test]
    fn test_no_day_at_cycle_limit() {
        assert!(DayAllocation::plan(10.0, 70.0, &exclusive()).is_none());
        assert!(DayAllocation::plan(10.0, 75.0, &exclusive()).is_none());
        assert!(DayAllocation::plan(10.0, 70.0 - 1e-12, &exclusive()).is_none());
    }

    #[test]
    fn test_hourly_grid_for_short_day() {
        let day = DayAllocation::plan(5.0, 0.0, &exclusive()).unwrap();
        let grid = day.hourly_statuses();
        assert_eq!(grid.len(), 24);
        for (i, cell) in grid.iter().enumerate() {
            assert_eq!(usize::from(cell.hour), i);
        }
        // [0,5) driving, [5,6.5) on duty, [6.5,16.5) off duty, [16.5,24) sleeper
        assert!(grid[..5].iter().all(|h| h.status == DutyStatus::Driving && h.fraction == 1.0));
        assert_eq!(grid[5].status, DutyStatus::OnDutyNotDriving);
        assert_eq!(grid[5].fraction, 1.0);
        // hour 6 splits 0.5 on duty / 0.5 off duty: on duty wins the tie
        assert_eq!(grid[6].status, DutyStatus::OnDutyNotDriving);
        assert_eq!(grid[6].fraction, 0.5);
        assert!(grid[7..16].iter().all(|h| h.status == DutyStatus::OffDuty));
        // hour 16 splits 0.5 off duty / 0.5 sleeper: sleeper wins the tie
        assert_eq!(grid[16].status, DutyStatus::Sleeper);
        assert_eq!(grid[16].fraction, 0.5);
        assert!(grid[17..].iter().all(|h| h.status == DutyStatus::Sleeper));
    }

    #[test]
    fn test_driving_wins_tie_against_on_duty() {
        let day = DayAllocation::plan(2.5, 0.0, &exclusive()).unwrap();
        let grid = day.hourly_statuses();
        assert_eq!(grid[2].status, DutyStatus::Driving);
        assert_eq!(grid[2].fraction, 0.5);
    }

    #[test]
    fn test_remarks_content() {
        let params = TripParameters::new(
            5.0,
            12.0,
            "40.0,-75.0".parse().unwrap(),
            "41.0,-76.0".parse().unwrap(),
        )
        .unwrap();
        let locations = TripLocations::from_coordinates(params.pickup_location, params.dropoff_location);
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let logs = LogGenerator::default()
            .generate(&params, &locations, date)
            .unwrap();
        let remarks = &logs.trip_logs[0].remarks;
        assert_eq!(remarks[0], "Log starts at 00:00");
        assert_eq!(remarks[1], "From: 40,-75");
        assert_eq!(remarks[2], "To: 41,-76");
        assert_eq!(
            remarks[3],
            "Driving: 5.0h, On Duty: 6.5h, Off Duty: 10.0h, Sleeper: 7.5h"
        );
        assert_eq!(remarks[4], "Cycle used so far: 12.0 / 70.0");
    }

    #[test]
    fn test_mileage() {
        let params = TripParameters::new(
            5.1,
            0.0,
            "40.0,-75.0".parse().unwrap(),
            "41.0,-76.0".parse().unwrap(),
        )
        .unwrap();
        let locations = TripLocations::from_coordinates(params.pickup_location, params.dropoff_location);
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let log = &LogGenerator::default()
            .generate(&params, &locations, date)
            .unwrap()
            .trip_logs[0];
        assert_eq!(log.total_miles_driving_today, 255.0);
        assert_eq!(log.total_mileage_today, 258.0);
        assert_eq!(log.driving_hours, 5.0);
    }

    fn trip(duration: f64) -> (TripParameters, TripLocations) {
        let params = TripParameters::new(
            duration,
            0.0,
            "40.0,-75.0".parse().unwrap(),
            "41.0,-76.0".parse().unwrap(),
        )
        .unwrap();
        let locations = TripLocations::from_coordinates(params.pickup_location, params.dropoff_location);
        (params, locations)
    }

    #[test]
    fn test_stalled_day_is_an_invariant_violation() {
        // 1e300 - 11 == 1e300 and a 1e300h limit does not notice 12.5h either.
        let err = ensure_progress(1, 1e300, (1e300, 0.0), (1e300 - 11.0, 12.5)).unwrap_err();
        assert!(matches!(err, Error::InvariantViolation(_)));
        assert!(err.to_string().contains("day 1 made no progress"));

        assert!(ensure_progress(3, 70.0, (20.0, 10.0), (9.0, 22.5)).is_ok());
        // Cycle-limited day: no driving left to do but cycle room shrinks.
        assert!(ensure_progress(1, 70.0, (5.0, 69.0), (5.0, 70.0)).is_ok());
    }

    #[test]
    fn test_unbounded_rules_rejected_before_generating() {
        let rules = HosRules {
            cycle_limit_hours: f64::INFINITY,
            ..Default::default()
        };
        let (params, locations) = trip(1e17);
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let err = LogGenerator::new(rules)
            .generate(&params, &locations, date)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_huge_duration_stops_at_cycle_limit() {
        let (params, locations) = trip(1e300);
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let logs = LogGenerator::default()
            .generate(&params, &locations, date)
            .unwrap();
        // 5 days of 12.5h then 7.5h
        assert_eq!(logs.trip_logs.len(), 6);
        assert_eq!(logs.summary.cycle_used_end, 70.0);
    }

    #[test]
    fn test_last_calendar_day() {
        let (params, locations) = trip(5.0);
        let logs = LogGenerator::default()
            .generate(&params, &locations, NaiveDate::MAX)
            .unwrap();
        assert_eq!(logs.trip_logs[0].date, NaiveDate::MAX);

        let (params, locations) = trip(25.0);
        let err = LogGenerator::default()
            .generate(&params, &locations, NaiveDate::MAX)
            .unwrap_err();
        assert!(matches!(err, Error::DateOutOfRange(_)));
    }
}
