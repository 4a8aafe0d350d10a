//! Regulatory constants of the simplified hours-of-service model

use serde::{Deserialize, Serialize};

use hos_types::{Error, Result};

pub const CYCLE_LIMIT_HOURS: f64 = 70.0;
pub const MAX_DRIVING_HOURS_PER_DAY: f64 = 11.0;
pub const MAX_ON_DUTY_HOURS_PER_DAY: f64 = 14.0;
pub const OFF_DUTY_HOURS: f64 = 10.0;
pub const FUELING_TIME_HOURS: f64 = 0.5;
pub const PICKUP_DROPOFF_TIME_HOURS: f64 = 1.0;
pub const AVG_DRIVING_SPEED_MPH: f64 = 50.0;
pub const NON_DRIVING_SPEED_MPH: f64 = 2.0;

pub const HOURS_PER_DAY: f64 = 24.0;

/// Tolerance for comparing accumulated hour balances.
pub const HOURS_EPSILON: f64 = 1e-9;

/// Upper bound for any cycle limit: one week of hours.
pub const MAX_CYCLE_LIMIT_HOURS: f64 = 168.0;
/// Smallest daily driving cap, one step of the quarter-hour grid.
pub const MIN_DRIVING_CAP_HOURS: f64 = 0.25;

/// Duty-cycle cap the driver operates under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleRule {
    /// 70 hours in 8 days
    #[default]
    SeventyEightDay,
    /// 60 hours in 7 days
    SixtySevenDay,
}

impl CycleRule {
    pub fn limit_hours(self) -> f64 {
        match self {
            CycleRule::SeventyEightDay => CYCLE_LIMIT_HOURS,
            CycleRule::SixtySevenDay => 60.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CycleRule::SeventyEightDay => "70-hour/8-day",
            CycleRule::SixtySevenDay => "60-hour/7-day",
        }
    }
}

impl std::str::FromStr for CycleRule {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "70" | "70/8" | "seventy_eight_day" => Ok(CycleRule::SeventyEightDay),
            "60" | "60/7" | "sixty_seven_day" => Ok(CycleRule::SixtySevenDay),
            other => Err(format!("unknown cycle rule '{}' (use 70 or 60)", other)),
        }
    }
}

/// How the on-duty block is laid out on the 24-hour timeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineLayout {
    /// The on-duty-not-driving block holds only the non-driving part of the
    /// on-duty time, so the four blocks always fill exactly 24 hours.
    #[default]
    DrivingExclusive,
    /// The on-duty block is the full on-duty time (driving included) placed
    /// after the driving block; long days run past hour 24 and lose sleeper.
    Overlapping,
}

impl std::str::FromStr for TimelineLayout {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "driving_exclusive" | "exclusive" => Ok(TimelineLayout::DrivingExclusive),
            "overlapping" => Ok(TimelineLayout::Overlapping),
            other => Err(format!(
                "unknown timeline layout '{}' (use driving-exclusive or overlapping)",
                other
            )),
        }
    }
}

/// Full parameter set for the log generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HosRules {
    pub cycle_limit_hours: f64,
    pub max_driving_hours_per_day: f64,
    pub max_on_duty_hours_per_day: f64,
    pub off_duty_hours: f64,
    pub fueling_time_hours: f64,
    pub pickup_dropoff_time_hours: f64,
    pub avg_driving_speed_mph: f64,
    pub non_driving_speed_mph: f64,
    pub layout: TimelineLayout,
}

impl Default for HosRules {
    fn default() -> Self {
        Self {
            cycle_limit_hours: CYCLE_LIMIT_HOURS,
            max_driving_hours_per_day: MAX_DRIVING_HOURS_PER_DAY,
            max_on_duty_hours_per_day: MAX_ON_DUTY_HOURS_PER_DAY,
            off_duty_hours: OFF_DUTY_HOURS,
            fueling_time_hours: FUELING_TIME_HOURS,
            pickup_dropoff_time_hours: PICKUP_DROPOFF_TIME_HOURS,
            avg_driving_speed_mph: AVG_DRIVING_SPEED_MPH,
            non_driving_speed_mph: NON_DRIVING_SPEED_MPH,
            layout: TimelineLayout::default(),
        }
    }
}

impl HosRules {
    pub fn with_cycle_rule(mut self, rule: CycleRule) -> Self {
        self.cycle_limit_hours = rule.limit_hours();
        self
    }

    pub fn with_layout(mut self, layout: TimelineLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Fixed non-driving on-duty time added to every day.
    pub fn non_driving_work_hours(&self) -> f64 {
        self.fueling_time_hours + self.pickup_dropoff_time_hours
    }

    /// Check that the rules describe a schedule the generator can finish.
    ///
    /// Every day then spends at least a quarter hour of a cycle that is at
    /// most a week long, which bounds the number of days.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("cycle_limit_hours", self.cycle_limit_hours),
            ("max_driving_hours_per_day", self.max_driving_hours_per_day),
            ("max_on_duty_hours_per_day", self.max_on_duty_hours_per_day),
            ("off_duty_hours", self.off_duty_hours),
            ("fueling_time_hours", self.fueling_time_hours),
            ("pickup_dropoff_time_hours", self.pickup_dropoff_time_hours),
            ("avg_driving_speed_mph", self.avg_driving_speed_mph),
            ("non_driving_speed_mph", self.non_driving_speed_mph),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
            return Err(Error::InvalidInput(format!(
                "{} must be a finite, non-negative number of hours, got {}",
                name, value
            )));
        }

        if self.cycle_limit_hours <= 0.0 || self.cycle_limit_hours > MAX_CYCLE_LIMIT_HOURS {
            return Err(Error::InvalidInput(format!(
                "cycle limit must be in (0, {}] hours, got {}",
                MAX_CYCLE_LIMIT_HOURS, self.cycle_limit_hours
            )));
        }
        if self.max_driving_hours_per_day < MIN_DRIVING_CAP_HOURS
            || self.max_driving_hours_per_day > self.max_on_duty_hours_per_day
        {
            return Err(Error::InvalidInput(format!(
                "daily driving cap must be between {} and the on-duty cap ({}), got {}",
                MIN_DRIVING_CAP_HOURS, self.max_on_duty_hours_per_day, self.max_driving_hours_per_day
            )));
        }
        if self.max_on_duty_hours_per_day + self.off_duty_hours > HOURS_PER_DAY {
            return Err(Error::InvalidInput(format!(
                "on-duty cap plus off-duty rest exceeds {} hours",
                HOURS_PER_DAY
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let rules = HosRules::default();
        assert_eq!(rules.cycle_limit_hours, 70.0);
        assert_eq!(rules.max_driving_hours_per_day, 11.0);
        assert_eq!(rules.max_on_duty_hours_per_day, 14.0);
        assert_eq!(rules.non_driving_work_hours(), 1.5);
        assert_eq!(rules.layout, TimelineLayout::DrivingExclusive);
    }

    #[test]
    fn test_cycle_rule_parsing() {
        assert_eq!("60".parse::<CycleRule>().unwrap(), CycleRule::SixtySevenDay);
        assert_eq!("70/8".parse::<CycleRule>().unwrap(), CycleRule::SeventyEightDay);
        assert!("80".parse::<CycleRule>().is_err());
        let rules = HosRules::default().with_cycle_rule(CycleRule::SixtySevenDay);
        assert_eq!(rules.cycle_limit_hours, 60.0);
    }

    #[test]
    fn test_validate_accepts_both_cycle_rules() {
        assert!(HosRules::default().validate().is_ok());
        assert!(HosRules::default()
            .with_cycle_rule(CycleRule::SixtySevenDay)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_rejects_unbounded_rules() {
        let cases = [
            HosRules {
                cycle_limit_hours: f64::INFINITY,
                ..Default::default()
            },
            HosRules {
                cycle_limit_hours: 1e300,
                ..Default::default()
            },
            HosRules {
                cycle_limit_hours: 0.0,
                ..Default::default()
            },
            HosRules {
                max_driving_hours_per_day: 1e-12,
                ..Default::default()
            },
            HosRules {
                max_driving_hours_per_day: 15.0,
                ..Default::default()
            },
            HosRules {
                fueling_time_hours: f64::NAN,
                ..Default::default()
            },
            HosRules {
                off_duty_hours: -1.0,
                ..Default::default()
            },
            HosRules {
                off_duty_hours: 12.0,
                ..Default::default()
            },
        ];
        for rules in cases {
            assert!(
                matches!(rules.validate(), Err(Error::InvalidInput(_))),
                "{:?}",
                rules
            );
        }
    }

    #[test]
    fn test_layout_parsing() {
        assert_eq!(
            "driving-exclusive".parse::<TimelineLayout>().unwrap(),
            TimelineLayout::DrivingExclusive
        );
        assert_eq!(
            "Overlapping".parse::<TimelineLayout>().unwrap(),
            TimelineLayout::Overlapping
        );
    }
}
