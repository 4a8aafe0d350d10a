//! Duty status codes used on the 24-hour log grid

use serde_repr::{Deserialize_repr, Serialize_repr};

/// Duty status of one hour on the log grid, serialized as its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum DutyStatus {
    OffDuty = 0,
    Sleeper = 1,
    Driving = 2,
    OnDutyNotDriving = 3,
}

impl DutyStatus {
    /// Grid rows in the order they appear on a paper log.
    pub const ALL: [DutyStatus; 4] = [
        DutyStatus::OffDuty,
        DutyStatus::Sleeper,
        DutyStatus::Driving,
        DutyStatus::OnDutyNotDriving,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            DutyStatus::OffDuty => "Off Duty",
            DutyStatus::Sleeper => "Sleeper Berth",
            DutyStatus::Driving => "Driving",
            DutyStatus::OnDutyNotDriving => "On Duty (not driving)",
        }
    }

    /// Single-character marker for text grids.
    pub fn symbol(self) -> char {
        match self {
            DutyStatus::OffDuty => '.',
            DutyStatus::Sleeper => 'S',
            DutyStatus::Driving => 'D',
            DutyStatus::OnDutyNotDriving => 'O',
        }
    }
}

impl std::fmt::Display for DutyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_code() {
        let json = serde_json::to_string(&[DutyStatus::Driving, DutyStatus::OffDuty]).unwrap();
        assert_eq!(json, "[2,0]");
        let back: DutyStatus = serde_json::from_str("3").unwrap();
        assert_eq!(back, DutyStatus::OnDutyNotDriving);
    }
}
