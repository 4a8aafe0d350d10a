//! Shared value types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// A WGS84 position, latitude first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Build a coordinate pair, rejecting non-finite or out-of-range values.
    pub fn new(lat: f64, lng: f64) -> Result<Self, Error> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(Error::InvalidInput(format!(
                "coordinates must be finite numbers, got {},{}",
                lat, lng
            )));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(Error::InvalidInput(format!(
                "latitude {} is outside -90..90",
                lat
            )));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(Error::InvalidInput(format!(
                "longitude {} is outside -180..180",
                lng
            )));
        }
        Ok(Self { lat, lng })
    }
}

/// Parses `"lat,lng"`, surrounding whitespace allowed.
impl FromStr for Coordinates {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',');
        let (Some(lat), Some(lng), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(Error::InvalidInput(format!(
                "expected \"lat,lng\", got \"{}\"",
                s.trim()
            )));
        };
        let parse = |value: &str| {
            value.trim().parse::<f64>().map_err(|_| {
                Error::InvalidInput(format!("\"{}\" is not a number", value.trim()))
            })
        };
        Coordinates::new(parse(lat)?, parse(lng)?)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}
