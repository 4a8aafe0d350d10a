//! Route returned by a routing provider

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One waypoint-to-waypoint leg of a route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteLeg {
    pub duration_hours: f64,
    pub distance_miles: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub legs: Vec<RouteLeg>,
    /// GeoJSON geometry for map display; `Null` when the provider has none
    #[serde(default)]
    pub geometry: Value,
}

impl Route {
    /// A single-leg route with no geometry.
    pub fn from_duration(duration_hours: f64) -> Self {
        Self {
            legs: vec![RouteLeg {
                duration_hours,
                distance_miles: 0.0,
            }],
            geometry: Value::Null,
        }
    }

    pub fn duration_hours(&self) -> f64 {
        self.legs.iter().map(|l| l.duration_hours).sum()
    }

    pub fn distance_miles(&self) -> f64 {
        self.legs.iter().map(|l| l.distance_miles).sum()
    }

    /// Duration of the legs starting at `leg_index`.
    pub fn duration_from(&self, leg_index: usize) -> f64 {
        self.legs
            .iter()
            .skip(leg_index)
            .map(|l| l.duration_hours)
            .sum()
    }
}
