//! Providers that work without network access

use hos_domain::model::Route;
use hos_domain::provider::{ReverseGeocoder, RouteProvider};
use hos_types::{Coordinates, Error, Result};

/// Route provider that always reports the same driving duration.
#[derive(Debug, Clone, Copy)]
pub struct FixedRoute {
    pub duration_hours: f64,
}

impl FixedRoute {
    pub fn new(duration_hours: f64) -> Self {
        Self { duration_hours }
    }
}

impl RouteProvider for FixedRoute {
    fn route(&self, waypoints: &[Coordinates]) -> Result<Route> {
        if waypoints.len() < 2 {
            return Err(Error::InvalidInput(
                "a route needs at least two waypoints".to_string(),
            ));
        }
        Ok(Route::from_duration(self.duration_hours))
    }
}

/// Geocoder that returns the `"lat,lng"` form of every location.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoordinateGeocoder;

impl ReverseGeocoder for CoordinateGeocoder {
    fn reverse_geocode(&self, location: Coordinates) -> Result<String> {
        Ok(location.to_string())
    }
}
