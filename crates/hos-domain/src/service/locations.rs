//! From/to address resolution with coordinate fallback

use serde::{Deserialize, Serialize};
use tracing::warn;

use hos_types::Coordinates;

use crate::provider::ReverseGeocoder;

/// Display addresses for the two ends of the trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripLocations {
    pub from_address: String,
    pub to_address: String,
}

impl TripLocations {
    /// Use the raw `"lat,lng"` strings as addresses.
    pub fn from_coordinates(pickup: Coordinates, dropoff: Coordinates) -> Self {
        Self {
            from_address: pickup.to_string(),
            to_address: dropoff.to_string(),
        }
    }
}

/// Reverse-geocode `location`, falling back to its `"lat,lng"` form when the
/// lookup fails or returns nothing.
pub fn resolve_address<G: ReverseGeocoder + ?Sized>(geocoder: &G, location: Coordinates) -> String {
    match geocoder.reverse_geocode(location) {
        Ok(address) if !address.trim().is_empty() => address,
        Ok(_) => {
            warn!(%location, "reverse geocoding returned an empty address");
            location.to_string()
        }
        Err(e) => {
            warn!(%location, error = %e, "reverse geocoding failed");
            location.to_string()
        }
    }
}

pub fn resolve_locations<G: ReverseGeocoder + ?Sized>(
    geocoder: &G,
    pickup: Coordinates,
    dropoff: Coordinates,
) -> TripLocations {
    TripLocations {
        from_address: resolve_address(geocoder, pickup),
        to_address: resolve_address(geocoder, dropoff),
    }
}
