//! Collaborator traits for routing and reverse geocoding

use hos_types::{Coordinates, Result};

use crate::model::Route;

/// Computes a driving route through an ordered list of waypoints.
pub trait RouteProvider {
    fn route(&self, waypoints: &[Coordinates]) -> Result<Route>;
}

/// Turns a position into a human-readable address.
pub trait ReverseGeocoder {
    fn reverse_geocode(&self, location: Coordinates) -> Result<String>;
}

impl<T: RouteProvider + ?Sized> RouteProvider for &T {
    fn route(&self, waypoints: &[Coordinates]) -> Result<Route> {
        (**self).route(waypoints)
    }
}

impl<T: ReverseGeocoder + ?Sized> ReverseGeocoder for &T {
    fn reverse_geocode(&self, location: Coordinates) -> Result<String> {
        (**self).reverse_geocode(location)
    }
}

impl<T: RouteProvider + ?Sized> RouteProvider for Box<T> {
    fn route(&self, waypoints: &[Coordinates]) -> Result<Route> {
        (**self).route(waypoints)
    }
}

impl<T: ReverseGeocoder + ?Sized> ReverseGeocoder for Box<T> {
    fn reverse_geocode(&self, location: Coordinates) -> Result<String> {
        (**self).reverse_geocode(location)
    }
}
