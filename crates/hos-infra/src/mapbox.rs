//! Mapbox Directions and reverse-geocoding client
//!
//! The access token is always supplied by the caller.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use hos_domain::model::{Route, RouteLeg};
use hos_domain::provider::{ReverseGeocoder, RouteProvider};
use hos_types::{Coordinates, Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.mapbox.com";

/// Longest route the directions API reliably serves.
pub const MAX_ROUTE_DISTANCE_MILES: f64 = 2500.0;

const METERS_PER_MILE: f64 = 1609.344;
const SECONDS_PER_HOUR: f64 = 3600.0;

/// Connection settings for [`MapboxClient`]
#[derive(Debug, Clone)]
pub struct MapboxSettings {
    pub access_token: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl MapboxSettings {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

pub struct MapboxClient {
    http: Client,
    settings: MapboxSettings,
}

impl MapboxClient {
    pub fn new(settings: MapboxSettings) -> Result<Self> {
        if settings.access_token.trim().is_empty() {
            return Err(Error::InvalidInput(
                "a Mapbox access token is required".to_string(),
            ));
        }
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| Error::Provider(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { http, settings })
    }

    fn base_url(&self) -> &str {
        self.settings.base_url.trim_end_matches('/')
    }

    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String> {
        let response = self
            .http
            .get(url)
            .query(query)
            .query(&[("access_token", self.settings.access_token.as_str())])
            .send()
            .map_err(|e| Error::Provider(format!("request failed: {}", e.without_url())))?;
        read_body(response)
    }
}

fn read_body(response: Response) -> Result<String> {
    let status = response.status();
    let body = response
        .text()
        .map_err(|e| Error::Provider(format!("failed to read response: {}", e.without_url())))?;
    if !status.is_success() {
        return Err(Error::Provider(format!("Mapbox returned {}: {}", status, body)));
    }
    Ok(body)
}

/// `lng,lat;lng,lat;...` as the Mapbox path expects.
fn waypoint_path(waypoints: &[Coordinates]) -> String {
    waypoints
        .iter()
        .map(|c| format!("{},{}", c.lng, c.lat))
        .collect::<Vec<_>>()
        .join(";")
}

impl RouteProvider for MapboxClient {
    fn route(&self, waypoints: &[Coordinates]) -> Result<Route> {
        if waypoints.len() < 2 {
            return Err(Error::InvalidInput(
                "a route needs at least two waypoints".to_string(),
            ));
        }
        let url = format!(
            "{}/directions/v5/mapbox/driving/{}",
            self.base_url(),
            waypoint_path(waypoints)
        );
        debug!(waypoints = waypoints.len(), "requesting directions");
        let body = self.get(&url, &[("geometries", "geojson")])?;
        let route = parse_directions(&body)?;

        let miles = route.distance_miles();
        if miles > MAX_ROUTE_DISTANCE_MILES {
            warn!(
                miles,
                limit = MAX_ROUTE_DISTANCE_MILES,
                "route is longer than the provider reliably supports"
            );
        }
        Ok(route)
    }
}

impl ReverseGeocoder for MapboxClient {
    fn reverse_geocode(&self, location: Coordinates) -> Result<String> {
        let url = format!(
            "{}/geocoding/v5/mapbox.places/{},{}.json",
            self.base_url(),
            location.lng,
            location.lat
        );
        let body = self.get(&url, &[("types", "address")])?;
        parse_place_name(&body)
    }
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    /// seconds
    duration: f64,
    /// meters
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    geometry: Value,
    #[serde(default)]
    legs: Vec<DirectionsLeg>,
}

#[derive(Debug, Deserialize)]
struct DirectionsLeg {
    duration: f64,
    #[serde(default)]
    distance: f64,
}

/// Convert a Directions API body into a [`Route`] using its first route.
pub fn parse_directions(body: &str) -> Result<Route> {
    let response: DirectionsResponse = serde_json::from_str(body)?;
    let Some(first) = response.routes.into_iter().next() else {
        if let Some(message) = response.message {
            debug!(%message, "directions returned no routes");
        }
        return Err(Error::NoRoute);
    };

    let mut legs: Vec<RouteLeg> = first
        .legs
        .iter()
        .map(|leg| RouteLeg {
            duration_hours: leg.duration / SECONDS_PER_HOUR,
            distance_miles: leg.distance / METERS_PER_MILE,
        })
        .collect();
    if legs.is_empty() {
        legs.push(RouteLeg {
            duration_hours: first.duration / SECONDS_PER_HOUR,
            distance_miles: first.distance / METERS_PER_MILE,
        });
    }

    Ok(Route {
        legs,
        geometry: first.geometry,
    })
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    features: Vec<GeocodingFeature>,
}

#[derive(Debug, Deserialize)]
struct GeocodingFeature {
    place_name: String,
}

/// Extract the first feature's `place_name` from a geocoding body.
pub fn parse_place_name(body: &str) -> Result<String> {
    let response: GeocodingResponse = serde_json::from_str(body)?;
    response
        .features
        .into_iter()
        .next()
        .map(|f| f.place_name)
        .ok_or_else(|| Error::Provider("no address found for location".to_string()))
}
