//! Trip Service - plan a trip and generate its daily logs
//!
//! The workflow is:
//! 1. Parse the waypoint list
//! 2. Route all waypoints with the routing provider
//! 3. Resolve display addresses for pickup and dropoff
//! 4. Generate one log per day with the domain generator

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use hos_domain::model::{Route, TripLogs, TripMetadata, TripParameters};
use hos_domain::provider::{ReverseGeocoder, RouteProvider};
use hos_domain::service::{resolve_locations, round_to_quarter, HosRules, LogGenerator};
use hos_types::{Coordinates, Error, Result};

/// Parse `"lat,lng;lat,lng[;lat,lng...]"` into waypoints.
pub fn parse_locations(input: &str) -> Result<Vec<Coordinates>> {
    let waypoints = input
        .split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::parse::<Coordinates>)
        .collect::<Result<Vec<_>>>()?;

    if waypoints.len() < 2 {
        return Err(Error::InvalidInput(format!(
            "at least two locations are required, got {}",
            waypoints.len()
        )));
    }
    Ok(waypoints)
}

/// Input for a routed trip
#[derive(Debug, Clone)]
pub struct TripRequest {
    /// Two waypoints are pickup and dropoff. With three or more the first is
    /// the driver's current location and the second is the pickup.
    pub waypoints: Vec<Coordinates>,
    pub initial_cycle_used_hours: f64,
    pub metadata: TripMetadata,
    pub start_date: NaiveDate,
}

impl TripRequest {
    pub fn new(waypoints: Vec<Coordinates>, initial_cycle_used_hours: f64, start_date: NaiveDate) -> Self {
        Self {
            waypoints,
            initial_cycle_used_hours,
            metadata: TripMetadata::default(),
            start_date,
        }
    }

    pub fn with_metadata(mut self, metadata: TripMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    fn has_approach(&self) -> bool {
        self.waypoints.len() >= 3
    }

    fn pickup(&self) -> Option<Coordinates> {
        if self.waypoints.len() < 2 {
            return None;
        }
        let index = if self.has_approach() { 1 } else { 0 };
        self.waypoints.get(index).copied()
    }

    fn dropoff(&self) -> Option<Coordinates> {
        self.waypoints.last().copied()
    }
}

/// A planned trip: route geometry plus the generated logs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripPlan {
    /// GeoJSON geometry of each route, empty when no routing was done
    #[serde(default)]
    pub routes: Vec<Value>,
    /// Hours from the current location to the pickup, quarter-rounded; not
    /// part of the logs
    #[serde(default)]
    pub approach_hours: f64,
    #[serde(flatten)]
    pub logs: TripLogs,
}

/// Plans trips against a routing provider and a reverse geocoder
pub struct TripPlanner<R, G> {
    router: R,
    geocoder: G,
    rules: HosRules,
}

impl<R: RouteProvider, G: ReverseGeocoder> TripPlanner<R, G> {
    pub fn new(router: R, geocoder: G, rules: HosRules) -> Self {
        Self {
            router,
            geocoder,
            rules,
        }
    }

    pub fn rules(&self) -> &HosRules {
        &self.rules
    }

    /// Route the waypoints and generate logs for the pickup-to-dropoff drive.
    pub fn plan(&self, request: &TripRequest) -> Result<TripPlan> {
        let (Some(pickup), Some(dropoff)) = (request.pickup(), request.dropoff()) else {
            return Err(Error::InvalidInput(
                "at least two locations are required".to_string(),
            ));
        };

        let route = self.router.route(&request.waypoints)?;
        let (approach_hours, driving_hours) = split_approach(&route, request);
        debug!(
            legs = route.legs.len(),
            approach_hours, driving_hours, "route received"
        );

        let params = TripParameters::new(
            driving_hours,
            request.initial_cycle_used_hours,
            pickup,
            dropoff,
        )?
        .with_metadata(request.metadata.clone());

        let logs = self.generate(&params, request.start_date)?;
        let routes = if route.geometry.is_null() {
            Vec::new()
        } else {
            vec![route.geometry]
        };
        Ok(TripPlan {
            routes,
            approach_hours: round_to_quarter(approach_hours),
            logs,
        })
    }

    /// Generate logs for a known driving duration without routing.
    pub fn plan_with_duration(&self, params: &TripParameters, start_date: NaiveDate) -> Result<TripPlan> {
        let logs = self.generate(params, start_date)?;
        Ok(TripPlan {
            routes: Vec::new(),
            approach_hours: 0.0,
            logs,
        })
    }

    fn generate(&self, params: &TripParameters, start_date: NaiveDate) -> Result<TripLogs> {
        let locations = resolve_locations(&self.geocoder, params.pickup_location, params.dropoff_location);
        let logs = LogGenerator::new(self.rules).generate(params, &locations, start_date)?;
        info!(
            days = logs.summary.days,
            driving_hours = logs.summary.total_driving_hours,
            outcome = logs.summary.outcome.label(),
            "trip logs generated"
        );
        Ok(logs)
    }
}

/// Split the route into the approach leg and the simulated drive.
///
/// The approach is only separable when the provider returned one leg per
/// waypoint pair.
fn split_approach(route: &Route, request: &TripRequest) -> (f64, f64) {
    let expected_legs = request.waypoints.len().saturating_sub(1);
    if request.has_approach() && route.legs.len() == expected_legs {
        (route.legs[0].duration_hours, route.duration_from(1))
    } else {
        (0.0, route.duration_hours())
    }
}
