//! Application use cases

pub mod trip_service;

pub use trip_service::{parse_locations, TripPlan, TripPlanner, TripRequest};
