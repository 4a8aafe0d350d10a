//! Infrastructure layer - routing and geocoding providers

pub mod mapbox;
pub mod offline;

pub use mapbox::{MapboxClient, MapboxSettings};
pub use offline::{CoordinateGeocoder, FixedRoute};
