//! Provider adapters for routing and geocoding

use hos_domain::provider::{ReverseGeocoder, RouteProvider};
use hos_infra::{CoordinateGeocoder, MapboxClient, MapboxSettings};
use hos_types::{Error, Result};
use tracing::debug;

use crate::config::{Config, TOKEN_ENV_VAR};

/// Build a Mapbox client from config, honoring a command-line token override
pub fn open_mapbox_client(config: &Config, token_override: Option<&str>) -> Result<MapboxClient> {
    let token = config.access_token(token_override).ok_or_else(|| {
        Error::InvalidInput(format!(
            "no Mapbox token configured (use --token, {} or `config --set-token`)",
            TOKEN_ENV_VAR
        ))
    })?;
    let settings = MapboxSettings::new(token)
        .with_base_url(config.mapbox_base_url.clone())
        .with_timeout_secs(config.request_timeout_secs);
    MapboxClient::new(settings)
}

/// Open the routing provider. Routing has no offline fallback.
pub fn open_route_provider(
    config: &Config,
    token_override: Option<&str>,
) -> Result<Box<dyn RouteProvider>> {
    Ok(Box::new(open_mapbox_client(config, token_override)?))
}

/// Open a reverse geocoder: Mapbox when a token is available, otherwise
/// coordinates are printed as-is.
pub fn open_geocoder(config: &Config, token_override: Option<&str>) -> Result<Box<dyn ReverseGeocoder>> {
    if config.access_token(token_override).is_some() {
        return Ok(Box::new(open_mapbox_client(config, token_override)?));
    }
    debug!("no Mapbox token, locations will be shown as coordinates");
    Ok(Box::new(CoordinateGeocoder))
}
