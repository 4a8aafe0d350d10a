//! Trip input types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use hos_types::{Coordinates, Error, Result};

/// Placeholder written into log fields the caller did not provide.
pub const NOT_AVAILABLE: &str = "N/A";

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

/// Shipping document numbers printed on each daily log.
///
/// Keys beyond the two recognized ones are kept as-is so callers can attach
/// their own document references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingDocuments {
    #[serde(default = "not_available")]
    pub dvl_or_manifest_no: String,

    #[serde(default = "not_available")]
    pub shipper_commodity: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ShippingDocuments {
    fn default() -> Self {
        Self {
            dvl_or_manifest_no: not_available(),
            shipper_commodity: not_available(),
            extra: Map::new(),
        }
    }
}

/// Carrier and vehicle details copied onto every daily log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripMetadata {
    /// Truck/tractor and trailer numbers or license plates
    #[serde(default = "not_available")]
    pub truck_info: String,

    /// Name of carrier
    #[serde(default = "not_available")]
    pub carrier_info: String,

    /// Falls back to `carrier_info` when absent
    #[serde(default)]
    pub main_office_address: Option<String>,

    /// Falls back to `carrier_info` when absent
    #[serde(default)]
    pub home_terminal_address: Option<String>,

    #[serde(default)]
    pub shipping_info: ShippingDocuments,
}

impl Default for TripMetadata {
    fn default() -> Self {
        Self {
            truck_info: not_available(),
            carrier_info: not_available(),
            main_office_address: None,
            home_terminal_address: None,
            shipping_info: ShippingDocuments::default(),
        }
    }
}

impl TripMetadata {
    pub fn main_office_address(&self) -> &str {
        self.main_office_address
            .as_deref()
            .unwrap_or(&self.carrier_info)
    }

    pub fn home_terminal_address(&self) -> &str {
        self.home_terminal_address
            .as_deref()
            .unwrap_or(&self.carrier_info)
    }
}

/// Inputs for one log-generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripParameters {
    pub total_driving_duration_hours: f64,
    pub initial_cycle_used_hours: f64,
    pub pickup_location: Coordinates,
    pub dropoff_location: Coordinates,
    #[serde(default)]
    pub metadata: TripMetadata,
}

impl TripParameters {
    /// Validate and build trip parameters.
    ///
    /// A zero or negative driving duration is accepted and simply produces no
    /// logs. The cycle balance must be a finite, non-negative number.
    pub fn new(
        total_driving_duration_hours: f64,
        initial_cycle_used_hours: f64,
        pickup_location: Coordinates,
        dropoff_location: Coordinates,
    ) -> Result<Self> {
        if !total_driving_duration_hours.is_finite() {
            return Err(Error::InvalidInput(format!(
                "driving duration must be finite, got {}",
                total_driving_duration_hours
            )));
        }
        if !initial_cycle_used_hours.is_finite() || initial_cycle_used_hours < 0.0 {
            return Err(Error::InvalidInput(format!(
                "cycle hours used must be a non-negative number, got {}",
                initial_cycle_used_hours
            )));
        }
        Ok(Self {
            total_driving_duration_hours,
            initial_cycle_used_hours,
            pickup_location,
            dropoff_location,
            metadata: TripMetadata::default(),
        })
    }

    pub fn with_metadata(mut self, metadata: TripMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn here() -> Coordinates {
        Coordinates::new(41.8781, -87.6298).unwrap()
    }

    #[test]
    fn test_metadata_defaults() {
        let meta: TripMetadata = serde_json::from_str("{}").unwrap();
        assert_eq!(meta.truck_info, "N/A");
        assert_eq!(meta.carrier_info, "N/A");
        assert_eq!(meta.main_office_address(), "N/A");
        assert_eq!(meta.shipping_info.dvl_or_manifest_no, "N/A");
        assert_eq!(meta.shipping_info.shipper_commodity, "N/A");
    }

    #[test]
    fn test_office_and_terminal_fall_back_to_carrier() {
        let meta = TripMetadata {
            carrier_info: "Acme Freight".to_string(),
            home_terminal_address: Some("12 Depot Rd".to_string()),
            ..Default::default()
        };
        assert_eq!(meta.main_office_address(), "Acme Freight");
        assert_eq!(meta.home_terminal_address(), "12 Depot Rd");
    }

    #[test]
    fn test_shipping_documents_keep_extra_keys() {
        let docs: ShippingDocuments =
            serde_json::from_str(r#"{"dvl_or_manifest_no":"M-42","bol":"B-7"}"#).unwrap();
        assert_eq!(docs.dvl_or_manifest_no, "M-42");
        assert_eq!(docs.shipper_commodity, "N/A");
        assert_eq!(docs.extra.get("bol"), Some(&Value::from("B-7")));
    }

    #[test]
    fn test_rejects_negative_cycle() {
        let err = TripParameters::new(5.0, -1.0, here(), here()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_accepts_negative_duration() {
        assert!(TripParameters::new(-3.0, 0.0, here(), here()).is_ok());
        assert!(TripParameters::new(f64::INFINITY, 0.0, here(), here()).is_err());
    }
}
