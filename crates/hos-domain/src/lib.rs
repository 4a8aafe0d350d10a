//! Hours-of-service domain: model types, regulatory rules, the daily log
//! generator, and the collaborator traits it depends on.

pub mod model;
pub mod provider;
pub mod service;

pub use model::{DailyLog, DutyStatus, HourlyStatus, TripLogs, TripMetadata, TripParameters};
pub use service::{generate_trip_logs, HosRules, LogGenerator};
