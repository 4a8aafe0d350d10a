//! Domain model types

pub mod daily_log;
pub mod duty_status;
pub mod route;
pub mod trip;

pub use daily_log::{DailyLog, HourlyStatus, TripLogs, TripOutcome, TripSummary};
pub use duty_status::DutyStatus;
pub use route::{Route, RouteLeg};
pub use trip::{ShippingDocuments, TripMetadata, TripParameters, NOT_AVAILABLE};
