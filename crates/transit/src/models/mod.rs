//! Network data models and types.

pub mod hours;
pub mod network;
pub mod types;

// Re-exports for convenience
pub use hours::OperatingHours;
pub use network::TransitNetwork;
pub use types::{Result, Route, RouteStopRef, Stop, StopDetails, StopType, TransitError};
