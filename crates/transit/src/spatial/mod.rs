//! Geodesy and spatial indexing.

pub mod index;
pub mod queries;

pub use index::RoutedStopIndex;
pub use queries::{bearing_degrees, distance_meters, haversine_distance, EARTH_RADIUS_M};
