//! Core data types and enums for the synthesized network.

use geo::Point;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::identifiers::*;
use crate::models::hours::OperatingHours;

// ============================================================================
// Enums
// ============================================================================

/// Kind of access point, also used as the category of the routes serving it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum StopType {
    Bus,
    Metro,
}

// ============================================================================
// Data Structures
// ============================================================================

/// Display metadata carried through to the app, opaque to route synthesis
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopDetails {
    pub gis_id: i64,
    pub name: String,
    pub name_en: String,
    pub street: String,
    pub address: String,
    pub lot: i64,
}

/// A geocoded bus stop or metro station with its catalog id
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    pub id: StopId,
    #[serde(flatten)]
    pub details: StopDetails,
    /// Free-text district label, empty for metro stations
    pub community: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "stopType")]
    pub category: StopType,
}

impl Stop {
    /// Location as a geo point (x = longitude, y = latitude)
    pub fn location(&self) -> Point {
        Point::new(self.longitude, self.latitude)
    }

    pub fn is_bus(&self) -> bool {
        self.category == StopType::Bus
    }
}

/// One synthesized transit line
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: RouteId,
    /// Display label, e.g. "3", "M1", "100"
    #[serde(rename = "routeNumber")]
    pub number: String,
    #[serde(rename = "routeName")]
    pub name: String,
    #[serde(rename = "routeType")]
    pub category: StopType,
    pub color: String,
    #[serde(rename = "avgIntervalMinutes")]
    pub average_interval_minutes: u32,
    #[serde(rename = "operatingHours")]
    pub operating_hours: OperatingHours,
}

/// Position of a stop within a route
///
/// Distance and time describe the hop from the previous stop on the same
/// route and are zero for `stop_order == 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteStopRef {
    pub route_id: RouteId,
    pub stop_id: StopId,
    pub stop_order: u32,
    pub distance_from_prev_meters: u32,
    pub time_from_prev_seconds: u32,
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TransitError {
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Feature source {service} failed: {message}")]
    Source { service: String, message: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("{} stop(s) are not served by any route: {missing:?}", missing.len())]
    CoverageGap { missing: Vec<StopId> },
}

impl From<serde_json::Error> for TransitError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TransitError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_stop() -> Stop {
        Stop {
            id: StopId::new(1),
            details: StopDetails {
                gis_id: 17,
                name: "Mashtots Ave".into(),
                street: "Mashtots Ave".into(),
                lot: 2,
                ..Default::default()
            },
            community: "Kentron".into(),
            latitude: 40.18,
            longitude: 44.51,
            category: StopType::Bus,
        }
    }

    #[test]
    fn test_stop_type_strings() {
        assert_eq!(StopType::Metro.to_string(), "METRO");
        assert_eq!("BUS".parse::<StopType>().unwrap(), StopType::Bus);
        assert_eq!(serde_json::to_string(&StopType::Bus).unwrap(), "\"BUS\"");
    }

    #[test]
    fn test_stop_serializes_flat_record() {
        let value = serde_json::to_value(sample_stop()).unwrap();

        assert_eq!(value["id"], 1);
        assert_eq!(value["gisId"], 17);
        assert_eq!(value["nameEn"], "");
        assert_eq!(value["community"], "Kentron");
        assert_eq!(value["stopType"], "BUS");
        assert_eq!(value["lot"], 2);
        assert!(value.get("details").is_none());
    }

    #[test]
    fn test_stop_location_is_lon_lat() {
        let point = sample_stop().location();
        assert_eq!(point.x(), 44.51);
        assert_eq!(point.y(), 40.18);
    }

    #[test]
    fn test_route_wire_names() {
        let route = Route {
            id: RouteId::new(4),
            number: "M1".into(),
            name: "Metro Line 1".into(),
            category: StopType::Metro,
            color: "#E53935".into(),
            average_interval_minutes: 5,
            operating_hours: "06:30-23:30".parse().unwrap(),
        };

        let value = serde_json::to_value(&route).unwrap();
        assert_eq!(value["routeNumber"], "M1");
        assert_eq!(value["routeType"], "METRO");
        assert_eq!(value["avgIntervalMinutes"], 5);
        assert_eq!(value["operatingHours"], "06:30-23:30");
    }

    #[test]
    fn test_coverage_gap_message() {
        let err = TransitError::CoverageGap {
            missing: vec![StopId::new(3), StopId::new(9)],
        };
        assert!(err.to_string().starts_with("2 stop(s)"));
    }
}
