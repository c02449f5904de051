//! ArcGIS REST feature-service payloads and stop extraction.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::catalog::StopRecord;
use crate::models::types::{Result, TransitError};
use crate::source::traits::FeatureSource;

pub const DEFAULT_BASE_URL: &str = "https://gis.yerevan.am/server/rest/services/Hosted";
pub const BUS_STOPS_SERVICE: &str = "Bus_stops_lots";
/// "Մետրո_կայաններ", percent-encoded for the URL path
pub const METRO_STATIONS_SERVICE: &str =
    "%D5%84%D5%A5%D5%BF%D6%80%D5%B8_%D5%AF%D5%A1%D5%B5%D5%A1%D5%B6%D5%B6%D5%A5%D6%80";
pub const DEFAULT_MAX_RECORDS: u32 = 2000;

/// Offset keeping metro GIS ids clear of bus-stop fids
pub const METRO_GIS_ID_OFFSET: i64 = 10_000;

const METRO_NAME_FIELD: &str = "\u{574}\u{565}\u{57f}\u{580}\u{578}_\u{56f}\u{561}\u{575}\u{561}\u{576}";
const METRO_PHASE_FIELD: &str = "\u{583}\u{578}\u{582}\u{56c}";
/// Phase value of stations that are already open
const METRO_PHASE_EXISTING: &str =
    "\u{533}\u{578}\u{575}\u{578}\u{582}\u{569}\u{575}\u{578}\u{582}\u{576} \u{578}\u{582}\u{576}\u{565}\u{581}\u{578}\u{572}";

/// Body of a `FeatureServer/0/query` response
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FeatureSet {
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub error: Option<ServiceError>,
}

/// Error object ArcGIS returns with HTTP 200
#[derive(Clone, Debug, Deserialize)]
pub struct ServiceError {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

impl FeatureSet {
    pub fn from_json(service: &str, body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| TransitError::Source {
            service: service.to_string(),
            message: format!("malformed feature set: {e}"),
        })
    }

    /// Unwrap the features, surfacing an embedded service error
    pub fn into_features(self, service: &str) -> Result<Vec<Feature>> {
        match self.error {
            Some(err) => Err(TransitError::Source {
                service: service.to_string(),
                message: format!("{} (code {})", err.message, err.code),
            }),
            None => Ok(self.features),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub attributes: Map<String, Value>,
    #[serde(default)]
    pub geometry: Option<PointGeometry>,
}

/// Point geometry in WGS84 (`outSR=4326`): x is longitude, y latitude
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct PointGeometry {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl Feature {
    /// `(latitude, longitude)` when both coordinates are present and finite
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let geometry = self.geometry?;
        let (lon, lat) = (geometry.x?, geometry.y?);
        (lat.is_finite() && lon.is_finite()).then_some((lat, lon))
    }

    fn text(&self, key: &str) -> String {
        self.attributes
            .get(key)
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    }

    fn integer(&self, key: &str) -> i64 {
        self.attributes
            .get(key)
            .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
            .unwrap_or(0)
    }
}

/// Where to find the two stop layers
#[derive(Clone, Debug, PartialEq)]
pub struct ServiceEndpoints {
    pub base_url: String,
    pub bus_service: String,
    pub metro_service: String,
    pub max_records: u32,
}

impl Default for ServiceEndpoints {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            bus_service: BUS_STOPS_SERVICE.to_string(),
            metro_service: METRO_STATIONS_SERVICE.to_string(),
            max_records: DEFAULT_MAX_RECORDS,
        }
    }
}

impl ServiceEndpoints {
    /// Query returning every feature with all attributes, reprojected to WGS84
    pub fn query_url(&self, service: &str) -> String {
        format!(
            "{}/{}/FeatureServer/0/query?where=1%3D1&outFields=*&f=json&resultRecordCount={}&outSR=4326",
            self.base_url.trim_end_matches('/'),
            service,
            self.max_records
        )
    }
}

/// Bus stops: named after their street, carrying the parking lot count
pub fn extract_bus_stops(features: &[Feature]) -> Vec<StopRecord> {
    features
        .iter()
        .filter_map(|feature| {
            let (latitude, longitude) = feature.coordinates()?;
            let street = feature.text("street");
            Some(StopRecord {
                gis_id: feature.integer("fid"),
                name: street.clone(),
                street,
                address: feature.text("address"),
                community: feature.text("community"),
                latitude,
                longitude,
                lot: feature.integer("lot"),
            })
        })
        .collect()
}

/// Metro stations that are already in service; planned ones are dropped
pub fn extract_metro_stations(features: &[Feature]) -> Vec<StopRecord> {
    features
        .iter()
        .filter_map(|feature| {
            let (latitude, longitude) = feature.coordinates()?;
            let name = feature.text(METRO_NAME_FIELD);
            if name.is_empty() || feature.text(METRO_PHASE_FIELD) != METRO_PHASE_EXISTING {
                return None;
            }
            Some(StopRecord {
                gis_id: METRO_GIS_ID_OFFSET + feature.integer("objectid"),
                name,
                latitude,
                longitude,
                ..Default::default()
            })
        })
        .collect()
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StopRecords {
    pub bus: Vec<StopRecord>,
    pub metro: Vec<StopRecord>,
}

impl StopRecords {
    pub fn len(&self) -> usize {
        self.bus.len() + self.metro.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bus.is_empty() && self.metro.is_empty()
    }
}

/// Fetch both layers and extract their stop records
pub async fn load_stop_records(
    source: &dyn FeatureSource,
    endpoints: &ServiceEndpoints,
) -> Result<StopRecords> {
    let bus_features = source.fetch_features(&endpoints.bus_service).await?;
    let bus = extract_bus_stops(&bus_features);
    log::info!("Extracted {} bus stops from {} features", bus.len(), bus_features.len());

    let metro_features = source.fetch_features(&endpoints.metro_service).await?;
    let metro = extract_metro_stations(&metro_features);
    log::info!(
        "Extracted {} metro stations from {} features",
        metro.len(),
        metro_features.len()
    );

    Ok(StopRecords { bus, metro })
}
