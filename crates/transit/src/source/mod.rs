//! Stop retrieval from the municipal GIS feature services.

pub mod arcgis;
pub mod traits;

pub use arcgis::{
    extract_bus_stops, extract_metro_stations, load_stop_records, Feature, FeatureSet, PointGeometry,
    ServiceEndpoints, StopRecords,
};
pub use traits::FeatureSource;
