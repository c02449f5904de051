//! # yerevan-transit
//!
//! Synthesizes a complete public-transport network (routes plus ordered
//! stop sequences) from geocoded bus stops and metro stations.
//!
//! ## Features
//!
//! - **Stop catalog**: Dense ids, polar positions and community groups
//! - **Cluster strategies**: Radial, corridor, community, metro, express
//! - **Coverage closure**: Connector routes reach every remaining stop
//! - **Pluggable retrieval**: Implement [`FeatureSource`] for your own IO
//!
//! ## Example
//!
//! ```
//! use yerevan_transit::prelude::*;
//! use rand::SeedableRng;
//!
//! let record = |lat: f64, lon: f64| StopRecord {
//!     latitude: lat,
//!     longitude: lon,
//!     ..Default::default()
//! };
//!
//! let bus = vec![record(40.18, 44.46), record(40.18, 44.50), record(40.18, 44.54)];
//! let catalog = StopCatalog::new(bus, vec![], CityCenter::default().point());
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let network = RouteSynthesizer::new(SynthesisConfig::default()).synthesize(&catalog, &mut rng);
//!
//! assert!(network.verify_coverage().is_ok());
//! ```

pub mod catalog;
pub mod identifiers;
pub mod models;
pub mod source;
pub mod spatial;
pub mod synthesis;

// Re-exports for convenience
pub mod prelude {
    pub use crate::catalog::{PolarPosition, StopCatalog, StopRecord};
    pub use crate::identifiers::*;
    pub use crate::models::*;
    pub use crate::source::{FeatureSource, ServiceEndpoints, StopRecords};
    pub use crate::spatial::{distance_meters, haversine_distance, RoutedStopIndex};
    pub use crate::synthesis::{
        ClusterStrategy, RoutePlan, RouteSynthesizer, SamplingPolicy, SynthesisConfig, CityCenter,
    };
}

pub use prelude::*;
