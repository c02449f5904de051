//! Cluster strategies.
//!
//! Each strategy reads the catalog and proposes ordered stop groups; it never
//! builds routes itself. The coordinator turns accepted plans into routes in
//! strategy order, so every strategy can be exercised on its own.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::catalog::StopCatalog;
use crate::identifiers::StopId;
use crate::models::hours::OperatingHours;
use crate::models::types::{Stop, StopType};

pub mod bands;
pub mod community;
pub mod connector;
pub mod express;
pub mod metro;
pub mod radial;

pub use bands::BandStrategy;
pub use community::CommunityStrategy;
pub use connector::ConnectorStrategy;
pub use express::{ExpressLine, ExpressStrategy};
pub use metro::MetroStrategy;
pub use radial::RadialStrategy;

/// A proposed route: ordered member stops plus display attributes
#[derive(Clone, Debug, PartialEq)]
pub struct RoutePlan<'a> {
    pub number: String,
    pub name: String,
    pub category: StopType,
    pub color: String,
    pub stops: Vec<&'a Stop>,
    /// Replaces the randomly drawn headway
    pub interval_override: Option<u32>,
    /// Replaces the default operating window
    pub hours_override: Option<OperatingHours>,
}

impl<'a> RoutePlan<'a> {
    pub fn bus(number: impl ToString, name: impl Into<String>, color: &str, stops: Vec<&'a Stop>) -> Self {
        Self {
            number: number.to_string(),
            name: name.into(),
            category: StopType::Bus,
            color: color.to_string(),
            stops,
            interval_override: None,
            hours_override: None,
        }
    }

    pub fn stop_ids(&self) -> Vec<StopId> {
        self.stops.iter().map(|s| s.id).collect()
    }
}

pub trait ClusterStrategy {
    /// Short label used in logs
    fn name(&self) -> &str;

    /// Propose routes over `catalog`
    ///
    /// `used` holds every stop already placed on a route by earlier
    /// strategies. Only coverage closure excludes on it; the others may
    /// re-select those stops.
    fn plan<'a>(&self, catalog: &'a StopCatalog, used: &HashSet<StopId>) -> Vec<RoutePlan<'a>>;
}

/// Coordinate a strategy filters or orders on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    pub fn value(self, stop: &Stop) -> f64 {
        match self {
            Axis::Latitude => stop.latitude,
            Axis::Longitude => stop.longitude,
        }
    }

    pub fn other(self) -> Self {
        match self {
            Axis::Latitude => Axis::Longitude,
            Axis::Longitude => Axis::Latitude,
        }
    }

    /// Stable comparator over this coordinate
    pub fn compare(self, a: &Stop, b: &Stop) -> Ordering {
        self.value(a).total_cmp(&self.value(b))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use geo::Point;

    use crate::catalog::{StopCatalog, StopRecord};

    pub fn record(lat: f64, lon: f64, community: &str) -> StopRecord {
        StopRecord {
            name: format!("{lat:.4},{lon:.4}"),
            latitude: lat,
            longitude: lon,
            community: community.into(),
            ..Default::default()
        }
    }

    pub fn yerevan_center() -> Point {
        Point::new(44.4991, 40.1792)
    }

    pub fn catalog(bus: Vec<StopRecord>, metro: Vec<StopRecord>) -> StopCatalog {
        StopCatalog::new(bus, metro, yerevan_center())
    }

    pub fn ids(stops: &[&crate::models::types::Stop]) -> Vec<u32> {
        stops.iter().map(|s| s.id.get()).collect()
    }
}
