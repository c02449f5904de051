//! Stop catalog: the id-assigned working set every strategy reads from.
//!
//! Bus stops are numbered first, then metro stations, both in retrieval
//! order. Bus stops additionally get their bearing and distance from the city
//! centre, which only the radial strategy consumes and which is never written
//! to the output.

use std::collections::{BTreeMap, HashMap};

use geo::Point;

use crate::identifiers::StopId;
use crate::models::types::{Stop, StopDetails, StopType};
use crate::spatial::queries::{bearing_degrees, haversine_distance};

/// A stop as produced by attribute extraction, before the catalog numbers it
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StopRecord {
    pub gis_id: i64,
    pub name: String,
    pub street: String,
    pub address: String,
    pub community: String,
    pub latitude: f64,
    pub longitude: f64,
    pub lot: i64,
}

/// Bearing (0 = north, clockwise) and Haversine distance from the centre
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolarPosition {
    pub angle_deg: f64,
    pub distance_m: f64,
}

#[derive(Clone, Debug)]
pub struct StopCatalog {
    stops: Vec<Stop>,
    bus_count: usize,
    center: Point,
    polar: Vec<PolarPosition>,
    by_id: HashMap<StopId, usize>,
}

impl StopCatalog {
    /// Number both record lists densely from 1 and derive the bus-stop polar
    /// positions relative to `center` (x = longitude, y = latitude).
    pub fn new(bus: Vec<StopRecord>, metro: Vec<StopRecord>, center: Point) -> Self {
        let bus_count = bus.len();

        let stops: Vec<Stop> = bus
            .into_iter()
            .map(|r| (r, StopType::Bus))
            .chain(metro.into_iter().map(|r| (r, StopType::Metro)))
            .enumerate()
            .map(|(i, (record, category))| into_stop(StopId::new(i as u32 + 1), record, category))
            .collect();

        let polar = stops[..bus_count]
            .iter()
            .map(|s| PolarPosition {
                angle_deg: bearing_degrees(center, s.location()),
                distance_m: haversine_distance(center, s.location()),
            })
            .collect();

        let by_id = stops.iter().enumerate().map(|(i, s)| (s.id, i)).collect();

        Self {
            stops,
            bus_count,
            center,
            polar,
            by_id,
        }
    }

    /// Every stop, bus stops first
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn bus_stops(&self) -> &[Stop] {
        &self.stops[..self.bus_count]
    }

    pub fn metro_stops(&self) -> &[Stop] {
        &self.stops[self.bus_count..]
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn get(&self, id: StopId) -> Option<&Stop> {
        self.by_id.get(&id).map(|&i| &self.stops[i])
    }

    /// Bus stops paired with their position relative to the centre
    pub fn bus_stops_polar(&self) -> impl Iterator<Item = (&Stop, PolarPosition)> + '_ {
        self.bus_stops().iter().zip(self.polar.iter().copied())
    }

    /// Bus stops grouped by non-empty community label, labels in lexicographic order
    pub fn communities(&self) -> BTreeMap<&str, Vec<&Stop>> {
        let mut groups: BTreeMap<&str, Vec<&Stop>> = BTreeMap::new();
        for stop in self.bus_stops().iter().filter(|s| !s.community.is_empty()) {
            groups.entry(stop.community.as_str()).or_default().push(stop);
        }
        groups
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn into_stops(self) -> Vec<Stop> {
        self.stops
    }
}

fn into_stop(id: StopId, record: StopRecord, category: StopType) -> Stop {
    Stop {
        id,
        details: StopDetails {
            gis_id: record.gis_id,
            name: record.name,
            name_en: String::new(),
            street: record.street,
            address: record.address,
            lot: record.lot,
        },
        community: record.community,
        latitude: record.latitude,
        longitude: record.longitude,
        category,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn record(lat: f64, lon: f64, community: &str) -> StopRecord {
        StopRecord {
            latitude: lat,
            longitude: lon,
            community: community.into(),
            ..Default::default()
        }
    }

    fn center() -> Point {
        Point::new(44.4991, 40.1792)
    }

    #[test]
    fn test_ids_are_dense_bus_first() {
        let catalog = StopCatalog::new(
            vec![record(40.18, 44.50, "A"), record(40.19, 44.51, "B")],
            vec![record(40.20, 44.52, "")],
            center(),
        );

        let ids: Vec<u32> = catalog.stops().iter().map(|s| s.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(catalog.bus_stops().len(), 2);
        assert_eq!(catalog.metro_stops()[0].id, StopId::new(3));
        assert_eq!(catalog.metro_stops()[0].category, StopType::Metro);
        assert_eq!(catalog.get(StopId::new(2)).unwrap().community, "B");
        assert!(catalog.get(StopId::new(4)).is_none());
    }

    #[test]
    fn test_polar_positions_only_for_bus_stops() {
        let catalog = StopCatalog::new(
            vec![record(40.2792, 44.4991, ""), record(40.1792, 44.5991, "")],
            vec![record(40.0, 44.0, "")],
            center(),
        );

        let polar: Vec<_> = catalog.bus_stops_polar().collect();
        assert_eq!(polar.len(), 2);

        // Due north, then due east of the centre
        assert_abs_diff_eq!(polar[0].1.angle_deg, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(polar[1].1.angle_deg, 90.0, epsilon = 1e-9);
        assert!(polar[0].1.distance_m > 11_000.0 && polar[0].1.distance_m < 11_200.0);
    }

    #[test]
    fn test_communities_sorted_and_skip_empty() {
        let catalog = StopCatalog::new(
            vec![
                record(40.18, 44.50, "Shengavit"),
                record(40.18, 44.51, ""),
                record(40.18, 44.52, "Arabkir"),
                record(40.18, 44.53, "Shengavit"),
            ],
            vec![],
            center(),
        );

        let communities = catalog.communities();
        let labels: Vec<_> = communities.keys().copied().collect();
        assert_eq!(labels, vec!["Arabkir", "Shengavit"]);
        assert_eq!(communities["Shengavit"].len(), 2);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = StopCatalog::new(vec![], vec![], center());
        assert!(catalog.is_empty());
        assert_eq!(catalog.bus_stops_polar().count(), 0);
    }
}
