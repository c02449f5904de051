//! The synthesized network as handed to the app.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::identifiers::*;
use crate::models::types::*;

/// Stops, routes and their join records
///
/// Serializes to the single document the app seeds its database from, with
/// top-level keys `stops`, `routes` and `routeStopRefs`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitNetwork {
    pub stops: Vec<Stop>,
    pub routes: Vec<Route>,
    pub route_stop_refs: Vec<RouteStopRef>,
}

impl TransitNetwork {
    /// Join records of one route, in stop order
    pub fn refs_for(&self, route_id: RouteId) -> Vec<&RouteStopRef> {
        let mut refs: Vec<_> = self
            .route_stop_refs
            .iter()
            .filter(|r| r.route_id == route_id)
            .collect();
        refs.sort_by_key(|r| r.stop_order);
        refs
    }

    /// Stops that no route serves, in catalog order
    pub fn uncovered_stops(&self) -> Vec<StopId> {
        let covered = self.covered_stop_ids();
        self.stops
            .iter()
            .map(|s| s.id)
            .filter(|id| !covered.contains(id))
            .collect()
    }

    pub fn covered_stop_count(&self) -> usize {
        self.covered_stop_ids().len()
    }

    /// Fails with [`TransitError::CoverageGap`] if any stop is left off every route
    pub fn verify_coverage(&self) -> Result<()> {
        let missing = self.uncovered_stops();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(TransitError::CoverageGap { missing })
        }
    }

    fn covered_stop_ids(&self) -> HashSet<StopId> {
        self.route_stop_refs.iter().map(|r| r.stop_id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(id: u32) -> Stop {
        Stop {
            id: StopId::new(id),
            details: StopDetails::default(),
            community: String::new(),
            latitude: 40.0,
            longitude: 44.0,
            category: StopType::Bus,
        }
    }

    fn link(route: u32, stop: u32, order: u32) -> RouteStopRef {
        RouteStopRef {
            route_id: RouteId::new(route),
            stop_id: StopId::new(stop),
            stop_order: order,
            distance_from_prev_meters: 0,
            time_from_prev_seconds: 0,
        }
    }

    #[test]
    fn test_coverage_queries() {
        let network = TransitNetwork {
            stops: vec![stop(1), stop(2), stop(3)],
            routes: vec![],
            route_stop_refs: vec![link(1, 1, 0), link(1, 3, 1)],
        };

        assert_eq!(network.uncovered_stops(), vec![StopId::new(2)]);
        assert_eq!(network.covered_stop_count(), 2);
        assert!(matches!(
            network.verify_coverage(),
            Err(TransitError::CoverageGap { missing }) if missing == vec![StopId::new(2)]
        ));
    }

    #[test]
    fn test_refs_for_sorted_by_order() {
        let network = TransitNetwork {
            stops: vec![],
            routes: vec![],
            route_stop_refs: vec![link(2, 5, 1), link(1, 1, 0), link(2, 4, 0)],
        };

        let refs = network.refs_for(RouteId::new(2));
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].stop_id, StopId::new(4));
        assert_eq!(refs[1].stop_id, StopId::new(5));
    }

    #[test]
    fn test_top_level_keys() {
        let value = serde_json::to_value(TransitNetwork::default()).unwrap();
        assert!(value.get("stops").is_some());
        assert!(value.get("routes").is_some());
        assert!(value.get("routeStopRefs").is_some());
    }
}
