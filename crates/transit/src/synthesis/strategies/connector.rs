//! Coverage closure.
//!
//! Collects every stop no earlier strategy placed, walks them south-west to
//! north-east in fixed-size chunks and turns each chunk into a connector
//! route. A chunk is prefixed with the nearest already-routed bus stop so the
//! connector joins the existing network.

use std::collections::HashSet;

use crate::catalog::StopCatalog;
use crate::identifiers::StopId;
use crate::models::types::Stop;
use crate::spatial::index::RoutedStopIndex;
use crate::synthesis::config::{Palette, SynthesisConfig};
use crate::synthesis::strategies::{Axis, ClusterStrategy, RoutePlan};

const NUMBER_BASE: usize = 50;

/// Connector routes need a start and an end
const MIN_CONNECTOR_STOPS: usize = 2;

pub struct ConnectorStrategy {
    chunk_size: usize,
    palette: Palette,
}

impl ConnectorStrategy {
    pub fn new(chunk_size: usize, palette: Palette) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            palette,
        }
    }

    pub fn from_config(config: &SynthesisConfig) -> Self {
        Self::new(config.connector_chunk_size, config.palette.clone())
    }
}

impl ClusterStrategy for ConnectorStrategy {
    fn name(&self) -> &str {
        "connector"
    }

    fn plan<'a>(&self, catalog: &'a StopCatalog, used: &HashSet<StopId>) -> Vec<RoutePlan<'a>> {
        let mut unused: Vec<&Stop> = catalog
            .stops()
            .iter()
            .filter(|s| !used.contains(&s.id))
            .collect();
        unused.sort_by(|a, b| {
            Axis::Latitude
                .compare(a, b)
                .then_with(|| Axis::Longitude.compare(a, b))
        });

        let mut anchors =
            RoutedStopIndex::from_stops(catalog.stops().iter().filter(|s| used.contains(&s.id)));
        let mut plans = Vec::new();

        for (i, chunk) in unused.chunks(self.chunk_size).enumerate() {
            let head = chunk[0].location();
            let anchor = anchors.nearest(head, Stop::is_bus).or_else(|| {
                // Only a chunk too short to stand alone may hang off a metro station
                (chunk.len() < MIN_CONNECTOR_STOPS)
                    .then(|| anchors.nearest(head, |_| true))
                    .flatten()
            });

            let stops: Vec<&Stop> = anchor.into_iter().chain(chunk.iter().copied()).collect();
            if stops.len() < MIN_CONNECTOR_STOPS {
                log::warn!(
                    "Stop {} has no routed neighbour to connect to; leaving it unserved",
                    chunk[0].id
                );
                continue;
            }

            for &stop in chunk {
                anchors.insert(stop);
            }

            let number = NUMBER_BASE + i;
            plans.push(RoutePlan::bus(
                number,
                format!("Connector Route {number}"),
                self.palette.get(i),
                stops,
            ));
        }

        plans
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesis::strategies::testing::*;

    fn strategy() -> ConnectorStrategy {
        ConnectorStrategy::from_config(&SynthesisConfig::default())
    }

    fn used(ids: &[u32]) -> HashSet<StopId> {
        ids.iter().copied().map(StopId::new).collect()
    }

    #[test]
    fn test_nothing_to_do_when_everything_is_routed() {
        let catalog = catalog(vec![record(40.1, 44.5, ""), record(40.2, 44.5, "")], vec![]);
        assert!(strategy().plan(&catalog, &used(&[1, 2])).is_empty());
    }

    #[test]
    fn test_chunk_is_anchored_to_nearest_routed_bus_stop() {
        let catalog = catalog(
            vec![
                record(40.300, 44.500, ""), // 1: routed, far
                record(40.101, 44.500, ""), // 2: routed, near
                record(40.120, 44.510, ""), // 3: unused
                record(40.100, 44.505, ""), // 4: unused
            ],
            vec![record(40.1001, 44.5049, "")], // 5: routed metro, nearest of all
        );

        let plans = strategy().plan(&catalog, &used(&[1, 2, 5]));

        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].number, "50");
        assert_eq!(plans[0].name, "Connector Route 50");
        // Anchor, then the unused stops by ascending latitude
        assert_eq!(ids(&plans[0].stops), vec![2, 4, 3]);
    }

    #[test]
    fn test_unused_stops_chunked_by_latitude_then_longitude() {
        let bus = (0..13)
            .map(|i| record(40.10 + (i / 2) as f64 * 0.01, 44.60 - (i % 2) as f64 * 0.01, ""))
            .collect();
        let catalog = catalog(bus, vec![]);

        let plans = strategy().plan(&catalog, &HashSet::new());

        assert_eq!(plans.len(), 3);
        // First chunk has no routed stop to hang off
        assert_eq!(ids(&plans[0].stops), vec![2, 1, 4, 3, 6, 5]);
        // Later chunks attach to the stops routed by earlier ones
        assert_eq!(plans[1].stops.len(), 7);
        assert_eq!(plans[1].stops[0].id, StopId::new(6));
        assert_eq!(plans[2].number, "52");
        assert_eq!(ids(&plans[2].stops), vec![11, 13]);
    }

    #[test]
    fn test_lone_stop_joins_nearest_routed_station() {
        let catalog = catalog(
            vec![record(40.15, 44.50, "")],
            vec![record(40.20, 44.50, ""), record(40.10, 44.50, "")],
        );

        let plans = strategy().plan(&catalog, &used(&[2, 3]));

        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].stops.len(), 2);
        assert_eq!(plans[0].stops[1].id, StopId::new(1));
    }

    #[test]
    fn test_isolated_single_stop_is_left_out() {
        let catalog = catalog(vec![], vec![record(40.20, 44.50, "")]);
        assert!(strategy().plan(&catalog, &HashSet::new()).is_empty());
    }
}
