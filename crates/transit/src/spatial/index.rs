//! R-tree over stops that already belong to a route.
//!
//! ## Two-Stage Filtering
//!
//! Nearest-stop lookups use a two-stage approach:
//! 1. **R-tree filter**: stops are indexed as unit-sphere vectors, so the
//!    tree's Euclidean ordering matches great-circle ordering
//! 2. **Haversine filter**: candidates tied at the closest chord distance are
//!    re-ranked by Haversine distance and then by lowest stop id
//!
//! The second stage keeps the result deterministic when several stops sit at
//! the same distance.

use geo::Point;
use rstar::{PointDistance, RTree, RTreeObject, AABB};

use crate::models::types::Stop;
use crate::spatial::queries::{haversine_distance, unit_vector};

/// Relative slack when deciding two chord distances are tied
const TIE_TOLERANCE: f64 = 1e-9;

// ============================================================================
// Stop Spatial Node
// ============================================================================

#[derive(Clone)]
pub struct StopNode<'a> {
    pub stop: &'a Stop,
    point: [f64; 3],
}

impl<'a> StopNode<'a> {
    pub fn new(stop: &'a Stop) -> Self {
        Self {
            stop,
            point: unit_vector(stop.location()),
        }
    }
}

impl RTreeObject for StopNode<'_> {
    type Envelope = AABB<[f64; 3]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for StopNode<'_> {
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

// ============================================================================
// Routed Stop Index
// ============================================================================

/// Growable index of stops that can anchor new routes
pub struct RoutedStopIndex<'a> {
    tree: RTree<StopNode<'a>>,
}

impl Default for RoutedStopIndex<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> RoutedStopIndex<'a> {
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    pub fn from_stops(stops: impl IntoIterator<Item = &'a Stop>) -> Self {
        Self {
            tree: RTree::bulk_load(stops.into_iter().map(StopNode::new).collect()),
        }
    }

    pub fn insert(&mut self, stop: &'a Stop) {
        self.tree.insert(StopNode::new(stop));
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Closest indexed stop accepted by `filter`
    pub fn nearest<F>(&self, point: Point, filter: F) -> Option<&'a Stop>
    where
        F: Fn(&Stop) -> bool,
    {
        let query = unit_vector(point);
        let mut candidates = self
            .tree
            .nearest_neighbor_iter_with_distance_2(&query)
            .filter(|(node, _)| filter(node.stop));

        let (first, best_d2) = candidates.next()?;
        let limit = best_d2 + best_d2.max(f64::MIN_POSITIVE) * TIE_TOLERANCE;

        std::iter::once(first.stop)
            .chain(
                candidates
                    .take_while(|(_, d2)| *d2 <= limit)
                    .map(|(node, _)| node.stop),
            )
            .min_by(|a, b| {
                haversine_distance(point, a.location())
                    .total_cmp(&haversine_distance(point, b.location()))
                    .then(a.id.cmp(&b.id))
            })
    }
}
