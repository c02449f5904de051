//! Turns an ordered stop list into a route and its join records.

use rand::Rng;

use crate::identifiers::RouteIdGenerator;
use crate::models::hours::OperatingHours;
use crate::models::types::{Route, RouteStopRef, Stop, StopType};
use crate::spatial::queries::haversine_distance;
use crate::synthesis::config::IntervalRange;

/// Assumed average vehicle speed, meters per second (18 km/h)
pub const AVERAGE_SPEED_MPS: u32 = 5;

/// Minimum dwell plus transit time between consecutive stops
pub const MIN_HOP_SECONDS: u32 = 60;

/// Travel time for a hop of `distance_m` meters
pub fn hop_seconds(distance_m: u32) -> u32 {
    (distance_m / AVERAGE_SPEED_MPS).max(MIN_HOP_SECONDS)
}

/// Shared route factory
///
/// Owns the route id sequence and draws each route's headway from the
/// injected random source, so seeded runs are reproducible.
pub struct RouteBuilder<'r, R: Rng> {
    ids: RouteIdGenerator,
    rng: &'r mut R,
    interval: IntervalRange,
    operating_hours: OperatingHours,
}

impl<'r, R: Rng> RouteBuilder<'r, R> {
    pub fn new(rng: &'r mut R, interval: IntervalRange, operating_hours: OperatingHours) -> Self {
        Self {
            ids: RouteIdGenerator::new(),
            rng,
            interval,
            operating_hours,
        }
    }

    /// Build a route over `stops` in the given order
    ///
    /// Never rejects a list on size; callers gate on minimum length.
    pub fn build_route(
        &mut self,
        number: &str,
        name: &str,
        stops: &[&Stop],
        category: StopType,
        color: &str,
    ) -> (Route, Vec<RouteStopRef>) {
        let id = self.ids.next_id();
        let IntervalRange {
            min_minutes,
            max_minutes,
        } = self.interval;
        let route = Route {
            id,
            number: number.to_string(),
            name: name.to_string(),
            category,
            color: color.to_string(),
            average_interval_minutes: self
                .rng
                .random_range(min_minutes.min(max_minutes)..=max_minutes.max(min_minutes)),
            operating_hours: self.operating_hours,
        };

        let refs = stops
            .iter()
            .enumerate()
            .map(|(order, stop)| {
                let (distance, time) = match order.checked_sub(1).map(|prev| stops[prev]) {
                    Some(prev) => {
                        let distance = haversine_distance(prev.location(), stop.location()).round() as u32;
                        (distance, hop_seconds(distance))
                    }
                    None => (0, 0),
                };

                RouteStopRef {
                    route_id: id,
                    stop_id: stop.id,
                    stop_order: order as u32,
                    distance_from_prev_meters: distance,
                    time_from_prev_seconds: time,
                }
            })
            .collect();

        (route, refs)
    }

    pub fn routes_built(&self) -> u32 {
        self.ids.issued()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::{RouteId, StopId};
    use crate::models::types::StopDetails;
    use crate::spatial::queries::distance_meters;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn stop(id: u32, lat: f64, lon: f64) -> Stop {
        Stop {
            id: StopId::new(id),
            details: StopDetails::default(),
            community: String::new(),
            latitude: lat,
            longitude: lon,
            category: StopType::Bus,
        }
    }

    fn builder(rng: &mut StdRng) -> RouteBuilder<'_, StdRng> {
        RouteBuilder::new(rng, IntervalRange::default(), OperatingHours::bus_default())
    }

    #[test]
    fn test_hop_seconds_floor() {
        assert_eq!(hop_seconds(0), 60);
        assert_eq!(hop_seconds(299), 60);
        assert_eq!(hop_seconds(304), 60);
        assert_eq!(hop_seconds(1_000), 200);
        assert_eq!(hop_seconds(1_004), 200);
    }

    #[test]
    fn test_refs_annotate_hops() {
        let a = stop(1, 40.18, 44.46);
        let b = stop(2, 40.18, 44.50);
        let c = stop(3, 40.18, 44.54);

        let mut rng = StdRng::seed_from_u64(1);
        let (route, refs) = builder(&mut rng).build_route("10", "East-West Route 10", &[&a, &b, &c], StopType::Bus, "#00897B");

        assert_eq!(route.id, RouteId::new(1));
        assert_eq!(route.number, "10");
        assert_eq!(route.operating_hours.to_string(), "07:00-22:00");
        assert!((5..=15).contains(&route.average_interval_minutes));

        assert_eq!(refs.len(), 3);
        assert_eq!(refs[0].distance_from_prev_meters, 0);
        assert_eq!(refs[0].time_from_prev_seconds, 0);

        let expected = distance_meters(40.18, 44.46, 40.18, 44.50).round() as u32;
        assert_eq!(refs[1].distance_from_prev_meters, expected);
        assert_eq!(refs[1].time_from_prev_seconds, expected / 5);
        assert_eq!(
            refs.iter().map(|r| r.stop_order).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert!(refs.iter().all(|r| r.route_id == route.id));
    }

    #[test]
    fn test_adjacent_stops_get_minimum_time() {
        let a = stop(1, 40.1800, 44.5000);
        let b = stop(2, 40.1801, 44.5000);

        let mut rng = StdRng::seed_from_u64(1);
        let (_, refs) = builder(&mut rng).build_route("1", "Short", &[&a, &b], StopType::Bus, "#E53935");

        assert_eq!(refs[1].distance_from_prev_meters, 11);
        assert_eq!(refs[1].time_from_prev_seconds, 60);
    }

    #[test]
    fn test_ids_are_sequential_and_lists_never_rejected() {
        let a = stop(1, 40.18, 44.50);

        let mut rng = StdRng::seed_from_u64(9);
        let mut builder = builder(&mut rng);
        let (first, _) = builder.build_route("1", "One", &[&a], StopType::Bus, "#000000");
        let (second, refs) = builder.build_route("2", "Empty", &[], StopType::Bus, "#000000");

        assert_eq!(first.id, RouteId::new(1));
        assert_eq!(second.id, RouteId::new(2));
        assert!(refs.is_empty());
        assert_eq!(builder.routes_built(), 2);
    }

    #[test]
    fn test_seeded_intervals_repeat() {
        let a = stop(1, 40.18, 44.50);
        let b = stop(2, 40.19, 44.50);

        let draw = |seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut builder = builder(&mut rng);
            (0..8)
                .map(|i| {
                    builder
                        .build_route(&i.to_string(), "R", &[&a, &b], StopType::Bus, "#000000")
                        .0
                        .average_interval_minutes
                })
                .collect::<Vec<_>>()
        };

        assert_eq!(draw(42), draw(42));
    }
}
