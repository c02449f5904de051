//! Corridor routes across fixed coordinate bands.
//!
//! Latitude bands give east-west routes ordered by longitude; longitude bands
//! give north-south routes ordered by latitude.

use std::collections::HashSet;

use crate::catalog::StopCatalog;
use crate::identifiers::StopId;
use crate::synthesis::config::{Band, Palette, SamplingPolicy, SynthesisConfig};
use crate::synthesis::sampling::sample_group;
use crate::synthesis::strategies::{Axis, ClusterStrategy, RoutePlan};

pub struct BandStrategy {
    label: &'static str,
    /// Coordinate the bands partition; members are ordered by the other one
    axis: Axis,
    bands: Vec<Band>,
    number_base: usize,
    color_offset: usize,
    sampling: SamplingPolicy,
    palette: Palette,
}

impl BandStrategy {
    /// Latitude bands, routes numbered from 10
    pub fn east_west(config: &SynthesisConfig) -> Self {
        Self {
            label: "East-West",
            axis: Axis::Latitude,
            bands: config.latitude_bands.clone(),
            number_base: 10,
            color_offset: 8,
            sampling: config.corridor,
            palette: config.palette.clone(),
        }
    }

    /// Longitude bands, routes numbered from 20
    pub fn north_south(config: &SynthesisConfig) -> Self {
        Self {
            label: "North-South",
            axis: Axis::Longitude,
            bands: config.longitude_bands.clone(),
            number_base: 20,
            color_offset: 13,
            sampling: config.corridor,
            palette: config.palette.clone(),
        }
    }
}

impl ClusterStrategy for BandStrategy {
    fn name(&self) -> &str {
        self.label
    }

    fn plan<'a>(&self, catalog: &'a StopCatalog, _used: &HashSet<StopId>) -> Vec<RoutePlan<'a>> {
        let order = self.axis.other();

        self.bands
            .iter()
            .enumerate()
            .filter_map(|(i, band)| {
                let mut members: Vec<_> = catalog
                    .bus_stops()
                    .iter()
                    .filter(|s| band.contains(self.axis.value(s)))
                    .collect();
                members.sort_by(|a, b| order.compare(a, b));

                let stops = sample_group(&members, &self.sampling)?;

                let number = self.number_base + i;
                Some(RoutePlan::bus(
                    number,
                    format!("{} Route {number}", self.label),
                    self.palette.get(self.color_offset + i),
                    stops,
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::queries::distance_meters;
    use crate::synthesis::strategies::testing::*;

    #[test]
    fn test_three_stops_on_one_parallel() {
        let catalog = catalog(
            vec![
                record(40.18, 44.54, "A"),
                record(40.18, 44.46, "A"),
                record(40.18, 44.50, "A"),
            ],
            vec![],
        );

        let plans = BandStrategy::east_west(&SynthesisConfig::default()).plan(&catalog, &HashSet::new());

        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].number, "12");
        assert_eq!(plans[0].name, "East-West Route 12");
        assert_eq!(plans[0].color, "#7CB342");
        // Ascending longitude
        assert_eq!(ids(&plans[0].stops), vec![2, 3, 1]);

        let hop = distance_meters(40.18, 44.46, 40.18, 44.50);
        assert!(hop > 3_300.0 && hop < 3_500.0);
    }

    #[test]
    fn test_north_south_orders_by_latitude() {
        let catalog = catalog(
            vec![
                record(40.20, 44.48, ""),
                record(40.14, 44.49, ""),
                record(40.17, 44.48, ""),
                record(40.30, 44.60, ""),
            ],
            vec![],
        );

        let plans = BandStrategy::north_south(&SynthesisConfig::default()).plan(&catalog, &HashSet::new());

        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].number, "21");
        assert_eq!(plans[0].name, "North-South Route 21");
        assert_eq!(ids(&plans[0].stops), vec![2, 3, 1]);
    }

    #[test]
    fn test_band_bounds_are_half_open() {
        // 40.19 belongs to the fourth band, not the third
        let catalog = catalog(
            vec![
                record(40.17, 44.46, ""),
                record(40.18, 44.47, ""),
                record(40.19, 44.48, ""),
            ],
            vec![],
        );

        let plans = BandStrategy::east_west(&SynthesisConfig::default()).plan(&catalog, &HashSet::new());
        assert!(plans.is_empty());
    }

    #[test]
    fn test_stops_outside_all_bands_ignored() {
        let catalog = catalog(
            vec![
                record(40.00, 44.46, ""),
                record(40.01, 44.47, ""),
                record(40.02, 44.48, ""),
            ],
            vec![],
        );

        let plans = BandStrategy::east_west(&SynthesisConfig::default()).plan(&catalog, &HashSet::new());
        assert!(plans.is_empty());
    }
}
