//! Radial routes: one per angular sector around the city centre, running
//! outward from the centre.

use std::collections::HashSet;

use crate::catalog::StopCatalog;
use crate::identifiers::StopId;
use crate::synthesis::config::{Band, Palette, SamplingPolicy, SynthesisConfig};
use crate::synthesis::sampling::sample_group;
use crate::synthesis::strategies::{ClusterStrategy, RoutePlan};

pub struct RadialStrategy {
    sector_count: usize,
    sampling: SamplingPolicy,
    palette: Palette,
}

impl RadialStrategy {
    pub fn new(sector_count: usize, sampling: SamplingPolicy, palette: Palette) -> Self {
        Self {
            sector_count,
            sampling,
            palette,
        }
    }

    pub fn from_config(config: &SynthesisConfig) -> Self {
        Self::new(config.sector_count, config.corridor, config.palette.clone())
    }

    /// Angular range of sector `index`, degrees clockwise from north
    fn sector(&self, index: usize) -> Band {
        let width = 360.0 / self.sector_count as f64;
        Band::new(index as f64 * width, (index + 1) as f64 * width)
    }
}

impl ClusterStrategy for RadialStrategy {
    fn name(&self) -> &str {
        "radial"
    }

    fn plan<'a>(&self, catalog: &'a StopCatalog, _used: &HashSet<StopId>) -> Vec<RoutePlan<'a>> {
        (0..self.sector_count)
            .filter_map(|i| {
                let sector = self.sector(i);
                let mut members: Vec<_> = catalog
                    .bus_stops_polar()
                    .filter(|(_, polar)| sector.contains(polar.angle_deg))
                    .collect();
                members.sort_by(|a, b| a.1.distance_m.total_cmp(&b.1.distance_m));

                let ordered: Vec<_> = members.into_iter().map(|(stop, _)| stop).collect();
                let stops = sample_group(&ordered, &self.sampling)?;

                let number = i + 1;
                Some(RoutePlan::bus(
                    number,
                    format!("Radial Route {number}"),
                    self.palette.get(i),
                    stops,
                ))
            })
            .collect()
    }
}
