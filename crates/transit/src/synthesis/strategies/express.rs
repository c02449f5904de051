//! Long-haul express lines spanning the whole bus network.

use std::collections::HashSet;

use crate::catalog::StopCatalog;
use crate::identifiers::StopId;
use crate::synthesis::config::{SamplingPolicy, SynthesisConfig};
use crate::synthesis::sampling::sample_group;
use crate::synthesis::strategies::{Axis, ClusterStrategy, RoutePlan};

/// One express line: all bus stops ordered along an axis, then sampled
#[derive(Clone, Debug, PartialEq)]
pub struct ExpressLine {
    pub number: String,
    pub name: String,
    pub color: String,
    pub axis: Axis,
    pub descending: bool,
}

impl ExpressLine {
    /// Route 100, north to south
    pub fn north_south() -> Self {
        Self {
            number: "100".into(),
            name: "Express North-South".into(),
            color: "#FF5722".into(),
            axis: Axis::Latitude,
            descending: true,
        }
    }

    /// Route 101, west to east
    pub fn east_west() -> Self {
        Self {
            number: "101".into(),
            name: "Express East-West".into(),
            color: "#9C27B0".into(),
            axis: Axis::Longitude,
            descending: false,
        }
    }
}

pub struct ExpressStrategy {
    lines: Vec<ExpressLine>,
    sampling: SamplingPolicy,
}

impl ExpressStrategy {
    pub fn new(lines: Vec<ExpressLine>, sampling: SamplingPolicy) -> Self {
        Self { lines, sampling }
    }

    pub fn from_config(config: &SynthesisConfig) -> Self {
        Self::new(
            vec![ExpressLine::north_south(), ExpressLine::east_west()],
            config.express,
        )
    }
}

impl ClusterStrategy for ExpressStrategy {
    fn name(&self) -> &str {
        "express"
    }

    fn plan<'a>(&self, catalog: &'a StopCatalog, _used: &HashSet<StopId>) -> Vec<RoutePlan<'a>> {
        self.lines
            .iter()
            .filter_map(|line| {
                let mut ordered: Vec<_> = catalog.bus_stops().iter().collect();
                if line.descending {
                    ordered.sort_by(|a, b| line.axis.compare(b, a));
                } else {
                    ordered.sort_by(|a, b| line.axis.compare(a, b));
                }

                let stops = sample_group(&ordered, &self.sampling)?;
                Some(RoutePlan::bus(&line.number, &line.name, &line.color, stops))
            })
            .collect()
    }
}
