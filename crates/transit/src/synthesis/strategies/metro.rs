//! The metro line: every station, north to south.

use std::collections::HashSet;

use crate::catalog::StopCatalog;
use crate::identifiers::StopId;
use crate::models::types::StopType;
use crate::synthesis::config::{MetroPolicy, SynthesisConfig};
use crate::synthesis::strategies::{Axis, ClusterStrategy, RoutePlan};

pub struct MetroStrategy {
    policy: MetroPolicy,
}

impl MetroStrategy {
    pub fn new(policy: MetroPolicy) -> Self {
        Self { policy }
    }

    pub fn from_config(config: &SynthesisConfig) -> Self {
        Self::new(config.metro.clone())
    }
}

impl ClusterStrategy for MetroStrategy {
    fn name(&self) -> &str {
        "metro"
    }

    fn plan<'a>(&self, catalog: &'a StopCatalog, _used: &HashSet<StopId>) -> Vec<RoutePlan<'a>> {
        if catalog.metro_stops().len() < 2 {
            return Vec::new();
        }

        let mut stations: Vec<_> = catalog.metro_stops().iter().collect();
        stations.sort_by(|a, b| Axis::Latitude.compare(b, a));

        vec![RoutePlan {
            number: self.policy.number.clone(),
            name: self.policy.name.clone(),
            category: StopType::Metro,
            color: self.policy.color.clone(),
            stops: stations,
            interval_override: Some(self.policy.interval_minutes),
            hours_override: Some(self.policy.operating_hours),
        }]
    }
}
