//! Loop routes inside each community.
//!
//! Members are ordered by their angle around the community centroid, which
//! walks the district in a rough circle instead of a straight line.

use std::collections::HashSet;

use geo::{Centroid, MultiPoint};

use crate::catalog::StopCatalog;
use crate::identifiers::StopId;
use crate::synthesis::config::{CommunityPolicy, Palette, SynthesisConfig};
use crate::synthesis::sampling::sample_group;
use crate::synthesis::strategies::{ClusterStrategy, RoutePlan};

const NUMBER_BASE: usize = 30;

pub struct CommunityStrategy {
    policy: CommunityPolicy,
    palette: Palette,
}

impl CommunityStrategy {
    pub fn new(policy: CommunityPolicy, palette: Palette) -> Self {
        Self { policy, palette }
    }

    pub fn from_config(config: &SynthesisConfig) -> Self {
        Self::new(config.community, config.palette.clone())
    }
}

impl ClusterStrategy for CommunityStrategy {
    fn name(&self) -> &str {
        "community"
    }

    fn plan<'a>(&self, catalog: &'a StopCatalog, _used: &HashSet<StopId>) -> Vec<RoutePlan<'a>> {
        // Index counts every labelled community, including ones too small for a loop
        catalog
            .communities()
            .into_iter()
            .enumerate()
            .filter(|(_, (_, members))| members.len() >= self.policy.min_members)
            .filter_map(|(i, (label, mut members))| {
                let centroid = members
                    .iter()
                    .map(|s| s.location())
                    .collect::<MultiPoint>()
                    .centroid()?;

                let loop_angle = |lat: f64, lon: f64| (lon - centroid.x()).atan2(lat - centroid.y());
                members.sort_by(|a, b| {
                    loop_angle(a.latitude, a.longitude).total_cmp(&loop_angle(b.latitude, b.longitude))
                });

                let stops = sample_group(&members, &self.policy.sampling)?;
                Some(RoutePlan::bus(
                    NUMBER_BASE + i,
                    format!("Community Route {label}"),
                    self.palette.get(i),
                    stops,
                ))
            })
            .collect()
    }
}
