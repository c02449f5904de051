use std::collections::BTreeMap;

use yerevan_transit::{StopType, TransitNetwork};

const UNKNOWN_COMMUNITY: &str = "Unknown";

/// Counts reported at the end of a run
#[derive(Debug, Default, PartialEq)]
pub struct NetworkSummary {
    pub bus_stops: usize,
    pub metro_stations: usize,
    pub routes: usize,
    pub route_stop_links: usize,
    pub stops_on_routes: usize,
    /// Stops per community label, unlabelled stops under "Unknown"
    pub communities: BTreeMap<String, usize>,
}

impl NetworkSummary {
    pub fn from_network(network: &TransitNetwork) -> Self {
        let mut summary = Self {
            routes: network.routes.len(),
            route_stop_links: network.route_stop_refs.len(),
            stops_on_routes: network.covered_stop_count(),
            ..Default::default()
        };

        for stop in &network.stops {
            match stop.category {
                StopType::Bus => summary.bus_stops += 1,
                StopType::Metro => summary.metro_stations += 1,
            }
            let label = if stop.community.is_empty() {
                UNKNOWN_COMMUNITY
            } else {
                stop.community.as_str()
            };
            *summary.communities.entry(label.to_string()).or_default() += 1;
        }

        summary
    }

    pub fn total_stops(&self) -> usize {
        self.bus_stops + self.metro_stations
    }

    pub fn log_summary(&self) {
        log::info!("=== Network Summary ===");
        log::info!("Bus stops: {}", self.bus_stops);
        log::info!("Metro stations: {}", self.metro_stations);
        log::info!("Total stops: {}", self.total_stops());
        log::info!("Routes: {}", self.routes);
        log::info!("Route-stop links: {}", self.route_stop_links);
        log::info!("Stops on routes: {}/{}", self.stops_on_routes, self.total_stops());
        log::info!("Stops by community:");
        for (community, count) in &self.communities {
            log::info!("  {community}: {count}");
        }
    }
}
