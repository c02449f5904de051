//! Runs the cluster strategies in order and assembles the network.

use std::collections::HashSet;

use rand::Rng;

use crate::catalog::StopCatalog;
use crate::identifiers::StopId;
use crate::models::network::TransitNetwork;
use crate::models::types::{Route, RouteStopRef};
use crate::synthesis::builder::RouteBuilder;
use crate::synthesis::config::SynthesisConfig;
use crate::synthesis::strategies::*;

/// Smallest route that can be emitted
pub const MIN_ROUTE_STOPS: usize = 2;

/// Routes built from one strategy's plans
#[derive(Debug, Default)]
pub struct StrategyOutput {
    pub routes: Vec<Route>,
    pub refs: Vec<RouteStopRef>,
    pub newly_used: HashSet<StopId>,
}

/// Plan with `strategy` and build every acceptable plan through `builder`
pub fn run_strategy<R: Rng>(
    strategy: &dyn ClusterStrategy,
    catalog: &StopCatalog,
    used: &HashSet<StopId>,
    builder: &mut RouteBuilder<'_, R>,
) -> StrategyOutput {
    let mut output = StrategyOutput::default();

    for plan in strategy.plan(catalog, used) {
        if plan.stops.len() < MIN_ROUTE_STOPS {
            log::debug!(
                "{}: dropping {} with {} stop(s)",
                strategy.name(),
                plan.name,
                plan.stops.len()
            );
            continue;
        }

        let (mut route, refs) =
            builder.build_route(&plan.number, &plan.name, &plan.stops, plan.category, &plan.color);
        if let Some(minutes) = plan.interval_override {
            route.average_interval_minutes = minutes;
        }
        if let Some(hours) = plan.hours_override {
            route.operating_hours = hours;
        }

        log::debug!(
            "{}: route {} ({}) with {} stops",
            strategy.name(),
            route.number,
            route.name,
            refs.len()
        );

        output.newly_used.extend(plan.stops.iter().map(|s| s.id));
        output.routes.push(route);
        output.refs.extend(refs);
    }

    output
}

/// Coordinates the strategy sequence over one catalog
pub struct RouteSynthesizer {
    config: SynthesisConfig,
    strategies: Vec<Box<dyn ClusterStrategy>>,
}

impl RouteSynthesizer {
    /// Radial, east-west, north-south, community, metro, connector, express
    pub fn new(config: SynthesisConfig) -> Self {
        let strategies: Vec<Box<dyn ClusterStrategy>> = vec![
            Box::new(RadialStrategy::from_config(&config)),
            Box::new(BandStrategy::east_west(&config)),
            Box::new(BandStrategy::north_south(&config)),
            Box::new(CommunityStrategy::from_config(&config)),
            Box::new(MetroStrategy::from_config(&config)),
            Box::new(ConnectorStrategy::from_config(&config)),
            Box::new(ExpressStrategy::from_config(&config)),
        ];
        Self::with_strategies(config, strategies)
    }

    pub fn with_strategies(config: SynthesisConfig, strategies: Vec<Box<dyn ClusterStrategy>>) -> Self {
        Self { config, strategies }
    }

    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Build the full network
    ///
    /// Uncovered stops are logged, not rejected; use
    /// [`TransitNetwork::verify_coverage`] to enforce completeness.
    pub fn synthesize<R: Rng>(&self, catalog: &StopCatalog, rng: &mut R) -> TransitNetwork {
        let mut builder = RouteBuilder::new(rng, self.config.interval, self.config.operating_hours);
        let mut used = HashSet::new();
        let mut network = TransitNetwork {
            stops: catalog.stops().to_vec(),
            ..Default::default()
        };

        for strategy in &self.strategies {
            let output = run_strategy(strategy.as_ref(), catalog, &used, &mut builder);
            log::info!(
                "  {}: {} routes, {} stops",
                strategy.name(),
                output.routes.len(),
                output.newly_used.len()
            );

            used.extend(output.newly_used);
            network.routes.extend(output.routes);
            network.route_stop_refs.extend(output.refs);
        }

        let missing = network.uncovered_stops();
        if !missing.is_empty() {
            log::warn!("{} stop(s) left without a route: {:?}", missing.len(), missing);
        }

        network
    }
}
