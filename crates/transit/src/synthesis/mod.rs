//! Route synthesis: sampling, route building and the strategy sequence.

pub mod builder;
pub mod config;
pub mod pipeline;
pub mod sampling;
pub mod strategies;

pub use builder::{hop_seconds, RouteBuilder};
pub use config::{
    Band, CityCenter, CommunityPolicy, IntervalRange, MetroPolicy, Palette, SamplingPolicy, SynthesisConfig,
};
pub use pipeline::{run_strategy, RouteSynthesizer, StrategyOutput};
pub use strategies::{ClusterStrategy, RoutePlan};
