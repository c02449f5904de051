//! Tunable constants of route synthesis.
//!
//! Defaults reproduce the Yerevan network; every field can be overridden from
//! a JSON file.

use geo::Point;
use serde::Deserialize;

use crate::models::hours::OperatingHours;

/// Fixed-stride downselection of an ordered candidate list
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SamplingPolicy {
    /// Roughly how many stops the stride aims for
    pub target_density: usize,
    /// Hard cap on sampled stops
    pub max_stops: usize,
    /// Groups smaller than this after sampling are dropped
    pub min_stops: usize,
}

impl SamplingPolicy {
    pub const fn new(target_density: usize, max_stops: usize, min_stops: usize) -> Self {
        Self {
            target_density,
            max_stops,
            min_stops,
        }
    }
}

impl Default for SamplingPolicy {
    fn default() -> Self {
        Self::new(12, 15, 3)
    }
}

/// Half-open coordinate range `[min, max)`
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value < self.max
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CityCenter {
    pub latitude: f64,
    pub longitude: f64,
}

impl CityCenter {
    pub fn point(&self) -> Point {
        Point::new(self.longitude, self.latitude)
    }
}

impl Default for CityCenter {
    fn default() -> Self {
        Self {
            latitude: 40.1792,
            longitude: 44.4991,
        }
    }
}

/// Route colour used when the palette is empty
pub const DEFAULT_ROUTE_COLOR: &str = "#2196F3";

/// Cyclic list of route colours
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Palette(Vec<String>);

impl Palette {
    pub fn new(colors: Vec<String>) -> Self {
        Self(colors)
    }

    /// Entry `index`, wrapping around
    pub fn get(&self, index: usize) -> &str {
        if self.0.is_empty() {
            return DEFAULT_ROUTE_COLOR;
        }
        &self.0[index % self.0.len()]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self(
            [
                "#E53935", "#D81B60", "#8E24AA", "#5E35B1", "#3949AB", "#1E88E5", "#039BE5",
                "#00ACC1", "#00897B", "#43A047", "#7CB342", "#C0CA33", "#FDD835", "#FFB300",
                "#FB8C00", "#F4511E", "#6D4C41", "#546E7A", "#2196F3", "#4CAF50",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CommunityPolicy {
    /// Raw members a community needs before a loop is attempted
    pub min_members: usize,
    pub sampling: SamplingPolicy,
}

impl Default for CommunityPolicy {
    fn default() -> Self {
        Self {
            min_members: 4,
            sampling: SamplingPolicy::new(10, 12, 3),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct MetroPolicy {
    pub number: String,
    pub name: String,
    pub color: String,
    pub interval_minutes: u32,
    pub operating_hours: OperatingHours,
}

impl Default for MetroPolicy {
    fn default() -> Self {
        Self {
            number: "M1".into(),
            name: "Metro Line 1".into(),
            color: "#E53935".into(),
            interval_minutes: 5,
            operating_hours: OperatingHours::metro_default(),
        }
    }
}

/// Inclusive range the per-route headway is drawn from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IntervalRange {
    pub min_minutes: u32,
    pub max_minutes: u32,
}

impl Default for IntervalRange {
    fn default() -> Self {
        Self {
            min_minutes: 5,
            max_minutes: 15,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    pub center: CityCenter,
    pub sector_count: usize,
    /// Sampling shared by radial and band corridors
    pub corridor: SamplingPolicy,
    pub latitude_bands: Vec<Band>,
    pub longitude_bands: Vec<Band>,
    pub community: CommunityPolicy,
    pub express: SamplingPolicy,
    pub connector_chunk_size: usize,
    pub metro: MetroPolicy,
    pub interval: IntervalRange,
    pub operating_hours: OperatingHours,
    pub palette: Palette,
}

impl SynthesisConfig {
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            center: CityCenter::default(),
            sector_count: 8,
            corridor: SamplingPolicy::default(),
            latitude_bands: vec![
                Band::new(40.13, 40.15),
                Band::new(40.15, 40.17),
                Band::new(40.17, 40.19),
                Band::new(40.19, 40.21),
                Band::new(40.21, 40.23),
            ],
            longitude_bands: vec![
                Band::new(44.44, 44.47),
                Band::new(44.47, 44.50),
                Band::new(44.50, 44.53),
                Band::new(44.53, 44.56),
                Band::new(44.56, 44.59),
            ],
            community: CommunityPolicy::default(),
            express: SamplingPolicy::new(20, 20, 3),
            connector_chunk_size: 6,
            metro: MetroPolicy::default(),
            interval: IntervalRange::default(),
            operating_hours: OperatingHours::bus_default(),
            palette: Palette::default(),
        }
    }
}
