//! Daily operating window of a route.
//!
//! Stored and transmitted as `HH:MM-HH:MM`, the format the app displays.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::models::types::{Result, TransitError};

const TIME_FORMAT: &str = "%H:%M";

/// First and last service time of a day
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperatingHours {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl OperatingHours {
    /// Returns `None` unless `start` precedes `end`
    pub fn new(start: NaiveTime, end: NaiveTime) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    /// Bus default, 07:00-22:00
    pub fn bus_default() -> Self {
        Self {
            start: hm(7, 0),
            end: hm(22, 0),
        }
    }

    /// Extended metro window, 06:30-23:30
    pub fn metro_default() -> Self {
        Self {
            start: hm(6, 30),
            end: hm(23, 30),
        }
    }
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

impl Default for OperatingHours {
    fn default() -> Self {
        Self::bus_default()
    }
}

impl fmt::Display for OperatingHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format(TIME_FORMAT),
            self.end.format(TIME_FORMAT)
        )
    }
}

impl FromStr for OperatingHours {
    type Err = TransitError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || TransitError::InvalidData(format!("Invalid operating hours: {s:?}"));

        let (start, end) = s.split_once('-').ok_or_else(invalid)?;
        let start = NaiveTime::parse_from_str(start.trim(), TIME_FORMAT).map_err(|_| invalid())?;
        let end = NaiveTime::parse_from_str(end.trim(), TIME_FORMAT).map_err(|_| invalid())?;

        Self::new(start, end).ok_or_else(invalid)
    }
}

impl Serialize for OperatingHours {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for OperatingHours {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_display() {
        assert_eq!(OperatingHours::bus_default().to_string(), "07:00-22:00");
        assert_eq!(OperatingHours::metro_default().to_string(), "06:30-23:30");
        assert_eq!(OperatingHours::default(), OperatingHours::bus_default());
    }

    #[test]
    fn test_parse() {
        let hours: OperatingHours = "06:30-23:30".parse().unwrap();
        assert_eq!(hours, OperatingHours::metro_default());

        let spaced: OperatingHours = " 07:00 - 22:00 ".parse().unwrap();
        assert_eq!(spaced, OperatingHours::bus_default());
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("0700-2200".parse::<OperatingHours>().is_err());
        assert!("07:00".parse::<OperatingHours>().is_err());
        assert!("25:00-26:00".parse::<OperatingHours>().is_err());
        // Window must not be empty or inverted
        assert!("22:00-07:00".parse::<OperatingHours>().is_err());
    }

    #[test]
    fn test_serde_uses_string_form() {
        let json = serde_json::to_string(&OperatingHours::metro_default()).unwrap();
        assert_eq!(json, "\"06:30-23:30\"");

        let back: OperatingHours = serde_json::from_str("\"07:00-22:00\"").unwrap();
        assert_eq!(back, OperatingHours::bus_default());
    }
}
