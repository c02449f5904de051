//! Type-safe identifiers for network entities.
//!
//! Stops and routes are numbered densely from 1, matching the integer keys the
//! mobile app's database expects.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! impl_identifier {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            pub const fn new(value: u32) -> Self {
                Self(value)
            }

            pub const fn get(&self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(value: u32) -> Self {
                Self::new(value)
            }
        }
    };
}

impl_identifier!(StopId);
impl_identifier!(RouteId);

/// Hands out route ids 1, 2, 3, ... in call order.
#[derive(Clone, Debug, Default)]
pub struct RouteIdGenerator {
    last: u32,
}

impl RouteIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> RouteId {
        self.last += 1;
        RouteId::new(self.last)
    }

    /// Number of ids issued so far
    pub fn issued(&self) -> u32 {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_equality() {
        let id1 = StopId::new(7);
        let id2 = StopId::from(7);
        let id3 = id1;

        assert_eq!(id1, id2);
        assert_eq!(id1, id3);
        assert!(StopId::new(3) < StopId::new(4));
    }

    #[test]
    fn test_identifier_hash() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(RouteId::new(12), 42);

        assert_eq!(map.get(&RouteId::new(12)), Some(&42));
    }

    #[test]
    fn test_identifier_display() {
        let id = RouteId::new(101);
        assert_eq!(format!("{}", id), "101");
    }

    #[test]
    fn test_identifier_serializes_as_number() {
        let json = serde_json::to_string(&StopId::new(5)).unwrap();
        assert_eq!(json, "5");
    }

    #[test]
    fn test_route_id_generator_is_sequential() {
        let mut ids = RouteIdGenerator::new();
        assert_eq!(ids.next_id(), RouteId::new(1));
        assert_eq!(ids.next_id(), RouteId::new(2));
        assert_eq!(ids.next_id(), RouteId::new(3));
        assert_eq!(ids.issued(), 3);
    }
}
