//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an alien, assigned sequentially at deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlienId(pub u32);

impl fmt::Display for AlienId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Direction tag on a route.
///
/// Opaque: usually a compass point, but never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Direction(pub String);

impl Direction {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Directed edge from the owning city to `to`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub direction: Direction,
    pub to: String,
}

impl Route {
    pub fn new(direction: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            direction: Direction::new(direction),
            to: to.into(),
        }
    }
}

/// Record of a city wiped out by overwhelming aliens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destruction {
    pub round: u64,
    pub city: String,
    /// Aliens consumed, in arrival order
    pub aliens: Vec<AlienId>,
}

impl fmt::Display for Destruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<String> = self.aliens.iter().map(|id| id.to_string()).collect();
        write!(f, "{} destroyed by aliens [{}]", self.city, ids.join(", "))
    }
}
