//! Configuration types for the simulation.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Invasion run parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvasionConfig {
    /// Number of aliens to deploy
    pub aliens: usize,
    /// Maximum number of rounds to simulate
    pub iterations: u64,
    /// Random seed for reproducibility (drawn at startup when absent)
    pub seed: Option<u64>,
}

impl Default for InvasionConfig {
    fn default() -> Self {
        Self {
            aliens: 5,
            iterations: 10_000,
            seed: None,
        }
    }
}

impl InvasionConfig {
    /// Load configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_default_config() {
        let config = InvasionConfig::default();
        assert_eq!(config.aliens, 5);
        assert_eq!(config.iterations, 10_000);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = InvasionConfig::from_json_str(r#"{"aliens": 12, "seed": 7}"#).unwrap();
        assert_eq!(config.aliens, 12);
        assert_eq!(config.iterations, 10_000);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_invalid_json() {
        let err = InvasionConfig::from_json_str("{aliens: }").unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = InvasionConfig::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
