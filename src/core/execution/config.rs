//! Configuration for a belt simulation run
//!
//! Holds the belt size, how many ticks to run, whether the belt is filled with
//! random content before the first tick, and the optional random seed.

use crate::core::state::SimulationError;
use serde::{Deserialize, Serialize};

/// Belt size used when none is given
pub const DEFAULT_SIZE: usize = 3;

/// Number of ticks run when none is given
pub const DEFAULT_TICKS: u64 = 100;

/// Configuration for a simulation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeltConfig {
    /// Number of slots on the belt
    pub size: usize,
    /// Number of ticks to run
    pub ticks: u64,
    /// Fill the belt with random content before the first tick
    pub pre_fill: bool,
    /// Seed for reproducible runs; entropy is used when absent
    pub seed: Option<u64>,
}

impl BeltConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self {
            size: DEFAULT_SIZE,
            ticks: DEFAULT_TICKS,
            pre_fill: false,
            seed: None,
        }
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_ticks(mut self, ticks: u64) -> Self {
        self.ticks = ticks;
        self
    }

    pub fn with_pre_fill(mut self, pre_fill: bool) -> Self {
        self.pre_fill = pre_fill;
        self
    }

    /// Fix the random seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the configuration describes a runnable belt
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.size == 0 {
            return Err(SimulationError::InvalidConfig(
                "belt size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for BeltConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BeltConfig::default();
        assert_eq!(config.size, DEFAULT_SIZE);
        assert_eq!(config.ticks, DEFAULT_TICKS);
        assert!(!config.pre_fill);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = BeltConfig::new()
            .with_size(10)
            .with_ticks(5)
            .with_pre_fill(true)
            .with_seed(42);

        assert_eq!(config.size, 10);
        assert_eq!(config.ticks, 5);
        assert!(config.pre_fill);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_zero_size_rejected() {
        let config = BeltConfig::new().with_size(0);
        assert!(matches!(
            config.validate(),
            Err(SimulationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = BeltConfig::new().with_seed(7);
        let json = serde_json::to_string(&config).unwrap();
        let restored: BeltConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, config);
    }
}
