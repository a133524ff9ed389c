//! # Generation Module
//!
//! Procedural board generation.
//!
//! This module provides the configuration that drives board generation and the
//! [`Generator`] trait implemented by [`BoardGenerator`]. Generation is fully
//! determined by the seeded random number generator it is given.

pub mod board;

pub use board::*;

use crate::{config, TreasureHuntError, TreasureResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for board generation.
///
/// Controls the grid dimension, the number of treasures, the obstacle range
/// and the bound on random placement retries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Width and height of the square grid
    pub grid_size: usize,
    /// Exact number of treasures on every board
    pub treasure_count: usize,
    /// Minimum obstacle target
    pub min_obstacles: usize,
    /// Maximum obstacle target (inclusive)
    pub max_obstacles: usize,
    /// Random samples allowed while placing treasures before falling back to
    /// the list of empty cells
    pub max_placement_attempts: usize,
}

impl GenerationConfig {
    /// Creates the standard configuration: a 10x10 grid, 7 treasures and
    /// between 15 and 29 obstacles.
    ///
    /// # Examples
    ///
    /// ```
    /// use treasure_hunt::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(42);
    /// assert_eq!(config.grid_size, 10);
    /// assert_eq!(config.treasure_count, 7);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            grid_size: config::DEFAULT_GRID_SIZE,
            treasure_count: config::DEFAULT_TREASURE_COUNT,
            min_obstacles: config::DEFAULT_MIN_OBSTACLES,
            max_obstacles: config::DEFAULT_MAX_OBSTACLES,
            max_placement_attempts: config::DEFAULT_MAX_PLACEMENT_ATTEMPTS,
        }
    }

    /// Creates a configuration for testing with a small board.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            grid_size: 5,
            treasure_count: 3,
            min_obstacles: 3,
            max_obstacles: 6,
            max_placement_attempts: 1_000,
        }
    }

    /// Loads a configuration from a JSON file. Missing fields take their
    /// default values.
    pub fn from_json_file(path: impl AsRef<Path>) -> TreasureResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Gets the number of cells on the grid.
    pub fn cell_count(&self) -> usize {
        self.grid_size * self.grid_size
    }

    /// Checks that the configuration can produce a board.
    ///
    /// The player needs one cell, so at most `grid_size² - 1` treasures fit.
    pub fn validate(&self) -> TreasureResult<()> {
        if self.grid_size == 0 {
            return Err(TreasureHuntError::InvalidConfig(
                "grid size must be at least 1".to_string(),
            ));
        }
        if self.grid_size > i32::MAX as usize {
            return Err(TreasureHuntError::InvalidConfig(format!(
                "grid size {} is too large",
                self.grid_size
            )));
        }
        if self.treasure_count >= self.cell_count() {
            return Err(TreasureHuntError::InvalidConfig(format!(
                "{} treasures do not fit on a {}x{} grid next to the player",
                self.treasure_count, self.grid_size, self.grid_size
            )));
        }
        if self.min_obstacles > self.max_obstacles {
            return Err(TreasureHuntError::InvalidConfig(format!(
                "obstacle range {}..={} is empty",
                self.min_obstacles, self.max_obstacles
            )));
        }
        if self.max_placement_attempts == 0 {
            return Err(TreasureHuntError::InvalidConfig(
                "max placement attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Trait for procedural generators.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> TreasureResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> TreasureResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_generation_config_creation() {
        let config = GenerationConfig::new(12345);
        assert_eq!(config.seed, 12345);
        assert_eq!(config.min_obstacles, 15);
        assert_eq!(config.max_obstacles, 29);
        assert!(config.validate().is_ok());
        assert!(GenerationConfig::for_testing(1).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_impossible_configs() {
        let mut config = GenerationConfig::new(1);
        config.treasure_count = 100;
        assert!(matches!(
            config.validate(),
            Err(TreasureHuntError::InvalidConfig(_))
        ));

        let mut config = GenerationConfig::new(1);
        config.grid_size = 0;
        assert!(config.validate().is_err());

        let mut config = GenerationConfig::new(1);
        config.min_obstacles = 30;
        assert!(config.validate().is_err());

        let mut config = GenerationConfig::new(1);
        config.max_placement_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_largest_treasure_count_is_valid() {
        let mut config = GenerationConfig::new(1);
        config.treasure_count = 99;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_json_file_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "seed": 7, "min_obstacles": 5, "max_obstacles": 8 }}"#).unwrap();

        let config = GenerationConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.grid_size, 10);
        assert_eq!(config.treasure_count, 7);
        assert_eq!(config.min_obstacles, 5);
        assert_eq!(config.max_obstacles, 8);
    }

    #[test]
    fn test_config_from_json_file_rejects_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "grid_size": 2, "treasure_count": 4 }}"#).unwrap();
        assert!(matches!(
            GenerationConfig::from_json_file(file.path()),
            Err(TreasureHuntError::InvalidConfig(_))
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            GenerationConfig::from_json_file(file.path()),
            Err(TreasureHuntError::Serde(_))
        ));
    }

    #[test]
    fn test_utils_rng_is_reproducible() {
        use rand::Rng;

        let config = GenerationConfig::new(12345);
        let mut a = utils::create_rng(&config);
        let mut b = utils::create_rng(&config);
        assert_eq!(a.gen::<u64>(), b.gen::<u64>());
    }
}
