//! Dungeon Configuration and Builder
//!
//! This module provides configuration types for deterministic dungeon generation.

use glam::UVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

/// Upper bound on room placement attempts
const MAX_ROOM_COUNT: usize = 1000;

/// Configuration for deterministic dungeon generation
///
/// The same configuration will always produce the identical dungeon: room
/// placement and extra hallway selection both draw from a generator seeded
/// with `seed`.
///
/// # Example
///
/// ```rust
/// use dungeon_layout::*;
///
/// let config = DungeonConfigBuilder::new()
///     .seed(42)
///     .room_count(20)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// // Config is serializable (with "serde" feature)
/// # #[cfg(feature = "serde")]
/// # {
/// let json = serde_json::to_string(&config).unwrap();
/// let restored: DungeonConfig = serde_json::from_str(&json).unwrap();
/// assert_eq!(config, restored);
/// # }
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DungeonConfig {
    /// Random seed for room placement and extra hallway selection
    pub seed: u64,

    /// Map size in tiles
    pub size: UVec2,

    /// Number of room placement attempts
    ///
    /// Candidates overlapping an existing room (with a one tile buffer) or
    /// leaving the map are rejected, so the final room count is usually lower.
    pub room_count: usize,

    /// Smallest room size in tiles (inclusive)
    pub room_min_size: UVec2,

    /// Largest room size in tiles (inclusive)
    pub room_max_size: UVec2,

    /// Probability that a triangulation edge outside the spanning tree is
    /// kept as an extra hallway, creating loops
    ///
    /// - 0.0: Tree-shaped dungeon, exactly one route between rooms
    /// - 0.2: Default, a few loops
    /// - 1.0: Every triangulation edge becomes a hallway
    pub extra_hallway_chance: f64,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            size: UVec2::new(72, 41),
            room_count: 10,
            room_min_size: UVec2::new(3, 3),
            room_max_size: UVec2::new(10, 10),
            extra_hallway_chance: 0.2,
        }
    }
}

/// Builder for creating DungeonConfig with validation
///
/// # Example
///
/// ```rust
/// use dungeon_layout::*;
/// use glam::UVec2;
///
/// let config = DungeonConfigBuilder::new()
///     .seed(12345)
///     .size(UVec2::new(100, 60))
///     .unwrap()
///     .room_size_range(UVec2::new(4, 4), UVec2::new(12, 8))
///     .unwrap()
///     .extra_hallway_chance(0.1)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(config.size, UVec2::new(100, 60));
/// ```
#[derive(Debug, Clone)]
pub struct DungeonConfigBuilder {
    seed: Option<u64>,
    size: UVec2,
    room_count: usize,
    room_min_size: UVec2,
    room_max_size: UVec2,
    extra_hallway_chance: f64,
}

impl DungeonConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: Random (generated from thread_rng)
    /// - size: 72 x 41 tiles
    /// - room_count: 10 placement attempts
    /// - room sizes: 3 x 3 up to 10 x 10
    /// - extra_hallway_chance: 0.2
    pub fn new() -> Self {
        let defaults = DungeonConfig::default();
        Self {
            seed: None,
            size: defaults.size,
            room_count: defaults.room_count,
            room_min_size: defaults.room_min_size,
            room_max_size: defaults.room_max_size,
            extra_hallway_chance: defaults.extra_hallway_chance,
        }
    }

    /// Set the random seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the map size in tiles
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if either dimension is zero
    pub fn size(mut self, size: UVec2) -> Result<Self> {
        if size.x == 0 || size.y == 0 {
            return Err(LayoutError::InvalidConfig(format!(
                "map size must be non-zero (got {}x{})",
                size.x, size.y
            )));
        }
        self.size = size;
        Ok(self)
    }

    /// Set the number of room placement attempts
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if count > 1000
    pub fn room_count(mut self, count: usize) -> Result<Self> {
        if count > MAX_ROOM_COUNT {
            return Err(LayoutError::InvalidConfig(format!(
                "room count must be <= {} (got {})",
                MAX_ROOM_COUNT, count
            )));
        }
        self.room_count = count;
        Ok(self)
    }

    /// Set the inclusive range of room sizes
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `min` has a zero dimension or `max` is
    /// smaller than `min` on either axis
    pub fn room_size_range(mut self, min: UVec2, max: UVec2) -> Result<Self> {
        if min.x == 0 || min.y == 0 {
            return Err(LayoutError::InvalidConfig(format!(
                "minimum room size must be non-zero (got {}x{})",
                min.x, min.y
            )));
        }
        if max.x < min.x || max.y < min.y {
            return Err(LayoutError::InvalidConfig(format!(
                "maximum room size {}x{} is smaller than minimum {}x{}",
                max.x, max.y, min.x, min.y
            )));
        }
        self.room_min_size = min;
        self.room_max_size = max;
        Ok(self)
    }

    /// Set the probability of keeping each non-tree edge as an extra hallway
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if chance is outside [0, 1]
    pub fn extra_hallway_chance(mut self, chance: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&chance) {
            return Err(LayoutError::InvalidConfig(format!(
                "extra hallway chance must be within [0, 1] (got {})",
                chance
            )));
        }
        self.extra_hallway_chance = chance;
        Ok(self)
    }

    /// Build the configuration
    ///
    /// If no seed was provided, generates a random seed using thread_rng.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the smallest room plus its one tile buffer
    /// does not fit inside the map
    pub fn build(self) -> Result<DungeonConfig> {
        let needed = self.room_min_size + UVec2::splat(2);
        if needed.x > self.size.x || needed.y > self.size.y {
            return Err(LayoutError::InvalidConfig(format!(
                "minimum room size {}x{} does not fit a {}x{} map",
                self.room_min_size.x, self.room_min_size.y, self.size.x, self.size.y
            )));
        }

        Ok(DungeonConfig {
            seed: self.seed.unwrap_or_else(rand::random),
            size: self.size,
            room_count: self.room_count,
            room_min_size: self.room_min_size,
            room_max_size: self.room_max_size,
            extra_hallway_chance: self.extra_hallway_chance,
        })
    }
}

impl Default for DungeonConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = DungeonConfigBuilder::new().build().unwrap();
        assert_eq!(config.size, UVec2::new(72, 41));
        assert_eq!(config.room_count, 10);
        assert_eq!(config.room_min_size, UVec2::new(3, 3));
        assert_eq!(config.room_max_size, UVec2::new(10, 10));
        assert_eq!(config.extra_hallway_chance, 0.2);
    }

    #[test]
    fn test_builder_custom() {
        let config = DungeonConfigBuilder::new()
            .seed(42)
            .size(UVec2::new(50, 50))
            .unwrap()
            .room_count(25)
            .unwrap()
            .room_size_range(UVec2::new(2, 3), UVec2::new(6, 7))
            .unwrap()
            .extra_hallway_chance(0.5)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(config.seed, 42);
        assert_eq!(config.size, UVec2::new(50, 50));
        assert_eq!(config.room_count, 25);
        assert_eq!(config.room_min_size, UVec2::new(2, 3));
        assert_eq!(config.room_max_size, UVec2::new(6, 7));
        assert_eq!(config.extra_hallway_chance, 0.5);
    }

    #[test]
    fn test_builder_invalid_size() {
        assert!(DungeonConfigBuilder::new().size(UVec2::new(0, 10)).is_err());
        assert!(DungeonConfigBuilder::new().size(UVec2::new(10, 0)).is_err());
    }

    #[test]
    fn test_builder_too_many_rooms() {
        assert!(DungeonConfigBuilder::new().room_count(1001).is_err());
        assert!(DungeonConfigBuilder::new().room_count(1000).is_ok());
    }

    #[test]
    fn test_builder_invalid_room_sizes() {
        let result = DungeonConfigBuilder::new().room_size_range(UVec2::new(0, 3), UVec2::new(5, 5));
        assert!(result.is_err());

        let result = DungeonConfigBuilder::new().room_size_range(UVec2::new(6, 3), UVec2::new(5, 5));
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_invalid_chance() {
        assert!(DungeonConfigBuilder::new().extra_hallway_chance(-0.1).is_err());
        assert!(DungeonConfigBuilder::new().extra_hallway_chance(1.5).is_err());
        assert!(DungeonConfigBuilder::new().extra_hallway_chance(f64::NAN).is_err());
        assert!(DungeonConfigBuilder::new().extra_hallway_chance(1.0).is_ok());
    }

    #[test]
    fn test_build_rejects_rooms_larger_than_map() {
        let result = DungeonConfigBuilder::new()
            .size(UVec2::new(8, 8))
            .unwrap()
            .room_size_range(UVec2::new(7, 3), UVec2::new(7, 3))
            .unwrap()
            .build();
        assert!(result.is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_serialization() {
        let config = DungeonConfigBuilder::new().seed(12345).build().unwrap();

        let json = serde_json::to_string(&config).unwrap();
        let restored: DungeonConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config, restored);
    }
}
