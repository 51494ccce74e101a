//! # Game Configuration
//!
//! Tunables for movement, interaction, placement, asset loading and scenery.
//!
//! Configuration is plain serde data. It can be loaded from a JSON file and
//! any missing field falls back to its default, so a config file only needs
//! to mention what it changes.

use crate::constants::*;
use crate::{KeyhuntError, KeyhuntResult};
use macroquad::math::Vec3;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration for a game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Random seed for house placement and scenery. Drawn fresh when a
    /// config leaves it out, so every session gets a new town.
    pub seed: u64,
    pub movement: MovementConfig,
    pub interaction: InteractionConfig,
    pub placement: PlacementConfig,
    pub assets: AssetConfig,
    pub scenery: SceneryConfig,
    pub spawn: SpawnConfig,
}

/// First-person movement settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Walking speed in units per second
    pub speed: f32,
    /// Simulated seconds per frame tick
    pub tick_seconds: f32,
    /// Moves that bring a wall closer than this are reverted
    pub collision_margin: f32,
    /// Radians of rotation per unit of mouse delta
    pub mouse_sensitivity: f32,
}

/// Proximity search settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Maximum distance from the eye to an object's bounds center
    pub range: f32,
}

/// Random house placement settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Candidates are drawn from [-h, h] on both axes
    pub region_half_extent: f32,
    /// Minimum distance to every previously placed center
    pub min_distance: f32,
    /// Candidates drawn before the region is widened
    pub max_attempts: u32,
    /// Factor applied to the region on each widening
    pub widen_factor: f32,
    /// Widenings tried before the best candidate is accepted as-is
    pub max_widenings: u32,
}

/// Asset loading settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory asset paths are resolved against
    pub root: PathBuf,
    /// Optional catalog file replacing the built-in one
    pub catalog: Option<PathBuf>,
    /// Require model files to exist on disk
    pub verify_files: bool,
    /// Seconds to wait for tagged loads before binding roles anyway
    pub role_resolution_timeout_secs: f32,
}

/// Decorative scenery settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneryConfig {
    pub tree_count: u32,
    /// Trees are drawn from [-r, r] on both axes
    pub tree_region: f32,
    /// No tree is placed within this square around the origin
    pub tree_clearing: f32,
}

/// Where the player starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub position: [f32; 3],
    /// Point the camera initially faces
    pub look_at: [f32; 3],
}

impl GameConfig {
    /// Creates a default configuration with the given seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyhunt::GameConfig;
    ///
    /// let config = GameConfig::new(7);
    /// assert_eq!(config.seed, 7);
    /// assert_eq!(config.interaction.range, 1.8);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            movement: MovementConfig::default(),
            interaction: InteractionConfig::default(),
            placement: PlacementConfig::default(),
            assets: AssetConfig::default(),
            scenery: SceneryConfig::default(),
            spawn: SpawnConfig::default(),
        }
    }

    /// Creates a configuration for tests with a short grace period for role
    /// binding.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            assets: AssetConfig {
                role_resolution_timeout_secs: 0.5,
                ..AssetConfig::default()
            },
            placement: PlacementConfig {
                max_attempts: 200,
                ..PlacementConfig::default()
            },
            ..Self::new(seed)
        }
    }

    /// Loads a configuration from a JSON file and validates it.
    pub fn load_from_file(path: impl AsRef<Path>) -> KeyhuntResult<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> KeyhuntResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> KeyhuntResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rejects values that would stall or break the simulation.
    pub fn validate(&self) -> KeyhuntResult<()> {
        fn positive(name: &str, value: f32) -> KeyhuntResult<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(KeyhuntError::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )))
            }
        }

        positive("movement.speed", self.movement.speed)?;
        positive("movement.tick_seconds", self.movement.tick_seconds)?;
        positive("movement.collision_margin", self.movement.collision_margin)?;
        positive("interaction.range", self.interaction.range)?;
        positive("placement.region_half_extent", self.placement.region_half_extent)?;
        positive("placement.min_distance", self.placement.min_distance)?;
        positive(
            "assets.role_resolution_timeout_secs",
            self.assets.role_resolution_timeout_secs,
        )?;

        if self.placement.max_attempts == 0 {
            return Err(KeyhuntError::InvalidConfig(
                "placement.max_attempts must be at least 1".to_string(),
            ));
        }
        if self.placement.widen_factor < 1.0 {
            return Err(KeyhuntError::InvalidConfig(format!(
                "placement.widen_factor must be >= 1.0, got {}",
                self.placement.widen_factor
            )));
        }
        if self.scenery.tree_count > 0 {
            positive("scenery.tree_region", self.scenery.tree_region)?;
            if self.scenery.tree_clearing.is_nan() || self.scenery.tree_clearing < 0.0 {
                return Err(KeyhuntError::InvalidConfig(format!(
                    "scenery.tree_clearing must not be negative, got {}",
                    self.scenery.tree_clearing
                )));
            }
            if self.scenery.tree_clearing >= self.scenery.tree_region {
                return Err(KeyhuntError::InvalidConfig(
                    "scenery.tree_clearing must be smaller than scenery.tree_region".to_string(),
                ));
            }
        }

        Ok(())
    }

    pub fn role_resolution_timeout(&self) -> Duration {
        Duration::from_secs_f32(self.assets.role_resolution_timeout_secs)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(rand::random())
    }
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_MOVE_SPEED,
            tick_seconds: DEFAULT_TICK_SECONDS,
            collision_margin: COLLISION_MARGIN,
            mouse_sensitivity: 0.002,
        }
    }
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            range: INTERACTION_RANGE,
        }
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            region_half_extent: HOUSE_REGION_HALF_EXTENT,
            min_distance: HOUSE_MIN_DISTANCE,
            max_attempts: 1000,
            widen_factor: 1.5,
            max_widenings: 4,
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            catalog: None,
            verify_files: false,
            role_resolution_timeout_secs: ROLE_RESOLUTION_TIMEOUT_SECS,
        }
    }
}

impl Default for SceneryConfig {
    fn default() -> Self {
        Self {
            tree_count: 8,
            tree_region: 35.0,
            tree_clearing: 8.0,
        }
    }
}

impl SpawnConfig {
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn look_at(&self) -> Vec3 {
        Vec3::from_array(self.look_at)
    }
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            position: [0.0, EYE_HEIGHT, 30.0],
            look_at: [0.0, EYE_HEIGHT, 0.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.movement.speed, 6.0);
        assert_eq!(config.movement.collision_margin, 0.4);
        assert_eq!(config.placement.min_distance, 18.0);
        assert_eq!(config.spawn.position(), Vec3::new(0.0, 1.6, 30.0));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json(r#"{ "seed": 99, "movement": { "speed": 3.0 } }"#)
            .unwrap();
        assert_eq!(config.seed, 99);
        assert_eq!(config.movement.speed, 3.0);
        assert_eq!(config.movement.tick_seconds, DEFAULT_TICK_SECONDS);
        assert_eq!(config.interaction.range, INTERACTION_RANGE);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = GameConfig::new(1);
        config.movement.speed = 0.0;
        assert!(matches!(
            config.validate(),
            Err(KeyhuntError::InvalidConfig(_))
        ));

        let mut config = GameConfig::new(1);
        config.placement.max_attempts = 0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::new(1);
        config.placement.widen_factor = 0.5;
        assert!(config.validate().is_err());

        assert!(GameConfig::from_json(r#"{ "interaction": { "range": -1.0 } }"#).is_err());
    }

    #[test]
    fn test_negative_tree_region_rejected() {
        let mut config = GameConfig::new(1);
        config.scenery.tree_region = -5.0;
        config.scenery.tree_clearing = -10.0;
        assert!(matches!(
            config.validate(),
            Err(KeyhuntError::InvalidConfig(_))
        ));

        let mut config = GameConfig::new(1);
        config.scenery.tree_clearing = -1.0;
        assert!(config.validate().is_err());

        // Without trees the region is never sampled
        let mut config = GameConfig::new(1);
        config.scenery.tree_count = 0;
        config.scenery.tree_region = -5.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_seed_is_drawn_per_config() {
        let seeds: Vec<u64> = (0..4)
            .map(|_| GameConfig::from_json("{}").unwrap().seed)
            .collect();
        assert!(seeds.windows(2).any(|w| w[0] != w[1]));
        assert_eq!(GameConfig::for_testing(9).seed, 9);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "seed": 5, "scenery": {{ "tree_count": 2 }} }}"#).unwrap();

        let config = GameConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.seed, 5);
        assert_eq!(config.scenery.tree_count, 2);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = GameConfig::load_from_file("/definitely/not/here.json");
        assert!(matches!(result, Err(KeyhuntError::Io(_))));
    }

    #[test]
    fn test_json_round_trip() {
        let config = GameConfig::for_testing(3);
        let json = config.to_json().unwrap();
        assert_eq!(GameConfig::from_json(&json).unwrap(), config);
    }
}
