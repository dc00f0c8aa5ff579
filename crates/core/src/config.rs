//! Tunable constants for a run, loadable from TOML.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub rows: usize,
    pub cols: usize,
    pub room_count: u32,
    pub min_room_size: usize,
    pub max_room_size: usize,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self { rows: 30, cols: 40, room_count: 8, min_room_size: 5, max_room_size: 10 }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemySpawnConfig {
    pub base_count: u32,
    pub per_level: u32,
    pub max_count: u32,
}

impl Default for EnemySpawnConfig {
    fn default() -> Self {
        Self { base_count: 3, per_level: 1, max_count: 12 }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub map: MapConfig,
    pub enemies: EnemySpawnConfig,
    pub sight_radius: u32,
    pub player_max_health: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            map: MapConfig::default(),
            enemies: EnemySpawnConfig::default(),
            sight_radius: 6,
            player_max_health: 100,
        }
    }
}

impl GameConfig {
    /// Parses and validates a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, CoreError> {
        let config: Self =
            toml::from_str(text).map_err(|err| CoreError::InvalidConfig(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        self.map.validate()?;
        if self.player_max_health <= 0 {
            return Err(CoreError::InvalidConfig(format!(
                "player_max_health must be positive, got {}",
                self.player_max_health
            )));
        }
        Ok(())
    }
}

impl MapConfig {
    /// Room anchors are drawn from `1..=side - size - 1`, so every side must leave a
    /// one-cell margin on both ends of the largest room.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.min_room_size == 0 {
            return Err(CoreError::InvalidConfig("min_room_size must be at least 1".into()));
        }
        if self.min_room_size > self.max_room_size {
            return Err(CoreError::InvalidConfig(format!(
                "min_room_size {} exceeds max_room_size {}",
                self.min_room_size, self.max_room_size
            )));
        }
        let required = self.max_room_size + 2;
        if self.rows < required || self.cols < required {
            return Err(CoreError::InvalidConfig(format!(
                "a {}x{} grid cannot fit a {} cell room with its margin (need {required})",
                self.rows, self.cols, self.max_room_size
            )));
        }
        Ok(())
    }
}
