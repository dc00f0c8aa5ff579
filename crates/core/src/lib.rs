pub mod combat;
pub mod config;
pub mod enemy;
pub mod enemy_ai;
pub mod error;
pub mod grid;
pub mod level;
pub mod mapgen;
pub mod rng;
pub mod snapshot;
pub mod types;
pub mod visibility;

#[cfg(test)]
mod test_support;

pub use combat::{CombatOutcome, CombatPhase, CombatSession};
pub use config::{EnemySpawnConfig, GameConfig, MapConfig};
pub use enemy::{EnemyFactory, EnemyStats, ScaledEnemyFactory};
pub use error::CoreError;
pub use grid::Grid;
pub use level::{LevelLayout, LevelState, TurnReport};
pub use mapgen::{GeneratedMap, MapGenerator, Room};
pub use rng::{GameRng, RandomSource, ScriptedRng};
pub use snapshot::{CombatView, LevelSnapshot};
pub use types::*;
