//! Owned, serializable views of a level for renderers and tooling.

use serde::Serialize;

use crate::combat::{CombatPhase, CombatSession};
use crate::types::{Enemy, EnemyKind, Mode, Player, Pos};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LevelSnapshot {
    pub level: u32,
    pub mode: Mode,
    pub game_over: bool,
    pub game_won: bool,
    pub player: Player,
    pub portal: Pos,
    pub enemies: Vec<Enemy>,
    pub combat: Option<CombatView>,
    /// One string per grid row, `#` for walls and `.` for floor.
    pub map: Vec<String>,
}

/// What the combat overlay shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CombatView {
    pub enemy_kind: EnemyKind,
    pub enemy_damage: i32,
    pub player_health: i32,
    pub enemy_health: i32,
    pub player_roll: Option<u8>,
    pub enemy_roll: Option<u8>,
    pub phase: CombatPhase,
}

impl From<&CombatSession> for CombatView {
    fn from(session: &CombatSession) -> Self {
        Self {
            enemy_kind: session.enemy_kind(),
            enemy_damage: session.enemy_damage(),
            player_health: session.player_health(),
            enemy_health: session.enemy_health(),
            player_roll: session.player_roll(),
            enemy_roll: session.enemy_roll(),
            phase: session.phase(),
        }
    }
}

impl LevelSnapshot {
    pub fn hud_line(&self) -> String {
        format!(
            "Health: {}/{}  Level: {}",
            self.player.health, self.player.max_health, self.level
        )
    }
}
