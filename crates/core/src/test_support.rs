//! Shared fixtures for the unit test suites.

use crate::grid::Grid;
use crate::types::{Enemy, EnemyKind, Pos};

pub(crate) fn grid(text: &str) -> Grid {
    Grid::from_ascii(text).expect("fixture map should parse")
}

pub(crate) fn zombie_at(pos: Pos) -> Enemy {
    Enemy::spawn(EnemyKind::Zombie, pos, 1)
}

pub(crate) fn zombie_with_health(pos: Pos, health: i32) -> Enemy {
    Enemy { health, ..zombie_at(pos) }
}
