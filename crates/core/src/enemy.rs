//! Enemy stats and the level-scaled spawner.

use std::collections::BTreeSet;

use crate::config::EnemySpawnConfig;
use crate::grid::{Grid, random_floor_cell};
use crate::rng::RandomSource;
use crate::types::{Enemy, EnemyId, EnemyKind, Pos};

const PLACEMENT_ATTEMPTS_PER_ENEMY: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemyStats {
    pub health: i32,
    pub damage: i32,
}

impl EnemyKind {
    pub fn base_stats(self) -> EnemyStats {
        match self {
            Self::Zombie => EnemyStats { health: 3, damage: 1 },
            Self::Skeleton => EnemyStats { health: 4, damage: 2 },
            Self::Vampire => EnemyStats { health: 6, damage: 3 },
        }
    }

    /// Health grows every second level, damage every third.
    pub fn stats_for_level(self, level: u32) -> EnemyStats {
        let base = self.base_stats();
        let depth = level.saturating_sub(1) as i32;
        EnemyStats { health: base.health + depth / 2, damage: base.damage + depth / 3 }
    }
}

impl Enemy {
    /// Builds an enemy whose id is assigned once the level inserts it.
    pub fn spawn(kind: EnemyKind, pos: Pos, level: u32) -> Self {
        let stats = kind.stats_for_level(level);
        Self { id: EnemyId::default(), kind, pos, health: stats.health, damage: stats.damage }
    }
}

/// Produces the enemies for a freshly generated level.
pub trait EnemyFactory {
    fn spawn(&mut self, grid: &Grid, level: u32, rng: &mut dyn RandomSource) -> Vec<Enemy>;
}

impl<F> EnemyFactory for F
where
    F: FnMut(&Grid, u32, &mut dyn RandomSource) -> Vec<Enemy>,
{
    fn spawn(&mut self, grid: &Grid, level: u32, rng: &mut dyn RandomSource) -> Vec<Enemy> {
        self(grid, level, rng)
    }
}

/// Default spawner: more enemies each level, up to a cap, with the mix drifting from
/// zombies toward vampires.
#[derive(Clone, Debug, Default)]
pub struct ScaledEnemyFactory {
    config: EnemySpawnConfig,
}

impl ScaledEnemyFactory {
    pub fn new(config: EnemySpawnConfig) -> Self {
        Self { config }
    }

    pub fn enemy_count(&self, level: u32) -> usize {
        let scaled = self
            .config
            .base_count
            .saturating_add(self.config.per_level.saturating_mul(level.saturating_sub(1)));
        scaled.min(self.config.max_count) as usize
    }
}

impl EnemyFactory for ScaledEnemyFactory {
    fn spawn(&mut self, grid: &Grid, level: u32, rng: &mut dyn RandomSource) -> Vec<Enemy> {
        let target = self.enemy_count(level);
        let mut taken = BTreeSet::new();
        let mut enemies = Vec::with_capacity(target);

        for _ in 0..target {
            let Some(pos) = (0..PLACEMENT_ATTEMPTS_PER_ENEMY)
                .filter_map(|_| random_floor_cell(grid, rng))
                .find(|pos| !taken.contains(pos))
            else {
                log::debug!("no free floor cell left after {} enemies", enemies.len());
                break;
            };
            taken.insert(pos);
            enemies.push(Enemy::spawn(pick_enemy_kind(level, rng), pos, level));
        }

        enemies
    }
}

pub fn pick_enemy_kind(level: u32, rng: &mut dyn RandomSource) -> EnemyKind {
    let depth = level.saturating_sub(1);
    let vampire_chance = depth.saturating_mul(8).min(40);
    let skeleton_chance = depth.saturating_mul(5).saturating_add(25).min(45);

    let roll = rng.below(100);
    if roll < vampire_chance {
        EnemyKind::Vampire
    } else if roll < vampire_chance + skeleton_chance {
        EnemyKind::Skeleton
    } else {
        EnemyKind::Zombie
    }
}
