//! The live level: player, portal, enemies, and the open combat, driven one intent at a
//! time. This is the only place that mutates game state during play.

use std::hash::Hasher;

use slotmap::SlotMap;
use xxhash_rust::xxh3::Xxh3;

use crate::combat::{CombatOutcome, CombatPhase, CombatSession};
use crate::config::GameConfig;
use crate::enemy::{EnemyFactory, ScaledEnemyFactory};
use crate::enemy_ai::move_enemies;
use crate::error::CoreError;
use crate::grid::{Grid, random_floor_cell};
use crate::mapgen::MapGenerator;
use crate::rng::{GameRng, RandomSource};
use crate::snapshot::{CombatView, LevelSnapshot};
use crate::types::{CellKind, Direction, Enemy, EnemyId, Intent, Mode, Player, Pos};

/// What a single `apply` call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnReport {
    /// The run is over; the intent had no effect.
    Ignored,
    /// The destination was a wall or off the map. Nothing moved.
    Blocked,
    Moved,
    CombatStarted { enemy: EnemyId },
    CombatRolled(CombatPhase),
    CombatEnded(CombatOutcome),
    Descended { level: u32 },
    NotOnPortal,
    QuitRequested,
}

/// Cell contents for one level before it goes live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelLayout {
    pub grid: Grid,
    pub player: Pos,
    pub portal: Pos,
    pub enemies: Vec<Enemy>,
}

pub struct LevelState {
    config: GameConfig,
    generator: MapGenerator,
    rng: Box<dyn RandomSource>,
    enemy_factory: Box<dyn EnemyFactory>,
    level: u32,
    grid: Grid,
    player: Player,
    portal: Pos,
    enemies: SlotMap<EnemyId, Enemy>,
    combat: Option<CombatSession>,
    game_over: bool,
    game_won: bool,
}

impl LevelState {
    /// Generates level 1 with the given randomness and enemy factory.
    pub fn new(
        config: GameConfig,
        mut rng: Box<dyn RandomSource>,
        mut enemy_factory: Box<dyn EnemyFactory>,
    ) -> Result<Self, CoreError> {
        config.validate()?;
        let generator = MapGenerator::new(config.map.clone())?;
        let layout = generate_layout(&generator, rng.as_mut(), enemy_factory.as_mut(), 1)?;
        Ok(Self::assemble(config, generator, rng, enemy_factory, layout))
    }

    /// Seeded run with the default enemy factory. Same seed and same intents give the same run.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, CoreError> {
        let factory = ScaledEnemyFactory::new(config.enemies.clone());
        Self::new(config, Box::new(GameRng::new(seed)), Box::new(factory))
    }

    /// Starts level 1 on a prepared layout instead of a generated one. Later levels are still
    /// generated from `config`. The player, the portal and every enemy must stand on floor.
    pub fn from_layout(
        config: GameConfig,
        layout: LevelLayout,
        rng: Box<dyn RandomSource>,
        enemy_factory: Box<dyn EnemyFactory>,
    ) -> Result<Self, CoreError> {
        config.validate()?;
        check_layout(&layout)?;
        let generator = MapGenerator::new(config.map.clone())?;
        Ok(Self::assemble(config, generator, rng, enemy_factory, layout))
    }

    fn assemble(
        config: GameConfig,
        generator: MapGenerator,
        rng: Box<dyn RandomSource>,
        enemy_factory: Box<dyn EnemyFactory>,
        layout: LevelLayout,
    ) -> Self {
        let max_health = config.player_max_health;
        Self {
            config,
            generator,
            rng,
            enemy_factory,
            level: 1,
            grid: layout.grid,
            player: Player { pos: layout.player, health: max_health, max_health },
            portal: layout.portal,
            enemies: enemy_map(layout.enemies),
            combat: None,
            game_over: false,
            game_won: false,
        }
    }

    pub fn apply(&mut self, intent: Intent) -> Result<TurnReport, CoreError> {
        if intent == Intent::Quit {
            log::debug!("quit requested on level {}", self.level);
            return Ok(TurnReport::QuitRequested);
        }
        if self.game_over {
            return Ok(TurnReport::Ignored);
        }

        match intent {
            Intent::ConfirmOrRoll => self.advance_combat(intent),
            _ if self.combat.is_some() => Err(self.illegal(intent)),
            Intent::MoveUp => self.move_player(Direction::Up),
            Intent::MoveDown => self.move_player(Direction::Down),
            Intent::MoveLeft => self.move_player(Direction::Left),
            Intent::MoveRight => self.move_player(Direction::Right),
            Intent::Descend => self.descend(),
            Intent::Quit => Ok(TurnReport::QuitRequested),
        }
    }

    pub fn mode(&self) -> Mode {
        if self.game_over {
            Mode::GameOver
        } else if self.combat.is_some() {
            Mode::InCombat
        } else {
            Mode::Exploring
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn portal(&self) -> Pos {
        self.portal
    }

    pub fn enemies(&self) -> impl Iterator<Item = &Enemy> + '_ {
        self.enemies.values()
    }

    pub fn enemy(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.get(id)
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    pub fn level_number(&self) -> u32 {
        self.level
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Exposed for renderers; no transition sets it yet.
    pub fn is_game_won(&self) -> bool {
        self.game_won
    }

    pub fn combat(&self) -> Option<&CombatSession> {
        self.combat.as_ref()
    }

    pub fn snapshot(&self) -> LevelSnapshot {
        LevelSnapshot {
            level: self.level,
            mode: self.mode(),
            game_over: self.game_over,
            game_won: self.game_won,
            player: self.player,
            portal: self.portal,
            enemies: self.enemies.values().cloned().collect(),
            combat: self.combat.as_ref().map(CombatView::from),
            map: self.grid.to_ascii().lines().map(str::to_owned).collect(),
        }
    }

    /// Stable fingerprint of everything a renderer can observe.
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u32(self.level);
        hasher.write_u8(match self.mode() {
            Mode::Exploring => 0,
            Mode::InCombat => 1,
            Mode::GameOver => 2,
        });
        hasher.write_u8(u8::from(self.game_won));
        hasher.write_i32(self.player.pos.row);
        hasher.write_i32(self.player.pos.col);
        hasher.write_i32(self.player.health);
        hasher.write_i32(self.portal.row);
        hasher.write_i32(self.portal.col);
        for enemy in self.enemies.values() {
            hasher.write_u8(enemy.kind as u8);
            hasher.write_i32(enemy.pos.row);
            hasher.write_i32(enemy.pos.col);
            hasher.write_i32(enemy.health);
        }
        if let Some(session) = &self.combat {
            hasher.write_i32(session.player_health());
            hasher.write_i32(session.enemy_health());
            hasher.write_u8(session.player_roll().unwrap_or(0));
            hasher.write_u8(session.enemy_roll().unwrap_or(0));
        }
        hasher.write(self.grid.to_ascii().as_bytes());
        hasher.finish()
    }

    fn illegal(&self, intent: Intent) -> CoreError {
        CoreError::IllegalAction { intent, mode: self.mode() }
    }

    fn move_player(&mut self, direction: Direction) -> Result<TurnReport, CoreError> {
        let target = self.player.pos.step(direction);
        if !self.grid.is_floor(target) {
            return Ok(TurnReport::Blocked);
        }
        move_enemies(
            &self.grid,
            target,
            self.enemies.values_mut(),
            self.rng.as_mut(),
            self.config.sight_radius,
        )?;
        self.player.pos = target;

        let Some(enemy) = self.enemies.values().find(|enemy| enemy.pos == target) else {
            return Ok(TurnReport::Moved);
        };
        log::debug!(
            "combat with {:?} ({} hp) at ({}, {})",
            enemy.kind,
            enemy.health,
            target.row,
            target.col
        );
        let id = enemy.id;
        self.combat = Some(CombatSession::new(self.player.health, enemy));
        Ok(TurnReport::CombatStarted { enemy: id })
    }

    fn advance_combat(&mut self, intent: Intent) -> Result<TurnReport, CoreError> {
        let Some(session) = self.combat.as_mut() else {
            return Err(self.illegal(intent));
        };
        match session.advance(self.rng.as_mut()) {
            CombatPhase::Concluded(outcome) => {
                self.combat = None;
                self.conclude_combat(outcome);
                Ok(TurnReport::CombatEnded(outcome))
            }
            phase => Ok(TurnReport::CombatRolled(phase)),
        }
    }

    fn conclude_combat(&mut self, outcome: CombatOutcome) {
        self.player.health = outcome.player_health;
        if outcome.player_won {
            self.enemies.remove(outcome.enemy);
            log::debug!("enemy defeated, {} remain on level {}", self.enemies.len(), self.level);
        } else {
            if let Some(enemy) = self.enemies.get_mut(outcome.enemy) {
                enemy.health = outcome.enemy_health;
            }
            self.game_over = true;
            log::debug!("player defeated on level {}", self.level);
        }
    }

    fn descend(&mut self) -> Result<TurnReport, CoreError> {
        if self.player.pos != self.portal {
            return Ok(TurnReport::NotOnPortal);
        }

        let next_level = self.level + 1;
        let layout = generate_layout(
            &self.generator,
            self.rng.as_mut(),
            self.enemy_factory.as_mut(),
            next_level,
        )?;
        self.level = next_level;
        self.install(layout);
        self.player.health = self.player.max_health;
        self.game_over = false;

        log::debug!("descended to level {}", self.level);
        Ok(TurnReport::Descended { level: self.level })
    }

    fn install(&mut self, layout: LevelLayout) {
        self.grid = layout.grid;
        self.player.pos = layout.player;
        self.portal = layout.portal;
        self.enemies = enemy_map(layout.enemies);
    }
}

fn enemy_map(enemies: Vec<Enemy>) -> SlotMap<EnemyId, Enemy> {
    let mut map = SlotMap::with_key();
    for enemy in enemies {
        let id = map.insert(enemy);
        map[id].id = id;
    }
    map
}

/// Generates the grid, then places the player, the portal and the enemies on it, in that
/// order of random draws.
pub fn generate_layout(
    generator: &MapGenerator,
    rng: &mut dyn RandomSource,
    enemy_factory: &mut dyn EnemyFactory,
    level: u32,
) -> Result<LevelLayout, CoreError> {
    let grid = generator.generate(rng);
    let player = random_floor_cell(&grid, rng).ok_or(CoreError::NoFloorCells)?;
    let portal = random_floor_cell(&grid, rng).ok_or(CoreError::NoFloorCells)?;
    let enemies = enemy_factory.spawn(&grid, level, rng);
    log::debug!(
        "level {level}: player at {player:?}, portal at {portal:?}, {} enemies",
        enemies.len()
    );
    let layout = LevelLayout { grid, player, portal, enemies };
    check_layout(&layout)?;
    Ok(layout)
}

fn check_layout(layout: &LevelLayout) -> Result<(), CoreError> {
    let occupied = [layout.player, layout.portal]
        .into_iter()
        .chain(layout.enemies.iter().map(|enemy| enemy.pos));
    for pos in occupied {
        if layout.grid.kind_at(pos)? != CellKind::Floor {
            return Err(CoreError::NotFloor { pos });
        }
    }
    Ok(())
}
