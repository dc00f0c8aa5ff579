//! Headless soak run: random intents against a seeded level, with invariant checks after
//! every step.

use anyhow::{Context, Result, ensure};
use game_core::{CoreError, GameConfig, Intent, LevelState, Mode, TurnReport};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use serde::Serialize;

const EXPLORE_INTENTS: [Intent; 5] =
    [Intent::MoveUp, Intent::MoveDown, Intent::MoveLeft, Intent::MoveRight, Intent::Descend];

#[derive(Debug, Default, Serialize)]
pub struct SoakSummary {
    pub seed: u64,
    pub turns: u32,
    pub moves: u32,
    pub blocked: u32,
    pub rolls: u32,
    pub combats_started: u32,
    pub combats_won: u32,
    pub combats_lost: u32,
    pub descents: u32,
    pub portal_misses: u32,
    pub rejected: u32,
    pub final_level: u32,
    pub final_health: i32,
    pub game_over: bool,
    pub snapshot_hash: String,
}

impl SoakSummary {
    pub fn print(&self) {
        println!("Soak complete for seed {} after {} turns.", self.seed, self.turns);
        println!("Moves: {} ({} blocked)", self.moves, self.blocked);
        println!(
            "Combats: {} started, {} won, {} lost, {} rolls",
            self.combats_started, self.combats_won, self.combats_lost, self.rolls
        );
        println!("Descents: {} ({} off the portal)", self.descents, self.portal_misses);
        println!("Rejected intents: {}", self.rejected);
        println!(
            "Final: level {}, health {}, game over {}",
            self.final_level, self.final_health, self.game_over
        );
        println!("Snapshot Hash: {}", self.snapshot_hash);
    }
}

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    slice[rng.next_u64() as usize % slice.len()]
}

/// Mostly sensible inputs, with one in ten drawn from the whole intent set so rejected
/// intents get exercised too.
fn pick_intent(rng: &mut ChaCha8Rng, mode: Mode) -> Intent {
    if rng.next_u64() % 10 == 0 {
        return choose(rng, &[Intent::ConfirmOrRoll, Intent::MoveLeft, Intent::Descend]);
    }
    match mode {
        Mode::InCombat => Intent::ConfirmOrRoll,
        Mode::Exploring | Mode::GameOver => choose(rng, &EXPLORE_INTENTS),
    }
}

pub fn run(config: GameConfig, seed: u64, turns: u32) -> Result<SoakSummary> {
    let mut level = LevelState::with_seed(config, seed)
        .with_context(|| format!("Failed to start a run for seed {seed}"))?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut summary = SoakSummary { seed, ..SoakSummary::default() };

    while summary.turns < turns && !level.is_game_over() {
        let mode = level.mode();
        let intent = pick_intent(&mut rng, mode);
        summary.turns += 1;

        match level.apply(intent) {
            Ok(TurnReport::Moved) => summary.moves += 1,
            Ok(TurnReport::Blocked) => summary.blocked += 1,
            Ok(TurnReport::CombatStarted { .. }) => {
                summary.moves += 1;
                summary.combats_started += 1;
            }
            Ok(TurnReport::CombatRolled(_)) => summary.rolls += 1,
            Ok(TurnReport::CombatEnded(outcome)) => {
                summary.rolls += 1;
                if outcome.player_won {
                    summary.combats_won += 1;
                } else {
                    summary.combats_lost += 1;
                }
            }
            Ok(TurnReport::Descended { .. }) => summary.descents += 1,
            Ok(TurnReport::NotOnPortal) => summary.portal_misses += 1,
            Ok(TurnReport::Ignored | TurnReport::QuitRequested) => {}
            Err(CoreError::IllegalAction { mode: reported, .. }) => {
                ensure!(
                    reported == mode,
                    "{intent:?} rejected in {reported:?} but mode was {mode:?}"
                );
                summary.rejected += 1;
            }
            Err(err) => return Err(err).with_context(|| format!("{intent:?} failed in {mode:?}")),
        }

        check_invariants(&level)?;
    }

    summary.final_level = level.level_number();
    summary.final_health = level.player().health;
    summary.game_over = level.is_game_over();
    summary.snapshot_hash = format!("0x{:016x}", level.snapshot_hash());
    log::debug!("soak finished: {summary:?}");
    Ok(summary)
}

fn check_invariants(level: &LevelState) -> Result<()> {
    let grid = level.grid();
    let player = level.player();
    ensure!(grid.is_floor(player.pos), "Invariant failed: player inside wall at {:?}", player.pos);
    ensure!(player.health <= player.max_health, "Invariant failed: health above maximum");
    for enemy in level.enemies() {
        ensure!(grid.is_floor(enemy.pos), "Invariant failed: {:?} inside wall", enemy.kind);
        ensure!(enemy.health > 0, "Invariant failed: defeated {:?} still on the map", enemy.kind);
    }
    Ok(())
}
