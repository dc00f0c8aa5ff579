//! Dice duel between the player and one enemy.
//!
//! Each confirm input advances the session by one phase: the player rolls, the enemy
//! rolls, then the round is applied. The strictly lower roll costs its owner one health;
//! a tie costs nothing. The session ends as soon as either side drops to zero, with the
//! enemy checked first.

use std::cmp::Ordering;

use serde::Serialize;

use crate::rng::RandomSource;
use crate::types::{Enemy, EnemyId, EnemyKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum CombatPhase {
    AwaitingPlayerRoll,
    AwaitingEnemyRoll { player_roll: u8 },
    RoundResolved { player_roll: u8, enemy_roll: u8 },
    Concluded(CombatOutcome),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CombatOutcome {
    pub player_won: bool,
    pub player_health: i32,
    #[serde(skip)]
    pub enemy: EnemyId,
    pub enemy_health: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombatSession {
    enemy: EnemyId,
    enemy_kind: EnemyKind,
    enemy_damage: i32,
    player_health: i32,
    enemy_health: i32,
    phase: CombatPhase,
    rounds: u32,
}

impl CombatSession {
    pub fn new(player_health: i32, enemy: &Enemy) -> Self {
        Self {
            enemy: enemy.id,
            enemy_kind: enemy.kind,
            enemy_damage: enemy.damage,
            player_health,
            enemy_health: enemy.health,
            phase: CombatPhase::AwaitingPlayerRoll,
            rounds: 0,
        }
    }

    pub fn enemy(&self) -> EnemyId {
        self.enemy
    }

    pub fn enemy_kind(&self) -> EnemyKind {
        self.enemy_kind
    }

    pub fn enemy_damage(&self) -> i32 {
        self.enemy_damage
    }

    pub fn player_health(&self) -> i32 {
        self.player_health
    }

    pub fn enemy_health(&self) -> i32 {
        self.enemy_health
    }

    pub fn phase(&self) -> CombatPhase {
        self.phase
    }

    /// Completed rounds, ties included.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn player_roll(&self) -> Option<u8> {
        match self.phase {
            CombatPhase::AwaitingEnemyRoll { player_roll }
            | CombatPhase::RoundResolved { player_roll, .. } => Some(player_roll),
            CombatPhase::AwaitingPlayerRoll | CombatPhase::Concluded(_) => None,
        }
    }

    pub fn enemy_roll(&self) -> Option<u8> {
        match self.phase {
            CombatPhase::RoundResolved { enemy_roll, .. } => Some(enemy_roll),
            _ => None,
        }
    }

    pub fn outcome(&self) -> Option<CombatOutcome> {
        match self.phase {
            CombatPhase::Concluded(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Moves one phase forward and returns the new phase. Once concluded the session no
    /// longer changes.
    pub fn advance(&mut self, rng: &mut dyn RandomSource) -> CombatPhase {
        self.phase = match self.phase {
            CombatPhase::AwaitingPlayerRoll => {
                CombatPhase::AwaitingEnemyRoll { player_roll: rng.roll_die() }
            }
            CombatPhase::AwaitingEnemyRoll { player_roll } => {
                CombatPhase::RoundResolved { player_roll, enemy_roll: rng.roll_die() }
            }
            CombatPhase::RoundResolved { player_roll, enemy_roll } => {
                self.resolve_round(player_roll, enemy_roll)
            }
            concluded @ CombatPhase::Concluded(_) => concluded,
        };
        self.phase
    }

    fn resolve_round(&mut self, player_roll: u8, enemy_roll: u8) -> CombatPhase {
        match player_roll.cmp(&enemy_roll) {
            Ordering::Greater => self.enemy_health -= 1,
            Ordering::Less => self.player_health -= 1,
            Ordering::Equal => {}
        }
        self.rounds += 1;

        let player_won = if self.enemy_health <= 0 {
            true
        } else if self.player_health <= 0 {
            false
        } else {
            return CombatPhase::AwaitingPlayerRoll;
        };

        CombatPhase::Concluded(CombatOutcome {
            player_won,
            player_health: self.player_health,
            enemy: self.enemy,
            enemy_health: self.enemy_health,
        })
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::rng::{GameRng, ScriptedRng};
    use crate::test_support::zombie_with_health;
    use crate::types::Pos;

    fn session(player_health: i32, enemy_health: i32) -> CombatSession {
        CombatSession::new(player_health, &zombie_with_health(Pos::new(0, 0), enemy_health))
    }

    /// Runs one full round (three advances) with the given faces.
    fn play_round(session: &mut CombatSession, player: u8, enemy: u8) -> CombatPhase {
        let mut rng = ScriptedRng::dice([player, enemy]);
        session.advance(&mut rng);
        session.advance(&mut rng);
        session.advance(&mut rng)
    }

    #[test]
    fn phases_follow_player_then_enemy_then_resolution() {
        let mut duel = session(5, 5);
        let mut rng = ScriptedRng::dice([4, 2]);
        assert_eq!(duel.phase(), CombatPhase::AwaitingPlayerRoll);
        assert_eq!((duel.player_roll(), duel.enemy_roll()), (None, None));

        assert_eq!(duel.advance(&mut rng), CombatPhase::AwaitingEnemyRoll { player_roll: 4 });
        assert_eq!((duel.player_roll(), duel.enemy_roll()), (Some(4), None));

        assert_eq!(
            duel.advance(&mut rng),
            CombatPhase::RoundResolved { player_roll: 4, enemy_roll: 2 }
        );
        assert_eq!((duel.player_roll(), duel.enemy_roll()), (Some(4), Some(2)));
        assert_eq!(duel.enemy_health(), 5, "damage lands only when the round is applied");

        assert_eq!(duel.advance(&mut rng), CombatPhase::AwaitingPlayerRoll);
        assert_eq!((duel.player_roll(), duel.enemy_roll()), (None, None), "rolls cleared");
        assert_eq!((duel.player_health(), duel.enemy_health()), (5, 4));
        assert_eq!(duel.rounds(), 1);
    }

    #[test]
    fn winning_roll_on_last_health_concludes_for_the_player() {
        let mut duel = session(1, 1);
        let phase = play_round(&mut duel, 6, 3);
        assert_eq!(duel.enemy_health(), 0);
        assert_eq!(
            phase,
            CombatPhase::Concluded(CombatOutcome {
                player_won: true,
                player_health: 1,
                enemy: duel.enemy(),
                enemy_health: 0,
            })
        );
    }

    #[test]
    fn losing_roll_on_last_health_concludes_for_the_enemy() {
        let mut duel = session(1, 3);
        let outcome = play_round(&mut duel, 2, 5);
        assert!(matches!(
            outcome,
            CombatPhase::Concluded(CombatOutcome { player_won: false, player_health: 0, .. })
        ));
    }

    #[test]
    fn tied_rolls_damage_nobody() {
        let mut duel = session(2, 2);
        for face in 1..=6 {
            assert_eq!(play_round(&mut duel, face, face), CombatPhase::AwaitingPlayerRoll);
        }
        assert_eq!((duel.player_health(), duel.enemy_health()), (2, 2));
        assert_eq!(duel.rounds(), 6);
    }

    #[test]
    fn enemy_defeat_is_checked_before_player_defeat() {
        // A player entering at zero health still wins if the enemy drops first.
        let mut duel = session(0, 1);
        let phase = play_round(&mut duel, 5, 1);
        assert!(matches!(phase, CombatPhase::Concluded(CombatOutcome { player_won: true, .. })));
    }

    #[test]
    fn concluded_session_is_terminal() {
        let mut duel = session(1, 1);
        let concluded = play_round(&mut duel, 6, 1);
        let mut rng = ScriptedRng::dice([1, 6, 1, 6]);
        for _ in 0..4 {
            assert_eq!(duel.advance(&mut rng), concluded);
        }
        assert_eq!(rng.consumed(), 0, "a finished duel never rolls");
        assert!(duel.outcome().is_some());
    }

    proptest! {
        #[test]
        fn duel_always_terminates_with_one_point_swings(
            seed in any::<u64>(),
            player_health in 1_i32..20,
            enemy_health in 1_i32..20,
        ) {
            let mut duel = session(player_health, enemy_health);
            let mut rng = GameRng::new(seed);
            let mut previous = (duel.player_health(), duel.enemy_health());

            for _ in 0..100_000 {
                let phase = duel.advance(&mut rng);
                let current = (duel.player_health(), duel.enemy_health());
                let player_loss = previous.0 - current.0;
                let enemy_loss = previous.1 - current.1;
                prop_assert!(player_loss >= 0 && enemy_loss >= 0, "health never increases");
                prop_assert!(player_loss + enemy_loss <= 1, "at most one point per step");

                if let CombatPhase::Concluded(outcome) = phase {
                    prop_assert_eq!(outcome.player_won, current.1 <= 0);
                    prop_assert!(current.0 <= 0 || current.1 <= 0);
                    prop_assert!(current.0 >= 0 && current.1 >= 0, "stops at the first zero");
                    return Ok(());
                }
                prop_assert!(current.0 > 0 && current.1 > 0);
                previous = current;
            }
            prop_assert!(false, "duel did not conclude");
        }
    }
}
