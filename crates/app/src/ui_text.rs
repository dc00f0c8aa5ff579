//! Text for the HUD, the status line, the combat overlay, and the game-over banner.

use app::format_snapshot_hash;
use crawler_core::{CombatPhase, CombatView, LevelSnapshot, Mode, TurnReport};

pub fn status_text(snapshot: &LevelSnapshot) -> String {
    match snapshot.mode {
        Mode::GameOver => "Esc to quit".to_string(),
        Mode::InCombat => "Space to roll".to_string(),
        Mode::Exploring if snapshot.player.pos == snapshot.portal => {
            "On the portal: Space to descend".to_string()
        }
        Mode::Exploring => "Arrows to move, Esc to quit".to_string(),
    }
}

pub fn report_text(report: &TurnReport) -> Option<String> {
    match report {
        TurnReport::Blocked => Some("You bump into a wall.".to_string()),
        TurnReport::CombatStarted { .. } => Some("An enemy attacks!".to_string()),
        TurnReport::CombatEnded(outcome) if outcome.player_won => {
            Some("The enemy falls.".to_string())
        }
        TurnReport::CombatEnded(_) => Some("You have been slain.".to_string()),
        TurnReport::Descended { level } => Some(format!("You descend to level {level}.")),
        TurnReport::NotOnPortal => Some("There is no portal here.".to_string()),
        TurnReport::Moved
        | TurnReport::CombatRolled(_)
        | TurnReport::Ignored
        | TurnReport::QuitRequested => None,
    }
}

pub fn combat_lines(view: &CombatView) -> Vec<String> {
    let roll = |value: Option<u8>| value.map_or_else(|| "-".to_string(), |face| face.to_string());
    let prompt = match view.phase {
        CombatPhase::AwaitingPlayerRoll => "Your roll...",
        CombatPhase::AwaitingEnemyRoll { .. } => "Enemy's roll...",
        CombatPhase::RoundResolved { player_roll, enemy_roll } if player_roll > enemy_roll => {
            "You hit!"
        }
        CombatPhase::RoundResolved { player_roll, enemy_roll } if player_roll < enemy_roll => {
            "You are hit!"
        }
        CombatPhase::RoundResolved { .. } => "Tie, nobody is hurt.",
        CombatPhase::Concluded(_) => "The fight is over.",
    };
    vec![
        format!("{:?} (damage {})", view.enemy_kind, view.enemy_damage),
        format!("Player Health: {}", view.player_health),
        format!("Enemy Health: {}", view.enemy_health),
        format!("Player Roll: {}", roll(view.player_roll)),
        format!("Enemy Roll: {}", roll(view.enemy_roll)),
        prompt.to_string(),
    ]
}

pub fn game_over_banner(level: u32) -> String {
    format!("GAME OVER - Level {level}")
}

pub fn debug_line(seed: u64, snapshot_hash: u64) -> String {
    format!("seed {seed}  state {}", format_snapshot_hash(snapshot_hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crawler_core::{CombatSession, Enemy, EnemyKind, GameConfig, LevelState, Pos, ScriptedRng};

    fn overlay_after(faces: &[u8]) -> CombatView {
        let skeleton = Enemy::spawn(EnemyKind::Skeleton, Pos::new(0, 0), 1);
        let mut session = CombatSession::new(7, &skeleton);
        let mut rng = ScriptedRng::dice(faces.iter().copied());
        for _ in faces {
            session.advance(&mut rng);
        }
        CombatView::from(&session)
    }

    #[test]
    fn combat_overlay_shows_both_rolls_and_healths() {
        let lines = combat_lines(&overlay_after(&[5, 2]));
        assert_eq!(
            lines,
            vec![
                "Skeleton (damage 2)",
                "Player Health: 7",
                "Enemy Health: 4",
                "Player Roll: 5",
                "Enemy Roll: 2",
                "You hit!",
            ]
        );
    }

    #[test]
    fn combat_overlay_marks_missing_rolls() {
        let lines = combat_lines(&overlay_after(&[]));
        assert_eq!(lines[3], "Player Roll: -");
        assert_eq!(lines[4], "Enemy Roll: -");
        assert_eq!(lines[5], "Your roll...");
    }

    #[test]
    fn banner_names_the_level() {
        assert_eq!(game_over_banner(4), "GAME OVER - Level 4");
    }

    #[test]
    fn status_prompts_descend_only_on_the_portal() {
        let level = LevelState::with_seed(GameConfig::default(), 3).expect("level");
        let mut snapshot = level.snapshot();
        snapshot.player.pos = snapshot.portal;
        assert_eq!(status_text(&snapshot), "On the portal: Space to descend");
        snapshot.mode = Mode::InCombat;
        assert_eq!(status_text(&snapshot), "Space to roll");
    }

    #[test]
    fn quiet_reports_have_no_message() {
        assert_eq!(report_text(&TurnReport::Moved), None);
        assert_eq!(
            report_text(&TurnReport::Descended { level: 3 }).as_deref(),
            Some("You descend to level 3.")
        );
    }
}
