//! Per-frame input handling: keys become intents, intents go to the level.

use crawler_core::{CoreError, Intent, LevelState, Mode, TurnReport};
use macroquad::prelude::KeyCode;

#[derive(Debug, Default)]
pub struct AppState {
    /// Set once the player asks to quit; the window loop exits on the next frame.
    pub quit_requested: bool,
    pub last_report: Option<TurnReport>,
    pub last_rejection: Option<CoreError>,
}

/// Space descends while exploring and rolls while fighting; Escape always quits.
pub fn intent_for_key(key: KeyCode, mode: Mode) -> Option<Intent> {
    match key {
        KeyCode::Up => Some(Intent::MoveUp),
        KeyCode::Down => Some(Intent::MoveDown),
        KeyCode::Left => Some(Intent::MoveLeft),
        KeyCode::Right => Some(Intent::MoveRight),
        KeyCode::Space if mode == Mode::InCombat => Some(Intent::ConfirmOrRoll),
        KeyCode::Space => Some(Intent::Descend),
        KeyCode::Escape => Some(Intent::Quit),
        _ => None,
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self, level: &mut LevelState, keys_pressed: &[KeyCode]) {
        for &key in keys_pressed {
            let Some(intent) = intent_for_key(key, level.mode()) else {
                continue;
            };
            match level.apply(intent) {
                Ok(TurnReport::QuitRequested) => {
                    self.quit_requested = true;
                    return;
                }
                Ok(TurnReport::Ignored) => {}
                Ok(report) => {
                    self.last_report = Some(report);
                    self.last_rejection = None;
                }
                Err(err) => {
                    log::warn!("{intent:?} rejected: {err}");
                    self.last_rejection = Some(err);
                }
            }
        }
    }
}
