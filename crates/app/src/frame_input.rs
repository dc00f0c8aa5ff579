//! Keyboard input collection for one rendered frame.

use macroquad::prelude::{KeyCode, is_key_pressed};

const GAME_KEYS: [KeyCode; 6] =
    [KeyCode::Up, KeyCode::Down, KeyCode::Left, KeyCode::Right, KeyCode::Space, KeyCode::Escape];

pub fn capture_keys_pressed() -> Vec<KeyCode> {
    GAME_KEYS.into_iter().filter(|&key| is_key_pressed(key)).collect()
}
