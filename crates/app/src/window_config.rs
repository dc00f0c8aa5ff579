//! Window configuration for the desktop app.

use crate::ui_render::{HUD_HEIGHT, TILE_SIZE};
use app::APP_NAME;
use crawler_core::MapConfig;
use macroquad::window::Conf;

/// Sizes the window to fit the whole map plus the HUD strip below it.
pub fn build_window_conf(map: &MapConfig) -> Conf {
    Conf {
        window_title: APP_NAME.to_owned(),
        window_width: (map.cols as f32 * TILE_SIZE) as i32,
        window_height: (map.rows as f32 * TILE_SIZE + HUD_HEIGHT) as i32,
        high_dpi: true,
        window_resizable: false,
        ..Default::default()
    }
}
