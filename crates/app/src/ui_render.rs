//! Draws the level as coloured tiles with the HUD and overlays on top.

use crate::ui_text::{combat_lines, debug_line, game_over_banner, report_text, status_text};
use app::app_loop::AppState;
use crawler_core::{CellKind, EnemyKind, LevelSnapshot, LevelState, Pos};
use macroquad::prelude::*;

pub const TILE_SIZE: f32 = 20.0;
pub const HUD_HEIGHT: f32 = 60.0;

const WALL_COLOR: Color = Color { r: 64.0 / 255.0, g: 64.0 / 255.0, b: 64.0 / 255.0, a: 1.0 };
const FLOOR_COLOR: Color = Color { r: 128.0 / 255.0, g: 128.0 / 255.0, b: 128.0 / 255.0, a: 1.0 };
const PLAYER_COLOR: Color = MAGENTA;
const PORTAL_COLOR: Color = Color { r: 0.0, g: 1.0, b: 1.0, a: 1.0 };
const OVERLAY_BACKDROP: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 0.75 };
const FONT_SIZE: f32 = 20.0;
const LINE_STEP: f32 = 22.0;
type OverlayCell = (&'static str, Color);

pub fn draw_frame(level: &LevelState, app_state: &AppState, run_seed: u64) {
    let snapshot = level.snapshot();
    draw_tiles(&snapshot);
    draw_occupants(&snapshot);
    draw_hud(&snapshot, app_state, run_seed, level.snapshot_hash());

    if let Some(view) = &snapshot.combat {
        draw_centered_box(&combat_lines(view), WHITE);
    }
    if snapshot.game_over {
        draw_centered_box(&[game_over_banner(snapshot.level)], RED);
    }
}

fn draw_tiles(snapshot: &LevelSnapshot) {
    for (row, line) in snapshot.map.iter().enumerate() {
        for (col, symbol) in line.chars().enumerate() {
            let color = tile_color(if symbol == '#' { CellKind::Wall } else { CellKind::Floor });
            let (x, y) = cell_origin(Pos::new(row as i32, col as i32));
            draw_rectangle(x, y, TILE_SIZE, TILE_SIZE, color);
        }
    }
}

fn draw_occupants(snapshot: &LevelSnapshot) {
    let mut cells: Vec<Pos> = snapshot.enemies.iter().map(|enemy| enemy.pos).collect();
    cells.push(snapshot.player.pos);
    cells.push(snapshot.portal);

    for pos in cells {
        let Some((glyph, color)) = resolve_cell_render(snapshot, pos) else {
            continue;
        };
        let (x, y) = cell_origin(pos);
        if glyph.is_empty() {
            draw_rectangle(x + 2.0, y + 2.0, TILE_SIZE - 4.0, TILE_SIZE - 4.0, color);
        } else {
            draw_text(glyph, x + 4.0, y + TILE_SIZE - 4.0, TILE_SIZE, color);
        }
    }
}

fn draw_hud(snapshot: &LevelSnapshot, app_state: &AppState, run_seed: u64, hash: u64) {
    let top = snapshot.map.len() as f32 * TILE_SIZE;
    draw_rectangle(0.0, top, screen_width(), HUD_HEIGHT, BLACK);
    draw_text(&snapshot.hud_line(), 10.0, top + 20.0, FONT_SIZE, WHITE);

    let message = app_state
        .last_rejection
        .as_ref()
        .map(ToString::to_string)
        .or_else(|| app_state.last_report.as_ref().and_then(report_text))
        .unwrap_or_else(|| status_text(snapshot));
    draw_text(&message, 10.0, top + 20.0 + LINE_STEP, FONT_SIZE, LIGHTGRAY);
    draw_text(&debug_line(run_seed, hash), screen_width() - 260.0, top + 20.0, 16.0, GRAY);
}

fn draw_centered_box(lines: &[String], color: Color) {
    let width = 280.0;
    let height = lines.len() as f32 * LINE_STEP + 20.0;
    let x = (screen_width() - width) / 2.0;
    let y = (screen_height() - height) / 2.0;
    draw_rectangle(x, y, width, height, OVERLAY_BACKDROP);
    draw_rectangle_lines(x, y, width, height, 2.0, color);
    for (index, line) in lines.iter().enumerate() {
        draw_text(line, x + 12.0, y + 26.0 + index as f32 * LINE_STEP, FONT_SIZE, color);
    }
}

fn cell_origin(pos: Pos) -> (f32, f32) {
    (pos.col as f32 * TILE_SIZE, pos.row as f32 * TILE_SIZE)
}

fn tile_color(kind: CellKind) -> Color {
    match kind {
        CellKind::Wall => WALL_COLOR,
        CellKind::Floor => FLOOR_COLOR,
    }
}

/// What sits on a cell, drawn over the tile. The player hides enemies and the portal;
/// enemies hide the portal. An empty glyph means a filled square.
fn resolve_cell_render(snapshot: &LevelSnapshot, pos: Pos) -> Option<OverlayCell> {
    if snapshot.player.pos == pos {
        return Some(("", PLAYER_COLOR));
    }
    if let Some(enemy) = snapshot.enemies.iter().find(|enemy| enemy.pos == pos) {
        return Some(enemy_glyph_and_color(enemy.kind));
    }
    (snapshot.portal == pos).then_some(("", PORTAL_COLOR))
}

fn enemy_glyph_and_color(kind: EnemyKind) -> OverlayCell {
    match kind {
        EnemyKind::Zombie => ("Z", GREEN),
        EnemyKind::Skeleton => ("S", WHITE),
        EnemyKind::Vampire => ("V", RED),
    }
}
