//! Per-turn enemy movement: pursue a visible player, otherwise wander.
//! Enemies act independently and in collection order; they do not avoid each other.

use crate::error::CoreError;
use crate::grid::Grid;
use crate::rng::RandomSource;
use crate::types::{Direction, Enemy, Pos};
use crate::visibility::can_see;

pub fn move_enemies<'a>(
    grid: &Grid,
    player: Pos,
    enemies: impl IntoIterator<Item = &'a mut Enemy>,
    rng: &mut dyn RandomSource,
    sight_radius: u32,
) -> Result<(), CoreError> {
    for enemy in enemies {
        let next = if can_see(grid, enemy.pos, player, sight_radius)? {
            pursue_step(grid, enemy.pos, player)
        } else {
            wander_step(grid, enemy.pos, rng)
        };
        if next != enemy.pos {
            log::trace!("{:?} {:?} moves {:?} -> {:?}", enemy.kind, enemy.id, enemy.pos, next);
            enemy.pos = next;
        }
    }
    Ok(())
}

/// One step along the axis with the larger gap to the player; ties favour the vertical
/// axis. A blocked step is not retried on the other axis.
pub fn pursue_step(grid: &Grid, from: Pos, player: Pos) -> Pos {
    let d_col = player.col - from.col;
    let d_row = player.row - from.row;

    let candidate = if d_col.abs() > d_row.abs() {
        Pos { row: from.row, col: from.col + d_col.signum() }
    } else if d_row != 0 {
        Pos { row: from.row + d_row.signum(), col: from.col }
    } else {
        return from;
    };

    if grid.is_floor(candidate) { candidate } else { from }
}

/// One uniformly drawn cardinal step, taken only onto in-bounds floor.
pub fn wander_step(grid: &Grid, from: Pos, rng: &mut dyn RandomSource) -> Pos {
    let direction = Direction::ALL[rng.below(Direction::ALL.len() as u32) as usize];
    let candidate = from.step(direction);
    if grid.is_floor(candidate) { candidate } else { from }
}
