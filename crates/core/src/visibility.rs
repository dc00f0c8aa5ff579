//! Line-of-sight between two cells.
//! Enemies use this to decide between pursuing and wandering; the player has no fog of war.

use crate::error::CoreError;
use crate::grid::Grid;
use crate::types::{CellKind, Pos};

/// Walks an integer Bresenham line from `from` to `to`, checking every visited cell
/// including both endpoints. A wall anywhere on the walk, the source included, blocks sight.
///
/// The walk is not symmetric: the cells visited from `a` to `b` can differ from those
/// visited from `b` to `a`, so a wall beside the diagonal may block only one direction.
pub fn has_line_of_sight(grid: &Grid, from: Pos, to: Pos) -> Result<bool, CoreError> {
    grid.kind_at(to)?;

    let d_row = (to.row - from.row).abs();
    let d_col = (to.col - from.col).abs();
    let step_row = if from.row < to.row { 1 } else { -1 };
    let step_col = if from.col < to.col { 1 } else { -1 };
    let mut err = d_row - d_col;
    let mut current = from;

    loop {
        if grid.kind_at(current)? == CellKind::Wall {
            return Ok(false);
        }
        if current == to {
            return Ok(true);
        }

        let doubled = 2 * err;
        if doubled > -d_col {
            err -= d_col;
            current.row += step_row;
        }
        if doubled < d_row {
            err += d_row;
            current.col += step_col;
        }
    }
}

/// Range-gated sight check. Anything farther than `radius` (straight-line distance) is out
/// of sight without tracing a ray.
pub fn can_see(grid: &Grid, viewer: Pos, target: Pos, radius: u32) -> Result<bool, CoreError> {
    let radius = i64::from(radius);
    if viewer.distance_squared(target) > radius * radius {
        return Ok(false);
    }
    has_line_of_sight(grid, viewer, target)
}
