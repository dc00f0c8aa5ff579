//! Error taxonomy for the simulation core.
//!
//! Every variant is a caller contract violation or a configuration problem. Player moves
//! into walls are not errors; they come back as `TurnReport::Blocked`.

use thiserror::Error;

use crate::types::{Intent, Mode, Pos};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("cell ({}, {}) is outside the {rows}x{cols} grid", pos.row, pos.col)]
    OutOfBounds { pos: Pos, rows: usize, cols: usize },

    #[error("cell ({}, {}) is a wall", pos.row, pos.col)]
    NotFloor { pos: Pos },

    #[error("{intent:?} is not accepted in {mode:?} mode")]
    IllegalAction { intent: Intent, mode: Mode },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("level has no floor cell to place anything on")]
    NoFloorCells,
}
