//! Room placement and corridor carving.

use serde::Serialize;

use crate::config::MapConfig;
use crate::grid::Grid;
use crate::rng::RandomSource;
use crate::types::{CellKind, Pos};

/// Axis-aligned room rectangle; `x`/`y` are the top-left column/row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Room {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Room {
    pub fn center(self) -> Pos {
        Pos { row: (self.y + self.height / 2) as i32, col: (self.x + self.width / 2) as i32 }
    }

    /// Strict overlap: rooms that only share an edge line do not intersect.
    pub fn intersects(self, other: &Self) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }

    pub fn cells(self) -> impl Iterator<Item = Pos> {
        (self.y..self.y + self.height).flat_map(move |row| {
            (self.x..self.x + self.width).map(move |col| Pos { row: row as i32, col: col as i32 })
        })
    }
}

/// Makes exactly `room_count` placement attempts and keeps the ones that do not overlap an
/// earlier room. There is no retry, so fewer rooms than requested is a normal result.
pub(super) fn place_rooms(config: &MapConfig, rng: &mut dyn RandomSource) -> Vec<Room> {
    let min_size = config.min_room_size as u32;
    let max_size = config.max_room_size as u32;

    let mut rooms: Vec<Room> = Vec::with_capacity(config.room_count as usize);
    for attempt in 0..config.room_count {
        let width = rng.in_range(min_size, max_size) as usize;
        let height = rng.in_range(min_size, max_size) as usize;
        let x = 1 + rng.below((config.cols - width - 1) as u32) as usize;
        let y = 1 + rng.below((config.rows - height - 1) as u32) as usize;

        let candidate = Room { x, y, width, height };
        if rooms.iter().any(|room| room.intersects(&candidate)) {
            log::trace!("room attempt {attempt} rejected: {candidate:?} overlaps");
            continue;
        }
        rooms.push(candidate);
    }
    rooms
}

pub(super) fn carve_room(grid: &mut Grid, room: &Room) {
    for pos in room.cells() {
        carve(grid, pos);
    }
}

/// Joins each room to the next one in acceptance order with an L-shaped corridor.
pub(super) fn carve_room_corridors(grid: &mut Grid, rooms: &[Room], rng: &mut dyn RandomSource) {
    for pair in rooms.windows(2) {
        let horizontal_first = rng.coin();
        carve_l_shaped_corridor(grid, pair[0].center(), pair[1].center(), horizontal_first);
    }
}

fn carve_l_shaped_corridor(grid: &mut Grid, start: Pos, end: Pos, horizontal_first: bool) {
    if horizontal_first {
        carve_horizontal_line(grid, start.row, start.col, end.col);
        carve_vertical_line(grid, end.col, start.row, end.row);
    } else {
        carve_vertical_line(grid, start.col, start.row, end.row);
        carve_horizontal_line(grid, end.row, start.col, end.col);
    }
}

fn carve_horizontal_line(grid: &mut Grid, row: i32, from_col: i32, to_col: i32) {
    for col in from_col.min(to_col)..=from_col.max(to_col) {
        carve(grid, Pos { row, col });
    }
}

fn carve_vertical_line(grid: &mut Grid, col: i32, from_row: i32, to_row: i32) {
    for row in from_row.min(to_row)..=from_row.max(to_row) {
        carve(grid, Pos { row, col });
    }
}

fn carve(grid: &mut Grid, pos: Pos) {
    let carved = grid.set_kind(pos, CellKind::Floor);
    debug_assert!(carved.is_ok(), "carving left the grid at {pos:?}");
}
