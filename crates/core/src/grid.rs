//! Tile storage for one level with bounds-checked access.

use crate::error::CoreError;
use crate::rng::RandomSource;
use crate::types::{CellKind, Pos};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<CellKind>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize, fill: CellKind) -> Self {
        Self { rows, cols, cells: vec![fill; rows * cols] }
    }

    /// Parses a fixture where `#` is a wall and `.` is floor. Surrounding blank lines and
    /// indentation are ignored; every row must have the same width.
    pub fn from_ascii(text: &str) -> Result<Self, CoreError> {
        let lines: Vec<&str> =
            text.lines().map(str::trim).filter(|line| !line.is_empty()).collect();
        let rows = lines.len();
        let cols = lines.first().map_or(0, |line| line.chars().count());

        let mut cells = Vec::with_capacity(rows * cols);
        for (row, line) in lines.iter().enumerate() {
            if line.chars().count() != cols {
                return Err(CoreError::InvalidConfig(format!(
                    "row {row} has {} cells, expected {cols}",
                    line.chars().count()
                )));
            }
            for symbol in line.chars() {
                cells.push(match symbol {
                    '#' => CellKind::Wall,
                    '.' => CellKind::Floor,
                    other => {
                        return Err(CoreError::InvalidConfig(format!(
                            "unknown cell symbol {other:?} in row {row}"
                        )));
                    }
                });
            }
        }

        Ok(Self { rows, cols, cells })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.row >= 0
            && pos.col >= 0
            && (pos.row as usize) < self.rows
            && (pos.col as usize) < self.cols
    }

    pub fn kind_at(&self, pos: Pos) -> Result<CellKind, CoreError> {
        let idx = self.index(pos)?;
        Ok(self.cells[idx])
    }

    pub fn set_kind(&mut self, pos: Pos, kind: CellKind) -> Result<(), CoreError> {
        let idx = self.index(pos)?;
        self.cells[idx] = kind;
        Ok(())
    }

    /// True only for in-bounds floor cells. Used to validate moves, where stepping off the
    /// map is an ordinary rejected move rather than a contract violation.
    pub fn is_floor(&self, pos: Pos) -> bool {
        self.kind_at(pos).is_ok_and(|kind| kind == CellKind::Floor)
    }

    pub fn floor_count(&self) -> usize {
        self.cells.iter().filter(|&&kind| kind == CellKind::Floor).count()
    }

    pub fn floor_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells.iter().enumerate().filter(|(_, kind)| **kind == CellKind::Floor).map(
            |(idx, _)| Pos { row: (idx / self.cols) as i32, col: (idx % self.cols) as i32 },
        )
    }

    pub fn to_ascii(&self) -> String {
        let mut text = String::with_capacity(self.rows * (self.cols + 1));
        for row in self.cells.chunks(self.cols.max(1)) {
            for kind in row {
                text.push(match kind {
                    CellKind::Wall => '#',
                    CellKind::Floor => '.',
                });
            }
            text.push('\n');
        }
        text
    }

    fn index(&self, pos: Pos) -> Result<usize, CoreError> {
        if !self.contains(pos) {
            return Err(CoreError::OutOfBounds { pos, rows: self.rows, cols: self.cols });
        }
        Ok((pos.row as usize) * self.cols + (pos.col as usize))
    }
}

/// Rejection-samples uniformly random cells until one is floor.
///
/// Returns `None` only for a grid without any floor. After `rows * cols` wall hits in a row
/// it picks among the floor cells directly, so sources that keep repeating one value still
/// terminate.
pub fn random_floor_cell(grid: &Grid, rng: &mut dyn RandomSource) -> Option<Pos> {
    let floor = grid.floor_count();
    if floor == 0 {
        return None;
    }
    for _ in 0..grid.rows() * grid.cols() {
        let row = rng.below(grid.rows() as u32) as i32;
        let col = rng.below(grid.cols() as u32) as i32;
        let pos = Pos { row, col };
        if grid.is_floor(pos) {
            return Some(pos);
        }
    }
    let nth = rng.below(floor as u32) as usize;
    grid.floor_cells().nth(nth)
}
