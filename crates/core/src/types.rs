use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct EnemyId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: i32,
    pub col: i32,
}

impl Pos {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (d_row, d_col) = direction.offset();
        Self { row: self.row + d_row, col: self.col + d_col }
    }

    /// Squared straight-line distance, kept integral so range checks need no floats.
    pub fn distance_squared(self, other: Self) -> i64 {
        let d_row = i64::from(other.row - self.row);
        let d_col = i64::from(other.col - self.col);
        d_row * d_row + d_col * d_col
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Wall,
    Floor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Order used when a wandering enemy draws a direction.
    pub const ALL: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    ConfirmOrRoll,
    Descend,
    Quit,
}

impl Intent {
    pub fn direction(self) -> Option<Direction> {
        match self {
            Self::MoveUp => Some(Direction::Up),
            Self::MoveDown => Some(Direction::Down),
            Self::MoveLeft => Some(Direction::Left),
            Self::MoveRight => Some(Direction::Right),
            Self::ConfirmOrRoll | Self::Descend | Self::Quit => None,
        }
    }
}

/// Which inputs the level currently accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Exploring,
    InCombat,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Zombie,
    Skeleton,
    Vampire,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Enemy {
    #[serde(skip)]
    pub id: EnemyId,
    pub kind: EnemyKind,
    pub pos: Pos,
    pub health: i32,
    pub damage: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Player {
    pub pos: Pos,
    pub health: i32,
    pub max_health: i32,
}
