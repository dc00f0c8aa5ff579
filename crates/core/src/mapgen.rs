//! Procedural level generation: rooms first, then corridors between consecutive rooms.

mod generator;
mod layout;

pub use generator::{GeneratedMap, MapGenerator};
pub use layout::Room;
