//! Level generation entry point composing room placement and corridor carving.

use crate::config::MapConfig;
use crate::error::CoreError;
use crate::grid::Grid;
use crate::rng::RandomSource;
use crate::types::CellKind;

use super::layout::{Room, carve_room, carve_room_corridors, place_rooms};

/// A freshly carved grid together with the rooms that were accepted while building it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedMap {
    pub grid: Grid,
    pub rooms: Vec<Room>,
}

#[derive(Clone, Debug)]
pub struct MapGenerator {
    config: MapConfig,
}

impl MapGenerator {
    pub fn new(config: MapConfig) -> Result<Self, CoreError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn generate(&self, rng: &mut dyn RandomSource) -> Grid {
        self.generate_with_rooms(rng).grid
    }

    pub fn generate_with_rooms(&self, rng: &mut dyn RandomSource) -> GeneratedMap {
        let mut grid = Grid::new(self.config.rows, self.config.cols, CellKind::Wall);

        let rooms = place_rooms(&self.config, rng);
        for room in &rooms {
            carve_room(&mut grid, room);
        }
        carve_room_corridors(&mut grid, &rooms, rng);

        log::debug!(
            "generated {}x{} map with {}/{} rooms, {} floor cells",
            self.config.rows,
            self.config.cols,
            rooms.len(),
            self.config.room_count,
            grid.floor_count()
        );

        GeneratedMap { grid, rooms }
    }
}
