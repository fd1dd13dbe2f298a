//! Coordinate system transformations between world space and the maze grid.
//!
//! # Coordinate System
//! - Origin (0, 0, 0) is at the center of the maze floor
//! - X increases toward grid column `width - 1`
//! - Y increases upwards and never affects the tile
//! - Z increases toward grid row `depth - 1`

use super::positions::TileCoord;
use crate::maze::{Cell, Grid, TileState};

/// Physical placement of a maze grid in the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MazeLayout {
    /// Edge length of the maze floor in world units
    pub length: f32,
    /// Number of grid columns (`2 * tiles_x + 1`)
    pub grid_width: usize,
    /// Number of grid rows (`2 * tiles_z + 1`)
    pub grid_depth: usize,
}

impl MazeLayout {
    /// Creates a layout of the given edge length for a grid of the given size.
    pub fn new(length: f32, grid_width: usize, grid_depth: usize) -> Self {
        Self {
            length,
            grid_width: grid_width.max(1),
            grid_depth: grid_depth.max(1),
        }
    }

    /// Creates a layout matching the dimensions of `grid`.
    pub fn for_grid(length: f32, grid: &Grid) -> Self {
        Self::new(length, grid.width(), grid.depth())
    }

    /// World-space size of one cell along x and z.
    pub fn cell_size(&self) -> (f32, f32) {
        (
            self.length / self.grid_width as f32,
            self.length / self.grid_depth as f32,
        )
    }

    /// Converts a world position to its tile coordinate.
    ///
    /// The y component is ignored. Positions outside the maze produce tiles outside
    /// the grid rather than being clamped.
    pub fn world_to_tile(&self, position: [f32; 3]) -> TileCoord {
        let x = ((position[0] / self.length + 0.5) * self.grid_width as f32).floor();
        let z = ((position[2] / self.length + 0.5) * self.grid_depth as f32).floor();
        TileCoord::new(x as i32, z as i32)
    }

    /// World position of the center of `tile` at height `y`.
    pub fn tile_to_world(&self, tile: TileCoord, y: f32) -> [f32; 3] {
        let x = self.length * ((tile.x as f32 + 0.5) / self.grid_width as f32 - 0.5);
        let z = self.length * ((tile.z as f32 + 0.5) / self.grid_depth as f32 - 0.5);
        [x, y, z]
    }

    /// World position of the center of a grid cell at height `y`.
    pub fn cell_to_world(&self, cell: Cell, y: f32) -> [f32; 3] {
        self.tile_to_world(TileCoord::from(cell), y)
    }

    /// The tile at the middle of the grid.
    pub fn center_tile(&self) -> TileCoord {
        TileCoord::new(
            ((self.grid_width - 1) / 2) as i32,
            ((self.grid_depth - 1) / 2) as i32,
        )
    }

    /// Walkability state of `tile`.
    ///
    /// Tiles outside the grid read as walls, and the center tile always reads as a
    /// wall because the well occupies it.
    pub fn tile_state(&self, grid: &Grid, tile: TileCoord) -> TileState {
        if tile == self.center_tile() {
            return TileState::Wall;
        }
        tile.to_cell()
            .and_then(|cell| grid.get(cell.x, cell.z))
            .unwrap_or(TileState::Wall)
    }

    /// Tile coordinate and state for a world position.
    pub fn tile_for(&self, grid: &Grid, position: [f32; 3]) -> TileQuery {
        let tile = self.world_to_tile(position);
        TileQuery {
            x: tile.x,
            z: tile.z,
            state: self.tile_state(grid, tile),
        }
    }
}

/// Answer to a tile query at a world position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileQuery {
    /// Tile column
    pub x: i32,
    /// Tile row
    pub z: i32,
    /// State of the tile, including the center override
    pub state: TileState,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> MazeLayout {
        MazeLayout::new(60.0, 15, 15)
    }

    #[test]
    fn test_tile_center_maps_back_to_tile() {
        let layout = layout();
        for x in 0..15 {
            for z in 0..15 {
                let tile = TileCoord::new(x, z);
                let world = layout.tile_to_world(tile, 1.5);
                assert_eq!(layout.world_to_tile(world), tile);
                assert_eq!(world[1], 1.5);
            }
        }
    }

    #[test]
    fn test_origin_is_center_tile() {
        let layout = layout();
        assert_eq!(layout.world_to_tile([0.0, 0.0, 0.0]), layout.center_tile());
        assert_eq!(layout.center_tile(), TileCoord::new(7, 7));
    }

    #[test]
    fn test_outside_positions_are_walls() {
        let layout = layout();
        let grid = Grid::filled(15, 15, TileState::Open);

        let outside = layout.world_to_tile([-31.0, 0.0, 0.0]);
        assert_eq!(outside.x, -1);
        assert_eq!(layout.tile_state(&grid, outside), TileState::Wall);

        let far = layout.world_to_tile([0.0, 0.0, 30.5]);
        assert_eq!(far.z, 15);
        assert_eq!(layout.tile_state(&grid, far), TileState::Wall);
    }

    #[test]
    fn test_center_override_and_tile_query() {
        let layout = layout();
        let grid = Grid::filled(15, 15, TileState::Open);

        let query = layout.tile_for(&grid, [0.5, 3.0, -0.5]);
        assert_eq!((query.x, query.z), (7, 7));
        assert_eq!(query.state, TileState::Wall);

        let beside = layout.tile_for(&grid, layout.tile_to_world(TileCoord::new(8, 7), 0.0));
        assert_eq!(beside.state, TileState::Open);
    }
}
