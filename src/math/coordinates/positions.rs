//! Tile coordinates and cardinal directions.
//!
//! A [`TileCoord`] is derived from a world position and is allowed to fall outside
//! the grid (negative or past the far edge); lookups treat such tiles as walls.

use crate::maze::Cell;

/// Signed tile coordinate computed from a continuous world position.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    /// Column along the world x axis
    pub x: i32,
    /// Row along the world z axis
    pub z: i32,
}

impl TileCoord {
    /// Creates a new tile coordinate
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Converts to a grid cell when both components are non-negative.
    ///
    /// The upper bound is not checked here; the grid accessor does that.
    pub fn to_cell(self) -> Option<Cell> {
        let x = usize::try_from(self.x).ok()?;
        let z = usize::try_from(self.z).ok()?;
        Some(Cell::new(x, z))
    }
}

impl From<Cell> for TileCoord {
    fn from(cell: Cell) -> Self {
        Self::new(cell.x as i32, cell.z as i32)
    }
}

/// Enum representing cardinal directions on the maze grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward -z
    North,
    /// Toward +x
    East,
    /// Toward +z
    South,
    /// Toward -x
    West,
}

impl Direction {
    /// All four directions in clockwise order starting at north.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Grid offset `(dx, dz)` of one step in this direction.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }
}
