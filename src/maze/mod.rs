//! Maze generation, storage and search.
//!
//! This module provides the occupancy [`Grid`] the rest of the crate walks on, the
//! randomized backtracking [`generator`], and the breadth-first [`search`] used to
//! place the point of interest far from the player.
//!
//! Grids use the doubled-coordinate scheme: a maze of `tiles_x` by `tiles_z`
//! generation cells is stored as a `(2 * tiles_x + 1)` by `(2 * tiles_z + 1)` grid
//! where odd coordinates are rooms and even coordinates are walls or passages.

pub mod generator;
pub mod grid;
pub mod search;

pub use generator::{MazeGenerator, generate};
pub use grid::{Cell, Grid, TileState};
pub use search::{DEFAULT_FARTHEST_COUNT, FarthestCell, farthest_cells, pick_random};

/// Errors from maze construction and persistence.
#[derive(Debug, thiserror::Error)]
pub enum MazeError {
    /// A generation parameter was out of range.
    #[error("invalid maze argument: {0}")]
    InvalidArgument(String),
    /// A textual maze could not be parsed.
    #[error("failed to parse maze on line {line}: {reason}")]
    Parse {
        /// One-based line number of the offending row
        line: usize,
        /// What was wrong with it
        reason: String,
    },
    /// Reading or writing a maze file failed.
    #[error("maze IO error: {0}")]
    Io(#[from] std::io::Error),
}
