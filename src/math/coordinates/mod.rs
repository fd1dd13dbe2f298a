//! Coordinate system transformations for the maze.
//!
//! This module converts between the two coordinate systems used by the walker:
//! - Tile coordinates: signed integer `(x, z)` indices into the maze grid
//! - World coordinates: continuous 3D space where the player moves (x, y, z)
//!
//! The maze is a square of edge `length` centered on the world origin. Each grid
//! cell covers `length / grid_width` by `length / grid_depth` world units, so the
//! mapping is a fixed linear function of the maze size and tile counts.

mod positions;
mod transformations;

pub use positions::*;
pub use transformations::*;

/// Constants for the default world layout
pub mod constants {
    /// Edge length of the maze floor in world units
    pub const MAZE_LENGTH: f32 = 60.0;

    /// Height of the point of interest above the floor
    pub const POINT_OF_INTEREST_HEIGHT: f32 = 5.0;
}
