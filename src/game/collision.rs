//! Tile-based collision resolution with wall sliding.
//!
//! # Overview
//!
//! The maze is a grid of open and wall tiles, so a move collides when the candidate
//! position lands on a tile whose state differs from the tile the player is on. The
//! resolver then projects the move onto the wall (sliding), nudges the result back
//! toward the current tile, and mirrors the player's momentum off the wall.
//!
//! # How the System Works
//!
//! 1. The wall normal points from the candidate tile back to the current tile
//! 2. The movement delta keeps only its component along the wall tangent
//! 3. A small push-back along the normal keeps the player off the boundary
//! 4. If the slid position still crosses into a different state (diagonal corners),
//!    the horizontal move is dropped altogether

use crate::math::coordinates::{MazeLayout, TileCoord};
use crate::math::vec::Vec3;
use crate::maze::Grid;

/// What happened to a move that crossed a tile boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    /// The move was projected onto the wall and applied.
    Slid,
    /// The slid move still crossed a boundary, so the horizontal position was kept.
    Blocked,
    /// The two tiles coincide and no normal exists; the horizontal position was kept.
    Degenerate,
}

/// Result of resolving one move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// Horizontal position to commit; y is left untouched
    pub position: [f32; 3],
    /// Momentum after the collision
    pub momentum: Vec3,
    /// How the move was handled
    pub outcome: CollisionOutcome,
}

/// Resolves moves that cross between tiles of different state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResolver {
    /// Distance pushed back along the wall normal after sliding
    pub push_back: f32,
}

impl CollisionResolver {
    /// Creates a resolver with the given push-back distance.
    pub fn new(push_back: f32) -> Self {
        Self { push_back }
    }

    /// Resolves a move from `current` to `candidate` that changes tile state.
    ///
    /// # Arguments
    /// * `grid`, `layout` - The maze and its placement in the world
    /// * `current` - Position before the move; its tile defines the state to stay in
    /// * `candidate` - Position the unconstrained move would reach
    /// * `current_tile`, `candidate_tile` - Tiles of the two positions
    /// * `momentum` - Horizontal momentum before the collision
    ///
    /// # Returns
    /// The position and momentum to commit. Never contains NaN for finite inputs.
    #[allow(clippy::too_many_arguments)]
    pub fn resolve(
        &self,
        grid: &Grid,
        layout: &MazeLayout,
        current: [f32; 3],
        candidate: [f32; 3],
        current_tile: TileCoord,
        candidate_tile: TileCoord,
        momentum: Vec3,
    ) -> Resolution {
        let Some(normal) = Vec3::horizontal(
            (current_tile.x - candidate_tile.x) as f32,
            (current_tile.z - candidate_tile.z) as f32,
        )
        .try_normalize() else {
            return Resolution {
                position: current,
                momentum,
                outcome: CollisionOutcome::Degenerate,
            };
        };
        let tangent = Vec3::horizontal(-normal.z(), normal.x());

        let delta = Vec3::horizontal(candidate[0] - current[0], candidate[2] - current[2]);
        let slid = tangent * delta.dot(&tangent) + normal * self.push_back;
        let resolved = [current[0] + slid.x(), current[1], current[2] + slid.z()];
        let reflected = momentum.reflect(&normal);

        let current_state = layout.tile_state(grid, current_tile);
        let resolved_state = layout.tile_state(grid, layout.world_to_tile(resolved));

        if resolved_state == current_state {
            Resolution {
                position: resolved,
                momentum: reflected,
                outcome: CollisionOutcome::Slid,
            }
        } else {
            Resolution {
                position: current,
                momentum: reflected,
                outcome: CollisionOutcome::Blocked,
            }
        }
    }
}

impl Default for CollisionResolver {
    fn default() -> Self {
        Self::new(0.05)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::TileState;

    /// 7x7 room with a single wall at tile (2, 1)
    fn room() -> (Grid, MazeLayout) {
        let grid = Grid::from_ascii(
            "#######\n\
             # #   #\n\
             #     #\n\
             #     #\n\
             #     #\n\
             #     #\n\
             #######\n",
        )
        .expect("valid maze text");
        let layout = MazeLayout::for_grid(70.0, &grid);
        (grid, layout)
    }

    #[test]
    fn test_head_on_move_is_pushed_back() {
        let (grid, layout) = room();
        let current = layout.tile_to_world(TileCoord::new(1, 1), 1.5);
        let candidate = [current[0] + 12.0, 1.5, current[2]];
        let candidate_tile = layout.world_to_tile(candidate);
        assert_eq!(candidate_tile, TileCoord::new(2, 1));

        let resolution = CollisionResolver::new(0.05).resolve(
            &grid,
            &layout,
            current,
            candidate,
            TileCoord::new(1, 1),
            candidate_tile,
            Vec3::new(1.0, 0.0, 0.0),
        );

        assert_eq!(resolution.outcome, CollisionOutcome::Slid);
        assert!((resolution.position[0] - (current[0] - 0.05)).abs() < 1e-4);
        assert_eq!(resolution.momentum, Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(
            layout.tile_state(&grid, layout.world_to_tile(resolution.position)),
            TileState::Open
        );
    }

    #[test]
    fn test_diagonal_move_slides_along_wall() {
        let (grid, layout) = room();
        let current = layout.tile_to_world(TileCoord::new(1, 1), 1.5);
        let candidate = [current[0] + 7.0, 1.5, current[2] + 2.0];

        let resolution = CollisionResolver::default().resolve(
            &grid,
            &layout,
            current,
            candidate,
            TileCoord::new(1, 1),
            layout.world_to_tile(candidate),
            Vec3::new(0.96, 0.0, 0.28),
        );

        assert_eq!(resolution.outcome, CollisionOutcome::Slid);
        assert!((resolution.position[2] - (current[2] + 2.0)).abs() < 1e-4);
        assert!(resolution.position[0] < current[0]);
        assert!(resolution.momentum.x() < 0.0);
        assert!(resolution.momentum.z() > 0.0);
    }

    #[test]
    fn test_same_tile_is_degenerate() {
        let (grid, layout) = room();
        let current = layout.tile_to_world(TileCoord::new(4, 4), 1.5);
        let tile = layout.world_to_tile(current);
        let resolution = CollisionResolver::default().resolve(
            &grid,
            &layout,
            current,
            [current[0] + 0.1, 1.5, current[2]],
            tile,
            tile,
            Vec3::new(1.0, 0.0, 0.0),
        );
        assert_eq!(resolution.outcome, CollisionOutcome::Degenerate);
        assert_eq!(resolution.position, current);
        assert!(resolution.momentum.x().is_finite());
    }

    #[test]
    fn test_corner_crossing_is_blocked() {
        let grid = Grid::from_ascii("#####\n#   #\n# ###\n#   #\n#####\n").expect("valid maze text");
        let layout = MazeLayout::for_grid(50.0, &grid);
        let current_tile = TileCoord::new(1, 3);
        // Near the bottom edge of tile (1, 3)
        let current = [-10.0, 1.5, 14.5];
        assert_eq!(layout.world_to_tile(current), current_tile);

        // Diagonal move into the wall tile (2, 2)
        let candidate = [4.0, 1.5, 4.5];
        let candidate_tile = layout.world_to_tile(candidate);
        assert_eq!(candidate_tile, TileCoord::new(2, 2));

        let resolution = CollisionResolver::default().resolve(
            &grid,
            &layout,
            current,
            candidate,
            current_tile,
            candidate_tile,
            Vec3::new(0.8, 0.0, -0.6),
        );
        // Sliding along the diagonal wall carries the player into the border row
        assert_eq!(resolution.outcome, CollisionOutcome::Blocked);
        assert_eq!(resolution.position, current);
    }
}
