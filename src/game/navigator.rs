//! Per-tick walk controller.
//!
//! The [`Navigator`] owns the [`Player`] and is the only thing that mutates it. Each
//! tick it turns a [`MoveInput`] into thrust and torque, integrates heading, speed and
//! height, and keeps the player from crossing into tiles of a different state using
//! the [`CollisionResolver`].

use super::collision::{CollisionOutcome, CollisionResolver};
use super::keys::{DirectionFlags, MoveInput};
use super::player::{Player, Pose};
use crate::config::MovementConfig;
use crate::math::coordinates::{MazeLayout, TileCoord};
use crate::math::min_abs;
use crate::math::vec::Vec3;
use crate::maze::Grid;

/// Summary of one navigator tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// Tile the player started the tick on
    pub tile: TileCoord,
    /// The starting tile differs from the one remembered last tick
    pub tile_changed: bool,
    /// Set when the move crossed into a tile of a different state
    pub collision: Option<CollisionOutcome>,
    /// Pose after the tick
    pub pose: Pose,
}

/// Walk controller driving a [`Player`] through a maze.
#[derive(Debug, Clone)]
pub struct Navigator {
    player: Player,
    movement: MovementConfig,
    resolver: CollisionResolver,
}

impl Navigator {
    /// Creates a navigator for a player standing at `position`.
    pub fn new(movement: MovementConfig, position: [f32; 3]) -> Self {
        let resolver = CollisionResolver::new(movement.push_back);
        let player = Player::spawn_at(position, movement.min_height);
        Self {
            player,
            movement,
            resolver,
        }
    }

    /// The player state.
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Mutable player state, for scripted setups.
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Current pose.
    pub fn pose(&self) -> Pose {
        self.player.pose()
    }

    /// Puts a fresh player at `position`, discarding all motion.
    pub fn respawn(&mut self, position: [f32; 3]) {
        self.player = Player::spawn_at(position, self.movement.min_height);
    }

    /// Advances the player by `dt` seconds.
    ///
    /// While thrust is held the momentum is re-aimed along the facing every tick,
    /// so a wall bounce only shows up in the motion once the player lets go and
    /// coasts. Under sustained pressure the slide along the wall is what remains.
    pub fn tick(&mut self, grid: &Grid, layout: &MazeLayout, input: &MoveInput, dt: f32) -> TickReport {
        let movement = &self.movement;
        let player = &mut self.player;

        let current_tile = layout.world_to_tile(player.position);
        let tile_changed = player
            .previous_tile
            .is_some_and(|previous| previous != current_tile);
        if tile_changed {
            tracing::debug!(x = current_tile.x, z = current_tile.z, "player entered tile");
        }
        player.previous_tile = Some(current_tile);

        let airborne = player.is_airborne(movement.min_height);
        let (thrust, torque) = forces(input, movement, airborne);

        if input.jump && !input.locked && !airborne {
            player.jump_thrust = movement.jumping_force;
        }

        player.angular_speed = min_abs(
            player.angular_speed + torque * dt,
            movement.turn_speed_limit,
        );
        if !input.turning() {
            player.angular_speed *= movement.angular_decay;
        }
        player.heading += player.angular_speed * dt;

        if !airborne && thrust != 0.0 {
            player.momentum = player.facing();
        }

        if !airborne && player.jump_thrust == 0.0 {
            player.fall_speed = 0.0;
        } else {
            player.fall_speed += (player.jump_thrust + movement.gravity) * dt;
            player.jump_thrust = 0.0;
            player.height = (player.height + player.fall_speed * dt).max(movement.min_height);
        }

        player.speed = min_abs(player.speed + thrust * dt, movement.speed_limit);
        if !input.thrusting() && !airborne {
            player.speed *= movement.speed_decay;
        }

        let step = player.momentum * (player.speed * dt);
        let collision = move_horizontally(&self.resolver, grid, layout, player, step);
        player.position[1] = player.height;

        TickReport {
            tile: current_tile,
            tile_changed,
            collision,
            pose: player.pose(),
        }
    }
}

/// Longest horizontal sub-step, as a fraction of the cell size.
const MAX_SUBSTEP_CELLS: f32 = 0.5;

/// Moves the player by `step` in sub-steps short enough that no wall tile is skipped.
///
/// Each sub-step is checked against the tile the player is on at that moment. The
/// first collision ends the move for this tick.
fn move_horizontally(
    resolver: &CollisionResolver,
    grid: &Grid,
    layout: &MazeLayout,
    player: &mut Player,
    step: Vec3,
) -> Option<CollisionOutcome> {
    let (cell_x, cell_z) = layout.cell_size();
    let max_substep = cell_x.min(cell_z) * MAX_SUBSTEP_CELLS;
    let substeps = (step.length() / max_substep).ceil().clamp(1.0, 1024.0) as u32;
    let substep = step * (1.0 / substeps as f32);

    for _ in 0..substeps {
        let current = player.position;
        let current_tile = layout.world_to_tile(current);
        let candidate = [current[0] + substep.x(), current[1], current[2] + substep.z()];
        let candidate_tile = layout.world_to_tile(candidate);

        if layout.tile_state(grid, candidate_tile) == layout.tile_state(grid, current_tile) {
            player.position = candidate;
            continue;
        }

        let resolution = resolver.resolve(
            grid,
            layout,
            current,
            candidate,
            current_tile,
            candidate_tile,
            player.momentum,
        );
        player.position = resolution.position;
        player.momentum = resolution.momentum;
        return Some(resolution.outcome);
    }
    None
}

/// Thrust and torque for the held directions; zero while locked.
fn forces(input: &MoveInput, movement: &MovementConfig, airborne: bool) -> (f32, f32) {
    if input.locked {
        return (0.0, 0.0);
    }
    let dirs = input.directions;
    let mut thrust = 0.0;
    let mut torque = 0.0;
    if dirs.contains(DirectionFlags::N) {
        thrust += movement.walk_force;
    }
    if dirs.contains(DirectionFlags::S) {
        thrust -= movement.walk_force;
    }
    if dirs.contains(DirectionFlags::W) {
        torque -= movement.turning_force;
    }
    if dirs.contains(DirectionFlags::E) {
        torque += movement.turning_force;
    }
    if airborne {
        thrust = 0.0;
    }
    (thrust, torque)
}

/// Finds the open tile nearest the maze center, excluding the center itself.
///
/// Distance is Manhattan; ties go to the first tile in row-major order.
pub fn find_spawn_tile(grid: &Grid, layout: &MazeLayout) -> Option<TileCoord> {
    let center = layout.center_tile();
    grid.open_cells()
        .map(TileCoord::from)
        .filter(|tile| *tile != center)
        .min_by_key(|tile| (tile.x - center.x).abs() + (tile.z - center.z).abs())
}
