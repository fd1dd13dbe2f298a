//! Player kinematic state and camera pose.
//!
//! The [`Player`] is plain data owned by the navigator. Once per tick the navigator
//! hands out a [`Pose`] record that a renderer can turn into a camera matrix.
//!
//! # Coordinate System
//!
//! - X-axis and Z-axis span the maze floor
//! - Y-axis is height above the floor
//! - The heading angle is measured from +x toward +z, so a heading of `0` faces +x
//!   and `π/2` faces +z

use crate::math::coordinates::TileCoord;
use crate::math::mat::Mat4;
use crate::math::vec::Vec3;

/// Represents the walking player's state in the world.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Player {
    /// World position `[x, y, z]`; y always equals `height` after a tick.
    pub position: [f32; 3],

    /// Heading angle in radians.
    pub heading: f32,

    /// Turning rate in radians per second.
    pub angular_speed: f32,

    /// Horizontal unit vector the player is sliding along.
    ///
    /// Set to the heading whenever the player walks on the ground, and mirrored
    /// off walls on collision.
    pub momentum: Vec3,

    /// Signed ground speed along `momentum`.
    pub speed: f32,

    /// Eye height.
    pub height: f32,

    /// Vertical speed, positive upward.
    pub fall_speed: f32,

    /// Upward acceleration queued by a jump and consumed on the next tick.
    pub jump_thrust: f32,

    /// Tile occupied at the end of the previous tick.
    pub previous_tile: Option<TileCoord>,
}

impl Player {
    /// Creates a player standing still at `position`, heading along +x.
    ///
    /// # Arguments
    /// * `position` - Spawn point on the floor; its y is replaced by `height`
    /// * `height` - Standing eye height
    pub fn spawn_at(position: [f32; 3], height: f32) -> Self {
        Self {
            position: [position[0], height, position[2]],
            height,
            ..Self::default()
        }
    }

    /// Whether the player is above standing height.
    pub fn is_airborne(&self, min_height: f32) -> bool {
        self.height > min_height
    }

    /// Horizontal unit vector for the current heading.
    pub fn facing(&self) -> Vec3 {
        Vec3::horizontal(self.heading.cos(), self.heading.sin())
    }

    /// Snapshot of position and facing for the camera.
    pub fn pose(&self) -> Pose {
        Pose {
            position: self.position,
            facing: self.facing().0,
        }
    }
}

/// Camera pose handed to the renderer once per frame.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Eye position
    pub position: [f32; 3],
    /// Horizontal unit view direction
    pub facing: [f32; 3],
}

impl Pose {
    /// World-to-view matrix looking along `facing` with +y up.
    ///
    /// Falls back to a plain translation if `facing` is degenerate.
    pub fn view_matrix(&self) -> Mat4 {
        let eye = Vec3::from(self.position);
        Mat4::look_to(eye, Vec3::from(self.facing), Vec3::UP)
            .unwrap_or_else(|| Mat4::translation(-eye.x(), -eye.y(), -eye.z()))
    }
}
