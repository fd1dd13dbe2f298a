//! Rain cloud, falling drops and the lake they fill.
//!
//! The cloud starts each round over one of the far cells. The player can pick it
//! up and carry it, and while standing within reach can make it rain. Drops fall
//! under their own acceleration; each one that lands inside the lake raises the
//! water a little. Once the lake passes its flood level the round is over, and
//! during the reset lockout the lake drains back to its starting level.

use super::player::Pose;
use crate::config::RainConfig;
use crate::math::lerp;
use crate::math::vec::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// A single falling drop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Raindrop {
    /// World position
    pub position: [f32; 3],
    /// Downward speed
    pub velocity: f32,
}

/// Cloud, drops and lake level for one round.
#[derive(Debug, Clone, PartialEq)]
pub struct Weather {
    cloud: [f32; 3],
    carried: bool,
    lake_center: [f32; 3],
    lake_level: f32,
    drops: Vec<Raindrop>,
}

impl Weather {
    /// Starts a round with the cloud at `cloud` and an empty lake at `lake_center`.
    pub fn new(cloud: [f32; 3], lake_center: [f32; 3], config: &RainConfig) -> Self {
        Self {
            cloud,
            carried: false,
            lake_center,
            lake_level: config.lake_start_level,
            drops: Vec::new(),
        }
    }

    /// Cloud position.
    pub fn cloud(&self) -> [f32; 3] {
        self.cloud
    }

    /// Moves the cloud.
    pub fn move_cloud(&mut self, position: [f32; 3]) {
        self.cloud = position;
    }

    /// Whether the player is carrying the cloud.
    pub fn is_carried(&self) -> bool {
        self.carried
    }

    /// Height of the water surface.
    pub fn lake_level(&self) -> f32 {
        self.lake_level
    }

    /// Drops still in the air.
    pub fn drops(&self) -> &[Raindrop] {
        &self.drops
    }

    fn cloud_distance(&self, eye: [f32; 3]) -> f32 {
        Vec3::from(eye).distance_to(&Vec3::from(self.cloud))
    }

    /// Picks the cloud up when it is within grabbing distance of `eye`, or lets go of it.
    ///
    /// Returns whether the cloud is carried afterwards.
    pub fn toggle_carry(&mut self, eye: [f32; 3], config: &RainConfig) -> bool {
        if self.carried {
            self.carried = false;
        } else if self.cloud_distance(eye) <= config.grab_distance {
            self.carried = true;
        } else {
            tracing::debug!(distance = self.cloud_distance(eye), "cloud out of reach");
        }
        self.carried
    }

    /// Eases a carried cloud toward a point ahead of and above the player.
    pub fn follow(&mut self, pose: &Pose, config: &RainConfig) {
        if !self.carried {
            return;
        }
        let target = Vec3::from(pose.position)
            + Vec3::from(pose.facing) * config.carry_ahead
            + Vec3::UP * config.carry_height;
        let target: [f32; 3] = target.into();
        for (cloud, goal) in self.cloud.iter_mut().zip(target) {
            *cloud = lerp(*cloud, goal, config.follow_rate);
        }
    }

    /// Releases one drop from a random point under the cloud.
    ///
    /// Returns `false` without raining when `eye` is farther than `rain_reach` from
    /// the cloud.
    pub fn make_rain<R: Rng + ?Sized>(
        &mut self,
        eye: [f32; 3],
        config: &RainConfig,
        rng: &mut R,
    ) -> bool {
        if self.cloud_distance(eye) > config.rain_reach {
            return false;
        }
        // sqrt keeps the drops uniform over the disc
        let radius = rng.gen_range(0.0f32..1.0).sqrt() * config.cloud_radius;
        let angle = rng.gen_range(0.0..TAU);
        let [x, y, z] = self.cloud;
        self.drops.push(Raindrop {
            position: [x + radius * angle.cos(), y, z + radius * angle.sin()],
            velocity: config.drop_speed,
        });
        true
    }

    /// Moves every drop and removes those that hit the water or the ground.
    ///
    /// Returns the number of drops that landed in the lake this update.
    pub fn update(&mut self, dt: f32, config: &RainConfig) -> usize {
        let [lake_x, _, lake_z] = self.lake_center;
        let mut level = self.lake_level;
        let mut landed = 0;

        self.drops.retain_mut(|drop| {
            drop.velocity += config.drop_acceleration * dt;
            drop.position[1] -= drop.velocity * dt;

            let in_lake =
                (drop.position[0] - lake_x).hypot(drop.position[2] - lake_z) <= config.lake_radius;
            if drop.position[1] < level && in_lake {
                landed += 1;
                level += config.level_per_drop;
                false
            } else {
                drop.position[1] >= 0.0
            }
        });

        self.lake_level = level;
        landed
    }

    /// Whether the lake has risen past its flood level.
    pub fn is_flooded(&self, config: &RainConfig) -> bool {
        self.lake_level > config.flood_level
    }

    /// Sets the lake partway between flooded and empty; `progress` runs from 0 to 1.
    pub fn drain(&mut self, progress: f32, config: &RainConfig) {
        let progress = progress.clamp(0.0, 1.0);
        self.lake_level = lerp(config.flood_level, config.lake_start_level, progress);
    }
}
