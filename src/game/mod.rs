//! Game session management module.
//!
//! This module defines the [`Session`] struct, which owns everything that changes from
//! frame to frame: the maze, the navigator and its player, the time of day, the round
//! state and the rain cloud that serves as the point of interest. A round ends when
//! the lake at the maze center floods, or when the player asks for a new maze.
//!
//! A frontend calls [`Session::frame`] once per frame with the current [`KeyState`]
//! and draws from the returned [`FrameOutput`].

pub mod clock;
pub mod collision;
pub mod keys;
pub mod navigator;
pub mod player;
pub mod rain;

use self::clock::TimeOfDay;
use self::collision::CollisionOutcome;
use self::keys::{GameKey, KeyState};
use self::navigator::{Navigator, find_spawn_tile};
use self::player::Pose;
use self::rain::Weather;
use crate::config::GameConfig;
use crate::math::coordinates::{MazeLayout, TileQuery};
use crate::maze::{Grid, MazeError, farthest_cells, generate, pick_random};
use crate::sky::SceneLighting;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Whether the round is being played or is counting down to a new maze.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoundState {
    /// Normal play.
    Playing,
    /// Input is locked until the maze regenerates.
    Lockout {
        /// Seconds left before regeneration
        remaining: f32,
    },
}

/// Everything a renderer needs after one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutput {
    /// Camera pose
    pub pose: Pose,
    /// Tile under the player
    pub tile: TileQuery,
    /// The player entered a new tile this frame
    pub tile_changed: bool,
    /// Collision handled this frame, if any
    pub collision: Option<CollisionOutcome>,
    /// Sky-derived lighting
    pub lighting: SceneLighting,
    /// World position of the rain cloud
    pub point_of_interest: [f32; 3],
    /// The player is carrying the cloud
    pub cloud_carried: bool,
    /// Height of the lake surface
    pub lake_level: f32,
    /// Drops still falling
    pub raindrops: usize,
    /// Drops that landed in the lake this frame
    pub drops_landed: usize,
    /// A new maze replaced the old one this frame; meshes must be rebuilt
    pub maze_regenerated: bool,
    /// Hour of the day after this frame
    pub hour: f32,
    /// Movement input was locked out this frame
    pub locked: bool,
}

/// Mutable state of one play session.
pub struct Session {
    config: GameConfig,
    rng: StdRng,
    grid: Grid,
    layout: MazeLayout,
    navigator: Navigator,
    clock: TimeOfDay,
    round: RoundState,
    weather: Weather,
    flashlight: bool,
    flashlight_key_down: bool,
    grab_key_down: bool,
    rounds_completed: u32,
}

impl Session {
    /// Generates the first maze, spawns the player and places the rain cloud.
    ///
    /// # Arguments
    /// * `config` - Session parameters
    /// * `seed` - Fixed RNG seed for reproducible mazes, or `None` for entropy
    pub fn new(config: GameConfig, seed: Option<u64>) -> Result<Self, MazeError> {
        let mut rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        let maze = &config.maze;
        let grid = generate(maze.tiles_x, maze.tiles_z, maze.cutout, &mut rng)?;
        let layout = MazeLayout::for_grid(maze.length, &grid);

        let navigator = Navigator::new(config.movement.clone(), spawn_position(&grid, &layout));
        let weather = new_weather(&grid, &layout, &config, &mut rng);
        let clock = TimeOfDay::new(config.clock.start_hour);

        tracing::info!(
            width = grid.width(),
            depth = grid.depth(),
            cloud = ?weather.cloud(),
            "session started"
        );

        Ok(Self {
            config,
            rng,
            grid,
            layout,
            navigator,
            clock,
            round: RoundState::Playing,
            weather,
            flashlight: false,
            flashlight_key_down: false,
            grab_key_down: false,
            rounds_completed: 0,
        })
    }

    /// Advances the session by `dt` seconds.
    ///
    /// In order: the clock, toggles (flashlight, carrying the cloud, reset), the
    /// navigator, the cloud and its rain, the round countdown, and finally the flood
    /// check that may start a new lockout.
    pub fn frame(&mut self, keys: &KeyState, dt: f32) -> FrameOutput {
        let clock_config = &self.config.clock;
        self.clock
            .advance(dt, keys.time_speed(clock_config), clock_config.hours_per_second);

        let flashlight_down = keys.is_pressed(GameKey::ToggleFlashlight);
        if flashlight_down && !self.flashlight_key_down {
            self.toggle_flashlight();
        }
        self.flashlight_key_down = flashlight_down;

        let locked = self.is_locked();
        let grab_down = keys.is_pressed(GameKey::GrabCloud);
        if grab_down && !self.grab_key_down && !locked {
            let eye = self.navigator.player().position;
            let carried = self.weather.toggle_carry(eye, &self.config.rain);
            tracing::debug!(carried, "cloud grab");
        }
        self.grab_key_down = grab_down;

        if keys.is_pressed(GameKey::Reset) {
            self.request_reset();
        }

        let locked = self.is_locked();
        let input = keys.movement_input(locked);
        let report = self.navigator.tick(&self.grid, &self.layout, &input, dt);
        let pose = self.navigator.pose();

        let rain = &self.config.rain;
        self.weather.follow(&pose, rain);
        if keys.is_pressed(GameKey::MakeRain) && !locked {
            self.weather.make_rain(pose.position, rain, &mut self.rng);
        }
        let drops_landed = self.weather.update(dt, rain);

        let maze_regenerated = self.advance_round(dt);
        if self.round == RoundState::Playing && self.weather.is_flooded(&self.config.rain) {
            tracing::info!(level = self.weather.lake_level(), "lake flooded");
            self.request_reset();
        }

        let pose = self.navigator.pose();
        let sun = self.clock.sun(self.config.clock.sun_tilt);
        FrameOutput {
            pose,
            tile: self.tile_for(pose.position),
            tile_changed: report.tile_changed,
            collision: report.collision,
            lighting: SceneLighting::sample(sun, self.flashlight),
            point_of_interest: self.weather.cloud(),
            cloud_carried: self.weather.is_carried(),
            lake_level: self.weather.lake_level(),
            raindrops: self.weather.drops().len(),
            drops_landed,
            maze_regenerated,
            hour: self.clock.hour(),
            locked,
        }
    }

    /// Starts the end-of-round lockout. Ignored while a lockout is running.
    pub fn request_reset(&mut self) {
        if self.round == RoundState::Playing {
            let remaining = self.config.round.reset_lockout_secs;
            tracing::info!(remaining, "round finished, maze resets soon");
            self.round = RoundState::Lockout { remaining };
        }
    }

    /// Flips the flashlight on or off.
    pub fn toggle_flashlight(&mut self) {
        self.flashlight = !self.flashlight;
        tracing::debug!(on = self.flashlight, "flashlight toggled");
    }

    /// Whether the flashlight is on.
    pub fn flashlight(&self) -> bool {
        self.flashlight
    }

    /// Tile coordinate and state at a world position.
    pub fn tile_for(&self, position: [f32; 3]) -> TileQuery {
        self.layout.tile_for(&self.grid, position)
    }

    /// The current maze.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Placement of the maze in the world.
    pub fn layout(&self) -> &MazeLayout {
        &self.layout
    }

    /// The walk controller.
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Current round state.
    pub fn round(&self) -> RoundState {
        self.round
    }

    /// Whether movement input is locked out.
    pub fn is_locked(&self) -> bool {
        matches!(self.round, RoundState::Lockout { .. })
    }

    /// World position of the rain cloud.
    pub fn point_of_interest(&self) -> [f32; 3] {
        self.weather.cloud()
    }

    /// Cloud, drops and lake.
    pub fn weather(&self) -> &Weather {
        &self.weather
    }

    /// Time of day.
    pub fn clock(&self) -> &TimeOfDay {
        &self.clock
    }

    /// Number of mazes regenerated so far.
    pub fn rounds_completed(&self) -> u32 {
        self.rounds_completed
    }

    /// Counts down a running lockout, draining the lake, and regenerates the maze
    /// when it ends.
    fn advance_round(&mut self, dt: f32) -> bool {
        let RoundState::Lockout { remaining } = self.round else {
            return false;
        };
        let remaining = remaining - dt;
        if remaining > 0.0 {
            let total = self.config.round.reset_lockout_secs;
            self.weather.drain(1.0 - remaining / total, &self.config.rain);
            self.round = RoundState::Lockout { remaining };
            return false;
        }

        self.round = RoundState::Playing;
        let maze = &self.config.maze;
        match generate(maze.tiles_x, maze.tiles_z, maze.cutout, &mut self.rng) {
            Ok(grid) => {
                self.layout = MazeLayout::for_grid(maze.length, &grid);
                self.grid = grid;
            }
            Err(e) => {
                tracing::error!("failed to regenerate maze, keeping the old one: {e}");
            }
        }
        self.navigator
            .respawn(spawn_position(&self.grid, &self.layout));
        self.weather = new_weather(&self.grid, &self.layout, &self.config, &mut self.rng);
        self.rounds_completed += 1;
        tracing::info!(round = self.rounds_completed, "maze regenerated");
        true
    }
}

/// World position of the spawn tile, or the maze center if nothing is open.
fn spawn_position(grid: &Grid, layout: &MazeLayout) -> [f32; 3] {
    let tile = find_spawn_tile(grid, layout).unwrap_or_else(|| layout.center_tile());
    layout.tile_to_world(tile, 0.0)
}

/// Fresh weather for a round: an empty lake at the maze center and the cloud over
/// one of the cells farthest from it, lifted to the configured height.
fn new_weather(grid: &Grid, layout: &MazeLayout, config: &GameConfig, rng: &mut StdRng) -> Weather {
    let center = grid.center();
    let candidates = farthest_cells(grid, center.x, center.z, config.round.farthest_candidates);
    let cell = pick_random(&candidates, rng).map_or(center, |found| found.cell);
    let cloud = layout.cell_to_world(cell, config.round.poi_height);
    Weather::new(cloud, layout.cell_to_world(center, 0.0), &config.rain)
}
