//! Tunable parameters for maze generation, movement, the clock, rounds and rain.
//!
//! Every section implements [`Default`] with the values the walker ships with,
//! and missing fields in a JSON file fall back to those defaults, so a config
//! file only needs to name what it changes:
//!
//! ```json
//! { "maze": { "tiles_x": 12, "cutout": 0 }, "clock": { "start_hour": 18.5 } }
//! ```

use crate::maze::generator::MAX_TILES;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Errors from loading or validating a [`GameConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// The config file is not valid JSON for this schema.
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    /// The maze section holds out-of-range values.
    #[error("invalid maze config: {0}")]
    Maze(String),
    /// The rain section holds out-of-range values.
    #[error("invalid rain config: {0}")]
    Rain(String),
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Maze size and clearing
    pub maze: MazeConfig,
    /// Player movement constants
    pub movement: MovementConfig,
    /// Time of day
    pub clock: ClockConfig,
    /// Reset and point-of-interest settings
    pub round: RoundConfig,
    /// Cloud, drops and lake
    pub rain: RainConfig,
}

impl GameConfig {
    /// Loads a config from a JSON file and validates it.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&text)?;
        config.validate()?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Checks the ranges the maze generator would otherwise reject later.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let maze = &self.maze;
        for (name, value) in [("tiles_x", maze.tiles_x), ("tiles_z", maze.tiles_z)] {
            if !(0..=MAX_TILES).contains(&value) {
                return Err(ConfigError::Maze(format!(
                    "{name} must be between 0 and {MAX_TILES}, got {value}"
                )));
            }
        }
        if maze.cutout < 0 {
            return Err(ConfigError::Maze(format!(
                "cutout must be non-negative, got {}",
                maze.cutout
            )));
        }
        if !(maze.length.is_finite() && maze.length > 0.0) {
            return Err(ConfigError::Maze(format!(
                "length must be positive, got {}",
                maze.length
            )));
        }
        self.rain.validate()
    }
}

/// Maze dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    /// Edge length of the maze floor in world units
    pub length: f32,
    /// Generation cells along x
    pub tiles_x: i32,
    /// Generation cells along z
    pub tiles_z: i32,
    /// Radius of the central clearing, `0` for none
    pub cutout: i32,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            length: 60.0,
            tiles_x: 7,
            tiles_z: 7,
            cutout: 3,
        }
    }
}

/// Walk controller constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Thrust applied while forward or back is held
    pub walk_force: f32,
    /// Torque applied while turning
    pub turning_force: f32,
    /// Maximum ground speed
    pub speed_limit: f32,
    /// Maximum angular speed in radians per second
    pub turn_speed_limit: f32,
    /// Speed multiplier per tick when not walking
    pub speed_decay: f32,
    /// Angular speed multiplier per tick when not turning
    pub angular_decay: f32,
    /// Vertical acceleration
    pub gravity: f32,
    /// Eye height when standing on the floor
    pub min_height: f32,
    /// Upward acceleration applied on the tick a jump starts
    pub jumping_force: f32,
    /// Distance a blocked move is pushed back out of the wall
    pub push_back: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            walk_force: 22.0,
            turning_force: 9.28,
            speed_limit: 30.0,
            turn_speed_limit: 3.0,
            speed_decay: 0.8,
            angular_decay: 0.3,
            gravity: -40.0,
            min_height: 1.5,
            jumping_force: 700.0,
            push_back: 0.05,
        }
    }
}

/// Time of day settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Hour the session starts at
    pub start_hour: f32,
    /// In-game hours per real second at normal speed
    pub hours_per_second: f32,
    /// Time multiplier while fast forwarding
    pub fast_speed: f32,
    /// Time multiplier while rewinding
    pub rewind_speed: f32,
    /// Tilt of the sun's path toward +z, in radians
    pub sun_tilt: f32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            start_hour: 12.0,
            hours_per_second: 0.25,
            fast_speed: 10.0,
            rewind_speed: -10.0,
            sun_tilt: 0.0,
        }
    }
}

/// Round reset settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    /// Seconds input stays locked before the maze regenerates
    pub reset_lockout_secs: f32,
    /// Number of far cells the point of interest is drawn from
    pub farthest_candidates: usize,
    /// Height of the point of interest above the floor
    pub poi_height: f32,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            reset_lockout_secs: 10.0,
            farthest_candidates: 5,
            poi_height: 5.0,
        }
    }
}

/// Cloud, raindrop and lake settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainConfig {
    /// Farthest the player may stand from the cloud and still make it rain
    pub rain_reach: f32,
    /// Farthest the player may stand from the cloud and still pick it up
    pub grab_distance: f32,
    /// Radius of the disc under the cloud that drops fall from
    pub cloud_radius: f32,
    /// Distance ahead of the player a carried cloud settles at
    pub carry_ahead: f32,
    /// Height above the player's eye a carried cloud settles at
    pub carry_height: f32,
    /// Fraction of the remaining gap a carried cloud closes each frame
    pub follow_rate: f32,
    /// Downward speed of a new drop
    pub drop_speed: f32,
    /// Downward acceleration of drops
    pub drop_acceleration: f32,
    /// Radius of the lake around the maze center
    pub lake_radius: f32,
    /// Water level at the start of a round and after draining
    pub lake_start_level: f32,
    /// Rise of the water for each drop that lands in it
    pub level_per_drop: f32,
    /// Water level past which the round ends
    pub flood_level: f32,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            rain_reach: 5.5,
            grab_distance: 5.0,
            cloud_radius: 1.0,
            carry_ahead: 3.0,
            carry_height: 3.0,
            follow_rate: 0.1,
            drop_speed: 7.0,
            drop_acceleration: 7.0 * 9.8,
            lake_radius: 6.0,
            lake_start_level: 0.01,
            level_per_drop: 0.001,
            flood_level: 0.4,
        }
    }
}

impl RainConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.follow_rate > 0.0 && self.follow_rate <= 1.0) {
            return Err(ConfigError::Rain(format!(
                "follow_rate must be in (0, 1], got {}",
                self.follow_rate
            )));
        }
        if !(self.level_per_drop > 0.0) {
            return Err(ConfigError::Rain(format!(
                "level_per_drop must be positive, got {}",
                self.level_per_drop
            )));
        }
        if !(self.flood_level > self.lake_start_level) {
            return Err(ConfigError::Rain(format!(
                "flood_level {} must be above lake_start_level {}",
                self.flood_level, self.lake_start_level
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "maze": { "tiles_x": 12 }, "clock": { "start_hour": 18.5 } }"#)
                .expect("valid json");
        assert_eq!(config.maze.tiles_x, 12);
        assert_eq!(config.maze.tiles_z, 7);
        assert_eq!(config.maze.cutout, 3);
        assert_eq!(config.clock.start_hour, 18.5);
        assert_eq!(config.movement, MovementConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_maze() {
        let mut config = GameConfig::default();
        config.maze.tiles_z = -3;
        assert!(matches!(config.validate(), Err(ConfigError::Maze(_))));

        let mut config = GameConfig::default();
        config.maze.cutout = -1;
        assert!(matches!(config.validate(), Err(ConfigError::Maze(_))));

        let mut config = GameConfig::default();
        config.maze.length = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Maze(_))));
    }

    #[test]
    fn test_validation_rejects_bad_rain() {
        let mut config = GameConfig::default();
        config.rain.flood_level = config.rain.lake_start_level;
        assert!(matches!(config.validate(), Err(ConfigError::Rain(_))));

        let mut config = GameConfig::default();
        config.rain.follow_rate = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Rain(_))));

        let config: GameConfig =
            serde_json::from_str(r#"{ "rain": { "flood_level": 0.2 } }"#).expect("valid json");
        assert_eq!(config.rain.flood_level, 0.2);
        assert_eq!(config.rain.rain_reach, 5.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_loading() {
        let dir = std::env::temp_dir().join(format!("maze-walker-config-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("temp dir");

        let good = dir.join("good.json");
        fs::write(&good, r#"{ "round": { "reset_lockout_secs": 2.5 } }"#).expect("write");
        let config = GameConfig::from_json_file(&good).expect("loads");
        assert_eq!(config.round.reset_lockout_secs, 2.5);

        let broken = dir.join("broken.json");
        fs::write(&broken, "{ not json").expect("write");
        assert!(matches!(
            GameConfig::from_json_file(&broken),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            GameConfig::from_json_file(&dir.join("missing.json")),
            Err(ConfigError::Io(_))
        ));
        let _ = fs::remove_dir_all(&dir);
    }
}
