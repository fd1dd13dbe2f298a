//! Keyboard input handling for the walker.
//!
//! This module defines the [`GameKey`] enum for abstracting actions from physical keys,
//! and provides [`KeyState`] for tracking pressed keys. Each frame the key state is
//! reduced to an explicit [`MoveInput`] that the navigator consumes, so the navigator
//! never depends on how or where input events arrive.

use crate::config::ClockConfig;
use std::collections::HashSet;
use std::ops::BitOr;

/// Enum representing all actions that can be triggered from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKey {
    /// Walk forward (W).
    Forward,
    /// Walk backward (S).
    Back,
    /// Turn left (A).
    TurnLeft,
    /// Turn right (D).
    TurnRight,
    /// Jump (Space).
    Jump,
    /// Run the clock backward while held (Z).
    RewindTime,
    /// Run the clock forward quickly while held (X).
    FastForwardTime,
    /// Toggle the flashlight (F).
    ToggleFlashlight,
    /// Rain from the cloud while held, when close enough to it (R).
    MakeRain,
    /// Pick up or put down the cloud (E).
    GrabCloud,
    /// Give up on the round and start a new maze (N).
    Reset,
}

macro_rules! match_char_key {
    ($c:expr, {
        $($key:literal => $variant:expr),* $(,)?
    }) => {{
        match $c.to_ascii_lowercase().as_str() {
            $($key => Some($variant),)*
            _ => None,
        }
    }};
}

impl GameKey {
    /// Maps a key name to an action, ignoring case.
    ///
    /// # Arguments
    /// * `key` - A single character such as `"w"`, or `"space"` / `" "` for the jump key.
    ///
    /// # Returns
    /// The mapped action, or `None` for unbound keys.
    pub fn from_key_name(key: &str) -> Option<Self> {
        match_char_key!(key, {
            "w" => GameKey::Forward,
            "s" => GameKey::Back,
            "a" => GameKey::TurnLeft,
            "d" => GameKey::TurnRight,
            " " => GameKey::Jump,
            "space" => GameKey::Jump,
            "z" => GameKey::RewindTime,
            "x" => GameKey::FastForwardTime,
            "f" => GameKey::ToggleFlashlight,
            "r" => GameKey::MakeRain,
            "e" => GameKey::GrabCloud,
            "n" => GameKey::Reset,
        })
    }
}

/// Cardinal direction bit set: `N` forward, `W` turn left, `S` back, `E` turn right.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DirectionFlags(u8);

impl DirectionFlags {
    /// No direction held.
    pub const NONE: Self = Self(0);
    /// Forward.
    pub const N: Self = Self(1);
    /// Turn left.
    pub const W: Self = Self(2);
    /// Back.
    pub const S: Self = Self(4);
    /// Turn right.
    pub const E: Self = Self(8);
    /// Every direction.
    pub const ALL: Self = Self(15);

    /// Raw bit value.
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Builds flags from raw bits, dropping unknown ones.
    pub fn from_bits(bits: u8) -> Self {
        Self(bits & Self::ALL.0)
    }

    /// Whether every bit of `other` is set.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Sets the bits of `other`.
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Clears the bits of `other`.
    pub fn remove(&mut self, other: Self) {
        self.0 &= Self::ALL.0 ^ other.0;
    }

    /// Whether no bit is set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for DirectionFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Movement request for one navigator tick.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MoveInput {
    /// Held directions
    pub directions: DirectionFlags,
    /// Jump requested this tick
    pub jump: bool,
    /// Input is locked out; no thrust, torque or jump is applied
    pub locked: bool,
}

impl MoveInput {
    /// Input with the given directions and nothing else.
    pub fn with_directions(directions: DirectionFlags) -> Self {
        Self {
            directions,
            ..Self::default()
        }
    }

    /// Forward or back is held and input is not locked.
    pub fn thrusting(&self) -> bool {
        !self.locked
            && (self.directions.contains(DirectionFlags::N)
                || self.directions.contains(DirectionFlags::S))
    }

    /// Left or right is held and input is not locked.
    pub fn turning(&self) -> bool {
        !self.locked
            && (self.directions.contains(DirectionFlags::W)
                || self.directions.contains(DirectionFlags::E))
    }
}

/// Tracks the set of currently pressed game keys.
///
/// Use [`KeyState::press_key`] and [`KeyState::release_key`] to update the state, and
/// [`KeyState::is_pressed`] to query.
#[derive(Debug, Default, Clone)]
pub struct KeyState {
    /// Set of currently pressed keys.
    pub pressed_keys: HashSet<GameKey>,
}

impl KeyState {
    /// Creates a new, empty [`KeyState`]
    pub fn new() -> Self {
        Self {
            pressed_keys: HashSet::new(),
        }
    }

    /// Marks a key as pressed.
    pub fn press_key(&mut self, key: GameKey) {
        self.pressed_keys.insert(key);
    }

    /// Marks a key as released.
    pub fn release_key(&mut self, key: GameKey) {
        self.pressed_keys.remove(&key);
    }

    /// Checks if a key is currently pressed.
    pub fn is_pressed(&self, key: GameKey) -> bool {
        self.pressed_keys.contains(&key)
    }

    /// Releases every key.
    pub fn clear(&mut self) {
        self.pressed_keys.clear();
    }

    /// Builds the navigator input from the pressed movement keys.
    pub fn movement_input(&self, locked: bool) -> MoveInput {
        let mut directions = DirectionFlags::NONE;
        for (key, flag) in [
            (GameKey::Forward, DirectionFlags::N),
            (GameKey::TurnLeft, DirectionFlags::W),
            (GameKey::Back, DirectionFlags::S),
            (GameKey::TurnRight, DirectionFlags::E),
        ] {
            if self.is_pressed(key) {
                directions.insert(flag);
            }
        }
        MoveInput {
            directions,
            jump: self.is_pressed(GameKey::Jump),
            locked,
        }
    }

    /// Clock multiplier for the held time keys.
    ///
    /// Rewind wins when both time keys are held.
    pub fn time_speed(&self, clock: &ClockConfig) -> f32 {
        if self.is_pressed(GameKey::RewindTime) {
            clock.rewind_speed
        } else if self.is_pressed(GameKey::FastForwardTime) {
            clock.fast_speed
        } else {
            1.0
        }
    }
}
