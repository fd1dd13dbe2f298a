//! Maze Walker - core of a first-person maze walking game
//!
//! Everything here is independent of windowing, rendering and audio. A frontend
//! feeds key state into a [`game::Session`] once per frame and draws from the
//! [`game::FrameOutput`] it gets back.
//!
//! # Modules
//! - `maze/`: grid generation by iterative backtracking and farthest-cell search
//! - `game/`: input, player, collision, navigator, clock and the session driver
//! - `sky/`: Hosek-Wilkie sky radiance and per-frame scene lighting
//! - `math/`: vectors, matrices and maze coordinate transforms
//! - `config`: JSON-loadable session parameters
//! - `benchmarks/`: timing instrumentation

#![warn(missing_docs)]

pub mod benchmarks;
pub mod config;
pub mod game;
pub mod math;
pub mod maze;
pub mod sky;
