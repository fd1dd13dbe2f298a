//! Physically based sky colors for the day-night cycle.

pub mod lighting;
pub mod model;
pub mod tables;

pub use lighting::{SceneLighting, SunPosition, average_sky_color, sun_color};
pub use model::{Rgb, Rgba, SkyState, angle, horizon_fade, sample_sky_xyz, sky_color};
