//! Scene lighting derived from the sky model.
//!
//! Once per frame the sun position is turned into an ambient color (the sky
//! averaged over the dome), a sun color, a light direction and the ambient and
//! flashlight strengths, and packed into a [`SceneLighting`] record ready for a
//! uniform buffer.

use super::model::{
    AMBIENT_EXPOSURE, Rgba, SkyState, expose, horizon_fade, saturate, xyz_to_rgb,
};
use crate::math::vec::Vec3;
use lazy_static::lazy_static;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// Number of view directions averaged for the ambient color.
pub const AMBIENT_SAMPLES: usize = 51;

lazy_static! {
    /// Spiral of `(zenith, azimuth)` view directions covering the upper hemisphere.
    static ref AMBIENT_DIRECTIONS: Vec<(f32, f32)> = (0..AMBIENT_SAMPLES)
        .map(|i| {
            let t = i as f32 / AMBIENT_SAMPLES as f32;
            (t.sqrt() * FRAC_PI_2, 11.0 * TAU * t)
        })
        .collect();
}

fn to_display(xyz: [f32; 3], sun_zenith: f32) -> Rgba {
    let fade = horizon_fade(sun_zenith);
    let [r, g, b] = expose(xyz_to_rgb(xyz), AMBIENT_EXPOSURE).map(|c| saturate(c * fade));
    [r, g, b, 1.0]
}

/// Sky color averaged over the upper hemisphere, used as ambient light.
pub fn average_sky_color(sun_zenith: f32, sun_azimuth: f32) -> Rgba {
    let sky = SkyState::new(sun_zenith, sun_azimuth);
    let weight = 1.0 / AMBIENT_SAMPLES as f32;

    let mut sum = [0.0f32; 3];
    for &(view_zenith, view_azimuth) in AMBIENT_DIRECTIONS.iter() {
        let sample = sky.sample_xyz(view_zenith, view_azimuth);
        for (total, value) in sum.iter_mut().zip(sample) {
            *total += value * weight;
        }
    }
    to_display(sum, sun_zenith)
}

/// Color of direct sunlight: the sky radiance looking straight at the sun.
pub fn sun_color(sun_zenith: f32, sun_azimuth: f32) -> Rgba {
    let sky = SkyState::new(sun_zenith, sun_azimuth);
    let xyz = sky.sample_xyz(sky.sun_zenith(), sun_azimuth);
    to_display(xyz, sun_zenith)
}

/// Sun direction as zenith and azimuth angles in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunPosition {
    /// Angle from straight up; past `π/2` the sun is below the horizon
    pub zenith: f32,
    /// Angle from +x toward +z
    pub azimuth: f32,
}

impl SunPosition {
    /// Sun position for an hour of the day.
    ///
    /// The sun rises on the +x horizon at 06:00, passes overhead at noon, and sets
    /// on the -x horizon at 18:00. `tilt` leans its path toward +z by that many
    /// radians.
    pub fn from_hour(hour: f32, tilt: f32) -> Self {
        let phase = (hour - 6.0) / 24.0 * TAU;
        let (sin_phase, cos_phase) = phase.sin_cos();
        let x = cos_phase;
        let y = sin_phase * tilt.cos();
        let z = sin_phase * tilt.sin();
        Self {
            zenith: y.clamp(-1.0, 1.0).acos(),
            azimuth: z.atan2(x),
        }
    }

    /// Zenith clamped to the visible sky.
    pub fn clamped_zenith(&self) -> f32 {
        self.zenith.clamp(0.0, FRAC_PI_2)
    }

    /// Whether the sun is below the horizon.
    pub fn is_night(&self) -> bool {
        self.zenith > FRAC_PI_2
    }

    /// Position of the directional light, ten units from the origin toward the sun.
    pub fn light_direction(&self) -> Vec3 {
        let (sin_z, cos_z) = self.zenith.sin_cos();
        let (sin_a, cos_a) = self.azimuth.sin_cos();
        Vec3::new(10.0 * sin_z * cos_a, 10.0 * cos_z, 10.0 * sin_z * sin_a)
    }
}

/// Per-frame lighting record laid out for a uniform buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneLighting {
    /// Ambient RGBA from the averaged sky
    pub ambient_color: [f32; 4],
    /// Direct sunlight RGBA
    pub sun_color: [f32; 4],
    /// Light position `(x, y, z, 0)`
    pub sun_direction: [f32; 4],
    /// Ambient term, `0.3 + 0.1·(2z/π)²`
    pub ambient_strength: f32,
    /// Flashlight brightness, `0` when switched off
    pub flashlight_intensity: f32,
    /// Unclamped sun zenith
    pub sun_zenith: f32,
    /// Sun azimuth
    pub sun_azimuth: f32,
}

impl SceneLighting {
    /// Samples the sky for `sun` and derives every lighting term.
    pub fn sample(sun: SunPosition, flashlight: bool) -> Self {
        let direction = sun.light_direction();
        let ambient_strength = 0.3 + 0.1 * (2.0 * sun.zenith / PI).powi(2);
        let flashlight_intensity = if flashlight {
            0.2 + 0.8 * (2.0 * sun.clamped_zenith() / PI).powi(3)
        } else {
            0.0
        };

        let lighting = Self {
            ambient_color: average_sky_color(sun.zenith, sun.azimuth),
            sun_color: sun_color(sun.zenith, sun.azimuth),
            sun_direction: [direction.x(), direction.y(), direction.z(), 0.0],
            ambient_strength,
            flashlight_intensity,
            sun_zenith: sun.zenith,
            sun_azimuth: sun.azimuth,
        };
        tracing::trace!(?lighting, "sampled scene lighting");
        lighting
    }

    /// Raw bytes for upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
