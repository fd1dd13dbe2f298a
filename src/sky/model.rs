//! Analytic Hosek-Wilkie sky radiance.
//!
//! The model evaluates sky radiance in CIE XYZ for a view direction given the sun
//! direction, both as `(zenith, azimuth)` pairs in radians. Zenith `0` is straight
//! up and `π/2` is the horizon; azimuth starts on +x and turns toward +z.
//!
//! Nine distribution parameters per channel are interpolated from the fitted
//! tables in [`super::tables`] with a quintic Bézier in the sun elevation, then fed
//! into the radiance distribution [`radiance_distribution`].

use super::tables::{COEFFS_X, COEFFS_Y, COEFFS_Z, RADIANCE_X, RADIANCE_Y, RADIANCE_Z};
use std::f32::consts::FRAC_PI_2;

/// Atmospheric turbidity the tables were fitted for.
pub const TURBIDITY: f32 = 3.0;
/// Ground albedo the tables were fitted for.
pub const ALBEDO: f32 = 1.0;
/// Exposure for direct sky lookups.
pub const VIEW_EXPOSURE: f32 = 0.1;
/// Exposure for the averaged ambient color.
pub const AMBIENT_EXPOSURE: f32 = 0.08;

/// Linear RGB color.
pub type Rgb = [f32; 3];
/// Linear RGB color with alpha.
pub type Rgba = [f32; 4];

/// Evaluates a quintic Bézier curve with six control points at `t` in `[0, 1]`.
pub fn eval_quintic_bezier(control_points: &[f32; 6], t: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;
    let t_inv = 1.0 - t;
    let t_inv2 = t_inv * t_inv;
    let t_inv3 = t_inv2 * t_inv;
    let t_inv4 = t_inv3 * t_inv;
    let t_inv5 = t_inv4 * t_inv;

    control_points[0] * t_inv5
        + control_points[1] * 5.0 * t * t_inv4
        + control_points[2] * 10.0 * t2 * t_inv3
        + control_points[3] * 10.0 * t3 * t_inv2
        + control_points[4] * 5.0 * t4 * t_inv
        + control_points[5] * t5
}

/// Maps a sun zenith to the Bézier parameter `(elevation / (π/2))^(1/3)`.
///
/// Zeniths below the horizon map to `0`.
pub fn transform_sun_zenith(sun_zenith: f32) -> f32 {
    let elevation = FRAC_PI_2 - sun_zenith;
    (elevation / FRAC_PI_2).clamp(0.0, 1.0).powf(1.0 / 3.0)
}

/// Angle between two directions given as `(zenith, azimuth)` pairs.
pub fn angle(z1: f32, a1: f32, z2: f32, a2: f32) -> f32 {
    let dot = z1.sin() * a1.cos() * z2.sin() * a2.cos()
        + z1.sin() * a1.sin() * z2.sin() * a2.sin()
        + z1.cos() * z2.cos();
    dot.clamp(-1.0, 1.0).acos()
}

/// The Hosek-Wilkie radiance distribution `F(θ, γ)`.
///
/// # Arguments
/// * `theta` - View zenith
/// * `gamma` - Angle between the view and the sun
/// * `coeffs` - Distribution parameters `A..I`; `H` is stored at index 8 and `I` at index 7
pub fn radiance_distribution(theta: f32, gamma: f32, coeffs: &[f32; 9]) -> f32 {
    let [a, b, c, d, e, f, g, i, h] = *coeffs;
    let cos_gamma = gamma.cos();
    let cos_theta = theta.cos();

    let chi = (1.0 + cos_gamma * cos_gamma) / (1.0 + h * h - 2.0 * h * cos_gamma).powf(1.5);
    (1.0 + a * (b / (cos_theta + 0.01)).exp())
        * (c + d * (e * gamma).exp()
            + f * cos_gamma * cos_gamma
            + g * chi
            + i * cos_theta.max(0.0).sqrt())
}

fn control_points(table: &[f32; 54], parameter: usize) -> [f32; 6] {
    std::array::from_fn(|point| table[9 * point + parameter])
}

fn channel_coeffs(table: &[f32; 54], t: f32) -> [f32; 9] {
    std::array::from_fn(|parameter| eval_quintic_bezier(&control_points(table, parameter), t))
}

/// Model parameters for one sun position.
///
/// Building the state interpolates the distribution parameters once so many view
/// directions can be sampled cheaply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyState {
    sun_zenith: f32,
    sun_azimuth: f32,
    coeffs: [[f32; 9]; 3],
    mean_radiance: [f32; 3],
}

impl SkyState {
    /// Prepares the model for a sun at `(sun_zenith, sun_azimuth)`.
    ///
    /// The zenith is clamped to `[0, π/2]`; callers fade the result for a sun
    /// below the horizon with [`horizon_fade`].
    pub fn new(sun_zenith: f32, sun_azimuth: f32) -> Self {
        let sun_zenith = sun_zenith.clamp(0.0, FRAC_PI_2);
        let t = transform_sun_zenith(sun_zenith);
        Self {
            sun_zenith,
            sun_azimuth,
            coeffs: [
                channel_coeffs(&COEFFS_X, t),
                channel_coeffs(&COEFFS_Y, t),
                channel_coeffs(&COEFFS_Z, t),
            ],
            mean_radiance: [
                eval_quintic_bezier(&RADIANCE_X, t),
                eval_quintic_bezier(&RADIANCE_Y, t),
                eval_quintic_bezier(&RADIANCE_Z, t),
            ],
        }
    }

    /// The clamped sun zenith the state was built for.
    pub fn sun_zenith(&self) -> f32 {
        self.sun_zenith
    }

    /// Mean spectral radiance per CIE channel.
    pub fn mean_radiance(&self) -> [f32; 3] {
        self.mean_radiance
    }

    /// Sky radiance in CIE XYZ seen along `(view_zenith, view_azimuth)`.
    pub fn sample_xyz(&self, view_zenith: f32, view_azimuth: f32) -> [f32; 3] {
        let gamma = angle(view_zenith, view_azimuth, self.sun_zenith, self.sun_azimuth);
        std::array::from_fn(|channel| {
            radiance_distribution(view_zenith, gamma, &self.coeffs[channel])
                * self.mean_radiance[channel]
        })
    }
}

/// Sky radiance in CIE XYZ for one view and sun direction.
pub fn sample_sky_xyz(view_zenith: f32, view_azimuth: f32, sun_zenith: f32, sun_azimuth: f32) -> [f32; 3] {
    SkyState::new(sun_zenith, sun_azimuth).sample_xyz(view_zenith, view_azimuth)
}

/// Converts CIE XYZ to linear sRGB primaries.
pub fn xyz_to_rgb(xyz: [f32; 3]) -> Rgb {
    const XYZ_TO_LINEAR: [[f32; 3]; 3] = [
        [3.24096994, -1.53738318, -0.49861076],
        [-0.96924364, 1.8759675, 0.04155506],
        [0.55630080, -0.20397696, 1.05697151],
    ];
    XYZ_TO_LINEAR.map(|row| row[0] * xyz[0] + row[1] * xyz[1] + row[2] * xyz[2])
}

/// Smoothly maps each channel from `[0, ∞)` into `[0, 1)` with `2 / (1 + e^(-k·c)) - 1`.
pub fn expose(color: Rgb, exposure: f32) -> Rgb {
    color.map(|c| 2.0 / (1.0 + (-exposure * c).exp()) - 1.0)
}

/// Brightness multiplier for a sun `sun_zenith` radians from straight up.
///
/// `1` while the sun is above the horizon, then `1 / (10·(z - π/2) + 1)`.
pub fn horizon_fade(sun_zenith: f32) -> f32 {
    if sun_zenith <= FRAC_PI_2 {
        1.0
    } else {
        1.0 / (10.0 * (sun_zenith - FRAC_PI_2) + 1.0)
    }
}

/// Replaces NaN and infinities with `0` and clamps to `[0, 1]`.
pub(crate) fn saturate(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Displayable sky color seen along a view direction.
///
/// # Arguments
/// * `view_zenith`, `view_azimuth` - Direction being looked at
/// * `sun_zenith`, `sun_azimuth` - Sun direction; zeniths past the horizon fade to black
///
/// # Returns
/// Linear RGB with every channel in `[0, 1]`.
pub fn sky_color(view_zenith: f32, view_azimuth: f32, sun_zenith: f32, sun_azimuth: f32) -> Rgb {
    let xyz = sample_sky_xyz(view_zenith, view_azimuth, sun_zenith, sun_azimuth);
    let fade = horizon_fade(sun_zenith);
    expose(xyz_to_rgb(xyz), VIEW_EXPOSURE).map(|c| saturate(c * fade))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_bezier_endpoints_and_constant_curve() {
        let points = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        assert_eq!(eval_quintic_bezier(&points, 0.0), 1.0);
        assert_eq!(eval_quintic_bezier(&points, 1.0), 6.0);
        assert!((eval_quintic_bezier(&[2.5; 6], 0.37) - 2.5).abs() < 1e-5);
        // Evenly spaced control points give a straight line
        assert!((eval_quintic_bezier(&points, 0.5) - 3.5).abs() < 1e-5);
    }

    #[test]
    fn test_transform_sun_zenith() {
        assert!((transform_sun_zenith(0.0) - 1.0).abs() < 1e-6);
        assert_eq!(transform_sun_zenith(FRAC_PI_2), 0.0);
        assert_eq!(transform_sun_zenith(PI), 0.0);
        assert!((transform_sun_zenith(FRAC_PI_2 * (1.0 - 0.125)) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_angle_is_clamped() {
        for &(z, a) in &[(0.3, 1.1), (1.2, -2.0), (FRAC_PI_2, 0.0), (0.0, 0.0)] {
            let same = angle(z, a, z, a);
            assert!(same.is_finite());
            assert!(same.abs() < 1e-3);
        }
        assert!((angle(0.0, 0.0, PI, 0.0) - PI).abs() < 1e-3);
        assert!((angle(FRAC_PI_2, 0.0, FRAC_PI_2, FRAC_PI_2) - FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_distribution_parameter_order() {
        // With only I set, F reduces to I * sqrt(cos θ)
        let mut coeffs = [0.0; 9];
        coeffs[7] = 2.0;
        assert!((radiance_distribution(0.0, 0.5, &coeffs) - 2.0).abs() < 1e-6);
        // The horizon must not produce NaN from a slightly negative cosine
        assert!(radiance_distribution(FRAC_PI_2, 0.5, &coeffs).is_finite());
    }

    #[test]
    fn test_zenith_sun_is_symmetric_in_azimuth() {
        for &view_zenith in &[0.2, 0.7, 1.3] {
            let reference = sky_color(view_zenith, 0.0, 0.0, 0.0);
            for &view_azimuth in &[0.9, 2.5, 4.0, 5.8] {
                let color = sky_color(view_zenith, view_azimuth, 0.0, 1.7);
                for channel in 0..3 {
                    assert!((color[channel] - reference[channel]).abs() < 1e-4);
                }
            }
        }
    }

    #[test]
    fn test_horizon_fade_is_monotonic() {
        assert_eq!(horizon_fade(0.0), 1.0);
        assert_eq!(horizon_fade(FRAC_PI_2), 1.0);
        let mut previous = 1.0;
        for step in 1..=20 {
            let fade = horizon_fade(FRAC_PI_2 + step as f32 * 0.08);
            assert!(fade < previous);
            assert!(fade > 0.0);
            previous = fade;
        }
    }

    #[test]
    fn test_sky_color_stays_in_range() {
        for sun_step in 0..=16 {
            let sun_zenith = sun_step as f32 * PI / 16.0;
            for view_step in 0..=8 {
                let view_zenith = view_step as f32 * FRAC_PI_2 / 8.0;
                let color = sky_color(view_zenith, 0.6, sun_zenith, 2.1);
                for c in color {
                    assert!((0.0..=1.0).contains(&c), "{c} out of range at sun {sun_zenith}");
                }
            }
        }
    }

    #[test]
    fn test_night_sky_is_darker() {
        let day = sky_color(0.8, 0.0, FRAC_PI_2, 0.0);
        let night = sky_color(0.8, 0.0, PI, 0.0);
        for channel in 0..3 {
            assert!(night[channel] <= day[channel]);
        }
    }

    #[test]
    fn test_sky_dims_as_the_sun_sets() {
        use crate::sky::lighting::average_sky_color;

        let brightness = |sun_zenith: f32| {
            let view: f32 = sky_color(0.5, 0.0, sun_zenith, 0.0).iter().sum();
            let ambient: f32 = average_sky_color(sun_zenith, 0.0)[..3].iter().sum();
            (view, ambient)
        };
        let (mut view, mut ambient) = brightness(FRAC_PI_2);
        assert!(view > 0.0 && ambient > 0.0);
        for step in 1..=20 {
            let sun_zenith = FRAC_PI_2 + step as f32 * 0.05;
            let (next_view, next_ambient) = brightness(sun_zenith);
            assert!(next_view <= view + 1e-6, "view brightened at {sun_zenith}");
            assert!(next_ambient <= ambient + 1e-6, "ambient brightened at {sun_zenith}");
            view = next_view;
            ambient = next_ambient;
        }
        assert!(view < brightness(FRAC_PI_2).0);
    }

    #[test]
    fn test_expose() {
        assert_eq!(expose([0.0; 3], 0.1), [0.0; 3]);
        let bright = expose([1000.0; 3], 0.1);
        assert!(bright.iter().all(|&c| c > 0.99 && c <= 1.0));
    }
}
