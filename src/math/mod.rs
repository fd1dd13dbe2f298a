//! Math utilities and types for the maze walker.
//!
//! This module provides the small vector and matrix types used by the navigator and
//! the lighting output, plus scalar helpers shared across the crate. The vector and
//! matrix types are `bytemuck::Pod` so a rendering collaborator can upload them as-is.
//!
//! # Module Organization
//!
//! - [`vec`] module contains vector operations
//! - [`mat`] module contains matrix operations (camera look-at, point transforms)
//! - [`coordinates`] module maps between continuous world positions and maze tiles
//! - Scalar helpers like [`min_abs`] and [`lerp`] are provided at root level

pub mod coordinates;
pub mod mat;
pub mod vec;

/// Clamps `value` symmetrically into `[-max_length, max_length]`.
///
/// The sign of `max_length` is ignored, so `min_abs(x, -3.0)` behaves like
/// `min_abs(x, 3.0)`.
///
/// # Example
/// ```
/// use maze_walker::math::min_abs;
///
/// assert_eq!(min_abs(42.0, 30.0), 30.0);
/// assert_eq!(min_abs(-42.0, 30.0), -30.0);
/// assert_eq!(min_abs(12.5, -30.0), 12.5);
/// ```
pub fn min_abs(value: f32, max_length: f32) -> f32 {
    let limit = max_length.abs();
    value.clamp(-limit, limit)
}

/// Linear interpolation between `x` and `y`.
pub fn lerp(x: f32, y: f32, t: f32) -> f32 {
    (1.0 - t) * x + t * y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_abs_is_symmetric() {
        for value in [-100.0, -3.0, 0.0, 2.5, 31.0] {
            assert_eq!(min_abs(value, 30.0), -min_abs(-value, 30.0));
        }
        assert_eq!(min_abs(0.5, 0.0), 0.0);
    }

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(60.0, 20.0, 0.0), 60.0);
        assert_eq!(lerp(60.0, 20.0, 1.0), 20.0);
        assert_eq!(lerp(0.0, 10.0, 0.25), 2.5);
    }
}
