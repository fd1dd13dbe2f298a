//! In-game time of day.

use crate::sky::SunPosition;

/// Hour of the day in `[0, 24)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeOfDay {
    hour: f32,
}

impl TimeOfDay {
    /// Starts the clock at `hour`, wrapped into `[0, 24)`.
    pub fn new(hour: f32) -> Self {
        Self {
            hour: wrap_hour(hour),
        }
    }

    /// Current hour.
    pub fn hour(&self) -> f32 {
        self.hour
    }

    /// Advances by `time_speed * dt * hours_per_second` hours, wrapping both ways.
    pub fn advance(&mut self, dt: f32, time_speed: f32, hours_per_second: f32) {
        self.hour = wrap_hour(self.hour + time_speed * dt * hours_per_second);
    }

    /// Sun position at the current hour.
    pub fn sun(&self, tilt: f32) -> SunPosition {
        SunPosition::from_hour(self.hour, tilt)
    }

    /// Clock face text such as `"07:30"`.
    pub fn format_hour(&self) -> String {
        let total_minutes = (self.hour * 60.0).floor() as u32 % (24 * 60);
        format!("{:02}:{:02}", total_minutes / 60, total_minutes % 60)
    }
}

impl Default for TimeOfDay {
    fn default() -> Self {
        Self::new(12.0)
    }
}

fn wrap_hour(hour: f32) -> f32 {
    let wrapped = hour.rem_euclid(24.0);
    // rem_euclid can round up to exactly 24 for tiny negative inputs
    if wrapped >= 24.0 { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_advances_at_quarter_hour_per_second() {
        let mut clock = TimeOfDay::new(12.0);
        clock.advance(4.0, 1.0, 0.25);
        assert!((clock.hour() - 13.0).abs() < 1e-5);
    }

    #[test]
    fn test_clock_wraps_both_ways() {
        let mut clock = TimeOfDay::new(23.5);
        clock.advance(1.0, 10.0, 0.25);
        assert!((clock.hour() - 2.0).abs() < 1e-4);

        let mut clock = TimeOfDay::new(0.5);
        clock.advance(1.0, -10.0, 0.25);
        assert!((clock.hour() - 22.0).abs() < 1e-4);

        assert_eq!(TimeOfDay::new(-1e-9).hour(), 0.0);
        assert!((TimeOfDay::new(49.0).hour() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_format_hour() {
        assert_eq!(TimeOfDay::new(7.5).format_hour(), "07:30");
        assert_eq!(TimeOfDay::new(0.0).format_hour(), "00:00");
        assert_eq!(TimeOfDay::new(23.99).format_hour(), "23:59");
    }

    #[test]
    fn test_sun_at_noon_is_overhead() {
        let sun = TimeOfDay::default().sun(0.0);
        assert!(sun.zenith.abs() < 1e-4);
    }
}
