use crate::constants::{HOURS_PER_DAY, SOLAR_NOON_HOUR, SUNRISE_HOUR, SUNSET_HOUR};

/// Quadratic brush falloff `1 - d^2` for a normalized distance `d`.
/// Returns 0.0 at and beyond the brush edge.
#[inline]
pub fn quadratic_falloff(d: f32) -> f32 {
    if !(0.0..1.0).contains(&d) {
        return 0.0;
    }
    1.0 - d * d
}

/// Linear falloff `1 - d`, used by one-shot melt events.
#[inline]
pub fn linear_falloff(d: f32) -> f32 {
    if !(0.0..1.0).contains(&d) {
        return 0.0;
    }
    1.0 - d
}

/// Wrap an hour value into [0, 24). Handles negative input.
#[inline]
pub fn wrap_hours(hours: f32) -> f32 {
    if !hours.is_finite() {
        return 0.0;
    }
    let wrapped = hours.rem_euclid(HOURS_PER_DAY);
    // rem_euclid can round up to exactly 24.0 for tiny negative inputs
    if wrapped >= HOURS_PER_DAY {
        0.0
    } else {
        wrapped
    }
}

/// Solar intensity as a triangle over the day: 0.0 before sunrise and
/// after sunset, rising linearly to 1.0 at solar noon.
pub fn solar_intensity(hour: f32) -> f32 {
    if !(SUNRISE_HOUR..=SUNSET_HOUR).contains(&hour) {
        return 0.0;
    }
    let half_day = SOLAR_NOON_HOUR - SUNRISE_HOUR;
    (1.0 - (hour - SOLAR_NOON_HOUR).abs() / half_day).clamp(0.0, 1.0)
}

/// Clamp a scalar to [0, 1], mapping NaN to `fallback`.
#[inline]
pub fn unit_clamp(value: f32, fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Treat NaN and negative inputs as zero.
#[inline]
pub fn non_negative(value: f32) -> f32 {
    if value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Tick length in seconds: NaN, infinite and negative steps become zero.
#[inline]
pub fn step_seconds(dt: f32) -> f32 {
    if dt.is_finite() {
        non_negative(dt)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quadratic_falloff_shape() {
        assert_eq!(quadratic_falloff(0.0), 1.0);
        assert!((quadratic_falloff(0.5) - 0.75).abs() < 1e-6);
        assert_eq!(quadratic_falloff(1.0), 0.0);
        assert_eq!(quadratic_falloff(2.0), 0.0);
        assert_eq!(quadratic_falloff(-0.1), 0.0);
    }

    #[test]
    fn test_linear_falloff_shape() {
        assert_eq!(linear_falloff(0.0), 1.0);
        assert!((linear_falloff(0.25) - 0.75).abs() < 1e-6);
        assert_eq!(linear_falloff(1.0), 0.0);
        assert_eq!(linear_falloff(f32::NAN), 0.0);
    }

    #[test]
    fn test_wrap_hours() {
        assert_eq!(wrap_hours(0.0), 0.0);
        assert_eq!(wrap_hours(23.5), 23.5);
        assert_eq!(wrap_hours(24.0), 0.0);
        assert!((wrap_hours(25.5) - 1.5).abs() < 1e-5);
        assert!((wrap_hours(-1.0) - 23.0).abs() < 1e-5);
        assert_eq!(wrap_hours(f32::INFINITY), 0.0);
        let tiny = wrap_hours(-1.0e-9);
        assert!((0.0..24.0).contains(&tiny), "got {tiny}");
    }

    #[test]
    fn test_solar_intensity_triangle() {
        assert_eq!(solar_intensity(0.0), 0.0);
        assert_eq!(solar_intensity(5.9), 0.0);
        assert_eq!(solar_intensity(6.0), 0.0);
        assert!((solar_intensity(9.0) - 0.5).abs() < 1e-6);
        assert_eq!(solar_intensity(12.0), 1.0);
        assert!((solar_intensity(15.0) - 0.5).abs() < 1e-6);
        assert_eq!(solar_intensity(18.0), 0.0);
        assert_eq!(solar_intensity(21.0), 0.0);
    }

    #[test]
    fn test_unit_clamp_and_non_negative() {
        assert_eq!(unit_clamp(1.5, 0.0), 1.0);
        assert_eq!(unit_clamp(-0.5, 0.0), 0.0);
        assert_eq!(unit_clamp(f32::NAN, 1.0), 1.0);
        assert_eq!(non_negative(-3.0), 0.0);
        assert_eq!(non_negative(f32::NAN), 0.0);
        assert_eq!(non_negative(2.5), 2.5);
        assert_eq!(step_seconds(0.016), 0.016);
        assert_eq!(step_seconds(-0.5), 0.0);
        assert_eq!(step_seconds(f32::NAN), 0.0);
        assert_eq!(step_seconds(f32::INFINITY), 0.0);
    }
}
