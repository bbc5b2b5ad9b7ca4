//! Angle conventions shared by the intersection math

use std::f64::consts::PI;

/// Fold a raw arrival angle into the bearing convention used downstream.
///
/// Angles above 180° are reduced by a single 180° subtraction; everything
/// else passes through unchanged. This is not a modulo wrap: inputs outside
/// `(-180, 360]` are not canonicalized.
pub fn normalize_arrival_angle(angle_deg: f64) -> f64 {
    if angle_deg > 180.0 {
        angle_deg - 180.0
    } else {
        angle_deg
    }
}

/// Wrap radians into `[-π, π)`
pub fn wrap_pi(angle_rad: f64) -> f64 {
    (angle_rad + PI).rem_euclid(2.0 * PI) - PI
}

/// Wrap degrees into `[0, 360)`
pub fn wrap_bearing_deg(angle_deg: f64) -> f64 {
    angle_deg.rem_euclid(360.0)
}

/// Clamp into the domain of `asin`/`acos`
#[inline]
pub(crate) fn clamp_unit(value: f64) -> f64 {
    value.clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_above_half_turn() {
        assert_eq!(normalize_arrival_angle(200.0), 20.0);
        assert_eq!(normalize_arrival_angle(360.0), 180.0);
    }

    #[test]
    fn test_normalize_passthrough() {
        assert_eq!(normalize_arrival_angle(90.0), 90.0);
        assert_eq!(normalize_arrival_angle(180.0), 180.0);
        assert_eq!(normalize_arrival_angle(0.0), 0.0);
    }

    #[test]
    fn test_normalize_is_single_fold() {
        // Out-of-contract inputs are not brought into 0..360
        assert_eq!(normalize_arrival_angle(540.0), 360.0);
        assert_eq!(normalize_arrival_angle(-200.0), -200.0);
    }

    #[test]
    fn test_wrap_pi() {
        assert!((wrap_pi(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-12);
        assert!((wrap_pi(-3.0 * PI / 2.0) - PI / 2.0).abs() < 1e-12);
        assert!((wrap_pi(0.25) - 0.25).abs() < 1e-12);
        assert!((wrap_pi(PI) + PI).abs() < 1e-12);
    }

    #[test]
    fn test_wrap_bearing() {
        assert!((wrap_bearing_deg(-10.0) - 350.0).abs() < 1e-12);
        assert!((wrap_bearing_deg(370.0) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_clamp_unit() {
        assert_eq!(clamp_unit(1.0000000002), 1.0);
        assert_eq!(clamp_unit(-1.5), -1.0);
        assert_eq!(clamp_unit(0.3), 0.3);
    }
}
