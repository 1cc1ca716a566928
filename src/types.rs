// src/types.rs

use nalgebra::DVector;

// --- Core Type Aliases ---
pub type State = DVector<f64>;
pub type Control = DVector<f64>;

/// Normalizes an angle into `[0, 2π)`.
///
/// Every state update passes the heading component through this, so
/// consumers never see a heading outside one revolution no matter how
/// many ticks of yaw rate have accumulated.
pub fn wrap_angle(theta: f64) -> f64 {
    let two_pi = std::f64::consts::TAU;
    let wrapped = theta.rem_euclid(two_pi);
    // rem_euclid can return exactly 2π for tiny negative inputs after rounding.
    if wrapped >= two_pi {
        wrapped - two_pi
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{PI, TAU};

    #[test]
    fn wrap_angle_stays_in_range() {
        for theta in [-10.0 * TAU, -PI, -0.1, 0.0, 0.1, PI, 3.0 * PI, 50.0 * TAU + 1.0] {
            let w = wrap_angle(theta);
            assert!((0.0..TAU).contains(&w), "wrap_angle({theta}) = {w}");
        }
    }

    #[test]
    fn wrap_angle_preserves_direction() {
        assert_relative_eq!(wrap_angle(-PI / 2.0), 3.0 * PI / 2.0, epsilon = 1e-12);
        assert_relative_eq!(wrap_angle(5.0 * PI / 2.0), PI / 2.0, epsilon = 1e-12);
    }
}
