//! Angle helpers shared by geometry and direction classification.
//!
//! All angles are radians normalized to `[0, 2π)`. NaN and infinite inputs
//! produce NaN; callers filter those out where it matters.

use std::f64::consts::TAU;

/// Map any angle into `[0, 2π)`. Exact multiples of a full turn map to `0`.
#[inline]
pub fn normalize(angle: f64) -> f64 {
    let turned = angle.abs() % TAU;
    let wrapped = if angle < 0.0 && turned != 0.0 {
        TAU - turned
    } else {
        turned
    };
    // 2π - tiny rounds up to 2π
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Angle of the vector `(dx, dy)` in cartesian orientation, normalized.
///
/// Page coordinates grow downward, so callers invert `dy` before calling.
#[inline]
pub fn vector_angle(dx: f64, dy: f64) -> f64 {
    normalize(dy.atan2(dx))
}
