// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scalar helpers shared by the oracle, the converter, and the candidate
//! library: angle canonicalisation, single-precision rounding, and the
//! deterministic pseudo-random generator used by the catalog.
//!
//! Every expected value leaves this crate through [`round_f32`] or
//! [`angle_to_f32`], so rounding policy lives in exactly one place.

use std::f64::consts::TAU;

mod prng;

pub use prng::Prng;

/// Single-precision machine epsilon widened to `f64`.
///
/// Axis-angle conversion divides the raw rotation vector by its magnitude, so
/// it treats anything below this as the zero rotation.
pub const AXIS_ANGLE_ZERO_THRESHOLD: f64 = f32::EPSILON as f64;

/// Magnitude below which a rotation vector is emitted as exactly `(0, 0, 0)`.
///
/// Applied in the `f64` domain before rounding, so it only absorbs noise from
/// the oracle and never a representable single-precision angle.
pub const ROTATION_VECTOR_ZERO_THRESHOLD: f64 = 1e-12;

/// Half-width of the band around `π` classified as [`AngleRegime::AntipodalAtPi`].
pub const ANTIPODAL_BAND: f64 = 1e-9;

/// Degeneracy state of a canonical angle.
///
/// Each conversion classifies its angle once and branches on the result; the
/// zero threshold is a parameter so the axis-angle and rotation-vector paths
/// can be tuned independently.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleRegime {
    /// Angle is zero (or a full turn) at the precision in use; the axis is
    /// undefined and emitted as the zero vector.
    DegenerateZero,
    /// Angle is `π`: `(n, π)` and `(−n, π)` denote the same rotation.
    AntipodalAtPi,
    /// Any other angle; axis and angle are unique.
    Regular,
}

impl AngleRegime {
    /// Classifies a canonical angle in `[0, 2π)`.
    ///
    /// Angles that round to a full turn in `f32` count as degenerate, so the
    /// rounded output can never reach `2π`.
    pub fn classify(angle: f64, zero_threshold: f64) -> Self {
        if angle < zero_threshold || angle_to_f32(angle).is_none() {
            Self::DegenerateZero
        } else if (angle - std::f64::consts::PI).abs() <= ANTIPODAL_BAND {
            Self::AntipodalAtPi
        } else {
            Self::Regular
        }
    }

    /// `true` for [`AngleRegime::DegenerateZero`].
    pub fn is_zero(self) -> bool {
        matches!(self, Self::DegenerateZero)
    }
}

/// Reduces `angle` into `[0, 2π)` with a true (euclidean) modulo.
///
/// Negative inputs wrap upward and over-range inputs wrap down. `rem_euclid`
/// may return exactly `2π` for tiny negative inputs; that case maps to `0`.
pub fn canonical_angle(angle: f64) -> f64 {
    let reduced = angle.rem_euclid(TAU);
    if reduced >= TAU {
        0.0
    } else {
        reduced
    }
}

/// Rounds to `f32` and canonicalises `-0.0` to `+0.0`.
pub fn round_f32(value: f64) -> f32 {
    canonicalize_zero(value as f32)
}

/// Rounds a canonical angle to `f32`.
///
/// Returns `None` when the nearest `f32` is `TAU` itself: at single precision
/// that angle is a full turn and the caller must treat it as the identity.
pub fn angle_to_f32(angle: f64) -> Option<f32> {
    let rounded = round_f32(angle);
    if rounded >= std::f32::consts::TAU {
        None
    } else {
        Some(rounded)
    }
}

/// Canonicalizes signed zero (`-0.0`) to `+0.0` without affecting non-zero values.
#[inline]
pub fn canonicalize_zero(value: f32) -> f32 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

/// Converts degrees to radians in `f64`.
pub fn deg_to_rad(value: f64) -> f64 {
    value.to_radians()
}

/// Euclidean norm of a 3-vector.
pub fn norm3(v: [f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn canonical_angle_wraps_negative_and_over_range() {
        assert!((canonical_angle(-PI / 2.0) - 1.5 * PI).abs() < 1e-12);
        assert!((canonical_angle(TAU + PI / 4.0) - PI / 4.0).abs() < 1e-12);
        assert_eq!(canonical_angle(TAU), 0.0);
        assert_eq!(canonical_angle(-1e-300), 0.0);
    }

    #[test]
    fn angle_just_below_full_turn_survives_rounding() {
        let a = angle_to_f32(TAU - 1e-6);
        assert!(matches!(a, Some(v) if v < std::f32::consts::TAU));
    }

    #[test]
    fn angle_rounding_onto_tau_is_a_full_turn() {
        assert_eq!(angle_to_f32(TAU - 1e-9), None);
        assert_eq!(
            AngleRegime::classify(TAU - 1e-9, ROTATION_VECTOR_ZERO_THRESHOLD),
            AngleRegime::DegenerateZero
        );
    }

    #[test]
    fn thresholds_are_independent() {
        let angle = 1e-9;
        assert!(AngleRegime::classify(angle, AXIS_ANGLE_ZERO_THRESHOLD).is_zero());
        assert_eq!(
            AngleRegime::classify(angle, ROTATION_VECTOR_ZERO_THRESHOLD),
            AngleRegime::Regular
        );
    }

    #[test]
    fn pi_is_antipodal() {
        assert_eq!(
            AngleRegime::classify(PI, AXIS_ANGLE_ZERO_THRESHOLD),
            AngleRegime::AntipodalAtPi
        );
    }

    #[test]
    fn round_f32_drops_negative_zero() {
        assert_eq!(round_f32(-0.0).to_bits(), 0.0_f32.to_bits());
        assert_eq!(round_f32(-1e-60).to_bits(), 0.0_f32.to_bits());
    }
}
