// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Representation converter: derives the four single-precision encodings of a
//! reference rotation.
//!
//! All arithmetic happens in `f64`; rounding to `f32` is the final step of
//! every conversion so the expected values are what a correct single-precision
//! implementation should produce.
//!
//! The axis-angle and rotation-vector paths classify the same angle with
//! different zero thresholds ([`AXIS_ANGLE_ZERO_THRESHOLD`] and
//! [`ROTATION_VECTOR_ZERO_THRESHOLD`]). Axis-angle divides by the magnitude
//! and needs the wider margin; the rotation vector only scales.

use serde::{Deserialize, Serialize};

use crate::math::{
    self, AngleRegime, AXIS_ANGLE_ZERO_THRESHOLD, ROTATION_VECTOR_ZERO_THRESHOLD,
};
use crate::oracle::ReferenceRotation;
use crate::rotation::{AxisAngle, Quaternion, RotationMatrix, RotationVector};

/// All four expected encodings of one rotation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Expected {
    /// `(w, x, y, z)`.
    pub quaternion: Quaternion,
    /// Unit axis and angle in `[0, 2π)`.
    pub axis_angle: AxisAngle,
    /// Axis scaled by the angle in `[0, 2π)`.
    pub rotation_vector: RotationVector,
    /// Row-major matrix.
    pub matrix: RotationMatrix,
}

/// Regimes chosen by the two angle-bearing conversions, kept for diagnostics.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Regimes {
    /// Branch taken by [`to_axis_angle`].
    pub axis_angle: AngleRegime,
    /// Branch taken by [`to_rotation_vector`].
    pub rotation_vector: AngleRegime,
}

/// Unit quaternion `(w, x, y, z)`, sign as the reference holds it.
pub fn to_quaternion(rotation: &impl ReferenceRotation) -> Quaternion {
    let [w, x, y, z] = rotation.quaternion().map(math::round_f32);
    Quaternion::new(w, x, y, z)
}

/// Unit axis and canonical angle; the zero axis and angle below
/// [`AXIS_ANGLE_ZERO_THRESHOLD`].
pub fn to_axis_angle(rotation: &impl ReferenceRotation) -> AxisAngle {
    axis_angle_with_regime(rotation).0
}

/// Rotation vector with magnitude in `[0, 2π)`, measured after rounding;
/// exactly zero below [`ROTATION_VECTOR_ZERO_THRESHOLD`].
pub fn to_rotation_vector(rotation: &impl ReferenceRotation) -> RotationVector {
    rotation_vector_with_regime(rotation).0
}

/// Row-major orthonormal matrix.
pub fn to_matrix(rotation: &impl ReferenceRotation) -> RotationMatrix {
    RotationMatrix::new(rotation.matrix().map(|row| row.map(math::round_f32)))
}

/// Runs all four conversions.
pub fn expected(rotation: &impl ReferenceRotation) -> (Expected, Regimes) {
    let (axis_angle, aa_regime) = axis_angle_with_regime(rotation);
    let (rotation_vector, rv_regime) = rotation_vector_with_regime(rotation);
    (
        Expected {
            quaternion: to_quaternion(rotation),
            axis_angle,
            rotation_vector,
            matrix: to_matrix(rotation),
        },
        Regimes {
            axis_angle: aa_regime,
            rotation_vector: rv_regime,
        },
    )
}

/// Raw direction and canonical angle of the generating rotation vector.
fn polar(rotation: &impl ReferenceRotation) -> ([f64; 3], f64, f64) {
    let v = rotation.rotation_vector();
    let magnitude = math::norm3(v);
    (v, magnitude, math::canonical_angle(magnitude))
}

fn axis_angle_with_regime(rotation: &impl ReferenceRotation) -> (AxisAngle, AngleRegime) {
    let (v, magnitude, angle) = polar(rotation);
    let regime = if magnitude < AXIS_ANGLE_ZERO_THRESHOLD {
        AngleRegime::DegenerateZero
    } else {
        AngleRegime::classify(angle, AXIS_ANGLE_ZERO_THRESHOLD)
    };
    let angle_f32 = match (regime, math::angle_to_f32(angle)) {
        (AngleRegime::DegenerateZero, _) | (_, None) => {
            return (AxisAngle::zero(), AngleRegime::DegenerateZero)
        }
        (_, Some(a)) => a,
    };
    let axis = v.map(|c| math::round_f32(c / magnitude));
    (AxisAngle::new(axis[0], axis[1], axis[2], angle_f32), regime)
}

fn rotation_vector_with_regime(rotation: &impl ReferenceRotation) -> (RotationVector, AngleRegime) {
    let (v, magnitude, angle) = polar(rotation);
    let regime = if magnitude < ROTATION_VECTOR_ZERO_THRESHOLD {
        AngleRegime::DegenerateZero
    } else {
        AngleRegime::classify(angle, ROTATION_VECTOR_ZERO_THRESHOLD)
    };
    if regime.is_zero() {
        return (RotationVector::zero(), regime);
    }
    let scale = angle / magnitude;
    let [x, y, z] = v.map(|c| math::round_f32(c * scale));
    (RotationVector::new(x, y, z).below_full_turn(), regime)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::oracle::CanonicalRotation;
    use std::f64::consts::{PI, TAU};

    #[test]
    fn identity_is_exactly_zero() {
        let (e, regimes) = expected(&CanonicalRotation::identity());
        assert_eq!(e.quaternion, Quaternion::identity());
        assert_eq!(e.axis_angle, AxisAngle::zero());
        assert_eq!(e.rotation_vector, RotationVector::zero());
        assert_eq!(e.matrix, RotationMatrix::identity());
        assert!(regimes.axis_angle.is_zero() && regimes.rotation_vector.is_zero());
    }

    #[test]
    fn over_range_angle_is_reduced() {
        let r = CanonicalRotation::from_rotation_vector([TAU + PI / 4.0, 0.0, 0.0]).unwrap();
        let aa = to_axis_angle(&r);
        assert_eq!(aa.axis(), [1.0, 0.0, 0.0]);
        assert_eq!(aa.angle(), (PI / 4.0) as f32);
        assert_eq!(to_rotation_vector(&r).to_array(), [(PI / 4.0) as f32, 0.0, 0.0]);
    }

    #[test]
    fn full_turn_in_degrees_reduces_to_zero() {
        let r = CanonicalRotation::from_rotation_vector([360_f64.to_radians(), 0.0, 0.0]).unwrap();
        assert_eq!(to_axis_angle(&r), AxisAngle::zero());
        assert_eq!(to_rotation_vector(&r), RotationVector::zero());
    }

    #[test]
    fn thresholds_split_between_paths() {
        // Below the axis-angle threshold but far above the rotation-vector one.
        let r = CanonicalRotation::from_rotation_vector([1e-7, 0.0, 0.0]).unwrap();
        let (e, regimes) = expected(&r);
        assert_eq!(e.axis_angle, AxisAngle::zero());
        assert_eq!(regimes.axis_angle, AngleRegime::DegenerateZero);
        assert_eq!(regimes.rotation_vector, AngleRegime::Regular);
        assert_eq!(e.rotation_vector.to_array(), [1e-7, 0.0, 0.0]);
    }

    #[test]
    fn half_turn_is_flagged_antipodal() {
        let r = CanonicalRotation::from_rotation_vector([PI, 0.0, 0.0]).unwrap();
        let (e, regimes) = expected(&r);
        assert_eq!(regimes.axis_angle, AngleRegime::AntipodalAtPi);
        assert_eq!(e.rotation_vector.to_array(), [std::f32::consts::PI, 0.0, 0.0]);
    }

    #[test]
    fn off_axis_near_full_turn_norm_stays_below_tau() {
        let mut prng = crate::math::Prng::from_seed_u64(3);
        for _ in 0..20_000 {
            let axis = [
                prng.next_f64() - 0.5,
                prng.next_f64() - 0.5,
                prng.next_f64() - 0.5,
            ];
            let angle = TAU - 3e-7 * prng.next_f64();
            let Ok(r) = CanonicalRotation::from_axis_angle(axis, angle) else {
                continue;
            };
            let v = to_rotation_vector(&r);
            assert!(v.norm() < std::f32::consts::TAU, "{axis:?} {angle}: {v:?}");
        }
    }

    #[test]
    fn angle_just_below_full_turn_is_kept() {
        let r = CanonicalRotation::from_rotation_vector([TAU - 1e-6, 0.0, 0.0]).unwrap();
        let angle = to_axis_angle(&r).angle();
        assert!(f64::from(angle) < TAU && f64::from(angle) > TAU - 1e-5, "{angle}");
    }
}
