// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Single-precision rotation library: the candidate the catalog verifies.
//!
//! [`Rotation`] stores a unit quaternion and converts to and from the other
//! three encodings. Construction is total: degenerate inputs (zero
//! quaternion, zero axis, zero vector) yield the identity.
//!
//! Angles are extracted as `2·atan2(|v|, w)` evaluated in `f64` and rounded
//! with the same helpers the converter uses, so a near-full turn is treated
//! identically on both sides of a comparison.

use thiserror::Error;

use crate::math::{self, AngleRegime};

mod axis_angle;
mod matrix;
mod quaternion;
mod rotation_vector;

pub use axis_angle::AxisAngle;
pub use matrix::RotationMatrix;
pub use quaternion::Quaternion;
pub use rotation_vector::RotationVector;

/// Rejected user input for a validating constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RotationError {
    /// Axis has zero length and names no direction.
    #[error("rotation axis has zero length")]
    ZeroAxis,
    /// A component was NaN or infinite.
    #[error("rotation component is not finite")]
    NonFinite,
}

/// A 3D rotation backed by a unit quaternion.
///
/// # Examples
/// ```
/// use core::f32::consts::FRAC_PI_2;
/// use rotcheck_core::rotation::{AxisAngle, Rotation};
/// let r = Rotation::from(AxisAngle::new(0.0, 0.0, 1.0, FRAC_PI_2));
/// let m = r.as_rotation_matrix();
/// assert!((m[1][0] - 1.0).abs() < 1e-6);
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rotation {
    quat: Quaternion,
}

impl Rotation {
    /// The identity rotation.
    pub const fn identity() -> Self {
        Self {
            quat: Quaternion::identity(),
        }
    }

    /// Unit quaternion `(w, x, y, z)`; the sign is whatever construction produced.
    pub fn as_quaternion(&self) -> Quaternion {
        self.quat
    }

    /// Axis and angle with the angle in `[0, 2π)`; zero axis for the identity.
    pub fn as_axis_angle(&self) -> AxisAngle {
        match self.unit_axis_and_angle() {
            Some((axis, angle, angle_f32)) => {
                debug_assert!(angle < std::f64::consts::TAU);
                AxisAngle::new(
                    math::round_f32(axis[0]),
                    math::round_f32(axis[1]),
                    math::round_f32(axis[2]),
                    angle_f32,
                )
            }
            None => AxisAngle::zero(),
        }
    }

    /// Axis scaled by the angle in `[0, 2π)`; exactly zero for the identity.
    pub fn as_rotation_vector(&self) -> RotationVector {
        match self.unit_axis_and_angle() {
            Some((axis, angle, _)) => RotationVector::new(
                math::round_f32(axis[0] * angle),
                math::round_f32(axis[1] * angle),
                math::round_f32(axis[2] * angle),
            )
            .below_full_turn(),
            None => RotationVector::zero(),
        }
    }

    /// Row-major orthonormal matrix.
    pub fn as_rotation_matrix(&self) -> RotationMatrix {
        let [w, x, y, z] = self.quat.to_array();

        let xx = x * x;
        let yy = y * y;
        let zz = z * z;
        let xy = x * y;
        let xz = x * z;
        let yz = y * z;
        let wx = w * x;
        let wy = w * y;
        let wz = w * z;

        RotationMatrix::new([
            [1.0 - 2.0 * (yy + zz), 2.0 * (xy - wz), 2.0 * (xz + wy)],
            [2.0 * (xy + wz), 1.0 - 2.0 * (xx + zz), 2.0 * (yz - wx)],
            [2.0 * (xz - wy), 2.0 * (yz + wx), 1.0 - 2.0 * (xx + yy)],
        ])
    }

    /// Unit axis (f64), canonical angle (f64) and its f32 rounding, or `None`
    /// when the rotation is the identity at single precision.
    fn unit_axis_and_angle(&self) -> Option<([f64; 3], f64, f32)> {
        let [w, x, y, z] = self.quat.to_array().map(f64::from);
        let s = math::norm3([x, y, z]);
        if s == 0.0 {
            return None;
        }
        let angle = math::canonical_angle(2.0 * s.atan2(w));
        if AngleRegime::classify(angle, f64::MIN_POSITIVE).is_zero() {
            return None;
        }
        let angle_f32 = math::angle_to_f32(angle)?;
        Some(([x / s, y / s, z / s], angle, angle_f32))
    }

    fn from_axis_and_angle(axis: [f32; 3], angle: f32) -> Self {
        let len = (axis[0] * axis[0] + axis[1] * axis[1] + axis[2] * axis[2]).sqrt();
        if len == 0.0 || angle == 0.0 || !len.is_finite() || !angle.is_finite() {
            return Self::identity();
        }
        let (sin_half, cos_half) = (angle * 0.5).sin_cos();
        let k = sin_half / len;
        Self {
            quat: Quaternion::new(cos_half, axis[0] * k, axis[1] * k, axis[2] * k).normalize(),
        }
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<Quaternion> for Rotation {
    fn from(quat: Quaternion) -> Self {
        Self {
            quat: quat.normalize(),
        }
    }
}

impl From<AxisAngle> for Rotation {
    fn from(axis_angle: AxisAngle) -> Self {
        Self::from_axis_and_angle(axis_angle.axis(), axis_angle.angle())
    }
}

impl From<RotationVector> for Rotation {
    fn from(vector: RotationVector) -> Self {
        // The magnitude doubles as the angle; the axis is normalised inside.
        Self::from_axis_and_angle(vector.to_array(), vector.norm())
    }
}

/// Shepperd's method: branch on the largest of `w², x², y², z²` so the
/// divisor never approaches zero.
impl From<RotationMatrix> for Rotation {
    fn from(matrix: RotationMatrix) -> Self {
        let m = matrix.rows();
        let trace = matrix.trace();

        let quat = if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0; // s = 4*w
            Quaternion::new(
                0.25 * s,
                (m[2][1] - m[1][2]) / s,
                (m[0][2] - m[2][0]) / s,
                (m[1][0] - m[0][1]) / s,
            )
        } else if m[0][0] > m[1][1] && m[0][0] > m[2][2] {
            let s = (1.0 + m[0][0] - m[1][1] - m[2][2]).sqrt() * 2.0; // s = 4*x
            Quaternion::new(
                (m[2][1] - m[1][2]) / s,
                0.25 * s,
                (m[0][1] + m[1][0]) / s,
                (m[0][2] + m[2][0]) / s,
            )
        } else if m[1][1] > m[2][2] {
            let s = (1.0 + m[1][1] - m[0][0] - m[2][2]).sqrt() * 2.0; // s = 4*y
            Quaternion::new(
                (m[0][2] - m[2][0]) / s,
                (m[0][1] + m[1][0]) / s,
                0.25 * s,
                (m[1][2] + m[2][1]) / s,
            )
        } else {
            let s = (1.0 + m[2][2] - m[0][0] - m[1][1]).sqrt() * 2.0; // s = 4*z
            Quaternion::new(
                (m[1][0] - m[0][1]) / s,
                (m[0][2] + m[2][0]) / s,
                (m[1][2] + m[2][1]) / s,
                0.25 * s,
            )
        };

        Self {
            quat: quat.normalize(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use core::f32::consts::{FRAC_PI_2, PI, TAU};

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() <= 1e-6
    }

    #[test]
    fn identity_converts_to_exact_zeros() {
        let r = Rotation::identity();
        assert_eq!(r.as_axis_angle(), AxisAngle::zero());
        assert_eq!(r.as_rotation_vector(), RotationVector::zero());
        assert_eq!(r.as_rotation_matrix(), RotationMatrix::identity());
    }

    #[test]
    fn zero_axis_builds_identity() {
        let r = Rotation::from(AxisAngle::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(r, Rotation::identity());
    }

    #[test]
    fn quarter_turn_about_z_from_matrix() {
        let m = RotationMatrix::new([[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
        let r = Rotation::from(m);
        let q = r.as_quaternion();
        assert!(close(q.w(), core::f32::consts::FRAC_1_SQRT_2));
        assert!(close(q.z(), core::f32::consts::FRAC_1_SQRT_2));
        let aa = r.as_axis_angle();
        assert_eq!(aa.axis(), [0.0, 0.0, 1.0]);
        assert!(close(aa.angle(), FRAC_PI_2));
    }

    #[test]
    fn negative_scalar_keeps_angle_above_pi() {
        let r = Rotation::from(AxisAngle::new(1.0, 0.0, 0.0, 1.5 * PI));
        assert!(r.as_quaternion().w() < 0.0);
        let aa = r.as_axis_angle();
        assert!(close(aa.angle(), 1.5 * PI), "angle {}", aa.angle());
        assert!(close(aa.axis()[0], 1.0));
    }

    #[test]
    fn full_turn_reads_back_as_identity() {
        let r = Rotation::from(Quaternion::new(-1.0, 1.2246469e-16, 0.0, 0.0));
        assert_eq!(r.as_axis_angle(), AxisAngle::zero());
        assert_eq!(r.as_rotation_vector(), RotationVector::zero());
    }

    #[test]
    fn near_full_turn_stays_below_tau() {
        let r = Rotation::from(Quaternion::new(-1.0, 5e-7, 0.0, 0.0));
        let angle = r.as_axis_angle().angle();
        assert!(angle < TAU && angle > TAU - 1e-5, "angle {angle}");
    }

    #[test]
    fn off_axis_near_full_turn_vector_stays_below_tau() {
        let mut prng = crate::math::Prng::from_seed_u64(11);
        for _ in 0..20_000 {
            let axis = [
                prng.next_f64() as f32 - 0.5,
                prng.next_f64() as f32 - 0.5,
                prng.next_f64() as f32 - 0.5,
            ];
            let angle = TAU - 4e-7 * prng.next_f64() as f32;
            let v = Rotation::from(AxisAngle::new(axis[0], axis[1], axis[2], angle))
                .as_rotation_vector();
            assert!(v.norm() < TAU, "{axis:?} {angle}: {v:?}");
        }
    }

    #[test]
    fn matrix_round_trip_matches_quaternion_up_to_sign() {
        let r = Rotation::from(AxisAngle::new(0.0, 1.0, 0.0, 2.5));
        let back = Rotation::from(r.as_rotation_matrix()).as_quaternion();
        let q = r.as_quaternion();
        let same = q.to_array().iter().zip(back.to_array()).all(|(a, b)| (a - b).abs() <= 1e-6);
        let flipped = q.to_array().iter().zip(back.to_array()).all(|(a, b)| (a + b).abs() <= 1e-6);
        assert!(same || flipped, "{q:?} vs {back:?}");
    }
}
