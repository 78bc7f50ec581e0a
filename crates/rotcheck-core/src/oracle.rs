// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Canonical rotation source: double-precision ground truth backed by
//! `nalgebra`.
//!
//! The converter only sees the narrow [`ReferenceRotation`] interface, so any
//! independently verified rotation library can stand in for
//! [`CanonicalRotation`].
//!
//! A canonical rotation keeps two things: the unit quaternion exactly as
//! constructed (no sign canonicalisation) and the *generating* rotation
//! vector. Axis/angle and rotation-vector constructors remember their input
//! verbatim, unreduced, so the converter can apply its own modulo; every
//! other constructor derives the generating vector from the quaternion.

use nalgebra::{Matrix3, Quaternion, Rotation3, Unit, UnitQuaternion, Vector3};
use thiserror::Error;

use crate::math::{self, Prng};

/// Maximum deviation from orthonormality accepted by [`CanonicalRotation::from_matrix`].
pub const ORTHONORMAL_TOLERANCE: f64 = 1e-9;

/// Ground-truth access used by the converter.
pub trait ReferenceRotation {
    /// Unit quaternion as `[w, x, y, z]`.
    fn quaternion(&self) -> [f64; 4];

    /// Generating rotation vector; its magnitude may lie outside `[0, 2π)`.
    fn rotation_vector(&self) -> [f64; 3];

    /// Row-major orthonormal matrix.
    fn matrix(&self) -> [[f64; 3]; 3];
}

/// Malformed input to the canonical source.
///
/// Catalog entries are trusted, so any of these is a defect in the catalog
/// definition and aborts generation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SourceError {
    /// Quaternion with zero norm.
    #[error("quaternion has zero norm")]
    ZeroQuaternion,
    /// Axis with zero length.
    #[error("rotation axis has zero length")]
    ZeroAxis,
    /// NaN or infinite component.
    #[error("non-finite component in {0}")]
    NonFinite(&'static str),
    /// Matrix is not a proper rotation.
    #[error("matrix is not orthonormal with det +1 (deviation {deviation:e}, det {determinant})")]
    NotOrthonormal {
        /// Frobenius norm of `MᵀM − I`.
        deviation: f64,
        /// Determinant of the input.
        determinant: f64,
    },
}

/// A ground-truth rotation in `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRotation {
    quaternion: UnitQuaternion<f64>,
    generator: Vector3<f64>,
}

impl CanonicalRotation {
    /// The zero rotation.
    pub fn identity() -> Self {
        Self {
            quaternion: UnitQuaternion::identity(),
            generator: Vector3::zeros(),
        }
    }

    /// Rotation of `angle` radians about `axis`. The axis is normalised; the
    /// angle is kept unreduced.
    pub fn from_axis_angle(axis: [f64; 3], angle: f64) -> Result<Self, SourceError> {
        ensure_finite("axis-angle", &[axis[0], axis[1], axis[2], angle])?;
        let axis = Vector3::from(axis);
        if axis.norm() == 0.0 {
            return Err(SourceError::ZeroAxis);
        }
        let unit = Unit::new_normalize(axis);
        Ok(Self {
            quaternion: UnitQuaternion::from_axis_angle(&unit, angle),
            generator: unit.into_inner() * angle,
        })
    }

    /// Rotation whose axis is `v / |v|` and angle is `|v|`.
    pub fn from_rotation_vector(v: [f64; 3]) -> Result<Self, SourceError> {
        ensure_finite("rotation vector", &v)?;
        let v = Vector3::from(v);
        Ok(Self {
            quaternion: UnitQuaternion::from_scaled_axis(v),
            generator: v,
        })
    }

    /// Rotation from quaternion components `(w, x, y, z)`; normalised, sign kept.
    pub fn from_quaternion(w: f64, x: f64, y: f64, z: f64) -> Result<Self, SourceError> {
        ensure_finite("quaternion", &[w, x, y, z])?;
        let q = Quaternion::new(w, x, y, z);
        if q.norm() == 0.0 {
            return Err(SourceError::ZeroQuaternion);
        }
        Ok(Self::from_unit(UnitQuaternion::from_quaternion(q)))
    }

    /// Rotation from a row-major matrix, which must be orthonormal with det +1.
    pub fn from_matrix(rows: [[f64; 3]; 3]) -> Result<Self, SourceError> {
        ensure_finite("matrix", &rows.concat())?;
        let m = Matrix3::from_fn(|i, j| rows[i][j]);
        let deviation = (m.transpose() * m - Matrix3::identity()).norm();
        let determinant = m.determinant();
        if deviation > ORTHONORMAL_TOLERANCE || (determinant - 1.0).abs() > ORTHONORMAL_TOLERANCE {
            return Err(SourceError::NotOrthonormal {
                deviation,
                determinant,
            });
        }
        let rotation = Rotation3::from_matrix_unchecked(m);
        Ok(Self::from_unit(UnitQuaternion::from_rotation_matrix(&rotation)))
    }

    /// Extrinsic `x`, then `y`, then `z` rotation (`R = Rz·Ry·Rx`), radians.
    pub fn from_euler_xyz(roll: f64, pitch: f64, yaw: f64) -> Result<Self, SourceError> {
        ensure_finite("euler angles", &[roll, pitch, yaw])?;
        Ok(Self::from_unit(UnitQuaternion::from_euler_angles(
            roll, pitch, yaw,
        )))
    }

    /// [`CanonicalRotation::from_euler_xyz`] with angles in degrees.
    pub fn from_euler_xyz_degrees(roll: f64, pitch: f64, yaw: f64) -> Result<Self, SourceError> {
        Self::from_euler_xyz(
            math::deg_to_rad(roll),
            math::deg_to_rad(pitch),
            math::deg_to_rad(yaw),
        )
    }

    /// Uniformly distributed rotation (Shoemake's subgroup algorithm).
    ///
    /// Consumes exactly three draws from `prng`.
    pub fn random(prng: &mut Prng) -> Self {
        use std::f64::consts::TAU;

        let u1 = prng.next_f64();
        let u2 = prng.next_f64();
        let u3 = prng.next_f64();
        let a = (1.0 - u1).sqrt();
        let b = u1.sqrt();
        let (s2, c2) = (TAU * u2).sin_cos();
        let (s3, c3) = (TAU * u3).sin_cos();
        let q = Quaternion::new(b * c3, a * s2, a * c2, b * s3);
        Self::from_unit(UnitQuaternion::from_quaternion(q))
    }

    fn from_unit(quaternion: UnitQuaternion<f64>) -> Self {
        let imag = quaternion.imag();
        let s = imag.norm();
        let generator = if s == 0.0 {
            Vector3::zeros()
        } else {
            imag * (2.0 * s.atan2(quaternion.scalar()) / s)
        };
        Self {
            quaternion,
            generator,
        }
    }
}

impl ReferenceRotation for CanonicalRotation {
    fn quaternion(&self) -> [f64; 4] {
        let q = self.quaternion;
        [q.w, q.i, q.j, q.k]
    }

    fn rotation_vector(&self) -> [f64; 3] {
        [self.generator.x, self.generator.y, self.generator.z]
    }

    fn matrix(&self) -> [[f64; 3]; 3] {
        let rotation = self.quaternion.to_rotation_matrix();
        let m = rotation.matrix();
        [
            [m[(0, 0)], m[(0, 1)], m[(0, 2)]],
            [m[(1, 0)], m[(1, 1)], m[(1, 2)]],
            [m[(2, 0)], m[(2, 1)], m[(2, 2)]],
        ]
    }
}

fn ensure_finite(what: &'static str, values: &[f64]) -> Result<(), SourceError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(SourceError::NonFinite(what))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-12
    }

    #[test]
    fn axis_angle_keeps_unreduced_generator() {
        let r = CanonicalRotation::from_axis_angle([2.0, 0.0, 0.0], TAU + PI / 4.0).unwrap();
        let v = r.rotation_vector();
        assert!(close(v[0], TAU + PI / 4.0));
    }

    #[test]
    fn quaternion_sign_is_preserved() {
        let r = CanonicalRotation::from_quaternion(-1.0, 1e-3, 0.0, 0.0).unwrap();
        assert!(r.quaternion()[0] < 0.0);
        // 2·atan2(|v|, w) with w < 0 lands just below a full turn.
        let angle = math::norm3(r.rotation_vector());
        assert!(angle > PI && angle < TAU);
    }

    #[test]
    fn matrix_quarter_turn_about_z() {
        let r = CanonicalRotation::from_matrix([[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]])
            .unwrap();
        let [w, x, y, z] = r.quaternion();
        assert!(close(w, 0.5_f64.sqrt()) && close(z, 0.5_f64.sqrt()));
        assert!(close(x, 0.0) && close(y, 0.0));
        assert!(close(r.rotation_vector()[2], FRAC_PI_2));
    }

    #[test]
    fn reflection_is_rejected() {
        let err = CanonicalRotation::from_matrix([[-1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
            .unwrap_err();
        assert!(matches!(err, SourceError::NotOrthonormal { .. }));
    }

    #[test]
    fn zero_quaternion_is_rejected() {
        assert_eq!(
            CanonicalRotation::from_quaternion(0.0, 0.0, 0.0, 0.0),
            Err(SourceError::ZeroQuaternion)
        );
    }

    #[test]
    fn euler_single_axis_matches_axis_angle() {
        let e = CanonicalRotation::from_euler_xyz_degrees(0.0, 90.0, 0.0).unwrap();
        let a = CanonicalRotation::from_axis_angle([0.0, 1.0, 0.0], FRAC_PI_2).unwrap();
        for (x, y) in e.quaternion().iter().zip(a.quaternion()) {
            assert!(close(*x, y), "{:?} vs {:?}", e.quaternion(), a.quaternion());
        }
    }

    #[test]
    fn random_rotations_are_unit_and_reproducible() {
        let mut p1 = Prng::from_seed_u64(42);
        let mut p2 = Prng::from_seed_u64(42);
        for _ in 0..32 {
            let a = CanonicalRotation::random(&mut p1);
            let b = CanonicalRotation::random(&mut p2);
            assert_eq!(a, b);
            let n: f64 = a.quaternion().iter().map(|c| c * c).sum();
            assert!((n - 1.0).abs() < 1e-12);
        }
    }
}
