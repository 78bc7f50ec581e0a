// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::ops::Neg;

/// Quaternion stored as `(w, x, y, z)`, scalar first, in `f32`.
///
/// * `q` and `-q` denote the same rotation (double cover); nothing here picks
///   a preferred sign.
/// * [`Quaternion::new`] stores components verbatim. Use
///   [`Quaternion::normalize`] (or build a [`crate::rotation::Rotation`]) when
///   a unit quaternion is required.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quaternion {
    data: [f32; 4],
}

impl Quaternion {
    /// Creates a quaternion from components, scalar part first.
    pub const fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self { data: [w, x, y, z] }
    }

    /// Returns the identity quaternion `(1, 0, 0, 0)`.
    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }

    /// Returns the components as `[w, x, y, z]`.
    pub fn to_array(self) -> [f32; 4] {
        self.data
    }

    /// Scalar part.
    pub fn w(&self) -> f32 {
        self.data[0]
    }

    /// `i` component.
    pub fn x(&self) -> f32 {
        self.data[1]
    }

    /// `j` component.
    pub fn y(&self) -> f32 {
        self.data[2]
    }

    /// `k` component.
    pub fn z(&self) -> f32 {
        self.data[3]
    }

    /// Euclidean norm of all four components.
    pub fn norm(&self) -> f32 {
        self.data.iter().map(|c| c * c).sum::<f32>().sqrt()
    }

    /// Normalises the quaternion; returns identity when the norm is zero or
    /// not finite, so construction stays total and deterministic.
    pub fn normalize(&self) -> Self {
        let len = self.norm();
        if len == 0.0 || !len.is_finite() {
            return Self::identity();
        }
        let inv = 1.0 / len;
        Self::new(
            self.w() * inv,
            self.x() * inv,
            self.y() * inv,
            self.z() * inv,
        )
    }
}

impl Neg for Quaternion {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.w(), -self.x(), -self.y(), -self.z())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn normalize_zero_is_identity() {
        let q = Quaternion::new(0.0, 0.0, 0.0, 0.0).normalize();
        assert_eq!(q, Quaternion::identity());
    }

    #[test]
    fn normalize_scales_to_unit_length() {
        let q = Quaternion::new(2.0, 0.0, 0.0, 2.0).normalize();
        assert!((q.norm() - 1.0).abs() <= 1e-6);
        assert!((q.w() - q.z()).abs() <= f32::EPSILON);
    }

    #[test]
    fn negation_flips_every_component() {
        let q = Quaternion::new(0.5, -0.5, 0.25, -0.25);
        assert_eq!((-q).to_array(), [-0.5, 0.5, -0.25, 0.25]);
    }
}
