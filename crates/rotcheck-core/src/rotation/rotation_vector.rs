// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::f32::consts::TAU;

/// Rotation vector: direction is the axis, magnitude is the angle in `[0, 2π)`.
///
/// The zero rotation is exactly `(0, 0, 0)`. `v` and `−v` coincide when
/// `|v| = π`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RotationVector {
    data: [f32; 3],
}

impl RotationVector {
    /// Creates a rotation vector from components.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { data: [x, y, z] }
    }

    /// The zero rotation.
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Returns `[x, y, z]`.
    pub fn to_array(self) -> [f32; 3] {
        self.data
    }

    /// Magnitude, i.e. the rotation angle.
    pub fn norm(&self) -> f32 {
        self.data.iter().map(|c| c * c).sum::<f32>().sqrt()
    }

    /// Keeps the single-precision magnitude strictly below `2π`.
    ///
    /// Components are rounded one at a time, so a vector whose angle rounds
    /// below `2π` can still have an `f32` norm at or above it. Each pass
    /// moves every non-zero component one ulp toward zero until the norm
    /// drops under `TAU`; the direction changes by at most a few ulps.
    pub fn below_full_turn(self) -> Self {
        let mut data = self.data;
        while (Self { data }).norm() >= TAU {
            data = data.map(|c| {
                if c == 0.0 {
                    c
                } else {
                    f32::from_bits(c.to_bits() - 1)
                }
            });
        }
        Self { data }
    }
}

impl From<[f32; 3]> for RotationVector {
    fn from(value: [f32; 3]) -> Self {
        Self { data: value }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn full_turn_magnitude_is_pulled_below_tau() {
        let v = RotationVector::new(TAU, 0.0, 0.0).below_full_turn();
        assert!(v.norm() < TAU);
        assert_eq!(v.to_array(), [f32::from_bits(TAU.to_bits() - 1), 0.0, 0.0]);
    }

    #[test]
    fn off_axis_components_shrink_together() {
        let v = RotationVector::new(4.973689, -3.5171711, -1.5395912);
        assert!(v.norm() >= TAU);
        let w = v.below_full_turn();
        assert!(w.norm() < TAU);
        for (a, b) in v.to_array().iter().zip(w.to_array()) {
            assert!((a - b).abs() <= 1e-5 && a.signum() == b.signum(), "{v:?} -> {w:?}");
        }
    }

    #[test]
    fn vectors_inside_the_range_are_untouched() {
        let v = RotationVector::new(1.0, -2.0, 0.5);
        assert_eq!(v.below_full_turn(), v);
        assert_eq!(RotationVector::zero().below_full_turn(), RotationVector::zero());
    }
}
