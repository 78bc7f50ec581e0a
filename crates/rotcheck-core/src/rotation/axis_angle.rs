// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use super::RotationError;

/// Unit axis plus an angle in radians, canonically in `[0, 2π)`.
///
/// The zero rotation uses the zero axis. At `angle = π`, `(n, π)` and
/// `(−n, π)` are the same rotation; more generally `(n, θ)` and
/// `(−n, 2π − θ)` are.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AxisAngle {
    data: [f32; 4],
}

impl AxisAngle {
    /// Stores an axis and angle verbatim.
    pub const fn new(x: f32, y: f32, z: f32, angle: f32) -> Self {
        Self {
            data: [x, y, z, angle],
        }
    }

    /// The zero rotation: zero axis, zero angle.
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Validates and normalises a user-supplied axis.
    ///
    /// The angle is taken as given; only the axis has to describe a direction.
    pub fn try_new(x: f32, y: f32, z: f32, angle: f32) -> Result<Self, RotationError> {
        if ![x, y, z, angle].iter().all(|c| c.is_finite()) {
            return Err(RotationError::NonFinite);
        }
        let len = (x * x + y * y + z * z).sqrt();
        if len == 0.0 {
            return Err(RotationError::ZeroAxis);
        }
        Ok(Self::new(x / len, y / len, z / len, angle))
    }

    /// Rotation axis `[x, y, z]`.
    pub fn axis(&self) -> [f32; 3] {
        [self.data[0], self.data[1], self.data[2]]
    }

    /// Rotation angle in radians.
    pub fn angle(&self) -> f32 {
        self.data[3]
    }

    /// Returns `[x, y, z, angle]`.
    pub fn to_array(self) -> [f32; 4] {
        self.data
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn try_new_normalises_axis() {
        let aa = AxisAngle::try_new(0.0, 3.0, 4.0, 1.0).unwrap();
        assert_eq!(aa.axis(), [0.0, 0.6, 0.8]);
        assert_eq!(aa.angle(), 1.0);
    }

    #[test]
    fn try_new_rejects_zero_axis() {
        assert_eq!(
            AxisAngle::try_new(0.0, 0.0, 0.0, 1.0),
            Err(RotationError::ZeroAxis)
        );
    }

    #[test]
    fn try_new_rejects_nan() {
        assert_eq!(
            AxisAngle::try_new(f32::NAN, 1.0, 0.0, 1.0),
            Err(RotationError::NonFinite)
        );
    }
}
