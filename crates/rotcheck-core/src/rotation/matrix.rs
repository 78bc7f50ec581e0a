// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::ops::Index;

/// Row-major 3×3 rotation matrix.
///
/// `m[i][j]` is row `i`, column `j`; columns are the images of the basis
/// vectors. Matrices are single-valued, so equality needs no
/// reconciliation beyond tolerance.
///
/// # Examples
/// ```
/// use rotcheck_core::rotation::RotationMatrix;
/// let m = RotationMatrix::identity();
/// assert_eq!(m[1], [0.0, 1.0, 0.0]);
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RotationMatrix {
    rows: [[f32; 3]; 3],
}

impl RotationMatrix {
    /// Wraps rows verbatim; orthonormality is the caller's responsibility.
    pub const fn new(rows: [[f32; 3]; 3]) -> Self {
        Self { rows }
    }

    /// Returns the identity matrix.
    pub const fn identity() -> Self {
        Self::new([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Returns the rows.
    pub fn rows(self) -> [[f32; 3]; 3] {
        self.rows
    }

    /// Sum of the diagonal.
    pub fn trace(&self) -> f32 {
        self.rows[0][0] + self.rows[1][1] + self.rows[2][2]
    }
}

impl Index<usize> for RotationMatrix {
    type Output = [f32; 3];

    fn index(&self, row: usize) -> &[f32; 3] {
        &self.rows[row]
    }
}

impl From<[[f32; 3]; 3]> for RotationMatrix {
    fn from(rows: [[f32; 3]; 3]) -> Self {
        Self { rows }
    }
}
