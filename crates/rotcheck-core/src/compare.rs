// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Representation-aware equivalence.
//!
//! Several numeric encodings denote one rotation: `q` and `−q`, `(n, θ)` and
//! `(−n, 2π − θ)`, `v` and `−v` at `|v| = π`. Each representation accepts a
//! fixed disjunction of named [`Branch`]es; a generic distance metric would
//! reject valid alternate encodings.
//!
//! All checks are per-component absolute differences against a single
//! tolerance. NaN never matches.

use core::f32::consts::{PI, TAU};
use core::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::rotation::{AxisAngle, Quaternion, RotationMatrix, RotationVector};

/// The four rotation encodings.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Representation {
    /// Unit quaternion `(w, x, y, z)`.
    Quaternion,
    /// Unit axis plus angle.
    AxisAngle,
    /// Axis scaled by angle.
    RotationVector,
    /// Row-major 3×3 matrix.
    Matrix,
}

impl Representation {
    /// All representations in conversion order.
    pub const ALL: [Self; 4] = [
        Self::Quaternion,
        Self::AxisAngle,
        Self::RotationVector,
        Self::Matrix,
    ];

    /// Stable snake_case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quaternion => "quaternion",
            Self::AxisAngle => "axis_angle",
            Self::RotationVector => "rotation_vector",
            Self::Matrix => "matrix",
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which equivalence rule accepted a comparison.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Branch {
    /// Componentwise match.
    Direct,
    /// Quaternion matched its negation.
    DoubleCover,
    /// Both axis-angle values are the zero rotation; axes ignored.
    ZeroAngle,
    /// Axis-angle `(−n, 2π − θ)` against `(n, θ)`.
    Antipodal,
    /// Both rotation vectors are near zero.
    ZeroVector,
    /// Rotation vectors of magnitude `π` pointing opposite ways.
    SignFlipAtPi,
    /// Rotation vector `−n·(2π − θ)` against `n·θ`.
    FullTurnComplement,
}

impl Branch {
    /// Stable snake_case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::DoubleCover => "double_cover",
            Self::ZeroAngle => "zero_angle",
            Self::Antipodal => "antipodal",
            Self::ZeroVector => "zero_vector",
            Self::SignFlipAtPi => "sign_flip_at_pi",
            Self::FullTurnComplement => "full_turn_complement",
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed comparison with enough detail to localise the defect.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error(
    "{representation} mismatch at components {indices:?}: actual {actual:?}, expected {expected:?} (tolerance {tolerance:e})"
)]
pub struct Mismatch {
    /// Representation being compared.
    pub representation: Representation,
    /// Components outside tolerance under the closest branch.
    pub indices: Vec<usize>,
    /// Candidate components.
    pub actual: Vec<f32>,
    /// Reference components.
    pub expected: Vec<f32>,
    /// Absolute per-component tolerance.
    pub tolerance: f32,
}

/// Rotation-aware approximate equality.
pub trait Equivalence {
    /// Representation tag used in reports.
    const REPRESENTATION: Representation;

    /// Flat component list, in storage order.
    fn components(&self) -> Vec<f32>;

    /// Returns the branch that accepted `self` as `expected`, or the mismatch.
    fn equivalent(&self, expected: &Self, tolerance: f32) -> Result<Branch, Mismatch>;
}

/// Boolean form of [`Equivalence::equivalent`].
pub fn equivalent<T: Equivalence>(actual: &T, expected: &T, tolerance: f32) -> bool {
    actual.equivalent(expected, tolerance).is_ok()
}

fn within(a: f32, b: f32, tolerance: f32) -> bool {
    (a - b).abs() <= tolerance
}

fn all_within(a: &[f32], b: &[f32], tolerance: f32) -> bool {
    a.iter().zip(b).all(|(x, y)| within(*x, *y, tolerance))
}

fn negated<const N: usize>(v: [f32; N]) -> [f32; N] {
    v.map(|c| -c)
}

fn offending(a: &[f32], b: &[f32], tolerance: f32) -> Vec<usize> {
    a.iter()
        .zip(b)
        .enumerate()
        .filter(|(_, (x, y))| !within(**x, **y, tolerance))
        .map(|(i, _)| i)
        .collect()
}

fn norm3(v: [f32; 3]) -> f32 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

fn mismatch<T: Equivalence>(actual: &T, expected: &T, indices: Vec<usize>, tolerance: f32) -> Mismatch {
    Mismatch {
        representation: T::REPRESENTATION,
        indices,
        actual: actual.components(),
        expected: expected.components(),
        tolerance,
    }
}

impl Equivalence for Quaternion {
    const REPRESENTATION: Representation = Representation::Quaternion;

    fn components(&self) -> Vec<f32> {
        self.to_array().to_vec()
    }

    fn equivalent(&self, expected: &Self, tolerance: f32) -> Result<Branch, Mismatch> {
        let a = self.to_array();
        let e = expected.to_array();
        let direct = offending(&a, &e, tolerance);
        if direct.is_empty() {
            return Ok(Branch::Direct);
        }
        let flipped = offending(&a, &negated(e), tolerance);
        if flipped.is_empty() {
            return Ok(Branch::DoubleCover);
        }
        let closest = if flipped.len() < direct.len() { flipped } else { direct };
        Err(mismatch(self, expected, closest, tolerance))
    }
}

impl Equivalence for AxisAngle {
    const REPRESENTATION: Representation = Representation::AxisAngle;

    fn components(&self) -> Vec<f32> {
        self.to_array().to_vec()
    }

    fn equivalent(&self, expected: &Self, tolerance: f32) -> Result<Branch, Mismatch> {
        let (a_axis, a_angle) = (self.axis(), self.angle());
        let (e_axis, e_angle) = (expected.axis(), expected.angle());

        if within(a_angle, e_angle, tolerance) && all_within(&a_axis, &e_axis, tolerance) {
            return Ok(Branch::Direct);
        }
        if within(a_angle, 0.0, tolerance) && within(e_angle, 0.0, tolerance) {
            return Ok(Branch::ZeroAngle);
        }
        let expected_is_zero = within(e_angle, 0.0, tolerance);
        if !expected_is_zero
            && within(a_angle, TAU - e_angle, tolerance)
            && all_within(&a_axis, &negated(e_axis), tolerance)
        {
            return Ok(Branch::Antipodal);
        }
        let indices = offending(&self.to_array(), &expected.to_array(), tolerance);
        Err(mismatch(self, expected, indices, tolerance))
    }
}

impl Equivalence for RotationVector {
    const REPRESENTATION: Representation = Representation::RotationVector;

    fn components(&self) -> Vec<f32> {
        self.to_array().to_vec()
    }

    fn equivalent(&self, expected: &Self, tolerance: f32) -> Result<Branch, Mismatch> {
        let a = self.to_array();
        let e = expected.to_array();
        let (a_norm, e_norm) = (norm3(a), norm3(e));

        if a_norm <= tolerance && e_norm <= tolerance {
            return Ok(Branch::ZeroVector);
        }
        if all_within(&a, &e, tolerance) {
            return Ok(Branch::Direct);
        }
        if within(a_norm, PI, tolerance)
            && within(e_norm, PI, tolerance)
            && all_within(&a, &negated(e), tolerance)
        {
            return Ok(Branch::SignFlipAtPi);
        }
        if e_norm > tolerance {
            let scale = -(TAU - e_norm) / e_norm;
            let complement = e.map(|c| c * scale);
            if all_within(&a, &complement, tolerance) {
                return Ok(Branch::FullTurnComplement);
            }
        }
        Err(mismatch(self, expected, offending(&a, &e, tolerance), tolerance))
    }
}

impl Equivalence for RotationMatrix {
    const REPRESENTATION: Representation = Representation::Matrix;

    fn components(&self) -> Vec<f32> {
        self.rows().concat()
    }

    fn equivalent(&self, expected: &Self, tolerance: f32) -> Result<Branch, Mismatch> {
        let a = self.components();
        let e = expected.components();
        let indices = offending(&a, &e, tolerance);
        if indices.is_empty() {
            Ok(Branch::Direct)
        } else {
            Err(mismatch(self, expected, indices, tolerance))
        }
    }
}
