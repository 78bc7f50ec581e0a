// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Round-trip verification of a candidate rotation library against a catalog.
//!
//! For every case the candidate is built from each expected representation
//! in turn and read back as each of the other three, giving twelve ordered
//! `(source, target)` comparisons. A mismatch is recorded and the remaining
//! comparisons still run.

use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::catalog::{Catalog, TestCase};
use crate::compare::{Branch, Equivalence, Mismatch, Representation};
use crate::convert::Expected;
use crate::rotation::{AxisAngle, Quaternion, Rotation, RotationMatrix, RotationVector};

/// A rotation implementation under test.
pub trait Candidate: Sized {
    /// Builds from a quaternion `(w, x, y, z)`.
    fn from_quaternion(q: Quaternion) -> Self;
    /// Builds from an axis and angle.
    fn from_axis_angle(aa: AxisAngle) -> Self;
    /// Builds from a rotation vector.
    fn from_rotation_vector(v: RotationVector) -> Self;
    /// Builds from a row-major matrix.
    fn from_matrix(m: RotationMatrix) -> Self;
    /// Reads back as a quaternion.
    fn quaternion(&self) -> Quaternion;
    /// Reads back as an axis and angle.
    fn axis_angle(&self) -> AxisAngle;
    /// Reads back as a rotation vector.
    fn rotation_vector(&self) -> RotationVector;
    /// Reads back as a matrix.
    fn matrix(&self) -> RotationMatrix;
}

impl Candidate for Rotation {
    fn from_quaternion(q: Quaternion) -> Self {
        Self::from(q)
    }

    fn from_axis_angle(aa: AxisAngle) -> Self {
        Self::from(aa)
    }

    fn from_rotation_vector(v: RotationVector) -> Self {
        Self::from(v)
    }

    fn from_matrix(m: RotationMatrix) -> Self {
        Self::from(m)
    }

    fn quaternion(&self) -> Quaternion {
        self.as_quaternion()
    }

    fn axis_angle(&self) -> AxisAngle {
        self.as_axis_angle()
    }

    fn rotation_vector(&self) -> RotationVector {
        self.as_rotation_vector()
    }

    fn matrix(&self) -> RotationMatrix {
        self.as_rotation_matrix()
    }
}

/// Outcome of one `(source, target)` conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// Representation the candidate was built from.
    pub source: Representation,
    /// Representation read back and compared.
    pub target: Representation,
    /// Accepting branch or the mismatch.
    pub outcome: Result<Branch, Mismatch>,
}

/// All comparisons for one case.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseReport {
    /// Case label.
    pub label: String,
    /// Tolerance the case was checked at.
    pub tolerance: f32,
    /// Twelve comparisons in source-major order.
    pub comparisons: Vec<Comparison>,
}

impl CaseReport {
    /// `true` when every comparison was accepted.
    pub fn passed(&self) -> bool {
        self.comparisons.iter().all(|c| c.outcome.is_ok())
    }

    /// Comparisons that failed.
    pub fn failures(&self) -> impl Iterator<Item = &Comparison> {
        self.comparisons.iter().filter(|c| c.outcome.is_err())
    }
}

/// Aggregate counts over a verification run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// Cases checked.
    pub cases: usize,
    /// Cases with at least one failed comparison.
    pub failed_cases: usize,
    /// Comparisons run.
    pub comparisons: usize,
    /// Comparisons rejected.
    pub failures: usize,
    /// Accepted comparisons per branch.
    pub branches: BTreeMap<Branch, usize>,
}

impl Summary {
    /// Tallies a set of reports.
    pub fn from_reports(reports: &[CaseReport]) -> Self {
        let mut summary = Self {
            cases: reports.len(),
            ..Self::default()
        };
        for report in reports {
            if !report.passed() {
                summary.failed_cases += 1;
            }
            for comparison in &report.comparisons {
                summary.comparisons += 1;
                match comparison.outcome {
                    Ok(branch) => *summary.branches.entry(branch).or_insert(0) += 1,
                    Err(_) => summary.failures += 1,
                }
            }
        }
        summary
    }

    /// `true` when nothing failed.
    pub fn is_clean(&self) -> bool {
        self.failures == 0
    }
}

fn build<C: Candidate>(expected: &Expected, source: Representation) -> C {
    match source {
        Representation::Quaternion => C::from_quaternion(expected.quaternion),
        Representation::AxisAngle => C::from_axis_angle(expected.axis_angle),
        Representation::RotationVector => C::from_rotation_vector(expected.rotation_vector),
        Representation::Matrix => C::from_matrix(expected.matrix),
    }
}

fn read_back<C: Candidate>(
    candidate: &C,
    expected: &Expected,
    target: Representation,
    tolerance: f32,
) -> Result<Branch, Mismatch> {
    match target {
        Representation::Quaternion => candidate
            .quaternion()
            .equivalent(&expected.quaternion, tolerance),
        Representation::AxisAngle => candidate
            .axis_angle()
            .equivalent(&expected.axis_angle, tolerance),
        Representation::RotationVector => candidate
            .rotation_vector()
            .equivalent(&expected.rotation_vector, tolerance),
        Representation::Matrix => candidate.matrix().equivalent(&expected.matrix, tolerance),
    }
}

/// Runs the twelve round-trip comparisons for one case.
pub fn verify_case<C: Candidate>(case: &TestCase) -> CaseReport {
    let expected = case.expected();
    let tolerance = case.tolerance();
    let mut comparisons = Vec::with_capacity(12);
    for source in Representation::ALL {
        let candidate: C = build(expected, source);
        for target in Representation::ALL {
            if target == source {
                continue;
            }
            let outcome = read_back(&candidate, expected, target, tolerance);
            if let Err(mismatch) = &outcome {
                warn!(label = case.label(), %source, %target, %mismatch, "round-trip mismatch");
            }
            comparisons.push(Comparison {
                source,
                target,
                outcome,
            });
        }
    }
    CaseReport {
        label: case.label().to_owned(),
        tolerance,
        comparisons,
    }
}

/// Verifies every case in catalog order.
pub fn verify_catalog<C: Candidate>(catalog: &Catalog) -> Vec<CaseReport> {
    let reports: Vec<CaseReport> = catalog.iter().map(verify_case::<C>).collect();
    let summary = Summary::from_reports(&reports);
    info!(
        cases = summary.cases,
        comparisons = summary.comparisons,
        failures = summary.failures,
        "verified catalog"
    );
    reports
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::oracle::CanonicalRotation;

    /// Always answers the identity, whatever it was built from.
    struct Frozen;

    impl Candidate for Frozen {
        fn from_quaternion(_: Quaternion) -> Self {
            Self
        }
        fn from_axis_angle(_: AxisAngle) -> Self {
            Self
        }
        fn from_rotation_vector(_: RotationVector) -> Self {
            Self
        }
        fn from_matrix(_: RotationMatrix) -> Self {
            Self
        }
        fn quaternion(&self) -> Quaternion {
            Quaternion::identity()
        }
        fn axis_angle(&self) -> AxisAngle {
            AxisAngle::zero()
        }
        fn rotation_vector(&self) -> RotationVector {
            RotationVector::zero()
        }
        fn matrix(&self) -> RotationMatrix {
            RotationMatrix::identity()
        }
    }

    #[test]
    fn twelve_comparisons_per_case() {
        let case = TestCase::new("identity", CanonicalRotation::identity(), 1e-5);
        let report = verify_case::<Rotation>(&case);
        assert_eq!(report.comparisons.len(), 12);
        assert!(report.passed());
    }

    #[test]
    fn mismatch_does_not_stop_remaining_comparisons() {
        let r = CanonicalRotation::from_axis_angle([0.0, 0.0, 1.0], 1.0).unwrap();
        let report = verify_case::<Frozen>(&TestCase::new("z_1rad", r, 1e-5));
        assert_eq!(report.comparisons.len(), 12);
        assert_eq!(report.failures().count(), 12);
        let summary = Summary::from_reports(&[report]);
        assert_eq!(summary.failed_cases, 1);
        assert!(!summary.is_clean());
    }
}
