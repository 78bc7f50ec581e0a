// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Edge-case catalog: an ordered, labelled, reproducible list of test cases.
//!
//! Every case is built once from a [`CanonicalRotation`] and never mutated.
//! Insertion order is preserved so emitted artifacts are byte-stable; labels
//! are unique and exist only for diagnostics.
//!
//! Random samples draw from a caller-supplied [`Prng`]. The catalog advances
//! it monotonically (three draws per sample) and never reseeds it.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4, PI, TAU};

use thiserror::Error;
use tracing::{debug, info};

use crate::config::GeneratorConfig;
use crate::convert::{self, Expected, Regimes};
use crate::math::{self, Prng};
use crate::oracle::{CanonicalRotation, SourceError};

/// Single-precision machine epsilon, as the `f64` the catalog feeds the source.
const F32_EPS: f64 = f32::EPSILON as f64;

/// Error raised while assembling a catalog.
///
/// Both variants are defects in a catalog definition, not runtime conditions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    /// Two cases share a label.
    #[error("duplicate case label `{0}`")]
    DuplicateLabel(String),
    /// The canonical source rejected an edge-case definition.
    #[error("case `{label}`: {source}")]
    Source {
        /// Label of the offending case.
        label: String,
        /// Underlying rejection.
        #[source]
        source: SourceError,
    },
}

/// One named scenario: a reference rotation and its four expected encodings.
#[derive(Debug, Clone, PartialEq)]
pub struct TestCase {
    label: String,
    rotation: CanonicalRotation,
    expected: Expected,
    regimes: Regimes,
    tolerance: f32,
}

impl TestCase {
    /// Converts `rotation` once and freezes the result.
    pub fn new(label: impl Into<String>, rotation: CanonicalRotation, tolerance: f32) -> Self {
        let (expected, regimes) = convert::expected(&rotation);
        Self {
            label: label.into(),
            rotation,
            expected,
            regimes,
            tolerance,
        }
    }

    /// Unique, stable label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Ground-truth rotation the expected values were derived from.
    pub fn rotation(&self) -> &CanonicalRotation {
        &self.rotation
    }

    /// Expected single-precision encodings.
    pub fn expected(&self) -> &Expected {
        &self.expected
    }

    /// Degeneracy regimes chosen during conversion.
    pub fn regimes(&self) -> Regimes {
        self.regimes
    }

    /// Per-component absolute tolerance for this case.
    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }
}

/// Ordered collection of [`TestCase`]s with unique labels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    cases: Vec<TestCase>,
}

impl Catalog {
    /// Starts an empty catalog whose cases default to `tolerance`.
    pub fn builder(tolerance: f32) -> CatalogBuilder {
        CatalogBuilder {
            cases: Vec::new(),
            tolerance,
        }
    }

    /// Builds the full edge-case catalog followed by `config.random_count`
    /// samples drawn from `prng`.
    pub fn standard(config: &GeneratorConfig, prng: &mut Prng) -> Result<Self, CatalogError> {
        let mut b = Self::builder(config.default_tolerance);
        push_identity(&mut b)?;
        push_near_zero(&mut b)?;
        push_standard_angles(&mut b)?;
        push_degree_angles(&mut b)?;
        push_arbitrary_axes(&mut b)?;
        push_quaternion_edges(&mut b)?;
        push_matrix_cases(&mut b)?;
        push_euler_cases(&mut b)?;
        push_precision_limits(&mut b, config.loose_tolerance)?;
        push_round_trip_stress(&mut b)?;
        push_random(&mut b, prng, config.random_count)?;
        let catalog = b.finish();
        info!(
            cases = catalog.len(),
            seed = config.seed,
            "built edge-case catalog"
        );
        Ok(catalog)
    }

    /// Cases in insertion order.
    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    /// Looks a case up by label.
    pub fn get(&self, label: &str) -> Option<&TestCase> {
        self.cases.iter().find(|c| c.label == label)
    }

    /// Number of cases.
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// `true` when the catalog holds no cases.
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Iterates cases in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, TestCase> {
        self.cases.iter()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a TestCase;
    type IntoIter = std::slice::Iter<'a, TestCase>;

    fn into_iter(self) -> Self::IntoIter {
        self.cases.iter()
    }
}

/// Accumulates cases, enforcing label uniqueness.
#[derive(Debug)]
pub struct CatalogBuilder {
    cases: Vec<TestCase>,
    tolerance: f32,
}

impl CatalogBuilder {
    /// Appends a case at the default tolerance.
    pub fn push(
        &mut self,
        label: impl Into<String>,
        rotation: CanonicalRotation,
    ) -> Result<&mut Self, CatalogError> {
        let tolerance = self.tolerance;
        self.push_with_tolerance(label, rotation, tolerance)
    }

    /// Appends a case with an explicit tolerance.
    pub fn push_with_tolerance(
        &mut self,
        label: impl Into<String>,
        rotation: CanonicalRotation,
        tolerance: f32,
    ) -> Result<&mut Self, CatalogError> {
        let label = label.into();
        if self.cases.iter().any(|c| c.label == label) {
            return Err(CatalogError::DuplicateLabel(label));
        }
        let case = TestCase::new(label, rotation, tolerance);
        debug!(
            label = case.label(),
            axis_angle = ?case.regimes.axis_angle,
            rotation_vector = ?case.regimes.rotation_vector,
            tolerance,
            "catalog case"
        );
        self.cases.push(case);
        Ok(self)
    }

    /// Freezes the catalog.
    pub fn finish(self) -> Catalog {
        Catalog { cases: self.cases }
    }
}

/// Attaches the case label to a source rejection.
fn source<T>(label: &str, result: Result<T, SourceError>) -> Result<T, CatalogError> {
    result.map_err(|source| CatalogError::Source {
        label: label.to_owned(),
        source,
    })
}

fn push_rotvec(b: &mut CatalogBuilder, label: &str, v: [f64; 3]) -> Result<(), CatalogError> {
    let r = source(label, CanonicalRotation::from_rotation_vector(v))?;
    b.push(label, r)?;
    Ok(())
}

fn push_identity(b: &mut CatalogBuilder) -> Result<(), CatalogError> {
    b.push("identity", CanonicalRotation::identity())?;
    Ok(())
}

fn push_near_zero(b: &mut CatalogBuilder) -> Result<(), CatalogError> {
    for (label, angle) in [
        ("near_zero_1e-6", 1e-6),
        ("near_zero_1e-7", 1e-7),
        ("near_zero_f32_eps", F32_EPS),
    ] {
        push_rotvec(b, label, [angle, 0.0, 0.0])?;
    }
    Ok(())
}

fn push_standard_angles(b: &mut CatalogBuilder) -> Result<(), CatalogError> {
    for (label, angle) in [
        ("angle_pi_over_4", FRAC_PI_4),
        ("angle_pi_over_2", FRAC_PI_2),
        ("angle_pi", PI),
        ("angle_3pi_over_2", 3.0 * PI / 2.0),
        ("angle_2pi_minus_eps", TAU - 1e-6),
    ] {
        push_rotvec(b, label, [angle, 0.0, 0.0])?;
    }
    Ok(())
}

fn push_degree_angles(b: &mut CatalogBuilder) -> Result<(), CatalogError> {
    for degrees in [45.0, 90.0, 180.0, 270.0, 360.0] {
        let label = format!("degrees_{degrees}");
        push_rotvec(b, &label, [math::deg_to_rad(degrees), 0.0, 0.0])?;
    }
    Ok(())
}

fn push_arbitrary_axes(b: &mut CatalogBuilder) -> Result<(), CatalogError> {
    for (label, axis) in [
        ("axis_y", [0.0, 1.0, 0.0]),
        ("axis_z", [0.0, 0.0, 1.0]),
        ("axis_xy", [1.0, 1.0, 0.0]),
        ("axis_xyz", [1.0, 1.0, 1.0]),
        ("axis_arbitrary", [1.0, -0.5, 0.3]),
    ] {
        let r = source(label, CanonicalRotation::from_axis_angle(axis, FRAC_PI_3))?;
        b.push(label, r)?;
    }
    Ok(())
}

fn push_quaternion_edges(b: &mut CatalogBuilder) -> Result<(), CatalogError> {
    // (w, x, y, z): near identity, exact half turn, and a near full turn
    // reached through the negative hemisphere.
    for (label, [w, x, y, z]) in [
        ("quat_w_near_1", [1.0, F32_EPS, 0.0, 0.0]),
        ("quat_w_zero_180deg_x", [0.0, 1.0, 0.0, 0.0]),
        ("quat_w_near_minus_1", [-1.0, F32_EPS, 0.0, 0.0]),
    ] {
        let r = source(label, CanonicalRotation::from_quaternion(w, x, y, z))?;
        b.push(label, r)?;
    }
    Ok(())
}

fn push_matrix_cases(b: &mut CatalogBuilder) -> Result<(), CatalogError> {
    let label = "matrix_90deg_z";
    let r = source(
        label,
        CanonicalRotation::from_matrix([[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]),
    )?;
    b.push(label, r)?;
    Ok(())
}

fn push_euler_cases(b: &mut CatalogBuilder) -> Result<(), CatalogError> {
    for (label, [roll, pitch, yaw]) in [
        ("euler_xyz_30_45_60", [30.0, 45.0, 60.0]),
        ("euler_xyz_90_0_0", [90.0, 0.0, 0.0]),
        ("euler_xyz_0_90_0", [0.0, 90.0, 0.0]),
        ("euler_xyz_0_0_90", [0.0, 0.0, 90.0]),
        ("euler_xyz_gimbal_like", [90.0, 90.0, 0.0]),
    ] {
        let r = source(label, CanonicalRotation::from_euler_xyz_degrees(roll, pitch, yaw))?;
        b.push(label, r)?;
    }
    Ok(())
}

fn push_precision_limits(b: &mut CatalogBuilder, loose_tolerance: f32) -> Result<(), CatalogError> {
    push_rotvec(b, "f32_min_rotation", [F32_EPS, 0.0, 0.0])?;
    push_rotvec(b, "f32_angle_near_2pi", [TAU - F32_EPS, 0.0, 0.0])?;

    // Half turn about x with a scalar part of 1e-4: the vector part sits
    // next to unit norm and its rounding lands in the reconstructed scalar.
    let label = "quat_components_near_limits";
    let r = source(
        label,
        CanonicalRotation::from_quaternion(0.0001, 0.9999999, 0.0001, 0.0001),
    )?;
    b.push_with_tolerance(label, r, loose_tolerance)?;
    Ok(())
}

fn push_round_trip_stress(b: &mut CatalogBuilder) -> Result<(), CatalogError> {
    push_rotvec(b, "rotvec_angle_gt_2pi", [TAU + FRAC_PI_4, 0.0, 0.0])?;
    push_rotvec(b, "rotvec_zero", [0.0, 0.0, 0.0])?;
    Ok(())
}

fn push_random(b: &mut CatalogBuilder, prng: &mut Prng, count: usize) -> Result<(), CatalogError> {
    for i in 0..count {
        b.push(format!("random_{i}"), CanonicalRotation::random(prng))?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    fn standard() -> Catalog {
        let cfg = GeneratorConfig::default();
        Catalog::standard(&cfg, &mut cfg.prng()).unwrap()
    }

    #[test]
    fn standard_catalog_has_every_category() {
        let catalog = standard();
        assert_eq!(catalog.len(), 43);
        for label in [
            "identity",
            "near_zero_f32_eps",
            "angle_2pi_minus_eps",
            "degrees_360",
            "axis_arbitrary",
            "quat_w_near_minus_1",
            "matrix_90deg_z",
            "euler_xyz_gimbal_like",
            "quat_components_near_limits",
            "rotvec_zero",
            "random_9",
        ] {
            assert!(catalog.get(label).is_some(), "missing {label}");
        }
        assert_eq!(catalog.cases()[0].label(), "identity");
    }

    #[test]
    fn only_near_limit_quaternion_is_loose() {
        let catalog = standard();
        for case in &catalog {
            let expected = if case.label() == "quat_components_near_limits" {
                5.5e-5
            } else {
                1e-5
            };
            assert_eq!(case.tolerance(), expected, "{}", case.label());
        }
    }

    #[test]
    fn duplicate_label_is_rejected() {
        let mut b = Catalog::builder(1e-5);
        b.push("a", CanonicalRotation::identity()).unwrap();
        let err = b.push("a", CanonicalRotation::identity()).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateLabel("a".into()));
    }

    #[test]
    fn random_count_follows_config() {
        let cfg = GeneratorConfig {
            random_count: 3,
            ..GeneratorConfig::default()
        };
        let catalog = Catalog::standard(&cfg, &mut cfg.prng()).unwrap();
        assert!(catalog.get("random_2").is_some());
        assert!(catalog.get("random_3").is_none());
    }

    #[test]
    fn prng_is_advanced_three_draws_per_sample() {
        let cfg = GeneratorConfig::default();
        let mut used = cfg.prng();
        Catalog::standard(&cfg, &mut used).unwrap();
        let mut fresh = cfg.prng();
        for _ in 0..3 * cfg.random_count {
            fresh.next_f64();
        }
        assert_eq!(used.next_f64(), fresh.next_f64());
    }
}
