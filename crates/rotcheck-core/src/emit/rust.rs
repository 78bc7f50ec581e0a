// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Renders a catalog as a self-contained Rust test module.
//!
//! The module expects `Rotation`, `Quaternion`, `AxisAngle`,
//! `RotationVector` and `RotationMatrix` in the enclosing scope and embeds
//! assertion helpers that mirror [`crate::compare`].

use core::fmt::{self, Write as _};

use super::literal::f32_literal;
use crate::catalog::{Catalog, TestCase};
use crate::compare::Representation;

const HEADER: &str = r#"// @generated by `rotcheck generate --format rust`. Do not edit by hand.
// Regenerate with:
//   rotcheck generate --format rust -o <path>
//
// Include from the module that defines the rotation types, e.g.
//   include!("rotation_reference_tests.rs");

#[cfg(test)]
mod reference_tests {
    use super::*;
    use core::f32::consts::{PI, TAU};

    fn assert_quaternion_near(actual: &Quaternion, expected: &Quaternion, tol: f32) {
        let (a, e) = (actual.to_array(), expected.to_array());
        let direct = a.iter().zip(e).all(|(x, y)| (x - y).abs() <= tol);
        let double_cover = a.iter().zip(e).all(|(x, y)| (x + y).abs() <= tol);
        assert!(
            direct || double_cover,
            "quaternion: got {actual:?}, expected {expected:?}"
        );
    }

    fn assert_axis_angle_near(actual: &AxisAngle, expected: &AxisAngle, tol: f32) {
        let (a_axis, e_axis) = (actual.axis(), expected.axis());
        let (a, e) = (actual.angle(), expected.angle());
        let axis_ok = a_axis.iter().zip(e_axis).all(|(x, y)| (x - y).abs() <= tol);
        let neg_axis_ok = a_axis.iter().zip(e_axis).all(|(x, y)| (x + y).abs() <= tol);
        let direct = (a - e).abs() <= tol && axis_ok;
        let zero = a.abs() <= tol && e.abs() <= tol;
        let antipodal = e.abs() > tol && (a - (TAU - e)).abs() <= tol && neg_axis_ok;
        assert!(
            direct || zero || antipodal,
            "axis-angle: got {actual:?}, expected {expected:?}"
        );
    }

    fn assert_rotation_vector_near(actual: &RotationVector, expected: &RotationVector, tol: f32) {
        let (a, e) = (actual.to_array(), expected.to_array());
        let (na, ne) = (actual.norm(), expected.norm());
        let zero = na <= tol && ne <= tol;
        let direct = a.iter().zip(e).all(|(x, y)| (x - y).abs() <= tol);
        let sign_flip = (na - PI).abs() <= tol
            && (ne - PI).abs() <= tol
            && a.iter().zip(e).all(|(x, y)| (x + y).abs() <= tol);
        let complement = ne > tol && {
            let k = -(TAU - ne) / ne;
            a.iter().zip(e).all(|(x, y)| (x - y * k).abs() <= tol)
        };
        assert!(
            zero || direct || sign_flip || complement,
            "rotation vector: got {actual:?}, expected {expected:?}"
        );
    }

    fn assert_rotation_matrix_near(actual: &RotationMatrix, expected: &RotationMatrix, tol: f32) {
        for i in 0..3 {
            for j in 0..3 {
                assert!(
                    (actual[i][j] - expected[i][j]).abs() <= tol,
                    "matrix[{i}][{j}]: got {}, expected {}",
                    actual[i][j],
                    expected[i][j]
                );
            }
        }
    }
"#;

/// Variable, assertion helper and accessor used for each representation.
fn bindings(rep: Representation) -> (&'static str, &'static str, &'static str) {
    match rep {
        Representation::Quaternion => ("expected_quat", "assert_quaternion_near", "as_quaternion"),
        Representation::AxisAngle => ("expected_aa", "assert_axis_angle_near", "as_axis_angle"),
        Representation::RotationVector => (
            "expected_rv",
            "assert_rotation_vector_near",
            "as_rotation_vector",
        ),
        Representation::Matrix => (
            "expected_mat",
            "assert_rotation_matrix_near",
            "as_rotation_matrix",
        ),
    }
}

/// Maps a case label to a valid snake_case function-name suffix.
pub fn test_name(label: &str) -> String {
    label
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

fn join(values: &[f32]) -> String {
    values
        .iter()
        .map(|v| f32_literal(*v))
        .collect::<Vec<_>>()
        .join(", ")
}

fn write_case(out: &mut String, case: &TestCase) -> fmt::Result {
    let e = case.expected();
    writeln!(out, "    #[test]")?;
    writeln!(out, "    fn reference_{}() {{", test_name(case.label()))?;
    writeln!(out, "        const TOL: f32 = {};", f32_literal(case.tolerance()))?;
    writeln!(
        out,
        "        let expected_quat = Quaternion::new({});",
        join(&e.quaternion.to_array())
    )?;
    writeln!(
        out,
        "        let expected_aa = AxisAngle::new({});",
        join(&e.axis_angle.to_array())
    )?;
    writeln!(
        out,
        "        let expected_rv = RotationVector::new({});",
        join(&e.rotation_vector.to_array())
    )?;
    writeln!(out, "        let expected_mat = RotationMatrix::new([")?;
    for row in e.matrix.rows() {
        writeln!(out, "            [{}],", join(&row))?;
    }
    writeln!(out, "        ]);")?;

    for source in Representation::ALL {
        let (var, _, _) = bindings(source);
        writeln!(out)?;
        writeln!(out, "        let r = Rotation::from({var});")?;
        for target in Representation::ALL.into_iter().filter(|t| *t != source) {
            let (expected, helper, accessor) = bindings(target);
            writeln!(out, "        {helper}(&r.{accessor}(), &{expected}, TOL);")?;
        }
    }
    writeln!(out, "    }}")
}

/// Renders every case in catalog order.
pub fn render(catalog: &Catalog) -> Result<String, fmt::Error> {
    let mut out = String::from(HEADER);
    for case in catalog {
        writeln!(out)?;
        write_case(&mut out, case)?;
    }
    writeln!(out, "}}")?;
    Ok(out)
}
