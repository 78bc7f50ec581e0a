// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! JSON fixture format.
//!
//! Values are stored as `f32`, so a fixture reloads bit-exact.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, TestCase};
use crate::config::GeneratorConfig;
use crate::convert::{Expected, Regimes};
use crate::rotation::{AxisAngle, Quaternion, RotationMatrix, RotationVector};

/// Bumped when the fixture layout changes.
pub const FIXTURE_VERSION: u32 = 1;

/// A whole catalog plus the settings that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureFile {
    /// Layout version, see [`FIXTURE_VERSION`].
    pub version: u32,
    /// Generator settings, including the seed.
    pub generator: GeneratorConfig,
    /// Cases in catalog order.
    pub cases: Vec<FixtureCase>,
}

/// One serialized case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Case label.
    pub label: String,
    /// Per-component absolute tolerance.
    pub tolerance: f32,
    /// `[w, x, y, z]`.
    pub quaternion: [f32; 4],
    /// `[x, y, z, angle]`.
    pub axis_angle: [f32; 4],
    /// `[x, y, z]`.
    pub rotation_vector: [f32; 3],
    /// Row-major rows.
    pub matrix: [[f32; 3]; 3],
    /// Regimes chosen during conversion.
    pub regimes: Regimes,
}

impl FixtureCase {
    /// Reassembles the expected encodings.
    pub fn expected(&self) -> Expected {
        let [w, x, y, z] = self.quaternion;
        let [ax, ay, az, angle] = self.axis_angle;
        Expected {
            quaternion: Quaternion::new(w, x, y, z),
            axis_angle: AxisAngle::new(ax, ay, az, angle),
            rotation_vector: RotationVector::from(self.rotation_vector),
            matrix: RotationMatrix::from(self.matrix),
        }
    }
}

impl From<&TestCase> for FixtureCase {
    fn from(case: &TestCase) -> Self {
        let e = case.expected();
        Self {
            label: case.label().to_owned(),
            tolerance: case.tolerance(),
            quaternion: e.quaternion.to_array(),
            axis_angle: e.axis_angle.to_array(),
            rotation_vector: e.rotation_vector.to_array(),
            matrix: e.matrix.rows(),
            regimes: case.regimes(),
        }
    }
}

impl FixtureFile {
    /// Snapshots a catalog.
    pub fn new(catalog: &Catalog, generator: &GeneratorConfig) -> Self {
        Self {
            version: FIXTURE_VERSION,
            generator: generator.clone(),
            cases: catalog.iter().map(FixtureCase::from).collect(),
        }
    }
}

/// Pretty-printed JSON with a trailing newline.
pub fn render(catalog: &Catalog, generator: &GeneratorConfig) -> Result<String, serde_json::Error> {
    let mut out = serde_json::to_string_pretty(&FixtureFile::new(catalog, generator))?;
    out.push('\n');
    Ok(out)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn fixture_reloads_exactly() {
        let cfg = GeneratorConfig {
            random_count: 2,
            ..GeneratorConfig::default()
        };
        let catalog = Catalog::standard(&cfg, &mut cfg.prng()).unwrap();
        let text = render(&catalog, &cfg).unwrap();
        let file: FixtureFile = serde_json::from_str(&text).unwrap();
        assert_eq!(file.version, FIXTURE_VERSION);
        assert_eq!(file.generator, cfg);
        assert_eq!(file.cases.len(), catalog.len());
        for (fixture, case) in file.cases.iter().zip(&catalog) {
            assert_eq!(fixture.label, case.label());
            assert_eq!(&fixture.expected(), case.expected());
        }
    }
}
