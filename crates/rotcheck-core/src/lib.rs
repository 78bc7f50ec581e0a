// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! rotcheck-core: reference-checked rotation catalog for single-precision
//! rotation libraries.
//!
//! A trusted `f64` source ([`oracle`]) builds ground-truth rotations; the
//! [`convert`] module derives their four `f32` encodings with explicit
//! degeneracy handling; [`catalog`] enumerates the ordinary, boundary and
//! pathological cases; [`compare`] decides equivalence across multi-valued
//! encodings; [`verify`] runs a candidate through every round trip and
//! [`emit`] writes the catalog out as a Rust test module or JSON fixture.
//!
//! Everything is sequential and deterministic: the only state crossing
//! cases is the seeded [`math::Prng`] the caller passes in.
#![forbid(unsafe_code)]

pub mod catalog;
pub mod compare;
pub mod config;
pub mod convert;
pub mod emit;
pub mod math;
pub mod oracle;
pub mod rotation;
pub mod verify;

pub use catalog::{Catalog, CatalogBuilder, CatalogError, TestCase};
pub use compare::{equivalent, Branch, Equivalence, Mismatch, Representation};
pub use config::{ConfigError, GeneratorConfig};
pub use convert::{Expected, Regimes};
pub use emit::{EmitError, Format};
pub use math::{AngleRegime, Prng};
pub use oracle::{CanonicalRotation, ReferenceRotation, SourceError};
pub use rotation::{AxisAngle, Quaternion, Rotation, RotationError, RotationMatrix, RotationVector};
pub use verify::{verify_case, verify_catalog, Candidate, CaseReport, Comparison, Summary};
