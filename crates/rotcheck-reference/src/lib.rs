// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Runs the emitted reference module against the bundled rotation library.
//!
//! `build.rs` renders the standard catalog into `OUT_DIR`, and the module is
//! included here next to the rotation types it expects, the way a consumer
//! would include it. `cargo test` then compiles and runs one
//! `reference_*` test per catalog case, so an emitter change that breaks the
//! generated code or its assertion helpers fails here.
#![forbid(unsafe_code)]

#[cfg(test)]
use rotcheck_core::rotation::{AxisAngle, Quaternion, Rotation, RotationMatrix, RotationVector};

include!(concat!(env!("OUT_DIR"), "/reference_tests.rs"));
