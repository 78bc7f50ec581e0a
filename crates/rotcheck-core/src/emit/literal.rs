// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Single-precision literal rendering.

use crate::math;

/// Renders `value` as a Rust `f32` literal.
///
/// Zero and `±1` use their short forms; everything else uses the shortest
/// representation that round-trips, suffixed `_f32`. Signed zero renders as
/// `0.0_f32`.
pub fn f32_literal(value: f32) -> String {
    let v = math::canonicalize_zero(value);
    if v.is_nan() {
        return "f32::NAN".to_owned();
    }
    if v.is_infinite() {
        return if v > 0.0 { "f32::INFINITY" } else { "f32::NEG_INFINITY" }.to_owned();
    }
    if v == 0.0 {
        "0.0_f32".to_owned()
    } else if v == 1.0 {
        "1.0_f32".to_owned()
    } else if v == -1.0 {
        "-1.0_f32".to_owned()
    } else {
        format!("{v:?}_f32")
    }
}
