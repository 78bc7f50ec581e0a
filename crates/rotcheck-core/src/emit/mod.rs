// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Case emitters: turn a catalog into a consumable artifact.

use core::fmt;

use thiserror::Error;

use crate::catalog::Catalog;
use crate::config::GeneratorConfig;

pub mod json;
mod literal;
pub mod rust;

pub use literal::f32_literal;

/// Output artifact kind.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Format {
    /// Executable Rust test module.
    Rust,
    /// JSON fixture file.
    Json,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rust => "rust",
            Self::Json => "json",
        })
    }
}

/// Error raised while rendering an artifact.
#[derive(Debug, Error)]
pub enum EmitError {
    /// Text formatting failed.
    #[error("format error: {0}")]
    Fmt(#[from] fmt::Error),
    /// JSON serialization failed.
    #[error("serde error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Renders `catalog` in `format`. `generator` is recorded in JSON fixtures.
pub fn render(
    catalog: &Catalog,
    generator: &GeneratorConfig,
    format: Format,
) -> Result<String, EmitError> {
    Ok(match format {
        Format::Rust => rust::render(catalog)?,
        Format::Json => json::render(catalog, generator)?,
    })
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn render_dispatches_on_format() {
        let catalog = Catalog::builder(1e-5).finish();
        let config = GeneratorConfig::default();
        let rust = render(&catalog, &config, Format::Rust).unwrap();
        assert!(rust.starts_with("// @generated"));
        let json = render(&catalog, &config, Format::Json).unwrap();
        assert!(json.contains("\"version\": 1"), "{json}");
        assert_eq!(Format::Json.to_string(), "json");
    }
}
