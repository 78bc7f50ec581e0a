// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Generator settings: seed, random sample count, and tolerances.
//!
//! Stored as JSON; missing fields take their defaults so a partial file only
//! overrides what it names.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::math::Prng;

/// Error type for config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error while reading.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization/deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Parsed but unusable (non-positive or non-finite tolerance).
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Catalog generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Seed expanded into the PRNG state via SplitMix64.
    pub seed: u64,
    /// Number of seeded random rotations appended to the catalog.
    pub random_count: usize,
    /// Per-component absolute tolerance for ordinary cases.
    pub default_tolerance: f32,
    /// Tolerance for the near-unit-norm quaternion case, where rounding in
    /// the vector part is amplified into the reconstructed scalar.
    pub loose_tolerance: f32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            random_count: 10,
            default_tolerance: 1e-5,
            loose_tolerance: 5.5e-5,
        }
    }
}

impl GeneratorConfig {
    /// Parses and validates a JSON document.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_slice(bytes)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let bytes = fs::read(path)?;
        Self::from_json_slice(&bytes)
    }

    /// Rejects tolerances that would make every comparison pass or fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, tol) in [
            ("default_tolerance", self.default_tolerance),
            ("loose_tolerance", self.loose_tolerance),
        ] {
            if !(tol.is_finite() && tol > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be finite and positive, got {tol}"
                )));
            }
        }
        Ok(())
    }

    /// Fresh generator seeded from [`GeneratorConfig::seed`].
    pub fn prng(&self) -> Prng {
        Prng::from_seed_u64(self.seed)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg = GeneratorConfig::from_json_slice(br#"{ "seed": 7 }"#).unwrap();
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.random_count, 10);
        assert_eq!(cfg.loose_tolerance, 5.5e-5);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = GeneratorConfig::from_json_slice(br#"{ "sede": 7 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Serde(_)));
    }

    #[test]
    fn zero_tolerance_is_invalid() {
        let err = GeneratorConfig::from_json_slice(br#"{ "default_tolerance": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = GeneratorConfig::load("/nonexistent/rotcheck.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
