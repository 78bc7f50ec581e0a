// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
use std::env;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

use rotcheck_core::{emit, Catalog, GeneratorConfig};

fn main() -> Result<(), Box<dyn Error>> {
    // Same module `rotcheck generate --format rust` prints with default settings.
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let config = GeneratorConfig::default();
    let catalog = Catalog::standard(&config, &mut config.prng())?;
    fs::write(
        out_dir.join("reference_tests.rs"),
        emit::rust::render(&catalog)?,
    )?;
    Ok(())
}
