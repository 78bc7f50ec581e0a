// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! rotcheck: generate rotation reference fixtures and verify the bundled
//! single-precision rotation library against them.
//!
//! Artifacts go to stdout (or `-o PATH`); diagnostics go to stderr through
//! `tracing`, filtered by `RUST_LOG` (default `info`). The case count written
//! with `-o` always reaches stderr, whatever the filter.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use rotcheck_core::emit::{self, Format};
use rotcheck_core::{verify, CaseReport, Catalog, GeneratorConfig, Rotation, Summary};

#[derive(Parser, Debug)]
#[command(name = "rotcheck", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the reference catalog as a Rust test module or JSON fixture.
    Generate {
        /// Output file; stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Artifact format.
        #[arg(long, value_enum, default_value_t = FormatArg::Rust)]
        format: FormatArg,
        #[command(flatten)]
        generator: GeneratorArgs,
    },
    /// Run every catalog case through the bundled rotation library.
    Verify {
        #[command(flatten)]
        generator: GeneratorArgs,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Rust,
    Json,
}

impl From<FormatArg> for Format {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Rust => Self::Rust,
            FormatArg::Json => Self::Json,
        }
    }
}

#[derive(Args, Debug)]
struct GeneratorArgs {
    /// JSON config file; the flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for the random samples.
    #[arg(long)]
    seed: Option<u64>,
    /// Number of random samples.
    #[arg(long)]
    random_count: Option<usize>,
}

impl GeneratorArgs {
    fn resolve(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => GeneratorConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(count) = self.random_count {
            config.random_count = count;
        }
        Ok(config)
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Command::Generate {
            output,
            format,
            generator,
        } => {
            generate(output.as_deref(), format.into(), &generator)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Verify { generator } => run_verify(&generator),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn build_catalog(config: &GeneratorConfig) -> Result<Catalog> {
    Catalog::standard(config, &mut config.prng()).context("building edge-case catalog")
}

fn generate(output: Option<&Path>, format: Format, generator: &GeneratorArgs) -> Result<()> {
    let config = generator.resolve()?;
    let catalog = build_catalog(&config)?;
    debug!(%format, cases = catalog.len(), "rendering catalog");
    let text = emit::render(&catalog, &config, format).context("rendering catalog")?;
    match output {
        Some(path) => {
            fs::write(path, &text).with_context(|| format!("writing {}", path.display()))?;
            // Reported whatever RUST_LOG says.
            writeln!(
                io::stderr().lock(),
                "wrote {} reference cases to {}",
                catalog.len(),
                path.display()
            )
            .context("writing to stderr")?;
        }
        None => io::stdout()
            .lock()
            .write_all(text.as_bytes())
            .context("writing to stdout")?,
    }
    Ok(())
}

fn run_verify(generator: &GeneratorArgs) -> Result<ExitCode> {
    let config = generator.resolve()?;
    let catalog = build_catalog(&config)?;
    let reports = verify::verify_catalog::<Rotation>(&catalog);
    let summary = Summary::from_reports(&reports);

    let mut out = io::stdout().lock();
    writeln!(out, "{}", case_table(&reports))?;
    writeln!(out, "{}", branch_table(&summary))?;
    writeln!(
        out,
        "{} cases, {} comparisons, {} failed",
        summary.cases, summary.comparisons, summary.failures
    )?;

    Ok(if summary.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn case_table(reports: &[CaseReport]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["case", "tolerance", "status", "detail"]);
    for report in reports {
        let detail = report
            .failures()
            .filter_map(|c| {
                c.outcome
                    .as_ref()
                    .err()
                    .map(|m| format!("{} -> {}: {m}", c.source, c.target))
            })
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![
            Cell::new(&report.label),
            Cell::new(format!("{:e}", report.tolerance)),
            Cell::new(if report.passed() { "ok" } else { "FAIL" }),
            Cell::new(detail),
        ]);
    }
    table
}

fn branch_table(summary: &Summary) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["branch", "accepted"]);
    for (branch, count) in &summary.branches {
        table.add_row(vec![Cell::new(branch), Cell::new(count)]);
    }
    table
}
