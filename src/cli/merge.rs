//! Default command: run the merge and emit the CSV

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use super::utils::ConfigArgs;
use crate::merge::run_merge;
use crate::render::render_csv;

#[derive(Args, Debug)]
pub struct MergeArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Write the merged CSV to this file instead of standard output
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

pub fn run(args: MergeArgs) -> Result<()> {
    let config = args.config.load()?;
    let outcome = run_merge(&config)?;

    let stats = &outcome.stats;
    tracing::info!(
        "Merged {} source(s), {} skipped: {} row(s) for {} user(s); {} blank username(s) skipped",
        stats.sources_resolved,
        stats.sources_skipped,
        stats.rows_merged,
        outcome.accumulator.len(),
        stats.blank_usernames_skipped
    );
    let unmatched: Vec<&str> = outcome
        .sources
        .iter()
        .filter(|source| !source.is_resolved())
        .map(|source| source.pattern.as_str())
        .collect();
    if !unmatched.is_empty() {
        tracing::info!("No files matched: {}", unmatched.join(", "));
    }
    if let Some(patch) = &outcome.patch {
        tracing::info!(
            "Patch {}: {} row(s) applied, {} skipped",
            patch.display(),
            stats.patch_rows_applied,
            stats.patch_rows_skipped
        );
    }

    // Rendered in full first so a failure never leaves partial output behind
    let csv = render_csv(&outcome.headers, &outcome.accumulator, config.output.username());

    match args.output {
        Some(path) => fs::write(&path, csv)
            .with_context(|| format!("Failed writing output: {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(csv.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
