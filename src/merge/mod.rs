//! Merge engine: sources -> accumulator -> patch overlay

pub mod accumulator;
pub mod engine;
pub mod patch;

pub use accumulator::{Accumulator, UserRow};
pub use engine::merge_source;
pub use patch::apply_patch;

use crate::domain::{Config, SourceEntry};
use crate::error::MergeResult;
use crate::resolve::{resolve_patch, resolve_sources};
use std::path::PathBuf;

/// Counters collected over one merge run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub sources_resolved: usize,
    pub sources_skipped: usize,
    pub rows_merged: usize,
    pub blank_usernames_skipped: usize,
    pub patch_rows_applied: usize,
    pub patch_rows_skipped: usize,
}

/// Everything the output stage needs, plus diagnostics.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub headers: Vec<String>,
    pub accumulator: Accumulator,
    pub sources: Vec<SourceEntry>,
    pub patch: Option<PathBuf>,
    pub stats: MergeStats,
}

/// Output header: the output username column, then one caption per resolved
/// source in declaration order.
pub fn header_list(output_username: &str, sources: &[SourceEntry]) -> Vec<String> {
    std::iter::once(output_username.to_string())
        .chain(sources.iter().filter(|s| s.is_resolved()).filter_map(|s| s.caption.clone()))
        .collect()
}

/// Run a full merge: resolve, fold every source in order, then apply the patch.
///
/// Any unreadable file, parse error or missing column aborts the run.
pub fn run_merge(config: &Config) -> MergeResult<MergeOutcome> {
    let sources = resolve_sources(config)?;
    let patch = resolve_patch(config)?;
    let headers = header_list(config.output.username(), &sources);

    let mut stats = MergeStats::default();
    let mut accumulator = Accumulator::new();

    for source in &sources {
        if source.is_resolved() {
            stats.sources_resolved += 1;
            merge_source(&mut accumulator, source, &mut stats)?;
        } else {
            stats.sources_skipped += 1;
        }
    }

    if let Some(path) = &patch {
        apply_patch(&mut accumulator, path, &headers, &mut stats)?;
    }

    Ok(MergeOutcome { headers, accumulator, sources, patch, stats })
}
