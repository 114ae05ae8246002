//! Resolved source entries

use std::path::PathBuf;

/// A configured source after pattern resolution.
///
/// Built once per run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    pub pattern: String,
    /// Most recent matching file, `None` when the pattern matched nothing.
    pub path: Option<PathBuf>,
    /// 1-based position among resolved sources.
    pub ordinal: Option<usize>,
    pub username_column: String,
    pub value_column: String,
    /// Output column name. Always set for resolved sources.
    pub caption: Option<String>,
}

impl SourceEntry {
    pub fn is_resolved(&self) -> bool {
        self.path.is_some()
    }
}

/// Caption used for a resolved source that does not name one.
///
/// The ordinal is right-padded with zeros (`1` -> `Header100`), so ordinals
/// 1 and 10 produce the same caption.
pub fn fallback_caption(ordinal: usize) -> String {
    format!("Header{:0<3}", ordinal)
}
