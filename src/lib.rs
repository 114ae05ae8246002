//! csv-merge: consolidate versioned per-user CSV snapshots
//!
//! Each configured source pattern resolves to its most recent file, contributes
//! one output column keyed by username, and a patch file of manual corrections
//! is applied last.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod merge;
pub mod quoted;
pub mod render;
pub mod resolve;
pub mod utils;

pub use error::{MergeError, MergeResult};
pub use merge::{run_merge, Accumulator, MergeOutcome, MergeStats};
