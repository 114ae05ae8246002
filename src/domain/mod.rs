//! Core data types shared across the merge pipeline

pub mod config;
pub mod source;

pub use config::{Config, Defaults, OutputSpec, SourceSpec};
pub use source::{fallback_caption, SourceEntry};

/// Username column assumed when neither the source nor `defaults` names one.
pub const DEFAULT_USERNAME_COLUMN: &str = "Username";

/// Value column assumed when neither the source nor `defaults` names one.
pub const DEFAULT_VALUE_COLUMN: &str = "Value";

/// Fixed header of a patch file.
pub const PATCH_USERNAME_COLUMN: &str = "Username";
pub const PATCH_CAPTION_COLUMN: &str = "Caption";
pub const PATCH_VALUE_COLUMN: &str = "Value";
