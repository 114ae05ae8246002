//! Utility functions

pub mod encoding;
pub mod paths;

pub use encoding::read_text;
pub use paths::normalize_path;
