//! Configuration loading and CLI overrides
//!
//! The configuration file is the base; command-line flags replace the
//! individual settings they name.

pub mod loader;
pub mod overrides;

pub use loader::{load_config, DEFAULT_CONFIG_FILE};
pub use overrides::{apply_cli_overrides, CliOverrides};
