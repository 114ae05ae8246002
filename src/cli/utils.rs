//! Shared CLI utilities.

use clap::Args;
use std::path::PathBuf;

use crate::config::{apply_cli_overrides, load_config, CliOverrides, DEFAULT_CONFIG_FILE};
use crate::domain::Config;

/// Options that locate and adjust the job configuration.
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// YAML (or TOML) job description
    #[arg(
        short = 'y',
        long = "config",
        value_name = "FILE",
        env = "CSV_MERGE_CONFIG",
        default_value = DEFAULT_CONFIG_FILE
    )]
    pub config: PathBuf,

    /// Patch file pattern, replacing the configured `patch`
    #[arg(short = 'p', long, value_name = "PATTERN")]
    pub patch: Option<String>,

    /// Directory patterns are resolved against, replacing `defaults.path`
    #[arg(long, value_name = "DIR")]
    pub base_dir: Option<String>,
}

impl ConfigArgs {
    /// Load the configuration file and apply the command-line overrides.
    pub fn load(&self) -> anyhow::Result<Config> {
        tracing::debug!("Configuration file: '{}'", self.config.display());
        let config = load_config(&self.config)?;
        let overrides = CliOverrides { patch: self.patch.clone(), base_dir: self.base_dir.clone() };
        Ok(apply_cli_overrides(config, &overrides))
    }
}
