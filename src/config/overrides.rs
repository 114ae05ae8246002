//! Command-line overrides on top of the loaded configuration

use crate::domain::Config;

/// Settings given on the command line that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub patch: Option<String>,
    pub base_dir: Option<String>,
}

pub fn apply_cli_overrides(mut config: Config, overrides: &CliOverrides) -> Config {
    if let Some(patch) = &overrides.patch {
        tracing::debug!("Patch pattern overridden on command line: {}", patch);
        config.patch = Some(patch.clone());
    }
    if let Some(base_dir) = &overrides.base_dir {
        tracing::debug!("Base directory overridden on command line: {}", base_dir);
        config.defaults.path = Some(base_dir.clone());
    }
    config
}
