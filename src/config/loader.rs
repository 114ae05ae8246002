//! Config file loading

use crate::domain::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Configuration file used when none is given on the command line.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Load a merge configuration from a YAML or TOML file.
///
/// A missing or unparsable file is an error; there is no fallback to defaults.
pub fn load_config(config_file: &Path) -> Result<Config> {
    if !config_file.is_file() {
        anyhow::bail!("Configuration file does not exist: {}", config_file.display());
    }

    let content = fs::read_to_string(config_file)
        .with_context(|| format!("Failed reading config file: {}", config_file.display()))?;

    let ext = config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();

    let config = match ext.as_str() {
        "yaml" | "yml" => parse_yaml_config(&content, config_file)?,
        "toml" => parse_toml_config(&content, config_file)?,
        other => anyhow::bail!(
            "Unsupported config extension '.{}' for file {}",
            other,
            config_file.display()
        ),
    };

    tracing::debug!("Configuration {}: {:?}", config_file.display(), config);
    Ok(config)
}

fn parse_yaml_config(content: &str, config_file: &Path) -> Result<Config> {
    // A document holding only comments is a valid, all-defaults configuration
    if content.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#') || line == "---"
    }) {
        return Ok(Config::default());
    }

    let raw: serde_yaml::Value = serde_yaml::from_str(content)
        .with_context(|| format!("Invalid YAML syntax: {}", config_file.display()))?;
    if raw.is_null() {
        return Ok(Config::default());
    }

    serde_yaml::from_value(raw)
        .with_context(|| format!("Invalid YAML config: {}", config_file.display()))
}

fn parse_toml_config(content: &str, config_file: &Path) -> Result<Config> {
    toml::from_str(content).with_context(|| format!("Invalid TOML config: {}", config_file.display()))
}
