//! Sources command implementation

use anyhow::Result;
use clap::Args;

use super::utils::ConfigArgs;
use crate::merge::header_list;
use crate::resolve::{resolve_patch, resolve_sources};

#[derive(Args)]
pub struct SourcesArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

pub fn run(args: SourcesArgs) -> Result<()> {
    let config = args.config.load()?;
    let entries = resolve_sources(&config)?;
    let patch = resolve_patch(&config)?;

    println!("Configuration: {}", args.config.config.display());
    let base_dir = config.defaults.base_dir();
    if base_dir.as_os_str().is_empty() {
        println!("Base directory: (working directory)");
    } else {
        println!("Base directory: {}", base_dir.display());
    }

    println!("Sources:");
    for entry in &entries {
        match (&entry.path, entry.ordinal) {
            (Some(path), Some(ordinal)) => println!(
                "  [{}] {} -> {} (caption '{}', username '{}', value '{}')",
                ordinal,
                entry.pattern,
                path.display(),
                entry.caption.as_deref().unwrap_or(""),
                entry.username_column,
                entry.value_column
            ),
            _ => println!("  [-] {} -> no match", entry.pattern),
        }
    }

    match (&config.patch, &patch) {
        (Some(pattern), Some(path)) => println!("Patch: {} -> {}", pattern, path.display()),
        (Some(pattern), None) => println!("Patch: {} -> no match", pattern),
        (None, _) => println!("Patch: (none)"),
    }

    println!("Output columns: {}", header_list(config.output.username(), &entries).join(","));

    Ok(())
}
