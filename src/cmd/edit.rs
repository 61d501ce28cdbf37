//! The `edit` subcommand — edit an instance config in `$EDITOR`.
//!
//! The config is copied to a scratch file first and only written back once
//! the edited result parses, so an aborted or broken edit never corrupts
//! the real config.

use anyhow::{Context, Result, bail};
use std::fs;
use std::process::Command;

use burrow::instance::{InstanceConfig, InstanceStore};
use burrow::paths::BurrowPaths;

pub fn cmd_edit(instance_name: &str) -> Result<()> {
    let paths = BurrowPaths::resolve()?;
    let instance = InstanceStore::new(paths).get(instance_name)?;
    let config_path = instance.config_path();

    let scratch = std::env::temp_dir().join(format!(
        "burrow-edit-{}-{}.toml",
        instance_name,
        std::process::id()
    ));
    fs::copy(&config_path, &scratch)
        .with_context(|| format!("Failed to copy {}", config_path.display()))?;

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    let status = Command::new(&editor)
        .arg(&scratch)
        .status()
        .with_context(|| format!("Failed to launch editor {editor}"))?;
    if !status.success() {
        let _ = fs::remove_file(&scratch);
        bail!("Editor exited with {status}; config left unchanged");
    }

    let edited = fs::read_to_string(&scratch)
        .with_context(|| format!("Failed to read {}", scratch.display()))?;
    let parsed: std::result::Result<InstanceConfig, _> = toml::from_str(&edited);
    if let Err(parse_err) = parsed {
        let _ = fs::remove_file(&scratch);
        bail!("Edited config does not parse, config left unchanged: {parse_err}");
    }

    fs::write(&config_path, edited)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    let _ = fs::remove_file(&scratch);
    println!("Updated config for {instance_name}");
    Ok(())
}
