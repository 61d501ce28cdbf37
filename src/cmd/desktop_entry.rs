//! The `generate-desktop-entry` subcommand.

use anyhow::{Context, Result};

use burrow::desktop;
use burrow::instance::InstanceStore;
use burrow::paths::BurrowPaths;
use burrow::profile::ProfileCatalog;

pub fn cmd_generate_desktop_entry(
    instance_name: &str,
    profile_name: Option<&str>,
    desktop_entry: Option<&str>,
) -> Result<()> {
    let paths = BurrowPaths::resolve()?;
    let instance = InstanceStore::new(paths.clone()).get(instance_name)?;

    let profile = match profile_name {
        Some(name) => Some(
            ProfileCatalog::new(&paths)
                .get(name)
                .with_context(|| format!("Failed to resolve profile {name}"))?,
        ),
        None => None,
    };

    let entry = desktop::generate_entry(&paths, &instance, profile.as_ref(), desktop_entry)?;
    println!("Desktop entry written to {}", entry.display());
    Ok(())
}
