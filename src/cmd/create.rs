//! The `create` subcommand.

use anyhow::{Context, Result};

use burrow::desktop;
use burrow::instance::InstanceStore;
use burrow::paths::BurrowPaths;
use burrow::profile::ProfileCatalog;

pub fn cmd_create(
    new_instance_name: &str,
    profile_name: Option<&str>,
    no_desktop_entry: bool,
) -> Result<()> {
    let paths = BurrowPaths::resolve()?;
    let store = InstanceStore::new(paths.clone());

    let profile = match profile_name {
        Some(name) => Some(
            ProfileCatalog::new(&paths)
                .get(name)
                .with_context(|| format!("Failed to resolve profile {name}"))?,
        ),
        None => None,
    };

    let instance = store.create(new_instance_name, profile.as_ref())?;
    println!("Created instance {new_instance_name}");

    if !no_desktop_entry {
        let entry = desktop::generate_entry(&paths, &instance, profile.as_ref(), None)?;
        println!("Desktop entry written to {}", entry.display());
    }

    if let Some(tips) = profile.as_ref().and_then(|p| p.import_tips.as_deref()) {
        println!();
        println!("{tips}");
    }
    Ok(())
}
