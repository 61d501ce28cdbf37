//! The `list` subcommand.

use anyhow::Result;

use crate::ListWhat;
use burrow::instance::InstanceStore;
use burrow::paths::BurrowPaths;
use burrow::profile::ProfileCatalog;
use burrow::services::SERVICE_NAMES;

pub fn cmd_list(list_what: ListWhat) -> Result<()> {
    let paths = BurrowPaths::resolve()?;
    let names: Vec<String> = match list_what {
        ListWhat::Instances => InstanceStore::new(paths).instance_names(),
        ListWhat::Profiles => ProfileCatalog::new(&paths).profile_names(),
        ListWhat::Services => SERVICE_NAMES.iter().map(|s| s.to_string()).collect(),
    };
    for name in names {
        println!("{name}");
    }
    Ok(())
}
