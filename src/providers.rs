//! Filesystem-backed candidate providers for completion.

use crate::completion::CandidateProviders;
use crate::instance::InstanceStore;
use crate::paths::BurrowPaths;
use crate::profile::ProfileCatalog;

/// Enumerates instances and profiles straight from disk on every call.
/// Enumeration problems degrade to empty lists; completion never errors.
#[derive(Debug, Clone)]
pub struct DiskProviders {
    store: InstanceStore,
    profiles: ProfileCatalog,
}

impl DiskProviders {
    pub fn new(paths: &BurrowPaths) -> Self {
        Self {
            store: InstanceStore::new(paths.clone()),
            profiles: ProfileCatalog::new(paths),
        }
    }
}

impl CandidateProviders for DiskProviders {
    fn instance_names(&self) -> Vec<String> {
        self.store.instance_names()
    }

    fn profile_names(&self) -> Vec<String> {
        self.profiles.profile_names()
    }
}
