//! Profile catalog.
//!
//! Profiles are TOML templates for new instances. User profiles live under
//! the data home, system profiles under `/usr/share/burrow/profiles`; a
//! user profile shadows a system profile of the same name.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::paths::{BurrowPaths, SYSTEM_PROFILES_DIR};

#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    /// Command the sandbox runs by default, as words.
    #[serde(default)]
    pub executable_name: Vec<String>,
    /// Desktop entry the generated entry derives from.
    #[serde(default)]
    pub desktop_entry_name: Option<String>,
    /// Hints printed after `create`, e.g. which host files to import.
    #[serde(default)]
    pub import_tips: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ProfileCatalog {
    user_dir: PathBuf,
    system_dir: PathBuf,
}

impl ProfileCatalog {
    pub fn new(paths: &BurrowPaths) -> Self {
        Self {
            user_dir: paths.user_profiles_dir(),
            system_dir: PathBuf::from(SYSTEM_PROFILES_DIR),
        }
    }

    #[cfg(test)]
    fn with_dirs(user_dir: PathBuf, system_dir: PathBuf) -> Self {
        Self {
            user_dir,
            system_dir,
        }
    }

    /// Sorted, deduplicated profile names from both directories. Missing
    /// directories contribute nothing.
    pub fn profile_names(&self) -> Vec<String> {
        let mut names = BTreeSet::new();
        for dir in [&self.user_dir, &self.system_dir] {
            collect_profile_names(dir, &mut names);
        }
        names.into_iter().collect()
    }

    pub fn get(&self, name: &str) -> Result<Profile> {
        let file_name = format!("{name}.toml");
        for dir in [&self.user_dir, &self.system_dir] {
            let path = dir.join(&file_name);
            if path.is_file() {
                let text = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                return toml::from_str(&text)
                    .with_context(|| format!("Failed to parse {}", path.display()));
            }
        }
        bail!("No profile named {name}");
    }
}

fn collect_profile_names(dir: &Path, names: &mut BTreeSet<String>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.filter_map(|entry| entry.ok()) {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "toml") {
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.insert(stem.to_string());
            }
        }
    }
}
