//! Persistent instance storage.
//!
//! One directory per instance under `instances/`, holding the TOML config
//! and the private `home/` that gets bound into the sandbox. Running status
//! is the presence of the instance's helper socket in the runtime dir.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::paths::BurrowPaths;
use crate::profile::Profile;

/// Per-instance `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstanceConfig {
    /// Default command run inside the sandbox, as words.
    #[serde(default)]
    pub executable_name: Vec<String>,
    /// Desktop entry to derive the generated entry from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desktop_entry_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Instance {
    pub name: String,
    dir: PathBuf,
}

impl Instance {
    pub fn config_path(&self) -> PathBuf {
        self.dir.join("config.toml")
    }

    pub fn home_dir(&self) -> PathBuf {
        self.dir.join("home")
    }

    pub fn load_config(&self) -> Result<InstanceConfig> {
        let path = self.config_path();
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn save_config(&self, config: &InstanceConfig) -> Result<()> {
        let text = toml::to_string_pretty(config).context("Failed to serialize config")?;
        let path = self.config_path();
        fs::write(&path, text).with_context(|| format!("Failed to write {}", path.display()))
    }
}

#[derive(Debug, Clone)]
pub struct InstanceStore {
    paths: BurrowPaths,
}

impl InstanceStore {
    pub fn new(paths: BurrowPaths) -> Self {
        Self { paths }
    }

    /// Sorted instance names. A missing instances directory is an empty
    /// store, not an error.
    pub fn instance_names(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(self.paths.instances_dir()) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        names.sort_unstable();
        names
    }

    pub fn exists(&self, name: &str) -> bool {
        self.paths.instances_dir().join(name).is_dir()
    }

    pub fn get(&self, name: &str) -> Result<Instance> {
        let dir = self.paths.instances_dir().join(name);
        if !dir.is_dir() {
            bail!("No instance named {name}");
        }
        Ok(Instance {
            name: name.to_string(),
            dir,
        })
    }

    /// Create the directory, private home and config for a new instance.
    /// Refuses to overwrite an existing one.
    pub fn create(&self, name: &str, profile: Option<&Profile>) -> Result<Instance> {
        validate_name(name)?;
        let dir = self.paths.instances_dir().join(name);
        if dir.exists() {
            bail!("Instance {name} already exists");
        }
        let instance = Instance {
            name: name.to_string(),
            dir,
        };
        fs::create_dir_all(instance.home_dir())
            .with_context(|| format!("Failed to create instance directory for {name}"))?;

        let config = match profile {
            Some(profile) => InstanceConfig {
                executable_name: profile.executable_name.clone(),
                desktop_entry_name: profile.desktop_entry_name.clone(),
            },
            None => InstanceConfig::default(),
        };
        instance.save_config(&config)?;
        Ok(instance)
    }

    pub fn is_running(&self, name: &str) -> bool {
        self.paths.helper_socket(name).exists()
    }

    pub fn helper_socket(&self, name: &str) -> PathBuf {
        self.paths.helper_socket(name)
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("Instance name must not be empty");
    }
    if name.starts_with('.') || name.contains('/') || name.contains('\0') {
        bail!("Invalid instance name: {name}");
    }
    Ok(())
}
