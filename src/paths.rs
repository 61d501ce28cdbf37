//! Directory resolution for instance data, profiles, sockets and entries.
//!
//! All locations resolve once at startup and honor environment overrides
//! (`BURROW_DATA_HOME`, `BURROW_RUNTIME_DIR`) so tests and packaging can
//! redirect them without touching the user's real data.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Profiles shipped by the distribution.
pub const SYSTEM_PROFILES_DIR: &str = "/usr/share/burrow/profiles";

#[derive(Debug, Clone)]
pub struct BurrowPaths {
    data_home: PathBuf,
    runtime_dir: PathBuf,
}

impl BurrowPaths {
    pub fn resolve() -> Result<Self> {
        let data_home = match std::env::var_os("BURROW_DATA_HOME") {
            Some(dir) => PathBuf::from(dir),
            None => dirs::data_dir()
                .context("Failed to resolve the user data directory")?
                .join("burrow"),
        };
        let runtime_dir = match std::env::var_os("BURROW_RUNTIME_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => match dirs::runtime_dir() {
                Some(dir) => dir.join("burrow"),
                // No XDG runtime dir (e.g. a bare login shell): fall back to
                // a per-user directory under the system temp dir.
                None => {
                    let user = std::env::var("USER").unwrap_or_else(|_| "nobody".to_string());
                    std::env::temp_dir().join(format!("burrow-{user}"))
                }
            },
        };
        Ok(Self {
            data_home,
            runtime_dir,
        })
    }

    /// Construct from explicit directories. Intended for tests.
    pub fn with_dirs(data_home: impl Into<PathBuf>, runtime_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_home: data_home.into(),
            runtime_dir: runtime_dir.into(),
        }
    }

    pub fn data_home(&self) -> &Path {
        &self.data_home
    }

    pub fn instances_dir(&self) -> PathBuf {
        self.data_home.join("instances")
    }

    pub fn user_profiles_dir(&self) -> PathBuf {
        self.data_home.join("profiles")
    }

    /// The per-instance helper socket. Its presence marks the instance as
    /// running and it carries the control channel.
    pub fn helper_socket(&self, instance_name: &str) -> PathBuf {
        self.runtime_dir.join(instance_name).join("helper.sock")
    }

    /// Where generated desktop entries land.
    pub fn applications_dir(&self) -> Result<PathBuf> {
        Ok(dirs::data_dir()
            .context("Failed to resolve the user data directory")?
            .join("applications"))
    }
}
