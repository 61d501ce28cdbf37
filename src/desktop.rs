//! XDG desktop-entry generation.
//!
//! The generated entry launches `burrow run <instance>`. It is either
//! synthesized from scratch or derived from an existing entry, resolved in
//! order: explicit name-or-path, the profile's entry name, the instance
//! config's entry name.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};

use crate::instance::Instance;
use crate::paths::BurrowPaths;
use crate::profile::Profile;

const SYSTEM_APPLICATIONS_DIR: &str = "/usr/share/applications";

/// Write the desktop entry for `instance` and return its path.
pub fn generate_entry(
    paths: &BurrowPaths,
    instance: &Instance,
    profile: Option<&Profile>,
    desktop_entry: Option<&str>,
) -> Result<PathBuf> {
    let source_name = desktop_entry
        .map(String::from)
        .or_else(|| profile.and_then(|p| p.desktop_entry_name.clone()))
        .or_else(|| {
            instance
                .load_config()
                .ok()
                .and_then(|config| config.desktop_entry_name)
        });

    let content = match source_name {
        Some(name) => rewrite_entry(&find_entry(paths, &name)?, &instance.name)?,
        None => synthesize_entry(&instance.name),
    };

    let applications_dir = paths.applications_dir()?;
    fs::create_dir_all(&applications_dir)
        .with_context(|| format!("Failed to create {}", applications_dir.display()))?;
    let target = applications_dir.join(format!("burrow-{}.desktop", instance.name));
    fs::write(&target, content)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    Ok(target)
}

/// Resolve a desktop entry by path or by name in the applications dirs.
fn find_entry(paths: &BurrowPaths, name_or_path: &str) -> Result<PathBuf> {
    let as_path = Path::new(name_or_path);
    if as_path.is_file() {
        return Ok(as_path.to_path_buf());
    }
    let file_name = if name_or_path.ends_with(".desktop") {
        name_or_path.to_string()
    } else {
        format!("{name_or_path}.desktop")
    };
    let mut candidates = vec![PathBuf::from(SYSTEM_APPLICATIONS_DIR).join(&file_name)];
    if let Ok(user_dir) = paths.applications_dir() {
        candidates.insert(0, user_dir.join(&file_name));
    }
    for candidate in &candidates {
        if candidate.is_file() {
            return Ok(candidate.clone());
        }
    }
    bail!("No desktop entry found for {name_or_path}");
}

/// Rewrite an existing entry to launch through burrow. `Exec` lines are
/// replaced wholesale (field codes included); `DBusActivatable` must go or
/// the launcher would bypass Exec entirely.
fn rewrite_entry(source: &Path, instance_name: &str) -> Result<String> {
    let text = fs::read_to_string(source)
        .with_context(|| format!("Failed to read {}", source.display()))?;
    let mut rewritten = String::new();
    for line in text.lines() {
        if line.starts_with("Exec=") {
            rewritten.push_str(&format!("Exec=burrow run {instance_name}\n"));
        } else if line.starts_with("Name=") {
            rewritten.push_str(&format!("{line} ({instance_name} sandbox)\n"));
        } else if line.starts_with("DBusActivatable=") || line.starts_with("TryExec=") {
            continue;
        } else {
            rewritten.push_str(line);
            rewritten.push('\n');
        }
    }
    Ok(rewritten)
}

fn synthesize_entry(instance_name: &str) -> String {
    format!(
        "[Desktop Entry]\n\
         Type=Application\n\
         Name={instance_name} (burrow)\n\
         Exec=burrow run {instance_name}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn synthesized_entry_launches_through_burrow() {
        let entry = synthesize_entry("web");
        assert!(entry.starts_with("[Desktop Entry]\n"));
        assert!(entry.contains("Exec=burrow run web\n"));
    }

    #[test]
    fn rewrite_replaces_exec_and_drops_activation() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("firefox.desktop");
        fs::write(
            &source,
            "[Desktop Entry]\n\
             Name=Firefox\n\
             TryExec=/usr/bin/firefox\n\
             Exec=/usr/bin/firefox %u\n\
             DBusActivatable=true\n\
             Icon=firefox\n",
        )
        .unwrap();

        let rewritten = rewrite_entry(&source, "web").unwrap();
        assert!(rewritten.contains("Exec=burrow run web\n"));
        assert!(rewritten.contains("Name=Firefox (web sandbox)\n"));
        assert!(rewritten.contains("Icon=firefox\n"));
        assert!(!rewritten.contains("TryExec"));
        assert!(!rewritten.contains("DBusActivatable"));
        assert!(!rewritten.contains("%u"));
    }

    #[test]
    fn find_entry_accepts_a_direct_path() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("app.desktop");
        fs::write(&source, "[Desktop Entry]\n").unwrap();
        let paths = BurrowPaths::with_dirs(dir.path().join("data"), dir.path().join("run"));
        assert_eq!(
            find_entry(&paths, source.to_str().unwrap()).unwrap(),
            source
        );
    }

    #[test]
    fn find_entry_fails_for_unknown_names() {
        let dir = TempDir::new().unwrap();
        let paths = BurrowPaths::with_dirs(dir.path().join("data"), dir.path().join("run"));
        assert!(find_entry(&paths, "no-such-entry").is_err());
    }
}
