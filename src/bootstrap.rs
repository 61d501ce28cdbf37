//! Cold-start of a sandboxed instance via bwrap.
//!
//! Builds the bwrap argument vector (base read-only binds, fresh proc/dev
//! and tmpfs, the instance home bound at `/home/user`, debug knobs, any
//! caller-supplied extra arguments, then the command) and spawns it. With
//! `dry_run` the vector is printed and nothing is spawned. The base
//! argument set is deliberately minimal; isolation policy is not defined
//! here.

use anyhow::{Context, Result, bail};
use std::path::PathBuf;

use crate::instance::{Instance, InstanceConfig};

/// In-sandbox mount point of the helper script.
const HELPER_PATH: &str = "/run/burrow/helper";

#[derive(Debug, Clone, Default)]
pub struct BootstrapOptions {
    pub debug_shell: bool,
    pub debug_helper_script: Option<PathBuf>,
    pub debug_log_dbus: bool,
    pub dry_run: bool,
    /// Tri-state: `None` = no extra arguments at all; `Some` = extra
    /// arguments were requested, possibly zero of them.
    pub extra_bwrap_args: Option<Vec<String>>,
}

/// Assemble the full bwrap argument vector for one launch.
pub fn build_bwrap_args(
    instance: &Instance,
    config: &InstanceConfig,
    args_to_instance: &[String],
    options: &BootstrapOptions,
) -> Result<Vec<String>> {
    let home = instance.home_dir();
    let mut argv: Vec<String> = [
        "--ro-bind", "/usr", "/usr",
        "--symlink", "usr/bin", "/bin",
        "--symlink", "usr/lib", "/lib",
        "--symlink", "usr/lib64", "/lib64",
        "--ro-bind", "/etc", "/etc",
        "--proc", "/proc",
        "--dev", "/dev",
        "--tmpfs", "/tmp",
        "--unshare-all",
        "--die-with-parent",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    argv.push("--bind".to_string());
    argv.push(home.display().to_string());
    argv.push("/home/user".to_string());
    argv.extend(["--setenv", "HOME", "/home/user"].map(String::from));

    if let Some(script) = &options.debug_helper_script {
        argv.push("--ro-bind".to_string());
        argv.push(script.display().to_string());
        argv.push(HELPER_PATH.to_string());
    }
    if options.debug_log_dbus {
        argv.extend(["--setenv", "BURROW_LOG_DBUS", "1"].map(String::from));
    }
    if let Some(extra) = &options.extra_bwrap_args {
        argv.extend(extra.iter().cloned());
    }

    if options.debug_shell {
        argv.push("/bin/sh".to_string());
    } else {
        let command = if args_to_instance.is_empty() {
            config.executable_name.as_slice()
        } else {
            args_to_instance
        };
        if command.is_empty() {
            bail!(
                "Instance {} has no configured executable and no command was given",
                instance.name
            );
        }
        argv.extend(command.iter().cloned());
    }

    Ok(argv)
}

/// Launch the instance, or print the would-be invocation under `dry_run`.
pub async fn run_init(
    instance: &Instance,
    args_to_instance: &[String],
    options: &BootstrapOptions,
) -> Result<()> {
    let config = instance.load_config()?;
    let argv = build_bwrap_args(instance, &config, args_to_instance, options)?;

    if options.dry_run {
        let mut preview = String::from("bwrap");
        for word in &argv {
            preview.push(' ');
            preview.push_str(word);
        }
        println!("{preview}");
        return Ok(());
    }

    tracing::debug!(instance = %instance.name, argv = ?argv, "spawning bwrap");
    let status = tokio::process::Command::new("bwrap")
        .args(&argv)
        .status()
        .await
        .context("Failed to spawn bwrap")?;
    if !status.success() {
        bail!("bwrap exited with {status}");
    }
    Ok(())
}
