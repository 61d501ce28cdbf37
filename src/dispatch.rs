//! Routing for the `run` subcommand.
//!
//! One dispatch per process: query whether the instance is already running,
//! then either forward the command over its control channel or bootstrap a
//! fresh sandbox, with dry-run previews short-circuiting side effects. Any
//! failure past the query attempts a best-effort desktop notification and
//! re-raises the original error.

use async_trait::async_trait;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::Command;

use crate::bootstrap::BootstrapOptions;
use crate::errors::DispatchError;

/// A fully parsed `run` invocation.
#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    pub instance_name: String,
    /// Command and arguments to run inside the instance. Empty means "use
    /// the instance's configured executable".
    pub args_to_instance: Vec<String>,
    pub wait: bool,
    pub dry_run: bool,
    /// Raw `--debug-bwrap-args` groups, one inner vector per occurrence.
    pub debug_bwrap_args: Vec<Vec<String>>,
    pub debug_shell: bool,
    pub debug_log_dbus: bool,
    pub debug_helper_script: Option<PathBuf>,
}

/// The collaborator surface dispatch needs: running status, the control
/// channel, and the cold-start path. Real implementation: `LiveHost` in the
/// run command. Test double: a recording mock.
#[async_trait]
pub trait InstanceHost: Send + Sync {
    /// Whether the named instance currently has a live helper socket.
    fn status(&self, instance_name: &str) -> Result<bool, DispatchError>;

    /// Forward a command over the control channel of a running instance.
    /// Returns the reply text when `wait` was requested and one was given.
    async fn send_run(
        &self,
        instance_name: &str,
        args: &[String],
        wait: bool,
    ) -> Result<Option<String>, DispatchError>;

    /// Cold-start the instance. The implementation honors
    /// `options.dry_run` itself (preview only, nothing spawned).
    async fn bootstrap(
        &self,
        instance_name: &str,
        args: &[String],
        options: BootstrapOptions,
    ) -> Result<(), DispatchError>;
}

/// The route chosen for one invocation. Constructed once, consumed
/// immediately, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchDecision {
    SendToRunningInstance {
        instance_name: String,
        args: Vec<String>,
        wait: bool,
    },
    DryRunSendPreview {
        instance_name: String,
        args: Vec<String>,
    },
    BootstrapNewInstance {
        instance_name: String,
        args: Vec<String>,
        extra_bwrap_args: Option<Vec<String>>,
    },
    DryRunBootstrapPreview {
        instance_name: String,
        args: Vec<String>,
        extra_bwrap_args: Option<Vec<String>>,
    },
}

/// Pick the route from the running status alone. Pure; no side effects.
pub fn decide(running: bool, request: &RunRequest) -> Result<DispatchDecision, DispatchError> {
    let decision = match (running, request.dry_run) {
        (true, true) => DispatchDecision::DryRunSendPreview {
            instance_name: request.instance_name.clone(),
            args: request.args_to_instance.clone(),
        },
        (true, false) => DispatchDecision::SendToRunningInstance {
            instance_name: request.instance_name.clone(),
            args: request.args_to_instance.clone(),
            wait: request.wait,
        },
        (false, dry_run) => {
            let extra_bwrap_args = convert_extra_args(&request.debug_bwrap_args)?;
            if dry_run {
                DispatchDecision::DryRunBootstrapPreview {
                    instance_name: request.instance_name.clone(),
                    args: request.args_to_instance.clone(),
                    extra_bwrap_args,
                }
            } else {
                DispatchDecision::BootstrapNewInstance {
                    instance_name: request.instance_name.clone(),
                    args: request.args_to_instance.clone(),
                    extra_bwrap_args,
                }
            }
        }
    };
    Ok(decision)
}

/// Flatten `--debug-bwrap-args` groups into a bwrap argument list.
///
/// The first word of each group becomes a `--`-prefixed flag name; the rest
/// pass through as that flag's values. No groups at all means `None` — the
/// tri-state (absent / present-but-empty / populated) is meaningful to the
/// bootstrap collaborator and must survive this boundary.
pub fn convert_extra_args(
    groups: &[Vec<String>],
) -> Result<Option<Vec<String>>, DispatchError> {
    if groups.is_empty() {
        return Ok(None);
    }
    let mut converted = Vec::new();
    for group in groups {
        let mut words = group.iter();
        let flag_word = words.next().ok_or(DispatchError::EmptyBwrapArgs)?;
        converted.push(format!("--{flag_word}"));
        converted.extend(words.cloned());
    }
    Ok(Some(converted))
}

/// Failure-path alerting seam. Real implementation: [`DesktopNotifier`].
/// Test double: a recording mock.
pub trait FailureNotifier {
    fn notify(&self, instance_name: &str, err: &DispatchError);
}

/// Best-effort desktop alert via `notify-send`, for launches detached from
/// a terminal. Attempted only when stderr is not a tty; fire-and-forget —
/// a missing `notify-send` is swallowed and never masks the original error.
pub struct DesktopNotifier;

impl FailureNotifier for DesktopNotifier {
    fn notify(&self, instance_name: &str, err: &DispatchError) {
        if std::io::stderr().is_terminal() {
            return;
        }
        let spawned = Command::new("notify-send")
            .args(["--urgency", "critical", "--icon", "burrow-config"])
            .arg(format!("Failed to run instance: {instance_name}"))
            .arg(err.to_string())
            .spawn();
        if let Err(spawn_err) = spawned {
            tracing::debug!(error = %spawn_err, "desktop notification unavailable");
        }
    }
}

/// Route one `run` invocation to its terminal state.
///
/// The `Ok` payload is reply text to echo verbatim to standard output
/// (present only when `wait` was requested and the instance answered).
pub async fn dispatch(
    host: &dyn InstanceHost,
    request: &RunRequest,
) -> Result<Option<String>, DispatchError> {
    dispatch_with(host, &DesktopNotifier, request).await
}

/// `dispatch` with an explicit notifier.
pub async fn dispatch_with(
    host: &dyn InstanceHost,
    notifier: &dyn FailureNotifier,
    request: &RunRequest,
) -> Result<Option<String>, DispatchError> {
    let outcome = route(host, request).await;
    if let Err(err) = &outcome {
        notifier.notify(&request.instance_name, err);
    }
    outcome
}

async fn route(
    host: &dyn InstanceHost,
    request: &RunRequest,
) -> Result<Option<String>, DispatchError> {
    let running = host.status(&request.instance_name)?;

    match decide(running, request)? {
        DispatchDecision::DryRunSendPreview { args, .. } => {
            eprintln!("Found helper socket.");
            eprintln!("Args would be sent: {args:?}");
            Ok(None)
        }
        DispatchDecision::SendToRunningInstance {
            instance_name,
            args,
            wait,
        } => {
            eprintln!("Instance already running.");
            eprintln!("Sending command to the instance: {args:?}");
            let reply = host.send_run(&instance_name, &args, wait).await?;
            Ok(if wait { reply } else { None })
        }
        DispatchDecision::BootstrapNewInstance {
            instance_name,
            args,
            extra_bwrap_args,
        }
        | DispatchDecision::DryRunBootstrapPreview {
            instance_name,
            args,
            extra_bwrap_args,
        } => {
            let options = BootstrapOptions {
                debug_shell: request.debug_shell,
                debug_helper_script: request.debug_helper_script.clone(),
                debug_log_dbus: request.debug_log_dbus,
                dry_run: request.dry_run,
                extra_bwrap_args,
            };
            host.bootstrap(&instance_name, &args, options).await?;
            Ok(None)
        }
    }
}
