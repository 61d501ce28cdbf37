//! End-to-end tests for the burrow binary.
//!
//! Every invocation gets its own temp data/runtime directories through the
//! environment overrides, so nothing touches the real user's instances.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn burrow(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("burrow");
        cmd.env("BURROW_DATA_HOME", self.dir.path().join("data"))
            .env("BURROW_RUNTIME_DIR", self.dir.path().join("run"))
            // Keep desktop entries inside the sandbox too.
            .env("XDG_DATA_HOME", self.dir.path().join("xdg"))
            .env("HOME", self.dir.path());
        cmd
    }

    fn create_instance(&self, name: &str) {
        self.burrow()
            .args(["create", "--no-desktop-entry", name])
            .assert()
            .success();
    }

    fn mark_running(&self, name: &str) {
        let socket = self.dir.path().join("run").join(name).join("helper.sock");
        fs::create_dir_all(socket.parent().unwrap()).unwrap();
        fs::write(&socket, b"").unwrap();
    }

    fn applications_dir(&self) -> std::path::PathBuf {
        self.dir.path().join("xdg").join("applications")
    }
}

mod cli_basics {
    use super::*;

    #[test]
    fn help_succeeds() {
        Sandbox::new().burrow().arg("--help").assert().success();
    }

    #[test]
    fn version_succeeds() {
        Sandbox::new()
            .burrow()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("burrow"));
    }

    #[test]
    fn unknown_subcommand_fails_parse() {
        Sandbox::new().burrow().arg("destroy").assert().failure();
    }
}

mod auto_complete {
    use super::*;

    #[test]
    fn program_name_yields_the_subcommand_set() {
        Sandbox::new()
            .burrow()
            .args(["auto-complete", "burrow "])
            .assert()
            .success()
            .stdout(
                predicate::str::contains("run\n")
                    .and(predicate::str::contains("create\n"))
                    .and(predicate::str::contains("list\n"))
                    .and(predicate::str::contains("edit\n"))
                    .and(predicate::str::contains("generate-desktop-entry\n")),
            );
    }

    #[test]
    fn list_yields_its_choices() {
        Sandbox::new()
            .burrow()
            .args(["auto-complete", "burrow list "])
            .assert()
            .success()
            .stdout("instances\nprofiles\nservices\n");
    }

    #[test]
    fn run_yields_created_instances() {
        let sandbox = Sandbox::new();
        sandbox.create_instance("web");
        sandbox.create_instance("mail");
        sandbox
            .burrow()
            .args(["auto-complete", "burrow run "])
            .assert()
            .success()
            .stdout("mail\nweb\n");
    }

    #[test]
    fn unknown_subcommand_followed_by_a_word_is_silent_success() {
        Sandbox::new()
            .burrow()
            .args(["auto-complete", "burrow destroy web"])
            .assert()
            .success()
            .stdout("");
    }

    #[test]
    fn resolved_subject_is_a_terminal_state() {
        let sandbox = Sandbox::new();
        sandbox.create_instance("web");
        sandbox
            .burrow()
            .args(["auto-complete", "burrow run web firefox "])
            .assert()
            .success()
            .stdout("");
    }
}

mod create_and_list {
    use super::*;

    #[test]
    fn create_then_list_round_trips() {
        let sandbox = Sandbox::new();
        sandbox.create_instance("web");
        sandbox
            .burrow()
            .args(["list", "instances"])
            .assert()
            .success()
            .stdout("web\n");
    }

    #[test]
    fn list_defaults_to_instances() {
        let sandbox = Sandbox::new();
        sandbox.create_instance("web");
        sandbox.burrow().arg("list").assert().success().stdout("web\n");
    }

    #[test]
    fn list_with_nothing_created_prints_nothing() {
        Sandbox::new()
            .burrow()
            .args(["list", "instances"])
            .assert()
            .success()
            .stdout("");
    }

    #[test]
    fn list_services_prints_the_static_catalog() {
        Sandbox::new()
            .burrow()
            .args(["list", "services"])
            .assert()
            .success()
            .stdout(predicate::str::contains("network\n").and(predicate::str::contains("x11\n")));
    }

    #[test]
    fn create_refuses_a_duplicate_name() {
        let sandbox = Sandbox::new();
        sandbox.create_instance("web");
        sandbox
            .burrow()
            .args(["create", "--no-desktop-entry", "web"])
            .assert()
            .failure();
    }

    #[test]
    fn create_with_unknown_profile_fails() {
        Sandbox::new()
            .burrow()
            .args(["create", "--profile", "missing", "web"])
            .assert()
            .failure();
    }

    #[test]
    fn create_writes_a_desktop_entry_by_default() {
        let sandbox = Sandbox::new();
        sandbox
            .burrow()
            .args(["create", "web"])
            .assert()
            .success();
        let entry = sandbox.applications_dir().join("burrow-web.desktop");
        let content = fs::read_to_string(entry).unwrap();
        assert!(content.contains("Exec=burrow run web"));
    }

    #[test]
    fn no_desktop_entry_flag_suppresses_the_entry() {
        let sandbox = Sandbox::new();
        sandbox.create_instance("web");
        assert!(!sandbox.applications_dir().join("burrow-web.desktop").exists());
    }
}

mod run_dispatch {
    use super::*;

    #[test]
    fn dry_run_against_a_cold_instance_prints_a_bwrap_preview() {
        let sandbox = Sandbox::new();
        sandbox.create_instance("web");
        sandbox
            .burrow()
            .args(["run", "--dry-run", "web", "echo", "hi"])
            .assert()
            .success()
            .stdout(
                predicate::str::starts_with("bwrap ")
                    .and(predicate::str::contains("/home/user"))
                    .and(predicate::str::contains("echo hi")),
            );
    }

    #[test]
    fn dry_run_forwards_extra_bwrap_args() {
        let sandbox = Sandbox::new();
        sandbox.create_instance("web");
        sandbox
            .burrow()
            // The multi-value group is terminated by `--`, as in argparse.
            .args([
                "run",
                "--dry-run",
                "--debug-bwrap-args",
                "bind",
                "/tmp",
                "/tmp",
                "--",
                "web",
                "echo",
                "hi",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("--bind /tmp /tmp"));
    }

    #[test]
    fn dry_run_against_a_running_instance_previews_the_send() {
        let sandbox = Sandbox::new();
        sandbox.create_instance("web");
        sandbox.mark_running("web");
        sandbox
            .burrow()
            .args(["run", "--dry-run", "web", "echo", "hi"])
            .assert()
            .success()
            .stderr(predicate::str::contains("Found helper socket."))
            .stdout("");
    }

    #[test]
    fn run_against_a_missing_instance_fails() {
        Sandbox::new()
            .burrow()
            .args(["run", "ghost"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("ghost"));
    }

    #[test]
    fn failure_with_non_tty_stderr_attempts_a_desktop_notification() {
        use std::os::unix::fs::PermissionsExt;

        let sandbox = Sandbox::new();
        sandbox.create_instance("web");
        sandbox.mark_running("web");

        // Shadow notify-send with a stub that records its arguments.
        let bin_dir = sandbox.dir.path().join("bin");
        fs::create_dir_all(&bin_dir).unwrap();
        let log = sandbox.dir.path().join("notify.log");
        let stub = bin_dir.join("notify-send");
        fs::write(
            &stub,
            format!("#!/bin/sh\nprintf '%s\\n' \"$@\" > '{}'\n", log.display()),
        )
        .unwrap();
        fs::set_permissions(&stub, fs::Permissions::from_mode(0o755)).unwrap();
        let path = format!(
            "{}:{}",
            bin_dir.display(),
            std::env::var("PATH").unwrap_or_default()
        );

        // Piped stderr is not a tty, so the notification path is taken; the
        // dead socket still fails the dispatch.
        sandbox
            .burrow()
            .env("PATH", path)
            .args(["run", "web", "echo", "hi"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("control socket"));

        // The stub is spawned fire-and-forget and may outlive the burrow
        // process; poll briefly for its output.
        let recorded = (0..50)
            .find_map(|_| {
                std::thread::sleep(std::time::Duration::from_millis(20));
                fs::read_to_string(&log)
                    .ok()
                    .filter(|content| content.contains("Failed to run instance: web"))
            })
            .expect("notification stub was never invoked");
        assert!(recorded.contains("control socket"));
    }

    #[test]
    fn run_with_a_dead_socket_reports_a_transport_failure() {
        // The socket file exists (so the instance counts as running) but
        // nothing listens on it.
        let sandbox = Sandbox::new();
        sandbox.create_instance("web");
        sandbox.mark_running("web");
        sandbox
            .burrow()
            .args(["run", "web", "echo", "hi"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("control socket"));
    }
}

mod edit_and_desktop_entry {
    use super::*;

    #[test]
    fn edit_with_a_no_op_editor_leaves_the_config_valid() {
        let sandbox = Sandbox::new();
        sandbox.create_instance("web");
        sandbox
            .burrow()
            .env("EDITOR", "true")
            .args(["edit", "web"])
            .assert()
            .success();
        sandbox
            .burrow()
            .args(["list", "instances"])
            .assert()
            .success()
            .stdout("web\n");
    }

    #[test]
    fn edit_with_a_failing_editor_fails() {
        let sandbox = Sandbox::new();
        sandbox.create_instance("web");
        sandbox
            .burrow()
            .env("EDITOR", "false")
            .args(["edit", "web"])
            .assert()
            .failure();
    }

    #[test]
    fn generate_desktop_entry_synthesizes_for_a_plain_instance() {
        let sandbox = Sandbox::new();
        sandbox.create_instance("web");
        sandbox
            .burrow()
            .arg("generate-desktop-entry")
            .arg("web")
            .assert()
            .success();
        let entry = sandbox.applications_dir().join("burrow-web.desktop");
        let content = fs::read_to_string(entry).unwrap();
        assert!(content.contains("Exec=burrow run web"));
    }

    #[test]
    fn generate_desktop_entry_for_a_missing_instance_fails() {
        Sandbox::new()
            .burrow()
            .args(["generate-desktop-entry", "ghost"])
            .assert()
            .failure();
    }
}
