use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "burrow")]
#[command(version, about = "Bubblewrap-based application sandboxing utility")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch instance or run command inside
    Run {
        /// Open a shell inside the sandbox instead of running the program
        #[arg(long)]
        debug_shell: bool,

        /// Print the bwrap arguments instead of running
        #[arg(long)]
        dry_run: bool,

        /// Use the specified helper script (development aid)
        #[arg(long, value_name = "script_path")]
        debug_helper_script: Option<PathBuf>,

        /// Enable D-Bus proxy logging
        #[arg(long)]
        debug_log_dbus: bool,

        /// Wait on the command inside the sandbox and print its output
        #[arg(long)]
        wait: bool,

        /// Extra bwrap option; the first word gets a `--` prefix
        #[arg(long, num_args = 1.., value_name = "bwrap_args")]
        debug_bwrap_args: Vec<Vec<String>>,

        /// Instance to run
        instance_name: String,

        /// Command and arguments to run inside the instance
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args_to_instance: Vec<String>,
    },
    /// Create a new instance
    Create {
        /// Profile to seed the new instance from
        #[arg(long, value_name = "profile")]
        profile: Option<String>,

        /// Do not create a desktop entry
        #[arg(long)]
        no_desktop_entry: bool,

        /// New instance name
        new_instance_name: String,
    },
    /// List instances, profiles or services
    List {
        #[arg(value_enum, default_value_t = ListWhat::Instances)]
        list_what: ListWhat,
    },
    /// Open the instance config in $EDITOR
    Edit {
        /// Instance to edit
        instance_name: String,
    },
    /// Generate an XDG desktop entry for an instance
    GenerateDesktopEntry {
        /// Use the desktop entry named by this profile
        #[arg(long, value_name = "profile")]
        profile: Option<String>,

        /// Desktop entry name or path to derive from
        #[arg(long, value_name = "name_or_path")]
        desktop_entry: Option<String>,

        /// Instance to generate the entry for
        instance_name: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListWhat {
    Instances,
    Profiles,
    Services,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // The completion hook bypasses clap entirely: the shell hands over the
    // raw line on every keystroke and expects candidates, never a parse
    // error. Exit 0 regardless of the candidate set.
    let mut raw_args = std::env::args();
    if raw_args.nth(1).as_deref() == Some("auto-complete") {
        let current_line = raw_args.next().unwrap_or_default();
        cmd::cmd_auto_complete(&current_line);
        return Ok(());
    }

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            debug_shell,
            dry_run,
            debug_helper_script,
            debug_log_dbus,
            wait,
            debug_bwrap_args,
            instance_name,
            args_to_instance,
        } => {
            let request = burrow::dispatch::RunRequest {
                instance_name,
                args_to_instance,
                wait,
                dry_run,
                debug_bwrap_args,
                debug_shell,
                debug_log_dbus,
                debug_helper_script,
            };
            cmd::cmd_run(request).await?;
        }
        Commands::Create {
            profile,
            no_desktop_entry,
            new_instance_name,
        } => {
            cmd::cmd_create(&new_instance_name, profile.as_deref(), no_desktop_entry)?;
        }
        Commands::List { list_what } => cmd::cmd_list(list_what)?,
        Commands::Edit { instance_name } => cmd::cmd_edit(&instance_name)?,
        Commands::GenerateDesktopEntry {
            profile,
            desktop_entry,
            instance_name,
        } => {
            cmd::cmd_generate_desktop_entry(
                &instance_name,
                profile.as_deref(),
                desktop_entry.as_deref(),
            )?;
        }
    }

    Ok(())
}
