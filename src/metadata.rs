//! Static command metadata shared by completion and dispatch.
//!
//! One record per subcommand: flag names with their arity class, plus the
//! role of the subject positional. The table is `const` and read-only for
//! the process lifetime; a test in `main.rs` cross-checks it against the
//! clap definition so the two cannot drift.

/// What a flag expects after its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    /// Presence-only switch.
    Boolean,
    /// Takes one free-form value.
    Value,
    /// Takes one filesystem path.
    Path,
    /// Takes one or more grouped values (repeatable).
    Grouped,
}

/// Role of a subcommand's subject positional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectKind {
    /// The subject is an existing instance name.
    Instance,
    /// The subject is free text (no completion offered).
    FreeText,
    /// The subject is one of a fixed choice set.
    Choice(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy)]
pub struct FlagMeta {
    pub name: &'static str,
    pub kind: FlagKind,
}

#[derive(Debug, Clone, Copy)]
pub struct SubcommandMeta {
    pub name: &'static str,
    pub flags: &'static [FlagMeta],
    pub subject: SubjectKind,
}

const fn flag(name: &'static str, kind: FlagKind) -> FlagMeta {
    FlagMeta { name, kind }
}

/// Choice set for `list`.
pub const LIST_CHOICES: &[&str] = &["instances", "profiles", "services"];

/// Flags accepted before any subcommand.
pub const GLOBAL_FLAGS: &[&str] = &["--help", "--version"];

pub const SUBCOMMANDS: &[SubcommandMeta] = &[
    SubcommandMeta {
        name: "run",
        flags: &[
            flag("--debug-shell", FlagKind::Boolean),
            flag("--dry-run", FlagKind::Boolean),
            flag("--debug-helper-script", FlagKind::Path),
            flag("--debug-log-dbus", FlagKind::Boolean),
            flag("--wait", FlagKind::Boolean),
            flag("--debug-bwrap-args", FlagKind::Grouped),
        ],
        subject: SubjectKind::Instance,
    },
    SubcommandMeta {
        name: "create",
        flags: &[
            flag("--profile", FlagKind::Value),
            flag("--no-desktop-entry", FlagKind::Boolean),
        ],
        subject: SubjectKind::FreeText,
    },
    SubcommandMeta {
        name: "list",
        flags: &[],
        subject: SubjectKind::Choice(LIST_CHOICES),
    },
    SubcommandMeta {
        name: "edit",
        flags: &[],
        subject: SubjectKind::Instance,
    },
    SubcommandMeta {
        name: "generate-desktop-entry",
        flags: &[
            flag("--profile", FlagKind::Value),
            flag("--desktop-entry", FlagKind::Value),
        ],
        subject: SubjectKind::Instance,
    },
];

/// Look up a subcommand's record by name.
pub fn subcommand(name: &str) -> Option<&'static SubcommandMeta> {
    SUBCOMMANDS.iter().find(|meta| meta.name == name)
}

pub fn subcommand_names() -> impl Iterator<Item = &'static str> {
    SUBCOMMANDS.iter().map(|meta| meta.name)
}
