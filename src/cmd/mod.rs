//! CLI command implementations.
//!
//! Each submodule owns one `Commands` variant:
//!
//! | Module          | Command handled                  |
//! |-----------------|----------------------------------|
//! | `run`           | `Run`                            |
//! | `create`        | `Create`                         |
//! | `list`          | `List`                           |
//! | `edit`          | `Edit`                           |
//! | `desktop_entry` | `GenerateDesktopEntry`           |
//! | `complete`      | hidden `auto-complete` hook      |

pub mod complete;
pub mod create;
pub mod desktop_entry;
pub mod edit;
pub mod list;
pub mod run;

pub use complete::cmd_auto_complete;
pub use create::cmd_create;
pub use desktop_entry::cmd_generate_desktop_entry;
pub use edit::cmd_edit;
pub use list::cmd_list;
pub use run::cmd_run;
