//! burrow — bubblewrap-based application sandboxing.
//!
//! The core is two state machines sharing one static metadata table:
//! [`completion::complete`] resolves a partially typed command line into
//! completion candidates, and [`dispatch::dispatch`] routes a parsed `run`
//! invocation to a live instance's control channel or a fresh bootstrap.
//! The remaining modules are the thin collaborators both lean on: instance
//! storage, the profile catalog, the control-channel client, the bwrap
//! bootstrap and desktop-entry generation.

pub mod bootstrap;
pub mod completion;
pub mod control;
pub mod desktop;
pub mod dispatch;
pub mod errors;
pub mod instance;
pub mod metadata;
pub mod paths;
pub mod profile;
pub mod providers;
pub mod services;
