//! The hidden `auto-complete` hook.
//!
//! Called by the shell glue on every keystroke with the raw line typed so
//! far. One candidate per output line, no other formatting, exit 0 no
//! matter what: a completion failure must never disturb the shell.

use burrow::completion;
use burrow::paths::BurrowPaths;
use burrow::providers::DiskProviders;

pub fn cmd_auto_complete(current_line: &str) {
    let Ok(paths) = BurrowPaths::resolve() else {
        // No resolvable data directory: nothing to offer.
        return;
    };
    let providers = DiskProviders::new(&paths);
    for candidate in completion::complete(current_line, &providers) {
        println!("{candidate}");
    }
}
