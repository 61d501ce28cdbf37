//! Shell completion for partially typed command lines.
//!
//! `complete` is a pure token walk over the shell-split input: it selects a
//! candidate *source* while scanning left to right and materializes it into
//! strings exactly once at the end. Providers are re-queried on every call;
//! nothing is cached between invocations.
//!
//! Malformed input never errors here. The worst outcome of any line is an
//! empty candidate list, because the shell calls this on every keystroke
//! and has no way to surface a failure.

use crate::metadata::{self, SubcommandMeta, SubjectKind};

/// Name enumerations backed by the instance store and profile catalog.
///
/// Infallible by contract: enumeration problems (missing directory,
/// unreadable entries) degrade to an empty list on the implementing side.
pub trait CandidateProviders {
    fn instance_names(&self) -> Vec<String>;
    fn profile_names(&self) -> Vec<String>;
}

/// Where the final candidate set comes from. Selected during the walk,
/// materialized once at the end.
#[derive(Debug, Clone, Copy)]
enum Source {
    Subcommands,
    GlobalFlags,
    Flags(&'static SubcommandMeta),
    Choices(&'static [&'static str]),
    Instances,
    Profiles,
    Nothing,
}

/// Compute the candidate set for the next word of `line`.
///
/// `line` is the whole command line typed so far, program name included.
/// A line ending in unescaped whitespace means "expecting a new word"; a
/// line ending mid-word means the shell will filter the result by that
/// prefix, so the set for the word's position is returned unchanged.
pub fn complete(line: &str, providers: &dyn CandidateProviders) -> Vec<String> {
    materialize(walk(&split_line(line)), providers)
}

fn walk(words: &[String]) -> Source {
    let mut source = Source::Subcommands;

    // Skip the program name, then consume leading global flags.
    let mut index = 1;
    loop {
        match words.get(index) {
            None => return source,
            Some(token) if token.starts_with('-') => {
                source = Source::GlobalFlags;
                index += 1;
            }
            Some(_) => break,
        }
    }

    let Some(meta) = metadata::subcommand(&words[index]) else {
        // An unknown subcommand short-circuits completion, unless it is the
        // final word, in which case it may still be a prefix the shell is
        // filtering against.
        if index + 1 < words.len() {
            return Source::Nothing;
        }
        return source;
    };
    index += 1;

    let mut subject_set = false;
    while index < words.len() {
        let token = words[index].as_str();

        // Once the subject has a value the command is fully specified;
        // nothing more is ever suggested for this invocation.
        if subject_set {
            return Source::Nothing;
        }

        if token.starts_with('-') {
            source = Source::Flags(meta);
            index += 1;
            continue;
        }

        if let SubjectKind::Choice(choices) = meta.subject {
            source = Source::Choices(choices);
            subject_set = true;
            index += 1;
            continue;
        }

        // `--profile` takes a profile name in every subcommand that has it.
        if words[index - 1] == "--profile" {
            source = Source::Profiles;
            index += 1;
            continue;
        }

        if meta.subject == SubjectKind::Instance {
            source = Source::Instances;
            subject_set = true;
            index += 1;
            continue;
        }

        source = Source::Nothing;
        index += 1;
    }

    source
}

fn materialize(source: Source, providers: &dyn CandidateProviders) -> Vec<String> {
    match source {
        Source::Subcommands => metadata::subcommand_names().map(String::from).collect(),
        Source::GlobalFlags => metadata::GLOBAL_FLAGS.iter().map(|s| s.to_string()).collect(),
        Source::Flags(meta) => meta.flags.iter().map(|f| f.name.to_string()).collect(),
        Source::Choices(choices) => choices.iter().map(|s| s.to_string()).collect(),
        Source::Instances => providers.instance_names(),
        Source::Profiles => providers.profile_names(),
        Source::Nothing => Vec::new(),
    }
}

/// Split `line` with shell-word rules, repairing partial input.
///
/// An unterminated quote extends the final token rather than erroring out.
/// A trailing unescaped whitespace run appends a synthetic empty token,
/// representing "the user expects a new argument".
fn split_line(line: &str) -> Vec<String> {
    if let Some(mut words) = shlex::split(line) {
        if line.ends_with(char::is_whitespace) {
            words.push(String::new());
        }
        return words;
    }
    // Dangling quote or escape: close it so the partial token survives. The
    // trailing content becomes part of the open token, so no synthetic empty
    // token is appended.
    for close in ["\"", "'", "\\"] {
        if let Some(words) = shlex::split(&format!("{line}{close}")) {
            return words;
        }
    }
    line.split_whitespace().map(String::from).collect()
}
