//! Typed errors for the run dispatch path.
//!
//! Completion never surfaces errors (a malformed request degrades to an
//! empty candidate list); everything here belongs to `dispatch`.

use thiserror::Error;

/// Failures while routing a `run` invocation.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("No instance named {name}")]
    UnknownInstance { name: String },

    #[error("Failed to reach the instance control socket: {source}")]
    Transport {
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to bootstrap the instance: {source}")]
    Bootstrap {
        #[source]
        source: anyhow::Error,
    },

    #[error("Expected at least one word in a --debug-bwrap-args group")]
    EmptyBwrapArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_instance_carries_name() {
        let err = DispatchError::UnknownInstance {
            name: "web".to_string(),
        };
        assert!(err.to_string().contains("web"));
    }

    #[test]
    fn transport_preserves_io_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = DispatchError::Transport { source: io_err };
        match &err {
            DispatchError::Transport { source } => {
                assert_eq!(source.kind(), std::io::ErrorKind::ConnectionRefused);
            }
            _ => panic!("Expected Transport variant"),
        }
    }

    #[test]
    fn all_variants_implement_std_error() {
        fn assert_std_error<E: std::error::Error>(_: &E) {}
        assert_std_error(&DispatchError::EmptyBwrapArgs);
        assert_std_error(&DispatchError::Bootstrap {
            source: anyhow::anyhow!("bwrap exited with status 1"),
        });
    }
}
