//! The `run` subcommand — dispatch to a live instance or bootstrap one.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::io::Write;

use burrow::bootstrap::{self, BootstrapOptions};
use burrow::control::ControlClient;
use burrow::dispatch::{self, InstanceHost, RunRequest};
use burrow::errors::DispatchError;
use burrow::instance::InstanceStore;
use burrow::paths::BurrowPaths;

/// The real collaborator wiring: status from the helper socket, RPC over
/// it, bootstrap through bwrap.
struct LiveHost {
    store: InstanceStore,
}

#[async_trait]
impl InstanceHost for LiveHost {
    fn status(&self, instance_name: &str) -> Result<bool, DispatchError> {
        if !self.store.exists(instance_name) {
            return Err(DispatchError::UnknownInstance {
                name: instance_name.to_string(),
            });
        }
        Ok(self.store.is_running(instance_name))
    }

    async fn send_run(
        &self,
        instance_name: &str,
        args: &[String],
        wait: bool,
    ) -> Result<Option<String>, DispatchError> {
        let client = ControlClient::new(self.store.helper_socket(instance_name));
        client
            .send_run(args, wait)
            .await
            .map_err(|source| DispatchError::Transport { source })
    }

    async fn bootstrap(
        &self,
        instance_name: &str,
        args: &[String],
        options: BootstrapOptions,
    ) -> Result<(), DispatchError> {
        let instance = self
            .store
            .get(instance_name)
            .map_err(|source| DispatchError::Bootstrap { source })?;
        bootstrap::run_init(&instance, args, &options)
            .await
            .map_err(|source| DispatchError::Bootstrap { source })
    }
}

pub async fn cmd_run(request: RunRequest) -> Result<()> {
    let paths = BurrowPaths::resolve()?;
    let host = LiveHost {
        store: InstanceStore::new(paths),
    };

    if let Some(reply) = dispatch::dispatch(&host, &request).await? {
        // Reply text is echoed verbatim; the instance controls its own
        // trailing newline.
        let mut stdout = std::io::stdout();
        stdout.write_all(reply.as_bytes())?;
        stdout.flush().context("Failed to write the instance reply")?;
    }
    Ok(())
}
