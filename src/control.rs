//! Control-channel client for running instances.
//!
//! A single JSON request over the instance's helper socket, answered by a
//! single JSON reply. The wire format is private to this crate; nothing
//! outside it may depend on the shape of these messages.

use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixStream;

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Request {
    Run { args: Vec<String>, wait: bool },
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Reply {
    Ok { output: Option<String> },
    Error { message: String },
}

#[derive(Debug, Clone)]
pub struct ControlClient {
    socket_path: PathBuf,
}

impl ControlClient {
    pub fn new(socket_path: PathBuf) -> Self {
        Self { socket_path }
    }

    /// Forward a command to the running instance. Returns the reply text
    /// when one was given; a rejected or malformed reply is an error.
    pub async fn send_run(&self, args: &[String], wait: bool) -> io::Result<Option<String>> {
        tracing::debug!(socket = %self.socket_path.display(), "connecting to helper socket");
        let mut stream = UnixStream::connect(&self.socket_path).await?;

        let request = Request::Run {
            args: args.to_vec(),
            wait,
        };
        let payload = serde_json::to_vec(&request).map_err(io::Error::other)?;
        stream.write_all(&payload).await?;
        stream.shutdown().await?;

        let mut raw_reply = Vec::new();
        stream.read_to_end(&mut raw_reply).await?;

        match serde_json::from_slice(&raw_reply).map_err(io::Error::other)? {
            Reply::Ok { output } => Ok(output),
            Reply::Error { message } => Err(io::Error::other(message)),
        }
    }
}
