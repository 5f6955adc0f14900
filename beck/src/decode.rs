//! Decode and authenticate stage.
//!
//! A single task consumes raw chunks in arrival order, unwraps the
//! netstring frame, splits the payload into credential and command text,
//! and checks the credential against the configured secret. Valid commands
//! go onto the command queue in the same order; every failure is logged
//! and the frame discarded without touching the originating connection.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::server::Shared;
use crate::{Error, Result};

/// Runs the decode stage until shutdown or queue closure.
pub(crate) async fn stage(
    shared: Arc<Shared>,
    mut raw_rx: mpsc::Receiver<Vec<u8>>,
    cmd_tx: mpsc::Sender<String>,
) {
    loop {
        let chunk = tokio::select! {
            () = shared.shutdown.cancelled() => break,
            received = raw_rx.recv() => match received {
                Some(chunk) => chunk,
                None => break,
            },
        };
        let command = match unwrap_frame(&shared.secret, &chunk) {
            Ok(command) => command,
            Err(e) => {
                warn!(error = %e, "frame discarded");
                continue;
            }
        };
        debug!(%command, "command accepted");
        if cmd_tx.send(command).await.is_err() {
            break;
        }
    }
}

/// Decodes one frame and authenticates its payload, returning the command
/// text. The credential comparison is plain byte equality, not
/// constant-time; see the crate-level security notes.
fn unwrap_frame(secret: &str, chunk: &[u8]) -> Result<String> {
    let payload = beck_proto::decode(chunk)?;
    let (credential, text) = beck_proto::split(payload)?;
    if credential != secret.as_bytes() {
        return Err(Error::Auth {
            presented: String::from_utf8_lossy(credential).into_owned(),
        });
    }
    Ok(text.to_owned())
}
