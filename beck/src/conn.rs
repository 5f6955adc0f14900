//! Per-connection read loop.
//!
//! Each successful read is forwarded downstream as exactly one frame; the
//! relay performs no reassembly across reads and no splitting within one.
//! A chunk that TCP fragmented or coalesced fails the decoder's length
//! check later and is discarded there, never here.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tracing::debug;

use crate::server::Shared;

/// Reads raw chunks from one client socket and forwards them into the
/// raw-data queue until disconnect, read error, or shutdown.
///
/// The socket closes when the handler returns. There is no read timeout
/// and no half-close handling; an idle client pins its handler (and its
/// buffer) until it disconnects or the relay stops.
pub(crate) async fn handle(
    mut stream: TcpStream,
    peer: SocketAddr,
    raw_tx: mpsc::Sender<Vec<u8>>,
    shared: Arc<Shared>,
) {
    let mut buf = vec![0u8; shared.config.read_buffer];
    loop {
        let n = tokio::select! {
            () = shared.shutdown.cancelled() => break,
            read = stream.read(&mut buf) => match read {
                Ok(0) => {
                    debug!(%peer, "client disconnected");
                    break;
                }
                Ok(n) => n,
                Err(e) => {
                    debug!(%peer, error = %e, "read failed");
                    break;
                }
            },
        };
        // Forward the exact bytes of this read as one frame. The send
        // blocks while the decode stage is busy, which is what stalls
        // this socket's receive window under load.
        let forwarded = tokio::select! {
            () = shared.shutdown.cancelled() => break,
            sent = raw_tx.send(buf[..n].to_vec()) => sent.is_ok(),
        };
        if !forwarded {
            break;
        }
    }
}
