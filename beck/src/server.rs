//! Server object, pipeline wiring, and accept loop.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::{Config, Result, conn, decode, dispatch};

/// Process-wide relay state: listening socket, shared secret, pipeline
/// configuration, and the shutdown signal.
///
/// Created once at startup from an already-bound listener and a non-empty
/// secret, then consumed by [`Server::run`], which owns the listener for
/// the rest of the process lifetime.
#[derive(Debug)]
pub struct Server {
    /// The bound listening socket. Closed when `run` returns.
    listener: TcpListener,
    /// State shared with every pipeline stage.
    shared: Arc<Shared>,
}

/// State every stage task holds a reference to.
#[derive(Debug)]
pub(crate) struct Shared {
    /// Configured shared secret, compared byte-for-byte against the
    /// credential presented in each frame.
    pub(crate) secret: String,
    /// Pipeline tunables.
    pub(crate) config: Config,
    /// Cancelled by `stop` or by a fatal accept error; observed by the
    /// accept loop, every connection handler, and both stage tasks.
    pub(crate) shutdown: CancellationToken,
}

impl Server {
    /// Creates a relay over `listener` authenticating against `secret`.
    ///
    /// The secret must be non-empty; an empty secret would let any
    /// payload starting with a space authenticate. Startup code is
    /// expected to have validated this.
    pub fn new(listener: TcpListener, secret: impl Into<String>, config: Config) -> Self {
        Self {
            listener,
            shared: Arc::new(Shared {
                secret: secret.into(),
                config,
                shutdown: CancellationToken::new(),
            }),
        }
    }

    /// Local address of the listening socket.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Token cancelled when the relay shuts down.
    ///
    /// Cancelling it externally stops the relay exactly like a `stop`
    /// command received over the wire.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shared.shutdown.clone()
    }

    /// Runs the relay until shutdown.
    ///
    /// Returns `Ok(())` when a `stop` command (or an external cancellation
    /// of [`Server::shutdown_token`]) ends the accept loop, and the accept
    /// error itself when the listener fails. Either way the listening
    /// socket is closed and all connection handlers and stage tasks are
    /// torn down before returning. In-flight spawned commands are not
    /// killed; fire-and-forget executions outlive the relay.
    pub async fn run(self) -> Result<()> {
        let Self { listener, shared } = self;
        let capacity = shared.config.queue_capacity.max(1);
        let (raw_tx, raw_rx) = mpsc::channel(capacity);
        let (cmd_tx, cmd_rx) = mpsc::channel(capacity);

        let decoder = tokio::spawn(decode::stage(Arc::clone(&shared), raw_rx, cmd_tx));
        let dispatcher = tokio::spawn(dispatch::stage(Arc::clone(&shared), cmd_rx));

        if let Ok(addr) = listener.local_addr() {
            info!(%addr, "listening");
        }
        let result = accept_loop(&listener, &raw_tx, &shared).await;

        // Deliberate stop and fatal accept failure tear down the same way;
        // only the returned result distinguishes them.
        shared.shutdown.cancel();
        drop(listener);
        drop(raw_tx);
        let _ = decoder.await;
        let _ = dispatcher.await;
        info!("relay stopped");
        result
    }
}

/// Accepts connections until cancellation or a fatal listener error,
/// spawning one handler task per accepted socket.
async fn accept_loop(
    listener: &TcpListener,
    raw_tx: &mpsc::Sender<Vec<u8>>,
    shared: &Arc<Shared>,
) -> Result<()> {
    loop {
        let (stream, peer) = tokio::select! {
            () = shared.shutdown.cancelled() => return Ok(()),
            accepted = listener.accept() => accepted?,
        };
        info!(%peer, "client connected");
        tokio::spawn(conn::handle(stream, peer, raw_tx.clone(), Arc::clone(shared)));
    }
}
