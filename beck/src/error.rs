//! Error types for relay operations.

/// Alias for `Result<T, beck::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the relay pipeline.
///
/// Only [`Error::Io`] from the accept loop is fatal; every other variant
/// is logged at the stage that detects it and the offending frame or
/// command is discarded without closing the originating connection.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A frame or payload failed wire-level decoding.
    #[error(transparent)]
    Wire(#[from] beck_proto::Error),

    /// The presented credential did not match the configured secret.
    #[error("invalid credential {presented:?}")]
    Auth {
        /// The credential the client presented, lossily decoded for logs.
        presented: String,
    },

    /// The command action is not `stop`, `browse`, or `exec`.
    #[error("unrecognized command: {0}")]
    UnrecognizedCommand(String),

    /// The URI opener or a process spawn failed.
    #[error("launch failed: {0}")]
    Launch(#[source] std::io::Error),

    /// An I/O error from the listener.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
