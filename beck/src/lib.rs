//! Minimal shared-secret TCP command relay.
//!
//! `beck` accepts TCP connections, decodes netstring command frames (see
//! [`beck_proto`]), checks the shared-secret credential embedded in each
//! payload, and executes a closed set of commands on the local machine:
//! `stop` (shut the relay down), `browse <uri>` (open a URI with the
//! platform's default handler), and `exec <program> [args...]` (spawn a
//! process). Nothing is ever written back to the client.
//!
//! # Quick start
//!
//! ```no_run
//! use beck::{Config, Server};
//! use tokio::net::TcpListener;
//!
//! # async fn demo() -> beck::Result<()> {
//! let listener = TcpListener::bind("0.0.0.0:7777").await?;
//! let server = Server::new(listener, "s3cr3t", Config::default());
//! // Runs until a `stop` command arrives (`Ok`) or accept fails (`Err`).
//! server.run().await
//! # }
//! ```
//!
//! # Pipeline
//!
//! One task accepts connections, one task per connection reads raw chunks,
//! a single decode task unwraps and authenticates frames, and a single
//! dispatcher routes command strings, spawning one ephemeral task per
//! execution. The stages are connected by two bounded hand-off queues
//! (raw data and commands); sends block when a queue is full, so a slow
//! dispatcher stalls the decoder, the decoder stalls every reader, and the
//! stall ultimately lands in the sockets' TCP receive windows. Queue
//! capacity is configurable via [`Config::queue_capacity`].
//!
//! # Protocol limitations
//!
//! Deliberately preserved wire-compatibility properties, each of them a
//! real constraint on clients or a security consideration for deployments:
//!
//! - **One read is one frame.** Raw chunks are taken as produced by single
//!   socket reads and never reassembled or split; a frame fragmented or
//!   coalesced by TCP fails the decoder's exact-length check and is
//!   discarded. Clients must write one complete frame per send and pause
//!   between frames.
//! - **No transport security.** Connections are plaintext, there is no
//!   rate limiting or connection cap, failed credentials never close the
//!   connection, and the secret comparison is not constant-time.
//! - **`exec` has no quoting.** The command line is split on whitespace
//!   only; arguments containing spaces cannot be expressed, and the
//!   command runs with the relay's full privileges.

mod config;
mod conn;
mod decode;
mod dispatch;
mod error;
mod server;
mod uri;

pub use config::Config;
pub use error::{Error, Result};
pub use server::Server;
