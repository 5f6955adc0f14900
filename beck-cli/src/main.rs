//! Launcher for the beck relay daemon.
//!
//! Reads the shared secret from a key file, binds the listening socket,
//! and runs the relay until a `stop` command arrives or accept fails.

#![allow(clippy::print_stderr, clippy::missing_docs_in_private_items)]

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use beck::{Config, Server};
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "beckd", version, about = "Shared-secret TCP command relay")]
struct Cli {
    /// Port to listen on.
    #[arg(short, long)]
    port: u16,

    /// File holding the shared secret (surrounding whitespace is trimmed).
    #[arg(short, long, value_name = "PATH")]
    key_file: PathBuf,

    /// Address to bind.
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    bind: IpAddr,

    /// Increase log verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run(Cli::parse()).await {
        eprintln!("beckd: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    let secret = load_key(&cli.key_file)
        .with_context(|| format!("reading key file {}", cli.key_file.display()))?;

    let addr = SocketAddr::new(cli.bind, cli.port);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    let server = Server::new(listener, secret, Config::default());
    server.run().await.context("relay failed")
}

/// Reads the shared secret from `path`, rejecting an empty key.
fn load_key(path: &Path) -> Result<String> {
    let raw = std::fs::read_to_string(path)?;
    let key = raw.trim();
    if key.is_empty() {
        bail!("key file is empty");
    }
    Ok(key.to_owned())
}

/// Maps `-v` counts onto an `EnvFilter`; `RUST_LOG` overrides both.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("beck={level},beckd={level}")));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_file_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key");
        std::fs::write(&path, "  s3cr3t\n").unwrap();
        assert_eq!(load_key(&path).unwrap(), "s3cr3t");
    }

    #[test]
    fn empty_key_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key");
        std::fs::write(&path, " \n\t\n").unwrap();
        assert!(load_key(&path).is_err());
    }

    #[test]
    fn missing_key_file_is_rejected() {
        assert!(load_key(Path::new("/nonexistent/beck.key")).is_err());
    }
}
