//! Command dispatcher and executor.
//!
//! A single task consumes command strings in FIFO order, splits each on
//! its first whitespace run into an action and a remainder, and spawns the
//! execution as an independent task. Dispatch order is therefore FIFO
//! while completion order across commands is unspecified. Executions are
//! fire-and-forget: nothing is reported to the client or back to the
//! dispatcher.

use std::sync::Arc;

use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::server::Shared;
use crate::uri;
use crate::{Error, Result};

/// Runs the dispatcher until shutdown or queue closure.
pub(crate) async fn stage(shared: Arc<Shared>, mut cmd_rx: mpsc::Receiver<String>) {
    loop {
        let command = tokio::select! {
            () = shared.shutdown.cancelled() => break,
            received = cmd_rx.recv() => match received {
                Some(command) => command,
                None => break,
            },
        };
        info!(%command, "dispatching");
        let server = Arc::clone(&shared);
        tokio::spawn(async move {
            let (action, rest) = split_command(&command);
            if let Err(e) = execute(&server, action, rest) {
                warn!(error = %e, "command had no effect");
            }
        });
    }
}

/// Splits a command string on its first whitespace run.
///
/// The remainder is empty when the string contains no whitespace (or only
/// trailing whitespace).
fn split_command(command: &str) -> (&str, &str) {
    match command.split_once(char::is_whitespace) {
        Some((action, rest)) => (action, rest.trim_start()),
        None => (command, ""),
    }
}

/// Performs the OS-level effect for one recognized action.
fn execute(server: &Shared, action: &str, rest: &str) -> Result<()> {
    match action {
        "stop" => {
            // Remainder ignored. Ends the accept loop, which closes the
            // listening socket and tears the pipeline down.
            info!("stop command received, shutting down");
            server.shutdown.cancel();
            Ok(())
        }
        "browse" => uri::open(rest),
        "exec" => spawn_program(rest),
        other => Err(Error::UnrecognizedCommand(other.to_owned())),
    }
}

/// Spawns `<program> [args...]` split naively on whitespace.
///
/// No quoting, escaping, or shell semantics: an argument containing a
/// space cannot be expressed. Preserved for wire compatibility.
fn spawn_program(line: &str) -> Result<()> {
    let mut parts = line.split_whitespace();
    let program = parts.next().ok_or_else(|| {
        Error::Launch(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "empty command line",
        ))
    })?;

    let mut child = Command::new(program).args(parts).spawn().map_err(Error::Launch)?;
    // Exit status is swallowed; the waiter only keeps the child reaped.
    tokio::spawn(async move {
        match child.wait().await {
            Ok(status) => debug!(%status, "child exited"),
            Err(e) => warn!(error = %e, "wait failed"),
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use tokio_util::sync::CancellationToken;

    use super::*;
    use crate::Config;

    #[test]
    fn splits_action_and_remainder() {
        assert_eq!(split_command("exec ls -la"), ("exec", "ls -la"));
        assert_eq!(split_command("browse http://e x"), ("browse", "http://e x"));
        assert_eq!(split_command("stop"), ("stop", ""));
        assert_eq!(split_command("stop   "), ("stop", ""));
        assert_eq!(split_command("exec   ls"), ("exec", "ls"));
        assert_eq!(split_command(""), ("", ""));
    }

    #[tokio::test]
    async fn stop_cancels_the_server_token() {
        let shared = Shared {
            secret: "k".to_owned(),
            config: Config::default(),
            shutdown: CancellationToken::new(),
        };
        execute(&shared, "stop", "ignored remainder").unwrap();
        assert!(shared.shutdown.is_cancelled());
    }

    #[tokio::test]
    async fn unrecognized_action_is_an_error_and_no_effect() {
        let shared = Shared {
            secret: "k".to_owned(),
            config: Config::default(),
            shutdown: CancellationToken::new(),
        };
        let err = execute(&shared, "frobnicate", "now").unwrap_err();
        assert!(matches!(err, Error::UnrecognizedCommand(_)));
        assert!(!shared.shutdown.is_cancelled());
    }

    #[tokio::test]
    async fn empty_exec_line_is_a_launch_error() {
        assert!(matches!(spawn_program(""), Err(Error::Launch(_))));
        assert!(matches!(spawn_program("   "), Err(Error::Launch(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn exec_spawns_a_real_process() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("marker");
        spawn_program(&format!("touch {}", marker.display())).unwrap();

        for _ in 0..50 {
            if marker.exists() {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        }
        panic!("spawned program left no trace");
    }
}
