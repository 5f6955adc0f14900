//! Platform URI opener.

use tokio::process::Command;

use crate::{Error, Result};

/// Opens `uri` with the platform's default handler, best-effort.
///
/// The viewer is spawned detached and its exit status discarded; a spawn
/// failure is logged by the caller, never reported to the client.
pub(crate) fn open(uri: &str) -> Result<()> {
    #[cfg(target_os = "windows")]
    {
        // `start` is a cmd built-in, and `&` separates commands in cmd;
        // escape it so the URI survives.
        let escaped = uri.replace('&', "^&");
        detach(Command::new("cmd").args(["/C", "start", ""]).arg(escaped))
    }

    #[cfg(target_os = "macos")]
    {
        detach(Command::new("open").arg(uri))
    }

    #[cfg(any(
        target_os = "linux",
        target_os = "freebsd",
        target_os = "openbsd",
        target_os = "netbsd"
    ))]
    {
        detach(Command::new("xdg-open").arg(uri))
    }

    #[cfg(not(any(
        target_os = "windows",
        target_os = "macos",
        target_os = "linux",
        target_os = "freebsd",
        target_os = "openbsd",
        target_os = "netbsd"
    )))]
    {
        tracing::warn!(%uri, "no URI handler for this platform");
        Ok(())
    }
}

/// Spawns the viewer and forgets it, keeping the child reaped.
#[cfg(any(
    target_os = "windows",
    target_os = "macos",
    target_os = "linux",
    target_os = "freebsd",
    target_os = "openbsd",
    target_os = "netbsd"
))]
fn detach(cmd: &mut Command) -> Result<()> {
    let mut child = cmd.spawn().map_err(Error::Launch)?;
    tokio::spawn(async move {
        let _ = child.wait().await;
    });
    Ok(())
}
