use std::process::Command;

use crate::auth::AuthError;

/// Opens a URL in the OS default browser. Best-effort: the authorization
/// flow reports a failed launch but continues with manual instructions.
pub trait BrowserLauncher: Send + Sync {
    fn open(&self, url: &str) -> Result<(), AuthError>;
}

/// Launcher shelling out to the platform opener.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBrowserLauncher;

impl BrowserLauncher for SystemBrowserLauncher {
    fn open(&self, url: &str) -> Result<(), AuthError> {
        opener_command(url)
            .spawn()
            .map(|_| ())
            .map_err(|err| AuthError::BrowserLaunch(err.to_string()))
    }
}

#[cfg(target_os = "macos")]
fn opener_command(url: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    cmd
}

#[cfg(target_os = "windows")]
fn opener_command(url: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", "", url]);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener_command(url: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    cmd
}
