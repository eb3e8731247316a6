//! Browser Launching
//!
//! Hands a URL to the host's default handler (`open`, `xdg-open` or
//! `start`), behind a trait so callers can substitute their own.

use std::process::{Command, Stdio};
use tracing::debug;

/// Browser errors
#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Failed to launch {program}: {source}")]
    Launch {
        program: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}")]
    Exit {
        program: &'static str,
        status: std::process::ExitStatus,
    },
    #[error("Opening URLs is not supported on {0}")]
    Unsupported(&'static str),
}

/// Something that can show a URL to the user.
pub trait UrlOpener {
    fn open_url(&self, url: &str) -> Result<(), BrowserError>;
}

/// Opens URLs with the platform's default handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

impl UrlOpener for SystemOpener {
    fn open_url(&self, url: &str) -> Result<(), BrowserError> {
        validate_url(url)?;
        let (program, mut cmd) = system_command(url)?;
        debug!(program, url, "opening URL");

        let status = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| BrowserError::Launch { program, source })?;

        if !status.success() {
            return Err(BrowserError::Exit { program, status });
        }
        Ok(())
    }
}

/// Only absolute http(s) URLs are handed to the host.
fn validate_url(url: &str) -> Result<(), BrowserError> {
    let parsed =
        url::Url::parse(url).map_err(|e| BrowserError::InvalidUrl(format!("{url}: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(BrowserError::InvalidUrl(format!(
            "{url}: unsupported scheme \"{other}\""
        ))),
    }
}

#[cfg(target_os = "macos")]
fn system_command(url: &str) -> Result<(&'static str, Command), BrowserError> {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    Ok(("open", cmd))
}

#[cfg(target_os = "windows")]
fn system_command(url: &str) -> Result<(&'static str, Command), BrowserError> {
    let mut cmd = Command::new("cmd");
    // empty title argument so `start` does not treat the URL as one
    cmd.args(["/C", "start", ""]).arg(url);
    Ok(("cmd", cmd))
}

#[cfg(all(unix, not(target_os = "macos")))]
fn system_command(url: &str) -> Result<(&'static str, Command), BrowserError> {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    Ok(("xdg-open", cmd))
}

#[cfg(not(any(unix, target_os = "windows")))]
fn system_command(_url: &str) -> Result<(&'static str, Command), BrowserError> {
    Err(BrowserError::Unsupported(std::env::consts::OS))
}
