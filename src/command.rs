use anyhow::{bail, Context, Result};
use log::{debug, warn};
use std::process::Command;

/// Run the shell command attached to an event binding. Output is logged,
/// a non-zero exit becomes an error for the caller to report.
pub fn run(command: &str) -> Result<()> {
    debug!("running binding command: {command}");

    let output = Command::new("sh")
        .arg("-c")
        .arg(command)
        .output()
        .with_context(|| format!("failed to spawn `{command}`"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        warn!(
            "binding command exited with {}: {}",
            output.status,
            stderr.trim()
        );
        bail!("command exited with {}", output.status);
    }

    if !output.stdout.is_empty() {
        debug!(
            "command output: {}",
            String::from_utf8_lossy(&output.stdout).trim()
        );
    }
    Ok(())
}
