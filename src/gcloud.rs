//! Subprocess layer around the `gcloud` binary.
//!
//! Policy enforcement happens before anything reaches this module; here a
//! command is just an argument vector handed to the CLI. A non-zero exit
//! code from gcloud is a normal outcome, not an error.

use std::process::Stdio;

use anyhow::Context;
use tokio::process::Command;

/// Cap per captured stream. gcloud can dump megabytes of YAML; anything past
/// this is truncated with a marker rather than forwarded to the agent.
const MAX_OUTPUT_BYTES: usize = 1_048_576;

/// The resolved outcome of one gcloud invocation.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Exit code, `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Whether the `gcloud` binary is reachable on PATH.
pub async fn is_available() -> bool {
    Command::new("which")
        .arg("gcloud")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map(|status| status.success())
        .unwrap_or(false)
}

/// Run `gcloud <args>` and collect both streams.
///
/// Only a spawn failure is an error; gcloud's own failures are resolved into
/// the returned [`Invocation`] so callers can relay them verbatim.
pub async fn invoke(args: &[String]) -> anyhow::Result<Invocation> {
    let output = Command::new("gcloud")
        .args(args)
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .output()
        .await
        .context("failed to spawn gcloud")?;

    Ok(Invocation {
        code: output.status.code(),
        stdout: truncate_stream(&output.stdout),
        stderr: truncate_stream(&output.stderr),
    })
}

/// Fetch an access token for the active gcloud account. The REST clients use
/// this as their bearer token source.
pub async fn print_access_token() -> anyhow::Result<String> {
    let result = invoke(&["auth".into(), "print-access-token".into()]).await?;
    if result.code != Some(0) {
        anyhow::bail!(
            "gcloud auth print-access-token failed (code {:?}): {}",
            result.code,
            result.stderr.trim()
        );
    }
    Ok(result.stdout.trim().to_string())
}

fn truncate_stream(bytes: &[u8]) -> String {
    let mut text = String::from_utf8_lossy(bytes).into_owned();
    if text.len() > MAX_OUTPUT_BYTES {
        let mut cut = MAX_OUTPUT_BYTES;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
        text.push_str("\n[output truncated]");
    }
    text
}
