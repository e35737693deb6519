//! Agent extension scaffolding for the `init` subcommand.

use std::path::{Path, PathBuf};

use serde_json::json;

use crate::error::InstallError;

const GEMINI_CONTEXT: &str = include_str!("../docs/GEMINI-extension.md");

/// Write extension scaffolding for the named agent into `cwd` and return the
/// created file paths in creation order.
pub fn run(agent: &str, local: bool, cwd: &Path) -> Result<Vec<PathBuf>, InstallError> {
    match agent {
        "gemini-cli" => init_gemini_cli(local, cwd),
        other => Err(InstallError::UnknownAgent(other.to_string())),
    }
}

fn init_gemini_cli(local: bool, cwd: &Path) -> Result<Vec<PathBuf>, InstallError> {
    let extension_dir = cwd.join(".gemini").join("extensions").join("gcloud-mcp");
    std::fs::create_dir_all(&extension_dir)?;

    let name = if local {
        "gcloud-mcp [LOCAL]"
    } else {
        "gcloud-mcp"
    };
    let manifest = json!({
        "name": name,
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Enable MCP-compatible AI agents to interact with Google Cloud.",
        "contextFileName": "GEMINI.md",
        "mcpServers": {
            "gcloud": {
                "command": "gcloud-mcp",
                "args": [],
            },
        },
    });

    let manifest_path = extension_dir.join("gemini-extension.json");
    std::fs::write(
        &manifest_path,
        serde_json::to_string_pretty(&manifest).unwrap_or_default(),
    )?;

    let context_path = extension_dir.join("GEMINI.md");
    std::fs::write(&context_path, GEMINI_CONTEXT)?;

    Ok(vec![manifest_path, context_path])
}
