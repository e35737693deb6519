//! Command-line surface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "gcloud-mcp",
    version,
    about = "MCP servers for Google Cloud: gcloud CLI access and Observability APIs"
)]
pub struct Cli {
    /// Absolute path to a JSON config file with allowlist/denylist settings.
    #[arg(long, value_name = "ABS_PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the Cloud Observability MCP server on stdio.
    Observability,

    /// Write agent extension scaffolding into the current directory.
    Init {
        /// The agent to install for.
        #[arg(long)]
        agent: String,

        /// Point the extension at a local development build.
        #[arg(long)]
        local: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_runs_the_default_server() {
        let cli = Cli::parse_from(["gcloud-mcp"]);
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn config_flag_is_captured() {
        let cli = Cli::parse_from(["gcloud-mcp", "--config", "/etc/gcloud-mcp.json"]);
        assert_eq!(
            cli.config.as_deref(),
            Some(std::path::Path::new("/etc/gcloud-mcp.json"))
        );
    }

    #[test]
    fn init_requires_an_agent() {
        assert!(Cli::try_parse_from(["gcloud-mcp", "init"]).is_err());
        let cli = Cli::parse_from(["gcloud-mcp", "init", "--agent", "gemini-cli", "--local"]);
        match cli.command {
            Some(Commands::Init { agent, local }) => {
                assert_eq!(agent, "gemini-cli");
                assert!(local);
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }
}
