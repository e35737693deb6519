//! The gcloud MCP server: one tool that runs admitted gcloud commands.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::{tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router,
};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::gcloud::{self, Invocation};
use crate::policy::{CommandPolicy, PolicyDecision};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct RunGcloudCommandParams {
    /// Arguments passed to the gcloud binary, one token per element, without
    /// the leading `gcloud`.
    pub args: Vec<String>,
}

#[derive(Clone)]
pub struct GcloudService {
    policy: Arc<CommandPolicy>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl GcloudService {
    pub fn new(policy: CommandPolicy) -> Self {
        Self {
            policy: Arc::new(policy),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Executes a gcloud command.\n\n## Instructions:\n- Use this tool to execute a single gcloud command at a time.\n- Use this tool when you are confident about the exact gcloud command needed to fulfill the user's request.\n- Prioritize this tool over any other to directly execute gcloud commands.\n- Assume all necessary APIs are already enabled. Do not proactively try to enable any APIs.\n- Do not use this tool to execute command chaining or command sequencing -- it will fail.\n- Always include all required parameters.\n- Ensure parameter values match the expected format.\n\n## Adhere to the following restrictions:\n- **No command substitution**: Do not use subshells or command substitution (e.g., $(...))\n- **No pipes**: Do not use pipes (i.e., |) or any other shell-specific operators\n- **No redirection**: Do not use redirection operators (e.g., >, >>, <)"
    )]
    async fn run_gcloud_command(
        &self,
        Parameters(params): Parameters<RunGcloudCommandParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.policy.evaluate(&params.args) {
            PolicyDecision::DeniedByAllowlist => {
                tracing::info!(command = %params.args.join(" "), "denied by allowlist");
                Ok(CallToolResult::success(vec![Content::text(
                    "Command is not part of this tool's current allowlist of enabled commands.",
                )]))
            }
            PolicyDecision::DeniedByDenylist => {
                tracing::info!(command = %params.args.join(" "), "denied by denylist");
                Ok(CallToolResult::success(vec![Content::text(
                    "Command is part of this tool's current denylist of disabled commands.",
                )]))
            }
            PolicyDecision::Allowed => match gcloud::invoke(&params.args).await {
                Ok(invocation) => Ok(CallToolResult::success(vec![Content::text(
                    format_invocation(&invocation),
                )])),
                Err(err) => Ok(CallToolResult::error(vec![Content::text(err.to_string())])),
            },
        }
    }
}

/// A non-zero exit code is relayed, not raised: the output may still be
/// useful and partial results are common for commands that touch multiple
/// resources.
fn format_invocation(invocation: &Invocation) -> String {
    let code = invocation
        .code
        .map_or_else(|| "unknown".to_string(), |c| c.to_string());
    let mut result = format!(
        "gcloud process exited with code {code}. stdout:\n{}",
        invocation.stdout
    );
    if !invocation.stderr.is_empty() {
        result.push_str(&format!("\nstderr:\n{}", invocation.stderr));
    }
    result
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for GcloudService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "gcloud-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "Provides controlled access to the gcloud CLI. Use run_gcloud_command to \
                 execute a single gcloud command; shell operators are not supported."
                    .into(),
            ),
            ..Default::default()
        }
    }
}

/// Serve the gcloud service over stdio until the client disconnects.
pub async fn serve_stdio(policy: CommandPolicy) -> anyhow::Result<()> {
    let service = GcloudService::new(policy)
        .serve((tokio::io::stdin(), tokio::io::stdout()))
        .await?;
    service.waiting().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{AllowMatcher, DenyMatcher};

    fn service() -> GcloudService {
        GcloudService::new(CommandPolicy::new(
            AllowMatcher::new(Vec::<String>::new()),
            DenyMatcher::new(["compute ssh"]),
        ))
    }

    #[test]
    fn advertises_the_single_tool() {
        let service = service();
        let tools = service.tool_router.list_all();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "run_gcloud_command");
    }

    #[test]
    fn get_info_enables_tools() {
        let info = service().get_info();
        assert!(info.capabilities.tools.is_some());
        assert_eq!(info.server_info.name, "gcloud-mcp");
    }

    #[test]
    fn formats_exit_code_and_both_streams() {
        let text = format_invocation(&Invocation {
            code: Some(1),
            stdout: "partial".into(),
            stderr: "boom".into(),
        });
        assert_eq!(
            text,
            "gcloud process exited with code 1. stdout:\npartial\nstderr:\nboom"
        );
    }

    #[test]
    fn omits_stderr_section_when_empty() {
        let text = format_invocation(&Invocation {
            code: Some(0),
            stdout: "ok\n".into(),
            stderr: String::new(),
        });
        assert!(!text.contains("stderr"));
    }

    #[test]
    fn formats_signal_death_as_unknown_code() {
        let text = format_invocation(&Invocation {
            code: None,
            stdout: String::new(),
            stderr: String::new(),
        });
        assert!(text.starts_with("gcloud process exited with code unknown."));
    }
}
