//! MCP server plumbing shared by both services.

pub mod gcloud_server;
pub mod observability_server;

use rmcp::ErrorData as McpError;
use rmcp::model::{CallToolResult, Content};
use serde_json::json;

use crate::error::ApiError;

/// Cap on the text relayed to the agent per tool call.
pub const MAX_RESPONSE_CHARS: usize = 100_000;

/// Post-process tool output before it goes on the wire: enforce the response
/// cap and turn empty JSON payloads into natural language.
fn postprocess(mut text: String) -> String {
    if text.len() > MAX_RESPONSE_CHARS {
        let mut cut = MAX_RESPONSE_CHARS;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
        text.push_str("... (truncated due to 100000 character limit)");
    }
    if text.is_empty() || text == "[]" || text == "{}" {
        text = "Invoked tool returned an empty result".to_string();
    }
    text
}

/// Relay an API call outcome as a tool result. Failures become an error
/// result carrying a JSON payload rather than a protocol error, so the agent
/// can read what went wrong.
fn relay(result: Result<String, ApiError>) -> Result<CallToolResult, McpError> {
    match result {
        Ok(text) => Ok(CallToolResult::success(vec![Content::text(postprocess(
            text,
        ))])),
        Err(err) => {
            tracing::error!(error = %err, "tool call failed");
            let payload = json!({
                "error": {
                    "name": "ApiError",
                    "message": err.to_string(),
                }
            });
            Ok(CallToolResult::error(vec![Content::text(
                payload.to_string(),
            )]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(postprocess("hello".into()), "hello");
    }

    #[test]
    fn oversized_text_is_capped_with_notice() {
        let text = postprocess("x".repeat(MAX_RESPONSE_CHARS + 50));
        assert!(text.starts_with("xxx"));
        assert!(text.ends_with("... (truncated due to 100000 character limit)"));
    }

    #[test]
    fn empty_payloads_become_natural_language() {
        for empty in ["", "[]", "{}"] {
            assert_eq!(
                postprocess(empty.to_string()),
                "Invoked tool returned an empty result"
            );
        }
    }

    #[test]
    fn nonempty_json_is_not_rewritten() {
        assert_eq!(postprocess("[1]".into()), "[1]");
    }
}
