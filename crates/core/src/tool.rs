//! Tool result types and the policy for tool names the registry doesn't know.
//!
//! The registry itself lives in `alterego-tools`: it is a closed set of typed
//! handlers, so core only defines what flows back into the conversation.

use serde::{Deserialize, Serialize};

/// The result of a tool execution, correlated to its invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    /// The call ID this result is for
    pub call_id: String,

    /// Whether the tool executed successfully
    pub success: bool,

    /// JSON payload fed back to the model
    pub payload: serde_json::Value,
}

impl ToolResult {
    /// A successful result.
    pub fn ok(call_id: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            call_id: call_id.into(),
            success: true,
            payload,
        }
    }

    /// A failed result. The reason is reported to the model as `{"error": ...}`.
    pub fn failed(call_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            call_id: call_id.into(),
            success: false,
            payload: serde_json::json!({ "error": reason.into() }),
        }
    }

    /// JSON-encoded payload, as stored in the tool message content.
    pub fn content(&self) -> String {
        self.payload.to_string()
    }
}

/// What to do when the model names a tool that isn't registered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownToolPolicy {
    /// Answer with an empty object and keep going
    #[default]
    Lenient,
    /// Fail the request with `ToolError::NotFound`
    Strict,
}
