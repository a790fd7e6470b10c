use serde::{Deserialize, Serialize};

use super::request::RpcId;
use crate::rules::RuleError;

// ---------------------------------------------------------------------------
// JSON-RPC 2.0 response layer
// ---------------------------------------------------------------------------

/// JSON-RPC 2.0 response envelope.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RpcId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Option<RpcId>, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Option<RpcId>, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// JSON-RPC 2.0 error object (protocol-level errors).
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcError {
    pub fn parse_error() -> Self {
        Self { code: -32700, message: "Parse error".into(), data: None }
    }

    pub fn invalid_request() -> Self {
        Self { code: -32600, message: "Invalid Request".into(), data: None }
    }

    pub fn invalid_request_with(detail: impl Into<String>) -> Self {
        Self { code: -32600, message: detail.into(), data: None }
    }

    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: format!("Method not found: {method}"),
            data: None,
        }
    }

    pub fn invalid_params(detail: impl Into<String>) -> Self {
        Self { code: -32602, message: detail.into(), data: None }
    }

    pub fn internal_error(detail: impl Into<String>) -> Self {
        Self { code: -32603, message: detail.into(), data: None }
    }
}

// ---------------------------------------------------------------------------
// MCP tool result layer (returned inside a *successful* JSON-RPC response)
// ---------------------------------------------------------------------------

/// MCP tool call result wrapper.
#[derive(Debug, Clone, Serialize)]
pub struct ToolResult {
    pub content: Vec<ToolResultContent>,
    #[serde(rename = "isError", skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

/// A single content block inside a tool result.
#[derive(Debug, Clone, Serialize)]
pub struct ToolResultContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

impl ToolResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolResultContent {
                content_type: "text".into(),
                text: text.into(),
            }],
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolResultContent {
                content_type: "text".into(),
                text: text.into(),
            }],
            is_error: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Tool execution failures
// ---------------------------------------------------------------------------

/// Classification carried by every [`ToolExecutionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolErrorCode {
    UnknownTool,
    InvalidArguments,
    UnknownRule,
    DocumentUnreadable,
}

/// The only failure shape that crosses the protocol boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("Tool execution failed: {message}")]
pub struct ToolExecutionError {
    pub tool: String,
    pub code: ToolErrorCode,
    pub message: String,
}

impl ToolExecutionError {
    pub fn new(tool: impl Into<String>, code: ToolErrorCode, message: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            code,
            message: message.into(),
        }
    }

    pub fn unknown_tool(tool: &str) -> Self {
        Self::new(tool, ToolErrorCode::UnknownTool, format!("Unknown tool: {tool}"))
    }

    pub fn invalid_arguments(tool: &str, detail: impl std::fmt::Display) -> Self {
        Self::new(
            tool,
            ToolErrorCode::InvalidArguments,
            format!("Invalid arguments for {tool}: {detail}"),
        )
    }

    /// Wrap an internal failure, keeping its message and dropping its type.
    pub fn from_rule_error(tool: &str, err: &RuleError) -> Self {
        let code = match err {
            RuleError::UnknownRule { .. } => ToolErrorCode::UnknownRule,
            RuleError::DocumentRead(_) => ToolErrorCode::DocumentUnreadable,
        };
        Self::new(tool, code, err.to_string())
    }
}

#[derive(Serialize)]
struct ToolErrorEnvelope<'a> {
    error: &'a ToolExecutionError,
}

/// Convert a tool failure into a tool result with `isError: true`.
///
/// The text content is the JSON-serialized error under an `error` key,
/// preserving the structure for clients that inspect tool output.
impl From<ToolExecutionError> for ToolResult {
    fn from(err: ToolExecutionError) -> Self {
        match serde_json::to_string(&ToolErrorEnvelope { error: &err }) {
            Ok(json) => Self::error(format!("{json}\n")),
            Err(_) => Self::error(err.to_string()),
        }
    }
}
