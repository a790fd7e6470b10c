pub mod fetch_rule;
pub mod fetch_workflow_guide;
pub mod list_available_rules;

use std::sync::Arc;
use std::time::Instant;

use serde_json::{json, Value};

use crate::diagnostics::Diagnostics;
use crate::protocol::{
    FetchRuleParams, JsonRpcError, JsonRpcRequest, JsonRpcResponse, ToolCallParams,
    ToolExecutionError, ToolResult,
};
use crate::rules::{Category, RuleResolver, RuleStore};
use crate::schema;

const COMPONENT: &str = "tools";

/// The operations exposed through `tools/call`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    FetchWorkflowGuide,
    FetchRule,
    ListAvailableRules,
}

impl Tool {
    pub const ALL: [Tool; 3] = [Tool::FetchWorkflowGuide, Tool::FetchRule, Tool::ListAvailableRules];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::FetchWorkflowGuide => "fetch_workflow_guide",
            Self::FetchRule => "fetch_rule",
            Self::ListAvailableRules => "list_available_rules",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::FetchWorkflowGuide => {
                "Fetch the core workflow guide (Plan/Implement/Review with Golden Rules). Essential reading for all AI agents."
            }
            Self::FetchRule => {
                "Fetch a specific engineering rule (e.g., Python, Terraform, AWS, Kubernetes)"
            }
            Self::ListAvailableRules => {
                "List all available engineering rules with categories, descriptions, and priorities"
            }
        }
    }

    /// JSON Schema for the tool's `arguments`.
    pub fn input_schema(&self) -> Value {
        match self {
            Self::FetchRule => {
                let categories: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
                json!({
                    "type": "object",
                    "required": ["category", "topic"],
                    "properties": {
                        "category": {
                            "type": "string",
                            "description": "Category of the rule",
                            "enum": categories
                        },
                        "topic": {
                            "type": "string",
                            "description": "Specific topic (e.g., python, terraform, aws, kubernetes, docker)"
                        }
                    }
                })
            }
            Self::FetchWorkflowGuide | Self::ListAvailableRules => json!({
                "type": "object",
                "properties": {}
            }),
        }
    }

    pub fn definition(&self) -> Value {
        json!({
            "name": self.name(),
            "description": self.description(),
            "inputSchema": self.input_schema()
        })
    }
}

/// Tool dispatcher: validates arguments, runs the operation, and collapses
/// every failure into a [`ToolExecutionError`].
pub struct RuleTools<S> {
    resolver: RuleResolver<S>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl<S: RuleStore> RuleTools<S> {
    pub fn new(resolver: RuleResolver<S>, diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self {
            resolver,
            diagnostics,
        }
    }

    /// Payload for `tools/list`.
    pub fn list(&self) -> Value {
        let tools: Vec<Value> = Tool::ALL.iter().map(Tool::definition).collect();
        self.diagnostics
            .info(COMPONENT, &format!("Returning {} available tools", tools.len()));
        json!({ "tools": tools })
    }

    /// Invoke a tool by name. Absent `arguments` are treated as `{}`.
    pub async fn call(&self, name: &str, arguments: Option<&Value>) -> Result<String, ToolExecutionError> {
        let arguments = arguments.cloned().unwrap_or_else(|| json!({}));
        self.diagnostics
            .info(COMPONENT, &format!("Tool called: \"{name}\" with args: {arguments}"));

        let started = Instant::now();
        match self.execute(name, arguments).await {
            Ok(text) => {
                self.diagnostics.info(
                    COMPONENT,
                    &format!(
                        "Tool \"{name}\" completed in {}ms ({} chars)",
                        started.elapsed().as_millis(),
                        text.chars().count()
                    ),
                );
                Ok(text)
            }
            Err(err) => {
                self.diagnostics.warn(
                    COMPONENT,
                    &format!("Tool execution failed for \"{name}\": {}", err.message),
                );
                Err(err)
            }
        }
    }

    async fn execute(&self, name: &str, arguments: Value) -> Result<String, ToolExecutionError> {
        let tool = Tool::from_name(name).ok_or_else(|| ToolExecutionError::unknown_tool(name))?;

        schema::validate_value(&tool.input_schema(), &arguments)
            .map_err(|e| ToolExecutionError::invalid_arguments(name, e))?;

        match tool {
            Tool::FetchWorkflowGuide => fetch_workflow_guide::handle(&self.resolver)
                .await
                .map_err(|e| ToolExecutionError::from_rule_error(name, &e)),
            Tool::FetchRule => {
                let params: FetchRuleParams = serde_json::from_value(arguments)
                    .map_err(|e| ToolExecutionError::invalid_arguments(name, e))?;
                fetch_rule::handle(&self.resolver, &params)
                    .await
                    .map_err(|e| ToolExecutionError::from_rule_error(name, &e))
            }
            Tool::ListAvailableRules => Ok(list_available_rules::handle(&self.resolver)),
        }
    }
}

/// Dispatch a JSON-RPC request to the appropriate handler.
///
/// Returns `None` for notifications (no response required).
pub async fn dispatch<S: RuleStore>(
    req: &JsonRpcRequest,
    tools: &RuleTools<S>,
) -> Option<JsonRpcResponse> {
    match req.method.as_str() {
        "initialize" => {
            let result = json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": "cursor-engineering-rules-mcp",
                    "version": env!("CARGO_PKG_VERSION")
                }
            });
            Some(JsonRpcResponse::success(req.id.clone(), result))
        }

        "notifications/initialized" => None,

        "ping" => Some(JsonRpcResponse::success(req.id.clone(), json!({}))),

        "tools/list" => Some(JsonRpcResponse::success(req.id.clone(), tools.list())),

        "tools/call" => {
            let params: ToolCallParams = match &req.params {
                Some(v) => match serde_json::from_value(v.clone()) {
                    Ok(p) => p,
                    Err(e) => {
                        return Some(JsonRpcResponse::error(
                            req.id.clone(),
                            JsonRpcError::invalid_params(format!(
                                "Invalid tools/call params: {e}"
                            )),
                        ));
                    }
                },
                None => {
                    return Some(JsonRpcResponse::error(
                        req.id.clone(),
                        JsonRpcError::invalid_params("Missing params for tools/call"),
                    ));
                }
            };

            let tool_result = match tools.call(&params.name, params.arguments.as_ref()).await {
                Ok(text) => ToolResult::text(text),
                Err(err) => err.into(),
            };

            match serde_json::to_value(&tool_result) {
                Ok(result) => Some(JsonRpcResponse::success(req.id.clone(), result)),
                Err(e) => Some(JsonRpcResponse::error(
                    req.id.clone(),
                    JsonRpcError::internal_error(format!("Cannot serialize tool result: {e}")),
                )),
            }
        }

        _ => Some(JsonRpcResponse::error(
            req.id.clone(),
            JsonRpcError::method_not_found(&req.method),
        )),
    }
}
