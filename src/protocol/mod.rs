pub mod request;
pub mod response;

pub use request::{
    ClientInfo, FetchRuleParams, InitializeParams, JsonRpcRequest, RpcId, ToolCallParams,
};
pub use response::{
    JsonRpcError, JsonRpcResponse, ToolErrorCode, ToolExecutionError, ToolResult,
    ToolResultContent,
};
