use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::config::ServerConfig;
use crate::diagnostics::Diagnostics;
use crate::handlers::{self, RuleTools};
use crate::protocol::{InitializeParams, JsonRpcError, JsonRpcRequest, JsonRpcResponse};
use crate::rules::{Catalog, DirectoryStore, RuleResolver, RuleStore};

/// Maximum bytes per JSON-RPC message (1 MiB).
const MAX_MESSAGE_BYTES: usize = 1024 * 1024;

const COMPONENT: &str = "server";

/// MCP server that communicates using newline-delimited JSON-RPC 2.0.
pub struct McpServer<S> {
    tools: RuleTools<S>,
    diagnostics: Arc<dyn Diagnostics>,
    initialized: bool,
}

impl McpServer<DirectoryStore> {
    /// Build a server reading rule documents from `config.rules_root`.
    pub fn from_config(config: &ServerConfig, diagnostics: Arc<dyn Diagnostics>) -> Self {
        diagnostics.info(
            COMPONENT,
            &format!("Initializing rules server with rules root: {}", config.rules_root.display()),
        );
        let store = DirectoryStore::new(config.rules_root.clone());
        let resolver = RuleResolver::new(Catalog::default(), store, diagnostics.clone());
        Self::new(RuleTools::new(resolver, diagnostics.clone()), diagnostics)
    }
}

impl<S: RuleStore> McpServer<S> {
    pub fn new(tools: RuleTools<S>, diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self {
            tools,
            diagnostics,
            initialized: false,
        }
    }

    /// Serve over the process's stdin/stdout.
    pub async fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        self.serve(stdin, &mut stdout).await
    }

    /// Serve until `reader` reaches end of stream.
    pub async fn serve<R, W>(&mut self, mut reader: R, writer: &mut W) -> Result<(), Box<dyn std::error::Error>>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        self.diagnostics.info(COMPONENT, "Server connected and ready for requests");
        let mut raw = Vec::new();

        loop {
            raw.clear();
            let n = reader.read_until(b'\n', &mut raw).await?;
            if n == 0 {
                break;
            }

            if n > MAX_MESSAGE_BYTES {
                self.diagnostics.warn(
                    COMPONENT,
                    &format!("Message too large: {n} bytes (limit {MAX_MESSAGE_BYTES})"),
                );
                write_response(writer, &JsonRpcResponse::error(None, JsonRpcError::parse_error())).await?;
                continue;
            }

            let trimmed = match std::str::from_utf8(&raw) {
                Ok(s) => s.trim(),
                Err(_) => {
                    write_response(writer, &JsonRpcResponse::error(None, JsonRpcError::parse_error())).await?;
                    continue;
                }
            };

            if trimmed.is_empty() {
                continue;
            }

            let req: JsonRpcRequest = match serde_json::from_str(trimmed) {
                Ok(r) => r,
                Err(e) => {
                    self.diagnostics.warn(COMPONENT, &format!("Parse error: {e}"));
                    write_response(writer, &JsonRpcResponse::error(None, JsonRpcError::parse_error())).await?;
                    continue;
                }
            };

            if req.jsonrpc != "2.0" {
                write_response(
                    writer,
                    &JsonRpcResponse::error(req.id.clone(), JsonRpcError::invalid_request()),
                )
                .await?;
                continue;
            }

            // Only `initialize` is allowed before the handshake completes
            if !self.initialized && req.method != "initialize" {
                if req.id.is_none() {
                    continue;
                }
                write_response(
                    writer,
                    &JsonRpcResponse::error(
                        req.id.clone(),
                        JsonRpcError::invalid_request_with("Server not initialized"),
                    ),
                )
                .await?;
                continue;
            }

            self.diagnostics
                .info(COMPONENT, &format!("{} request received", req.method));

            if req.method == "initialize" {
                self.log_client(&req);
            }

            if let Some(resp) = handlers::dispatch(&req, &self.tools).await {
                write_response(writer, &resp).await?;
            }

            if req.method == "initialize" {
                self.initialized = true;
            }
        }

        self.diagnostics.info(COMPONENT, "Input closed, shutting down");
        Ok(())
    }

    fn log_client(&self, req: &JsonRpcRequest) {
        let Some(params) = req
            .params
            .clone()
            .and_then(|v| serde_json::from_value::<InitializeParams>(v).ok())
        else {
            return;
        };

        let client = params.client_info.as_ref();
        self.diagnostics.info(
            COMPONENT,
            &format!(
                "Client {} {} requested protocol {}",
                client.and_then(|c| c.name.as_deref()).unwrap_or("unknown"),
                client.and_then(|c| c.version.as_deref()).unwrap_or("-"),
                params.protocol_version.as_deref().unwrap_or("unspecified"),
            ),
        );
    }
}

async fn write_response<W: AsyncWrite + Unpin>(
    writer: &mut W,
    resp: &JsonRpcResponse,
) -> Result<(), Box<dyn std::error::Error>> {
    let out = serde_json::to_string(resp)?;
    writer.write_all(out.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}
