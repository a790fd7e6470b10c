use std::sync::Arc;

use engineering_rules_mcp::config::ServerConfig;
use engineering_rules_mcp::diagnostics::{init_tracing, TracingDiagnostics};
use engineering_rules_mcp::server::McpServer;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = match ServerConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("engineering-rules-mcp: configuration error: {e}");
            std::process::exit(1);
        }
    };

    init_tracing("info");

    let mut server = McpServer::from_config(&config, Arc::new(TracingDiagnostics));
    if let Err(e) = server.run().await {
        tracing::error!("fatal error: {e}");
        std::process::exit(1);
    }
}
