//! MCP server for engineering rule documents.
//!
//! Exposes `fetch_workflow_guide`, `fetch_rule`, and `list_available_rules`
//! tools over JSON-RPC 2.0 stdio transport. Rule documents live in a flat
//! directory and are described by a fixed catalog.

pub mod config;
pub mod diagnostics;
pub mod handlers;
pub mod protocol;
pub mod rules;
pub mod server;

pub mod schema;
