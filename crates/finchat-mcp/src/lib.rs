//! MCP integration for finchat
//!
//! The finance data the agents reason over (stock quotes, financial
//! statements, fund holdings) lives behind remote MCP servers speaking
//! JSON-RPC 2.0 over streamable HTTP. This crate provides:
//!
//! - [`McpServerConfig`]: endpoint + auth configuration for one server
//! - [`HttpMcpClient`]: initialize / tools-list / tools-call over HTTP
//! - [`McpToolset`]: connects, discovers the server's tools, and exposes
//!   each one as a [`finchat_tools::Tool`] agents can call

pub mod client;
pub mod config;
pub mod error;
pub mod tool;
pub mod toolset;

pub use client::{HttpMcpClient, McpContent, McpToolDefinition, McpToolResult};
pub use config::McpServerConfig;
pub use error::{McpError, Result};
pub use tool::McpTool;
pub use toolset::McpToolset;
