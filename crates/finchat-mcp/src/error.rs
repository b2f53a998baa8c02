//! Error types for MCP operations

use thiserror::Error;

/// Result type for MCP operations
pub type Result<T> = std::result::Result<T, McpError>;

/// Errors that can occur during MCP operations
#[derive(Error, Debug)]
pub enum McpError {
    /// Connection or initialization failed
    #[error("MCP connection failed: {0}")]
    ConnectionFailed(String),

    /// Not connected to MCP server
    #[error("Not connected to MCP server")]
    NotConnected,

    /// MCP request failed
    #[error("MCP request failed: {0}")]
    RequestFailed(String),

    /// Remote server answered with a JSON-RPC error
    #[error("MCP server error {code}: {message}")]
    ServerError {
        /// JSON-RPC error code
        code: i64,
        /// Error message from the server
        message: String,
    },

    /// MCP tool call failed
    #[error("MCP tool call failed: {0}")]
    ToolCallFailed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
}

/// Convert McpError to finchat_core::Error
impl From<McpError> for finchat_core::Error {
    fn from(err: McpError) -> Self {
        finchat_core::Error::ProcessingFailed(err.to_string())
    }
}
