//! Configuration for MCP server connections

use crate::error::{McpError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for a single MCP server over streamable HTTP
///
/// # Example
///
/// ```
/// use finchat_mcp::McpServerConfig;
///
/// let config = McpServerConfig::new("stock", "http://39.108.114.122:8000/stock/mcp/")?
///     .with_bearer_token("tsk-12345");
///
/// assert_eq!(
///     config.headers.get("Authorization").map(String::as_str),
///     Some("Bearer tsk-12345"),
/// );
/// # Ok::<(), finchat_mcp::McpError>(())
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpServerConfig {
    /// Logical server name (used in logs and tool provenance)
    pub name: String,

    /// Server URL
    pub url: String,

    /// HTTP headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl McpServerConfig {
    /// Create a new configuration, validating the URL
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        Url::parse(&url).map_err(|e| McpError::ConfigError(format!("Invalid URL '{url}': {e}")))?;

        Ok(Self {
            name: name.into(),
            url,
            headers: default_headers(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Add an HTTP header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the `Authorization` header from a bearer token
    ///
    /// A bare key gains the `Bearer ` prefix; a key that already carries it
    /// is left alone, so both forms work in the environment.
    pub fn with_bearer_token(self, token: impl Into<String>) -> Self {
        let token = token.into();
        let value = if token.starts_with("Bearer ") {
            token
        } else {
            format!("Bearer {token}")
        };
        self.with_header("Authorization", value)
    }

    /// Set the request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Headers every streamable-HTTP MCP request carries
fn default_headers() -> HashMap<String, String> {
    HashMap::from([
        ("Content-Type".to_string(), "application/json".to_string()),
        (
            "Accept".to_string(),
            "application/json, text/event-stream".to_string(),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_url() {
        assert!(McpServerConfig::new("stock", "http://localhost:8000/stock/mcp/").is_ok());
        assert!(matches!(
            McpServerConfig::new("stock", "not a url"),
            Err(McpError::ConfigError(_))
        ));
    }

    #[test]
    fn test_bearer_token_normalization() {
        let bare = McpServerConfig::new("fund", "http://localhost:8000/fund/mcp/")
            .unwrap()
            .with_bearer_token("tsk-1");
        assert_eq!(bare.headers["Authorization"], "Bearer tsk-1");

        let prefixed = McpServerConfig::new("fund", "http://localhost:8000/fund/mcp/")
            .unwrap()
            .with_bearer_token("Bearer tsk-1");
        assert_eq!(prefixed.headers["Authorization"], "Bearer tsk-1");
    }

    #[test]
    fn test_default_headers_accept_sse() {
        let config = McpServerConfig::new("finance", "http://localhost:8000/finance/mcp/").unwrap();
        assert_eq!(
            config.headers["Accept"],
            "application/json, text/event-stream"
        );
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = McpServerConfig::new("stock", "http://localhost:8000/stock/mcp/")
            .unwrap()
            .with_timeout(60);
        let json = serde_json::to_string(&config).unwrap();
        let restored: McpServerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.url, config.url);
        assert_eq!(restored.timeout_secs, 60);
    }
}
