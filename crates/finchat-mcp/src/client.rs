//! Streamable-HTTP MCP client
//!
//! Communicates with a remote MCP server using JSON-RPC 2.0 over HTTP POST.
//! Servers may answer either with a plain JSON body or with a single-event
//! SSE frame; both are handled. A session id issued during `initialize` is
//! echoed back on subsequent requests.

use crate::config::McpServerConfig;
use crate::error::{McpError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info};

const PROTOCOL_VERSION: &str = "2024-11-05";

/// MCP tool definition (from tools/list)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpToolDefinition {
    /// Tool name
    pub name: String,
    /// Tool description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema for the tool input
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// MCP tool result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpToolResult {
    /// Content blocks returned by the tool
    pub content: Vec<McpContent>,
    /// Whether the tool reported an error
    #[serde(skip_serializing_if = "Option::is_none", rename = "isError")]
    pub is_error: Option<bool>,
}

/// MCP content block
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum McpContent {
    /// Text content
    Text {
        /// Text payload
        text: String,
    },
    /// Resource reference
    Resource {
        /// Resource URI
        uri: String,
        /// MIME type
        #[serde(skip_serializing_if = "Option::is_none", rename = "mimeType")]
        mime_type: Option<String>,
    },
}

/// MCP client over streamable HTTP
pub struct HttpMcpClient {
    config: McpServerConfig,
    http_client: reqwest::Client,
    connected: AtomicBool,
    request_id: AtomicU64,
    session_id: Mutex<Option<String>>,
}

impl HttpMcpClient {
    /// Create a new client from configuration
    pub fn new(config: McpServerConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            config,
            http_client,
            connected: AtomicBool::new(false),
            request_id: AtomicU64::new(0),
            session_id: Mutex::new(None),
        })
    }

    /// Server name from the configuration
    pub fn server_name(&self) -> &str {
        &self.config.name
    }

    /// Check if the client has completed initialization
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    /// Initialize the MCP session
    pub async fn connect(&self) -> Result<()> {
        let result = self
            .send_request(
                "initialize",
                json!({
                    "protocolVersion": PROTOCOL_VERSION,
                    "capabilities": {},
                    "clientInfo": {
                        "name": "finchat",
                        "version": env!("CARGO_PKG_VERSION"),
                    }
                }),
            )
            .await
            .map_err(|e| McpError::ConnectionFailed(e.to_string()))?;

        let server = result
            .get("serverInfo")
            .and_then(|v| v.get("name"))
            .and_then(|v| v.as_str())
            .unwrap_or("unknown");
        info!(server = %self.config.name, remote = server, "MCP session initialized");

        self.connected.store(true, Ordering::Release);

        // The initialized notification has no id and expects no reply
        self.send_notification("notifications/initialized").await?;

        Ok(())
    }

    /// List the tools the server exposes
    pub async fn list_tools(&self) -> Result<Vec<McpToolDefinition>> {
        self.ensure_connected()?;
        let result = self.send_request("tools/list", json!({})).await?;

        let tools = result
            .get("tools")
            .cloned()
            .ok_or_else(|| McpError::RequestFailed("tools/list result has no tools".to_string()))?;
        Ok(serde_json::from_value(tools)?)
    }

    /// Call a tool by name
    pub async fn call_tool(&self, name: &str, arguments: Value) -> Result<McpToolResult> {
        self.ensure_connected()?;
        let result = self
            .send_request(
                "tools/call",
                json!({
                    "name": name,
                    "arguments": arguments,
                }),
            )
            .await?;

        Ok(serde_json::from_value(result)?)
    }

    fn ensure_connected(&self) -> Result<()> {
        if self.is_connected() {
            Ok(())
        } else {
            Err(McpError::NotConnected)
        }
    }

    fn next_request_id(&self) -> u64 {
        self.request_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    async fn build_headers(&self) -> Result<HeaderMap> {
        let mut header_map = HeaderMap::new();

        for (key, value) in &self.config.headers {
            let name = HeaderName::from_str(key)
                .map_err(|e| McpError::ConfigError(format!("Invalid header name '{key}': {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| McpError::ConfigError(format!("Invalid header value: {e}")))?;
            header_map.insert(name, value);
        }

        if let Some(session) = self.session_id.lock().await.as_deref() {
            let value = HeaderValue::from_str(session)
                .map_err(|e| McpError::ConfigError(format!("Invalid session id: {e}")))?;
            header_map.insert("Mcp-Session-Id", value);
        }

        Ok(header_map)
    }

    /// Send a JSON-RPC request and return its `result` value
    async fn send_request(&self, method: &str, params: Value) -> Result<Value> {
        let id = self.next_request_id();
        let request = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        debug!(server = %self.config.name, method, id, "Sending MCP request");

        let headers = self.build_headers().await?;
        let response = self
            .http_client
            .post(&self.config.url)
            .headers(headers)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(McpError::RequestFailed(format!("HTTP {status}: {body}")));
        }

        // Capture the session id the server hands out on initialize
        if let Some(session) = response
            .headers()
            .get("mcp-session-id")
            .and_then(|v| v.to_str().ok())
        {
            *self.session_id.lock().await = Some(session.to_string());
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let body = response.text().await?;

        let envelope = parse_rpc_body(&content_type, &body)?;

        if let Some(error) = envelope.get("error") {
            let code = error.get("code").and_then(Value::as_i64).unwrap_or(0);
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            return Err(McpError::ServerError { code, message });
        }

        envelope
            .get("result")
            .cloned()
            .ok_or_else(|| McpError::RequestFailed(format!("{method}: response has no result")))
    }

    /// Send a JSON-RPC notification (no id, no reply expected)
    async fn send_notification(&self, method: &str) -> Result<()> {
        let request = json!({
            "jsonrpc": "2.0",
            "method": method,
        });

        let headers = self.build_headers().await?;
        self.http_client
            .post(&self.config.url)
            .headers(headers)
            .json(&request)
            .send()
            .await?;

        Ok(())
    }
}

/// Extract the JSON-RPC envelope from a response body
///
/// Streamable-HTTP servers may frame the reply as a single SSE event
/// (`data: {...}`); plain JSON bodies pass straight through.
fn parse_rpc_body(content_type: &str, body: &str) -> Result<Value> {
    if content_type.starts_with("text/event-stream") {
        let data = body
            .lines()
            .find_map(|line| line.strip_prefix("data:"))
            .map(str::trim)
            .ok_or_else(|| {
                McpError::RequestFailed("SSE response contained no data frame".to_string())
            })?;
        Ok(serde_json::from_str(data)?)
    } else {
        Ok(serde_json::from_str(body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> McpServerConfig {
        McpServerConfig::new("stock", "http://localhost:8000/stock/mcp/").unwrap()
    }

    #[test]
    fn test_client_starts_disconnected() {
        let client = HttpMcpClient::new(test_config()).unwrap();
        assert!(!client.is_connected());
        assert_eq!(client.server_name(), "stock");
    }

    #[tokio::test]
    async fn test_calls_require_connection() {
        let client = HttpMcpClient::new(test_config()).unwrap();
        let err = client.list_tools().await.unwrap_err();
        assert!(matches!(err, McpError::NotConnected));
    }

    #[test]
    fn test_parse_plain_json_body() {
        let body = r#"{"jsonrpc":"2.0","id":1,"result":{"tools":[]}}"#;
        let envelope = parse_rpc_body("application/json", body).unwrap();
        assert!(envelope["result"]["tools"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_parse_sse_body() {
        let body = "event: message\ndata: {\"jsonrpc\":\"2.0\",\"id\":1,\"result\":{\"ok\":true}}\n\n";
        let envelope = parse_rpc_body("text/event-stream; charset=utf-8", body).unwrap();
        assert_eq!(envelope["result"]["ok"], true);
    }

    #[test]
    fn test_parse_sse_body_without_data_fails() {
        let err = parse_rpc_body("text/event-stream", "event: ping\n\n").unwrap_err();
        assert!(matches!(err, McpError::RequestFailed(_)));
    }

    #[test]
    fn test_tool_definition_deserialization() {
        let json = r#"{
            "name": "stock_basic",
            "description": "股票基础信息",
            "inputSchema": {"type": "object", "properties": {"ts_code": {"type": "string"}}}
        }"#;
        let def: McpToolDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def.name, "stock_basic");
        assert_eq!(def.input_schema["type"], "object");
    }

    #[test]
    fn test_tool_result_deserialization() {
        let json = r#"{
            "content": [{"type": "text", "text": "600519.SH 贵州茅台"}],
            "isError": false
        }"#;
        let result: McpToolResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.content.len(), 1);
        assert_eq!(result.is_error, Some(false));
    }
}
