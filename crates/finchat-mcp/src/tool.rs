//! McpTool wrapper that implements the Tool trait

use crate::client::{HttpMcpClient, McpContent, McpToolDefinition};
use async_trait::async_trait;
use finchat_tools::Tool;
use serde_json::Value;
use std::sync::Arc;

/// Wrapper exposing a remote MCP tool as a [`finchat_tools::Tool`]
///
/// Execution is delegated to the owning client; results are flattened into
/// the JSON shape the agent loop expects.
pub struct McpTool {
    definition: McpToolDefinition,
    client: Arc<HttpMcpClient>,
}

impl McpTool {
    /// Create a new wrapper
    pub fn new(definition: McpToolDefinition, client: Arc<HttpMcpClient>) -> Self {
        Self { definition, client }
    }

    /// Name of the server this tool belongs to
    pub fn server_name(&self) -> &str {
        self.client.server_name()
    }

    /// Flatten MCP content blocks into a JSON value
    fn convert_result(content: Vec<McpContent>) -> Value {
        let mut text_parts = Vec::new();
        let mut resources = Vec::new();

        for block in content {
            match block {
                McpContent::Text { text } => text_parts.push(text),
                McpContent::Resource { uri, mime_type } => {
                    resources.push(serde_json::json!({
                        "uri": uri,
                        "mimeType": mime_type,
                    }));
                }
            }
        }

        let mut result = serde_json::json!({
            "text": text_parts.join("\n"),
        });

        if !resources.is_empty() {
            result["resources"] = serde_json::json!(resources);
        }

        result
    }
}

#[async_trait]
impl Tool for McpTool {
    async fn execute(&self, params: Value) -> finchat_core::Result<Value> {
        let result = self
            .client
            .call_tool(&self.definition.name, params)
            .await
            .map_err(|e| {
                finchat_core::Error::ProcessingFailed(format!("MCP tool call failed: {e}"))
            })?;

        if result.is_error.unwrap_or(false) {
            return Err(finchat_core::Error::ProcessingFailed(format!(
                "MCP tool '{}' returned error: {:?}",
                self.definition.name, result.content
            )));
        }

        Ok(Self::convert_result(result.content))
    }

    fn name(&self) -> &str {
        &self.definition.name
    }

    fn description(&self) -> &str {
        self.definition
            .description
            .as_deref()
            .unwrap_or("No description available")
    }

    fn input_schema(&self) -> Value {
        self.definition.input_schema.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_result_text_only() {
        let content = vec![
            McpContent::Text {
                text: "600519.SH".to_string(),
            },
            McpContent::Text {
                text: "贵州茅台".to_string(),
            },
        ];

        let result = McpTool::convert_result(content);
        assert_eq!(result["text"], "600519.SH\n贵州茅台");
        assert!(result.get("resources").is_none());
    }

    #[test]
    fn test_convert_result_with_resource() {
        let content = vec![
            McpContent::Text {
                text: "report".to_string(),
            },
            McpContent::Resource {
                uri: "finance://reports/600519/2024Q4".to_string(),
                mime_type: Some("application/json".to_string()),
            },
        ];

        let result = McpTool::convert_result(content);
        assert_eq!(result["text"], "report");
        assert_eq!(result["resources"][0]["uri"], "finance://reports/600519/2024Q4");
    }
}
