//! Toolset: a connected MCP server and its discovered tools

use crate::client::HttpMcpClient;
use crate::config::McpServerConfig;
use crate::error::Result;
use crate::tool::McpTool;
use finchat_tools::Tool;
use std::sync::Arc;
use tracing::info;

/// A connected MCP server with its tools discovered and wrapped
///
/// Construction performs the full handshake: initialize the session, list
/// the server's tools, and wrap each one as a [`Tool`]. A toolset whose
/// server is unreachable fails construction; callers decide whether that is
/// fatal (single data source) or degradable (one of several).
pub struct McpToolset {
    name: String,
    tools: Vec<Arc<McpTool>>,
}

impl McpToolset {
    /// Connect to the server and discover its tools
    pub async fn connect(config: McpServerConfig) -> Result<Self> {
        let name = config.name.clone();
        let client = Arc::new(HttpMcpClient::new(config)?);

        client.connect().await?;

        let definitions = client.list_tools().await?;
        info!(
            server = %name,
            tool_count = definitions.len(),
            "Discovered MCP tools"
        );

        let tools = definitions
            .into_iter()
            .map(|definition| Arc::new(McpTool::new(definition, Arc::clone(&client))))
            .collect();

        Ok(Self { name, tools })
    }

    /// Logical name of the underlying server
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of discovered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check whether the server exposed any tools at all
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Tools as trait objects, ready to hand to an agent
    pub fn tools(&self) -> Vec<Arc<dyn Tool>> {
        self.tools
            .iter()
            .map(|tool| Arc::clone(tool) as Arc<dyn Tool>)
            .collect()
    }
}
