//! Finance MCP toolsets
//!
//! The finance data backend exposes three MCP servers behind one base URL:
//! stock data, financial statements, and fund data. All three share the
//! same bearer key. A server that cannot be reached is skipped with a
//! warning so the remaining data sources keep working.

use crate::config::ChatConfig;
use crate::error::{ChatError, Result};
use finchat_mcp::{McpServerConfig, McpToolset};
use finchat_tools::Tool;
use std::sync::Arc;
use tracing::{info, warn};
use url::Url;

/// Logical name of the stock data server
pub const STOCK: &str = "stock";
/// Logical name of the financial statements server
pub const FINANCE: &str = "finance";
/// Logical name of the fund data server
pub const FUND: &str = "fund";

const SERVERS: &[(&str, &str)] = &[
    (STOCK, "stock/mcp/"),
    (FINANCE, "finance/mcp/"),
    (FUND, "fund/mcp/"),
];

/// The three finance MCP toolsets, connected and discovered
pub struct FinanceToolsets {
    toolsets: Vec<McpToolset>,
}

impl FinanceToolsets {
    /// A bundle with no connected servers
    ///
    /// Agents built from it run without finance data tools; used when the
    /// data backend is intentionally absent (offline analysis, tests).
    pub fn empty() -> Self {
        Self {
            toolsets: Vec::new(),
        }
    }

    /// Connect to all finance MCP servers
    ///
    /// Individual servers degrade gracefully; an empty result (no server
    /// reachable) is still `Ok`, the agents just lose their data tools.
    /// A missing bearer key is a configuration error and fails immediately.
    pub async fn connect(config: &ChatConfig) -> Result<Self> {
        let key = config
            .finance_mcp_key
            .as_deref()
            .ok_or_else(|| ChatError::ConfigError("TUSHARE_MCP_KEY is not set".to_string()))?;

        let base = Url::parse(&config.finance_mcp_base_url).map_err(|e| {
            ChatError::ConfigError(format!(
                "Invalid finance MCP base URL '{}': {e}",
                config.finance_mcp_base_url
            ))
        })?;

        let mut toolsets = Vec::new();

        for (name, path) in SERVERS {
            let url = join_endpoint(&base, path)
                .map_err(|e| ChatError::ConfigError(format!("Bad endpoint for {name}: {e}")))?;

            let server_config =
                McpServerConfig::new(*name, url.as_str())?.with_bearer_token(key);

            match McpToolset::connect(server_config).await {
                Ok(toolset) => {
                    info!(server = name, tools = toolset.len(), "Finance toolset ready");
                    toolsets.push(toolset);
                }
                Err(e) => {
                    warn!(server = name, error = %e, "Finance MCP server unavailable, continuing without it");
                }
            }
        }

        if toolsets.is_empty() {
            warn!("No finance MCP servers reachable; agents will run without finance data tools");
        }

        Ok(Self { toolsets })
    }

    /// Number of connected toolsets
    pub fn connected_count(&self) -> usize {
        self.toolsets.len()
    }

    /// Tools from one server (empty when that server is unavailable)
    pub fn tools_for(&self, name: &str) -> Vec<Arc<dyn Tool>> {
        self.toolsets
            .iter()
            .find(|toolset| toolset.name() == name)
            .map(McpToolset::tools)
            .unwrap_or_default()
    }

    /// Stock data tools
    pub fn stock_tools(&self) -> Vec<Arc<dyn Tool>> {
        self.tools_for(STOCK)
    }

    /// Financial statement tools
    pub fn finance_tools(&self) -> Vec<Arc<dyn Tool>> {
        self.tools_for(FINANCE)
    }

    /// Fund data tools
    pub fn fund_tools(&self) -> Vec<Arc<dyn Tool>> {
        self.tools_for(FUND)
    }

    /// Every tool from every connected server
    pub fn all_tools(&self) -> Vec<Arc<dyn Tool>> {
        self.toolsets.iter().flat_map(McpToolset::tools).collect()
    }
}

/// Join a server path onto the base URL
///
/// `Url::join` replaces the last path segment when the base lacks a
/// trailing slash, so one is appended first.
fn join_endpoint(base: &Url, path: &str) -> std::result::Result<Url, url::ParseError> {
    if base.path().ends_with('/') {
        base.join(path)
    } else {
        Url::parse(&format!("{base}/"))?.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_endpoint_plain_host() {
        let base = Url::parse("http://39.108.114.122:8000").unwrap();
        let url = join_endpoint(&base, "stock/mcp/").unwrap();
        assert_eq!(url.as_str(), "http://39.108.114.122:8000/stock/mcp/");
    }

    #[test]
    fn test_join_endpoint_with_path() {
        let base = Url::parse("http://localhost:8000/tushare").unwrap();
        let url = join_endpoint(&base, "fund/mcp/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/tushare/fund/mcp/");
    }

    #[test]
    fn test_server_table_covers_all_data_domains() {
        let names: Vec<&str> = SERVERS.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec![STOCK, FINANCE, FUND]);
    }
}
