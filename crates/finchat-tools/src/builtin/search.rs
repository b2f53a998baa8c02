//! Web search tool backed by the Tavily API
//!
//! Finance data comes from the MCP services; everything else (breaking
//! news, policy announcements, company events) goes through web search.

use crate::Tool;
use async_trait::async_trait;
use finchat_core::{Error, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

const TAVILY_SEARCH_URL: &str = "https://api.tavily.com/search";
const DEFAULT_MAX_RESULTS: usize = 10;
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Web search tool (Tavily)
pub struct WebSearchTool {
    client: Client,
    api_key: String,
}

impl WebSearchTool {
    /// Create a new search tool with the given API key
    ///
    /// Fails when the key is empty; a deployment without a search key is a
    /// configuration error, not something to discover at query time.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::Configuration(
                "TAVILY_API_KEY is not set".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::ConstructionFailed(format!("HTTP client: {e}")))?;

        Ok(Self { client, api_key })
    }

    /// Create a search tool from the `TAVILY_API_KEY` environment variable
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("TAVILY_API_KEY")
            .map_err(|_| Error::Configuration("TAVILY_API_KEY is not set".to_string()))?;
        Self::new(api_key)
    }

    async fn search(&self, query: &str, max_results: usize) -> Result<SearchResponse> {
        debug!(query, max_results, "Sending web search request");

        let response = self
            .client
            .post(TAVILY_SEARCH_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({
                "query": query,
                "max_results": max_results,
            }))
            .send()
            .await
            .map_err(|e| Error::ProcessingFailed(format!("Search request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::ProcessingFailed(format!(
                "Search API returned HTTP {status}: {body}"
            )));
        }

        response
            .json::<SearchResponse>()
            .await
            .map_err(|e| Error::ProcessingFailed(format!("Malformed search response: {e}")))
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    title: String,
    url: String,
    #[serde(default)]
    content: String,
}

#[async_trait]
impl Tool for WebSearchTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let query = params
            .get("query")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::ProcessingFailed("search requires a 'query' string".to_string()))?;

        let max_results = params
            .get("max_results")
            .and_then(serde_json::Value::as_u64)
            .map_or(DEFAULT_MAX_RESULTS, |n| n as usize);

        let response = self.search(query, max_results).await?;

        let results: Vec<Value> = response
            .results
            .into_iter()
            .map(|r| {
                json!({
                    "title": r.title,
                    "url": r.url,
                    "content": r.content,
                })
            })
            .collect();

        Ok(json!({
            "query": query,
            "answer": response.answer,
            "results": results,
        }))
    }

    fn name(&self) -> &str {
        "search_web"
    }

    fn description(&self) -> &str {
        "搜索网络信息。Search the web for current information: news, announcements, market commentary."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "搜索关键词 (search keywords)"
                },
                "max_results": {
                    "type": "integer",
                    "description": "最大搜索结果数 (maximum number of results)",
                    "default": DEFAULT_MAX_RESULTS
                }
            },
            "required": ["query"]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_rejected() {
        let result = WebSearchTool::new("  ");
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_tool_metadata() {
        let tool = WebSearchTool::new("tvly-test").unwrap();
        assert_eq!(tool.name(), "search_web");

        let schema = tool.input_schema();
        assert_eq!(schema["required"][0], "query");
    }

    #[tokio::test]
    async fn test_missing_query_rejected() {
        let tool = WebSearchTool::new("tvly-test").unwrap();
        let result = tool.execute(json!({ "max_results": 3 })).await;
        assert!(matches!(result, Err(Error::ProcessingFailed(_))));
    }
}
