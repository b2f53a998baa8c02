//! Configuration for the finchat application

use crate::error::{ChatError, Result};
use finchat_prompt::Language;
use finchat_runtime::RuntimeConfig;
use serde::{Deserialize, Serialize};

/// Environment variable holding the finance MCP bearer key
pub const FINANCE_MCP_KEY_VAR: &str = "TUSHARE_MCP_KEY";

/// Environment variable overriding the finance MCP base URL
pub const FINANCE_MCP_BASE_URL_VAR: &str = "FINANCE_MCP_BASE_URL";

/// Environment variable holding the web search API key
pub const SEARCH_KEY_VAR: &str = "TAVILY_API_KEY";

/// Default base URL of the finance MCP deployment
pub const DEFAULT_FINANCE_MCP_BASE_URL: &str = "http://39.108.114.122:8000";

/// Configuration for the chat application
///
/// Model provider selection is not part of this struct; it is resolved
/// separately by `finchat_llm::ModelHandle` and threaded into the runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Language agents answer in
    pub language: Language,

    /// Base URL of the finance MCP deployment
    pub finance_mcp_base_url: String,

    /// Bearer key for the finance MCP services
    pub finance_mcp_key: Option<String>,

    /// API key for web search
    pub search_api_key: Option<String>,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Sampling temperature
    pub temperature: f32,

    /// Maximum tool-loop iterations per request
    pub max_iterations: usize,

    /// Session idle expiry in seconds
    pub session_max_age_secs: i64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            language: Language::Chinese,
            finance_mcp_base_url: DEFAULT_FINANCE_MCP_BASE_URL.to_string(),
            finance_mcp_key: None,
            search_api_key: None,
            max_tokens: 4096,
            temperature: 0.7,
            max_iterations: 10,
            session_max_age_secs: 3600,
        }
    }
}

impl ChatConfig {
    /// Create a new configuration builder
    pub fn builder() -> ChatConfigBuilder {
        ChatConfigBuilder::default()
    }

    /// Load keys and endpoint overrides from the environment
    pub fn from_env() -> Self {
        Self::builder().with_env().build_unchecked()
    }

    /// Validate the configuration
    ///
    /// Both external-service keys are deployment preconditions; their
    /// absence is a startup error, not a runtime one.
    pub fn validate(&self) -> Result<()> {
        if self
            .finance_mcp_key
            .as_deref()
            .is_none_or(|k| k.trim().is_empty())
        {
            return Err(ChatError::ConfigError(format!(
                "{FINANCE_MCP_KEY_VAR} is not set"
            )));
        }

        if self
            .search_api_key
            .as_deref()
            .is_none_or(|k| k.trim().is_empty())
        {
            return Err(ChatError::ConfigError(format!(
                "{SEARCH_KEY_VAR} is not set"
            )));
        }

        Ok(())
    }

    /// Generation defaults for the agent runtime
    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            max_iterations: self.max_iterations,
            max_tokens: self.max_tokens,
            temperature: Some(self.temperature),
        }
    }
}

/// Builder for [`ChatConfig`]
#[derive(Debug, Default)]
pub struct ChatConfigBuilder {
    language: Option<Language>,
    finance_mcp_base_url: Option<String>,
    finance_mcp_key: Option<String>,
    search_api_key: Option<String>,
    max_tokens: Option<usize>,
    temperature: Option<f32>,
    max_iterations: Option<usize>,
    session_max_age_secs: Option<i64>,
}

impl ChatConfigBuilder {
    /// Set the answer language
    pub fn language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// Set the finance MCP base URL
    pub fn finance_mcp_base_url(mut self, url: impl Into<String>) -> Self {
        self.finance_mcp_base_url = Some(url.into());
        self
    }

    /// Set the finance MCP bearer key
    pub fn finance_mcp_key(mut self, key: impl Into<String>) -> Self {
        self.finance_mcp_key = Some(key.into());
        self
    }

    /// Set the web search API key
    pub fn search_api_key(mut self, key: impl Into<String>) -> Self {
        self.search_api_key = Some(key.into());
        self
    }

    /// Set max tokens per completion
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set maximum tool-loop iterations
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Set session idle expiry in seconds
    pub fn session_max_age_secs(mut self, secs: i64) -> Self {
        self.session_max_age_secs = Some(secs);
        self
    }

    /// Load keys and endpoint overrides from the environment
    pub fn with_env(mut self) -> Self {
        if let Ok(key) = std::env::var(FINANCE_MCP_KEY_VAR) {
            self.finance_mcp_key = Some(key);
        }
        if let Ok(key) = std::env::var(SEARCH_KEY_VAR) {
            self.search_api_key = Some(key);
        }
        if let Ok(url) = std::env::var(FINANCE_MCP_BASE_URL_VAR) {
            self.finance_mcp_base_url = Some(url);
        }
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<ChatConfig> {
        let config = self.build_unchecked();
        config.validate()?;
        Ok(config)
    }

    /// Build without validating (validation runs at startup instead)
    pub fn build_unchecked(self) -> ChatConfig {
        let defaults = ChatConfig::default();

        ChatConfig {
            language: self.language.unwrap_or(defaults.language),
            finance_mcp_base_url: self
                .finance_mcp_base_url
                .unwrap_or(defaults.finance_mcp_base_url),
            finance_mcp_key: self.finance_mcp_key,
            search_api_key: self.search_api_key,
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
            temperature: self.temperature.unwrap_or(defaults.temperature),
            max_iterations: self.max_iterations.unwrap_or(defaults.max_iterations),
            session_max_age_secs: self
                .session_max_age_secs
                .unwrap_or(defaults.session_max_age_secs),
        }
    }
}
