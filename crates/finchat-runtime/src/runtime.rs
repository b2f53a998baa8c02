//! Runtime: shared provider and generation defaults
//!
//! The runtime is constructed once at process start from a resolved
//! [`ModelHandle`] and handed (as an `Arc`) to every agent-construction
//! call site. It is the only place the handle's credential and endpoint
//! are turned into a live client.

use crate::agents::LlmAgentBuilder;
use finchat_core::{Error, Result};
use finchat_llm::model::ModelHandle;
use finchat_llm::{LlmProvider, OpenAiProvider};
use std::sync::Arc;
use tracing::info;

/// Generation defaults applied to every agent built from this runtime
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Maximum tool-loop iterations per request
    pub max_iterations: usize,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Sampling temperature
    pub temperature: Option<f32>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            max_tokens: 4096,
            temperature: Some(0.7),
        }
    }
}

/// Shared LLM provider, model name, and defaults for agent construction
pub struct Runtime {
    provider: Arc<dyn LlmProvider>,
    model: String,
    config: RuntimeConfig,
}

impl Runtime {
    /// Create a runtime from an existing provider and wire model name
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        model: impl Into<String>,
        config: RuntimeConfig,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            config,
        }
    }

    /// Create a runtime from a resolved model handle
    ///
    /// The handle's credential and endpoint flow directly into the client
    /// constructor; nothing touches the process environment.
    pub fn from_handle(handle: &ModelHandle, config: RuntimeConfig) -> Result<Self> {
        let provider = OpenAiProvider::from_handle(handle)
            .map_err(|e| Error::Configuration(e.to_string()))?;

        info!(
            provider = %handle.provider(),
            model = handle.model(),
            api_base = handle.api_base(),
            "LLM runtime ready"
        );

        Ok(Self::new(Arc::new(provider), handle.model_name(), config))
    }

    /// Resolve `MODEL_PROVIDER` from the environment and build a runtime
    pub fn from_env(config: RuntimeConfig) -> Result<Self> {
        let handle = ModelHandle::from_env().map_err(|e| Error::Configuration(e.to_string()))?;
        Self::from_handle(&handle, config)
    }

    /// Get a reference to the LLM provider
    pub fn provider(&self) -> &Arc<dyn LlmProvider> {
        &self.provider
    }

    /// Wire-level model name sent with every completion
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generation defaults
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Start building an [`crate::agents::LlmAgent`] against this runtime
    pub fn agent(self: &Arc<Self>, name: impl Into<String>) -> LlmAgentBuilder {
        LlmAgentBuilder::new(Arc::clone(self), name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finchat_llm::model::ProviderKind;

    #[test]
    fn test_from_handle_threads_config() {
        let handle =
            ModelHandle::resolve_provider_with(ProviderKind::DeepSeek, |name| match name {
                "DEEPSEEK_API_KEY" => Some("sk-test".to_string()),
                _ => None,
            })
            .unwrap();

        let runtime = Runtime::from_handle(&handle, RuntimeConfig::default()).unwrap();
        assert_eq!(runtime.model(), "deepseek-chat");
        assert_eq!(runtime.provider().name(), "openai");
        assert_eq!(runtime.config().max_iterations, 10);
    }
}
