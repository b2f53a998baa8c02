//! LLM layer for finchat
//!
//! This crate owns everything between an agent and the hosted model:
//!
//! - Message and completion types for chat interactions
//! - The [`LlmProvider`] trait implemented by concrete backends
//! - Model provider resolution: mapping a deployment's `MODEL_PROVIDER`
//!   selection onto a credential, endpoint, and qualified model id
//! - An OpenAI-compatible chat-completions client (all supported backends
//!   speak the OpenAI wire protocol)

pub mod completion;
pub mod error;
pub mod messages;
pub mod model;
pub mod provider;
pub mod providers;

// Re-export main types
pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use error::{LlmError, Result};
pub use messages::{ContentBlock, Message, MessageContent, Role};
pub use model::{ModelConfigError, ModelHandle, ProviderKind, ProviderProfile};
pub use provider::LlmProvider;
pub use providers::{OpenAiConfig, OpenAiProvider};

/// Tool definition advertised to the model for function calling
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ToolDefinition {
    /// Tool name (must be unique within a request)
    pub name: String,

    /// Natural-language description the model uses to decide when to call
    pub description: String,

    /// JSON Schema for the tool input
    pub input_schema: serde_json::Value,
}
