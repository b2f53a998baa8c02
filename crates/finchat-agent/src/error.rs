//! Error types for the finchat application

use thiserror::Error;

/// Application-level errors
#[derive(Debug, Error)]
pub enum ChatError {
    /// Deployment configuration is invalid
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An agent failed while handling a query
    #[error("Agent error: {0}")]
    AgentError(#[from] finchat_core::Error),

    /// A finance data service could not be reached or misbehaved
    #[error("MCP error: {0}")]
    McpError(#[from] finchat_mcp::McpError),

    /// A prompt template failed to render
    #[error("Prompt error: {0}")]
    PromptError(#[from] finchat_prompt::PromptError),

    /// The referenced conversation session does not exist
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type alias for application operations
pub type Result<T> = std::result::Result<T, ChatError>;

impl From<finchat_llm::ModelConfigError> for ChatError {
    fn from(err: finchat_llm::ModelConfigError) -> Self {
        ChatError::ConfigError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ChatError::ConfigError("TUSHARE_MCP_KEY is not set".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: TUSHARE_MCP_KEY is not set"
        );

        let err = ChatError::SessionNotFound("abc".to_string());
        assert_eq!(err.to_string(), "Session not found: abc");
    }

    #[test]
    fn test_core_error_conversion() {
        let core_err = finchat_core::Error::ProcessingFailed("LLM timeout".to_string());
        let chat_err: ChatError = core_err.into();
        assert!(matches!(chat_err, ChatError::AgentError(_)));
    }
}
