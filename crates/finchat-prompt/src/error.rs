//! Error types for prompt operations

use thiserror::Error;

/// Result type for prompt operations
pub type Result<T> = std::result::Result<T, PromptError>;

/// Errors that can occur during prompt operations
#[derive(Error, Debug)]
pub enum PromptError {
    /// Template not found for the specified language
    #[error("Template '{name}' has no variant for language '{language}'")]
    LanguageNotAvailable {
        /// Template name
        name: String,
        /// Requested language code
        language: String,
    },

    /// Template rendering failed
    #[error("Failed to render template '{name}': {detail}")]
    RenderError {
        /// Template name
        name: String,
        /// Engine error detail
        detail: String,
    },

    /// No templates provided when building
    #[error("No templates provided for '{0}'")]
    NoTemplatesProvided(String),

    /// Template not registered in registry
    #[error("Template '{0}' not registered")]
    TemplateNotRegistered(String),
}
