//! Financial-analysis chatbot built on the finchat agent stack
//!
//! This crate is the application layer: configuration, the finance MCP
//! toolsets, prompt templates, query routing, sessions, and the agent
//! wiring for four modes of operation:
//!
//! - **chat**: one generalist finance analyst with all tools
//! - **team**: four specialists (stock / fund / risk / market) behind a
//!   routing coordinator
//! - **pipeline**: sequential market research (scan, find, assess, report)
//! - **refine**: multi-turn prompt optimization with sessions
//!
//! Model provider selection happens once at startup via
//! `finchat_llm::ModelHandle::from_env()`; a misconfigured deployment
//! (unknown provider, missing credential, missing service keys) fails
//! loudly before any agent is built.

pub mod agents;
pub mod config;
pub mod error;
pub mod prompts;
pub mod router;
pub mod session;
pub mod toolsets;

// Re-export main types for convenience
pub use agents::{
    PromptRefinerAgent, create_analysis_team, create_finance_agent, create_full_review,
    create_research_pipeline,
};
pub use config::ChatConfig;
pub use error::{ChatError, Result};
pub use router::{QueryIntent, QueryRouter};
pub use session::{ChatSession, InMemorySessionStore};
pub use toolsets::FinanceToolsets;

// Re-export Language from finchat-prompt
pub use finchat_prompt::Language;
