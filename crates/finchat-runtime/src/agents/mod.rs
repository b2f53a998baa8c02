//! Agent implementations
//!
//! Four shapes cover every composition the application needs: a single
//! LLM-backed agent with tools, a coordinator that delegates, a sequential
//! pipeline, and a parallel fan-out.

mod delegating;
mod llm_agent;
mod parallel;
mod sequential;

pub use delegating::{DelegatingAgent, DelegatingAgentBuilder};
pub use llm_agent::{LlmAgent, LlmAgentBuilder};
pub use parallel::ParallelAgent;
pub use sequential::SequentialAgent;
