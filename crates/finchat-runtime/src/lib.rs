//! Agent runtime for finchat
//!
//! Everything needed to turn a resolved model handle and a set of tools
//! into runnable agents:
//!
//! - [`Runtime`]: shared LLM provider, wire model name, and generation
//!   defaults
//! - [`AgentExecutor`]: the completion/tool-call loop
//! - [`LlmAgent`]: a named agent with instruction and its own tool list
//! - [`DelegatingAgent`]: routes to sub-agents (coordinator pattern)
//! - [`SequentialAgent`]: pipeline, each step feeding the next
//! - [`ParallelAgent`]: fan-out, results merged into one report

pub mod agents;
pub mod executor;
pub mod runtime;

pub use agents::{
    DelegatingAgent, DelegatingAgentBuilder, LlmAgent, LlmAgentBuilder, ParallelAgent,
    SequentialAgent,
};
pub use executor::{AgentExecutor, ExecutorConfig};
pub use runtime::{Runtime, RuntimeConfig};
