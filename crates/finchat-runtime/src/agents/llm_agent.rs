//! LLM-backed agent with instruction and tools

use crate::executor::{AgentExecutor, ExecutorConfig};
use crate::runtime::Runtime;
use async_trait::async_trait;
use finchat_core::{Agent, Context, Result};
use finchat_llm::Message;
use finchat_tools::Tool;
use std::sync::Arc;

/// A named agent backed by the runtime's LLM provider
///
/// Each agent carries its own instruction (system prompt) and its own tool
/// list; two agents built from the same runtime can expose entirely
/// different capabilities to the model.
pub struct LlmAgent {
    name: String,
    description: String,
    executor: AgentExecutor,
}

impl LlmAgent {
    /// Run the agent with prior conversation history
    ///
    /// Used by session-aware callers that thread past turns back in.
    pub async fn process_with_history(
        &self,
        input: String,
        history: Vec<Message>,
    ) -> Result<String> {
        self.executor.run_with_history(input, history).await
    }
}

#[async_trait]
impl Agent for LlmAgent {
    async fn process(&self, input: String, _context: &mut Context) -> Result<String> {
        self.executor.run(input).await
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Builder for [`LlmAgent`], obtained from [`Runtime::agent`]
pub struct LlmAgentBuilder {
    runtime: Arc<Runtime>,
    name: String,
    description: String,
    instruction: Option<String>,
    tools: Vec<Arc<dyn Tool>>,
    max_tokens: Option<usize>,
    temperature: Option<f32>,
}

impl LlmAgentBuilder {
    /// Create a new builder (use [`Runtime::agent`] instead of calling this directly)
    pub fn new(runtime: Arc<Runtime>, name: impl Into<String>) -> Self {
        Self {
            runtime,
            name: name.into(),
            description: String::new(),
            instruction: None,
            tools: Vec::new(),
            max_tokens: None,
            temperature: None,
        }
    }

    /// Set the agent description (used by coordinators when delegating)
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the system instruction
    pub fn instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = Some(instruction.into());
        self
    }

    /// Add one tool
    pub fn tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    /// Add a batch of tools
    pub fn tools(mut self, tools: impl IntoIterator<Item = Arc<dyn Tool>>) -> Self {
        self.tools.extend(tools);
        self
    }

    /// Override the runtime's max tokens for this agent
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Override the runtime's temperature for this agent
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Build the agent
    pub fn build(self) -> LlmAgent {
        let defaults = self.runtime.config();
        let config = ExecutorConfig {
            model: self.runtime.model().to_string(),
            system_prompt: self.instruction,
            max_iterations: defaults.max_iterations,
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
            temperature: self.temperature.or(defaults.temperature),
        };

        LlmAgent {
            name: self.name,
            description: self.description,
            executor: AgentExecutor::new(Arc::clone(self.runtime.provider()), self.tools, config),
        }
    }
}
