//! Prompt refinement agent with multi-turn sessions
//!
//! Turns a vague financial idea into a precise analysis prompt over
//! several clarifying turns. Unlike the analysis agents this one is
//! stateful: each user keeps a session whose history is threaded back into
//! the model on every turn.

use crate::error::Result;
use crate::session::InMemorySessionStore;
use async_trait::async_trait;
use finchat_core::{Agent, Context};
use finchat_prompt::PromptRegistry;
use finchat_runtime::{LlmAgent, Runtime};
use finchat_tools::builtin::current_time_report;
use serde_json::json;
use std::sync::Arc;

/// Multi-turn prompt optimization agent
pub struct PromptRefinerAgent {
    agent: LlmAgent,
    sessions: Arc<InMemorySessionStore>,
}

impl PromptRefinerAgent {
    /// Create the refiner
    ///
    /// Takes no tools: refinement is pure conversation.
    pub fn new(runtime: &Arc<Runtime>, prompts: &PromptRegistry) -> Result<Self> {
        let instruction = prompts.render(
            "chat.prompt_refiner",
            &json!({ "current_time": current_time_report() }),
        )?;

        let agent = runtime
            .agent("金融提示词优化专家")
            .description("通过多轮对话，将模糊的金融问题优化成精准、可执行的专业提示词")
            .instruction(instruction)
            .build();

        Ok(Self {
            agent,
            sessions: Arc::new(InMemorySessionStore::new()),
        })
    }

    /// Access the session store (for cleanup scheduling)
    pub fn sessions(&self) -> &Arc<InMemorySessionStore> {
        &self.sessions
    }

    /// Run one refinement turn
    ///
    /// Creates a session when `session_id` is `None` or stale. Returns the
    /// reply and the session id to pass back on the next turn.
    pub async fn refine(
        &self,
        user_input: &str,
        session_id: Option<&str>,
        user_id: &str,
    ) -> Result<(String, String)> {
        let session = session_id
            .and_then(|id| self.sessions.get(id))
            .unwrap_or_else(|| self.sessions.create(user_id));

        let reply = self
            .agent
            .process_with_history(user_input.to_string(), session.history_messages())
            .await?;

        self.sessions.add_turn(&session.id, "user", user_input)?;
        self.sessions.add_turn(&session.id, "assistant", &reply)?;

        Ok((reply, session.id))
    }
}

#[async_trait]
impl Agent for PromptRefinerAgent {
    /// Process one turn, threading the session through the context
    ///
    /// The session id is read from the context when present and written
    /// back after the turn, so callers that only speak the `Agent` trait
    /// still get multi-turn behavior.
    async fn process(&self, input: String, context: &mut Context) -> finchat_core::Result<String> {
        let session_id = context.session_id().map(str::to_string);
        let user_id = context.user_id().unwrap_or("default_user").to_string();

        let (reply, session_id) = self
            .refine(&input, session_id.as_deref(), &user_id)
            .await
            .map_err(|e| finchat_core::Error::ProcessingFailed(e.to_string()))?;

        context.insert(
            finchat_core::context::keys::SESSION_ID,
            serde_json::json!(session_id),
        );

        Ok(reply)
    }

    fn name(&self) -> &str {
        self.agent.name()
    }

    fn description(&self) -> &str {
        self.agent.description()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::register_prompts;
    use finchat_llm::model::{ModelHandle, ProviderKind};
    use finchat_prompt::Language;
    use finchat_runtime::RuntimeConfig;

    #[test]
    fn test_refiner_construction() {
        let handle =
            ModelHandle::resolve_provider_with(ProviderKind::DeepSeek, |name| match name {
                "DEEPSEEK_API_KEY" => Some("sk-test".to_string()),
                _ => None,
            })
            .unwrap();
        let runtime = Arc::new(Runtime::from_handle(&handle, RuntimeConfig::default()).unwrap());

        let prompts = PromptRegistry::with_language(Language::Chinese);
        register_prompts(&prompts).unwrap();

        let refiner = PromptRefinerAgent::new(&runtime, &prompts).unwrap();
        assert_eq!(refiner.name(), "金融提示词优化专家");
        assert!(refiner.sessions().is_empty());
    }
}
