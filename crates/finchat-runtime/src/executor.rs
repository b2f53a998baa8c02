//! Agent executor for running the completion/tool-call loop
//!
//! The executor implements the core agent loop:
//! 1. Call the LLM with conversation history and available tools
//! 2. Check the stop reason
//! 3. If tool use was requested, execute the tools and loop back
//! 4. Otherwise return the final response

use finchat_core::{Error, Result};
use finchat_llm::{
    CompletionRequest, ContentBlock, LlmProvider, Message, StopReason, ToolDefinition,
};
use finchat_tools::Tool;
use std::sync::Arc;
use tracing::{debug, warn};

/// Configuration for one executor instance
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Wire-level model name
    pub model: String,

    /// System prompt
    pub system_prompt: Option<String>,

    /// Maximum number of loop iterations (prevents runaway tool chains)
    pub max_iterations: usize,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Sampling temperature
    pub temperature: Option<f32>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            model: String::new(),
            system_prompt: None,
            max_iterations: 10,
            max_tokens: 4096,
            temperature: Some(0.7),
        }
    }
}

/// Executes an agent loop: LLM -> tool calls -> execution -> loop back
pub struct AgentExecutor {
    provider: Arc<dyn LlmProvider>,
    tools: Vec<Arc<dyn Tool>>,
    config: ExecutorConfig,
}

impl AgentExecutor {
    /// Create a new executor
    ///
    /// `tools` is this agent's own tool list; an empty list produces a
    /// plain chat agent.
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        tools: Vec<Arc<dyn Tool>>,
        config: ExecutorConfig,
    ) -> Self {
        Self {
            provider,
            tools,
            config,
        }
    }

    /// Execute the agent loop with a user query
    pub async fn run(&self, user_message: String) -> Result<String> {
        self.run_with_history(user_message, Vec::new()).await
    }

    /// Execute the agent loop with prior conversation history
    pub async fn run_with_history(
        &self,
        user_message: String,
        history: Vec<Message>,
    ) -> Result<String> {
        let mut conversation = history;
        conversation.push(Message::user(user_message));
        self.run_conversation(conversation).await
    }

    async fn run_conversation(&self, mut conversation: Vec<Message>) -> Result<String> {
        let tool_definitions = self.tool_definitions();

        for iteration in 1..=self.config.max_iterations {
            debug!(
                iteration,
                max_iterations = self.config.max_iterations,
                "Agent iteration started"
            );

            let mut builder = CompletionRequest::builder(&self.config.model)
                .messages(conversation.clone())
                .max_tokens(self.config.max_tokens);

            if let Some(system) = &self.config.system_prompt {
                builder = builder.system(system.clone());
            }
            if let Some(temperature) = self.config.temperature {
                builder = builder.temperature(temperature);
            }
            if let Some(tools) = &tool_definitions {
                builder = builder.tools(tools.clone());
            }

            let response = self
                .provider
                .complete(builder.build())
                .await
                .map_err(|e| Error::ProcessingFailed(e.to_string()))?;

            let tool_uses: Vec<(String, String, serde_json::Value)> = response
                .message
                .tool_uses()
                .iter()
                .filter_map(|block| match block {
                    ContentBlock::ToolUse { id, name, input } => {
                        Some((id.clone(), name.clone(), input.clone()))
                    }
                    _ => None,
                })
                .collect();

            let final_text = response.message.text().unwrap_or("").to_string();
            conversation.push(response.message);

            if response.stop_reason != StopReason::ToolUse && tool_uses.is_empty() {
                return Ok(final_text);
            }

            for (id, name, input) in tool_uses {
                conversation.push(self.execute_tool(&id, &name, input).await);
            }
        }

        warn!(
            "Max iterations ({}) reached, stopping",
            self.config.max_iterations
        );
        Ok("Max iterations reached without completion".to_string())
    }

    /// Execute one requested tool call, mapping failure to an error result
    ///
    /// A failed tool does not abort the loop; the model sees the error text
    /// and decides how to proceed.
    async fn execute_tool(&self, id: &str, name: &str, input: serde_json::Value) -> Message {
        let Some(tool) = self.tools.iter().find(|t| t.name() == name) else {
            warn!(tool = name, "Model requested unknown tool");
            return Message::tool_error(id.to_string(), format!("Unknown tool: {name}"));
        };

        debug!(tool = name, "Executing tool");
        match tool.execute(input).await {
            Ok(result) => Message::tool_result(id.to_string(), result.to_string()),
            Err(e) => {
                warn!(tool = name, error = %e, "Tool execution failed");
                Message::tool_error(id.to_string(), e.to_string())
            }
        }
    }

    fn tool_definitions(&self) -> Option<Vec<ToolDefinition>> {
        if self.tools.is_empty() {
            return None;
        }

        Some(
            self.tools
                .iter()
                .map(|tool| ToolDefinition {
                    name: tool.name().to_string(),
                    description: tool.description().to_string(),
                    input_schema: tool.input_schema(),
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use finchat_llm::{CompletionResponse, MessageContent, Role, TokenUsage};
    use mockall::Sequence;
    use mockall::mock;
    use serde_json::{Value, json};

    mock! {
        Provider {}

        #[async_trait]
        impl LlmProvider for Provider {
            async fn complete(
                &self,
                request: CompletionRequest,
            ) -> finchat_llm::Result<CompletionResponse>;

            fn name(&self) -> &str;
        }
    }

    struct QuoteTool;

    #[async_trait]
    impl Tool for QuoteTool {
        async fn execute(&self, _params: Value) -> finchat_core::Result<Value> {
            Ok(json!({ "price": 1815.0 }))
        }

        fn name(&self) -> &str {
            "stock_quote"
        }

        fn description(&self) -> &str {
            "Latest quote"
        }

        fn input_schema(&self) -> Value {
            json!({ "type": "object" })
        }
    }

    fn text_response(text: &str) -> CompletionResponse {
        CompletionResponse {
            message: Message::assistant(text),
            stop_reason: StopReason::EndTurn,
            usage: TokenUsage {
                input_tokens: 10,
                output_tokens: 5,
            },
        }
    }

    fn tool_use_response() -> CompletionResponse {
        CompletionResponse {
            message: Message {
                role: Role::Assistant,
                content: Some(MessageContent::Blocks(vec![ContentBlock::ToolUse {
                    id: "call_1".to_string(),
                    name: "stock_quote".to_string(),
                    input: json!({ "symbol": "600519" }),
                }])),
            },
            stop_reason: StopReason::ToolUse,
            usage: TokenUsage {
                input_tokens: 10,
                output_tokens: 5,
            },
        }
    }

    fn executor_config() -> ExecutorConfig {
        ExecutorConfig {
            model: "deepseek-chat".to_string(),
            system_prompt: Some("You are a financial analyst".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_plain_completion() {
        let mut provider = MockProvider::new();
        provider
            .expect_complete()
            .times(1)
            .returning(|_| Ok(text_response("贵州茅台当前走势平稳。")));

        let executor = AgentExecutor::new(Arc::new(provider), vec![], executor_config());
        let result = executor.run("分析一下茅台".to_string()).await.unwrap();
        assert_eq!(result, "贵州茅台当前走势平稳。");
    }

    #[tokio::test]
    async fn test_tool_loop_round_trip() {
        let mut seq = Sequence::new();
        let mut provider = MockProvider::new();

        provider
            .expect_complete()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|request| {
                // Tools must be advertised on the first call
                assert!(request.tools.is_some());
                Ok(tool_use_response())
            });

        provider
            .expect_complete()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|request| {
                // The tool result must be threaded back into the conversation
                let serialized = serde_json::to_string(&request.messages).unwrap();
                assert!(serialized.contains("1815"));
                Ok(text_response("Current price is 1815 CNY."))
            });

        let executor = AgentExecutor::new(
            Arc::new(provider),
            vec![Arc::new(QuoteTool)],
            executor_config(),
        );

        let result = executor.run("What is 600519 trading at?".to_string()).await.unwrap();
        assert_eq!(result, "Current price is 1815 CNY.");
    }

    #[tokio::test]
    async fn test_unknown_tool_reported_to_model() {
        let mut seq = Sequence::new();
        let mut provider = MockProvider::new();

        provider
            .expect_complete()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(tool_use_response()));

        provider
            .expect_complete()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|request| {
                let serialized = serde_json::to_string(&request.messages).unwrap();
                assert!(serialized.contains("Unknown tool"));
                Ok(text_response("I could not fetch the quote."))
            });

        // No tools registered, so the requested tool cannot be found
        let executor = AgentExecutor::new(Arc::new(provider), vec![], executor_config());
        let result = executor.run("quote please".to_string()).await.unwrap();
        assert_eq!(result, "I could not fetch the quote.");
    }

    #[tokio::test]
    async fn test_max_iterations_guard() {
        let mut provider = MockProvider::new();
        provider
            .expect_complete()
            .returning(|_| Ok(tool_use_response()));

        let config = ExecutorConfig {
            max_iterations: 2,
            ..executor_config()
        };
        let executor =
            AgentExecutor::new(Arc::new(provider), vec![Arc::new(QuoteTool)], config);

        let result = executor.run("loop forever".to_string()).await.unwrap();
        assert!(result.contains("Max iterations"));
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let mut provider = MockProvider::new();
        provider
            .expect_complete()
            .returning(|_| Err(finchat_llm::LlmError::AuthenticationFailed));

        let executor = AgentExecutor::new(Arc::new(provider), vec![], executor_config());
        let err = executor.run("hi".to_string()).await.unwrap_err();
        assert!(matches!(err, Error::ProcessingFailed(_)));
    }
}
