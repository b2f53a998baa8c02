//! OpenAI-compatible chat-completions provider
//!
//! Speaks the `POST {base}/chat/completions` protocol used by every backend
//! the model resolver supports. The provider is constructed from a resolved
//! [`ModelHandle`] (preferred) or an explicit [`OpenAiConfig`]; it never
//! consults the process environment itself.

use crate::model::ModelHandle;
use crate::{
    CompletionRequest, CompletionResponse, ContentBlock, LlmProvider, Message, MessageContent,
    Result, Role, StopReason, TokenUsage, ToolDefinition,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for the OpenAI-compatible provider
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key for authentication
    pub api_key: String,

    /// Base URL of the chat-completions endpoint
    pub api_base: String,

    /// Request timeout in seconds (default: 120)
    pub timeout_secs: u64,
}

impl OpenAiConfig {
    /// Create a new config with the given API key and base URL
    pub fn new(api_key: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: api_base.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Create config from a resolved model handle
    ///
    /// The handle's credential and endpoint are copied into the config;
    /// the handle stays the single source of truth for the model name.
    pub fn from_handle(handle: &ModelHandle) -> Self {
        Self::new(handle.api_key(), handle.api_base())
    }

    /// Set request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// OpenAI-compatible provider
pub struct OpenAiProvider {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiProvider {
    /// Create a new provider with the given configuration
    pub fn with_config(config: OpenAiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a provider from a resolved model handle
    pub fn from_handle(handle: &ModelHandle) -> Result<Self> {
        Self::with_config(OpenAiConfig::from_handle(handle))
    }

    /// Get the current configuration
    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    #[instrument(skip(self, request), fields(model = %request.model, api_base = %self.config.api_base))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        debug!("Sending chat completion request to {}", self.config.api_base);

        // Convert messages (system prompt goes into the messages array)
        let wire_messages = build_wire_messages(request.system.clone(), request.messages);
        let wire_tools = request.tools.as_ref().map(|tools| convert_tools(tools));

        let wire_request = WireRequest {
            model: request.model.clone(),
            messages: wire_messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            tools: wire_tools,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.api_base))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&wire_request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;

            return Err(match status.as_u16() {
                401 => crate::LlmError::AuthenticationFailed,
                429 => crate::LlmError::RateLimitExceeded(error_text),
                400 => crate::LlmError::InvalidRequest(error_text),
                404 => crate::LlmError::ModelNotFound(request.model),
                _ => crate::LlmError::RequestFailed(format!("HTTP {status}: {error_text}")),
            });
        }

        let wire_response: WireResponse = response.json().await.map_err(|e| {
            crate::LlmError::UnexpectedResponse(format!("Failed to parse response: {e}"))
        })?;

        // The API can return several choices; only the first is used
        let choice = wire_response.choices.into_iter().next().ok_or_else(|| {
            crate::LlmError::UnexpectedResponse("No choices in response".to_string())
        })?;

        debug!(
            "Received response - finish_reason: {}, tokens: {}/{}",
            choice.finish_reason,
            wire_response.usage.prompt_tokens,
            wire_response.usage.completion_tokens
        );

        let message = parse_wire_message(choice.message)?;
        let stop_reason = map_stop_reason(&choice.finish_reason);

        Ok(CompletionResponse {
            message,
            stop_reason,
            usage: TokenUsage {
                input_tokens: wire_response.usage.prompt_tokens,
                output_tokens: wire_response.usage.completion_tokens,
            },
        })
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

// ============================================================================
// Wire request types
// ============================================================================

#[derive(Debug, Serialize)]
struct WireRequest {
    model: String,
    messages: Vec<WireMessage>,
    max_tokens: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<WireTool>>,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<WireToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct WireTool {
    #[serde(rename = "type")]
    tool_type: String,
    function: WireFunction,
}

#[derive(Debug, Serialize)]
struct WireFunction {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct WireToolCall {
    id: String,
    #[serde(rename = "type")]
    tool_type: String,
    function: WireFunctionCall,
}

#[derive(Debug, Serialize)]
struct WireFunctionCall {
    name: String,
    arguments: String,
}

// ============================================================================
// Wire response types
// ============================================================================

#[derive(Debug, Deserialize)]
struct WireResponse {
    choices: Vec<WireChoice>,
    usage: WireUsage,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireResponseMessage,
    finish_reason: String,
}

#[derive(Debug, Deserialize)]
struct WireResponseMessage {
    content: Option<String>,
    tool_calls: Option<Vec<WireResponseToolCall>>,
}

#[derive(Debug, Deserialize)]
struct WireResponseToolCall {
    id: String,
    function: WireResponseFunctionCall,
}

#[derive(Debug, Deserialize)]
struct WireResponseFunctionCall {
    name: String,
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct WireUsage {
    prompt_tokens: usize,
    completion_tokens: usize,
}

// ============================================================================
// Conversion functions
// ============================================================================

/// Build wire messages from our generic format
///
/// System prompts become the leading message in the array.
fn build_wire_messages(system: Option<String>, messages: Vec<Message>) -> Vec<WireMessage> {
    let mut result = Vec::new();

    if let Some(sys) = system {
        result.push(WireMessage {
            role: "system".to_string(),
            content: Some(sys),
            tool_calls: None,
            tool_call_id: None,
        });
    }

    for msg in messages {
        result.extend(convert_message(msg));
    }

    result
}

/// Convert a single message to wire format
///
/// A message with tool results expands into one `role: "tool"` message per
/// result, which is how the OpenAI protocol threads tool output.
fn convert_message(msg: Message) -> Vec<WireMessage> {
    let role = match msg.role {
        Role::User => "user",
        Role::Assistant => "assistant",
        Role::System => "system",
    };

    match msg.content {
        Some(MessageContent::Text(text)) => vec![WireMessage {
            role: role.to_string(),
            content: Some(text),
            tool_calls: None,
            tool_call_id: None,
        }],
        Some(MessageContent::Blocks(blocks)) => convert_blocks(role, blocks),
        None => vec![WireMessage {
            role: role.to_string(),
            content: Some(String::new()),
            tool_calls: None,
            tool_call_id: None,
        }],
    }
}

/// Convert content blocks to wire messages
fn convert_blocks(role: &str, blocks: Vec<ContentBlock>) -> Vec<WireMessage> {
    let mut messages = Vec::new();
    let mut text_parts: Vec<String> = Vec::new();
    let mut tool_calls = Vec::new();

    for block in blocks {
        match block {
            ContentBlock::Text { text } => {
                text_parts.push(text);
            }
            ContentBlock::ToolUse { id, name, input } => {
                let arguments = serde_json::to_string(&input).unwrap_or_default();
                tool_calls.push(WireToolCall {
                    id,
                    tool_type: "function".to_string(),
                    function: WireFunctionCall { name, arguments },
                });
            }
            ContentBlock::ToolResult {
                tool_use_id,
                content,
                ..
            } => {
                messages.push(WireMessage {
                    role: "tool".to_string(),
                    content: Some(content),
                    tool_calls: None,
                    tool_call_id: Some(tool_use_id),
                });
            }
        }
    }

    if !text_parts.is_empty() || !tool_calls.is_empty() {
        messages.insert(
            0,
            WireMessage {
                role: role.to_string(),
                content: if text_parts.is_empty() {
                    None
                } else {
                    Some(text_parts.join("\n"))
                },
                tool_calls: if tool_calls.is_empty() {
                    None
                } else {
                    Some(tool_calls)
                },
                tool_call_id: None,
            },
        );
    }

    messages
}

/// Convert tool definitions to wire format
fn convert_tools(tools: &[ToolDefinition]) -> Vec<WireTool> {
    tools
        .iter()
        .map(|tool| WireTool {
            tool_type: "function".to_string(),
            function: WireFunction {
                name: tool.name.clone(),
                description: tool.description.clone(),
                parameters: tool.input_schema.clone(),
            },
        })
        .collect()
}

/// Parse a wire response message into our format
fn parse_wire_message(msg: WireResponseMessage) -> Result<Message> {
    let mut blocks = Vec::new();

    if let Some(content) = msg.content {
        if !content.is_empty() {
            blocks.push(ContentBlock::Text { text: content });
        }
    }

    if let Some(tool_calls) = msg.tool_calls {
        for call in tool_calls {
            let input: serde_json::Value =
                serde_json::from_str(&call.function.arguments).map_err(|e| {
                    crate::LlmError::UnexpectedResponse(format!(
                        "Failed to parse tool arguments: {e}"
                    ))
                })?;

            blocks.push(ContentBlock::ToolUse {
                id: call.id,
                name: call.function.name,
                input,
            });
        }
    }

    if blocks.is_empty() {
        blocks.push(ContentBlock::Text {
            text: String::new(),
        });
    }

    Ok(Message {
        role: Role::Assistant,
        content: Some(MessageContent::Blocks(blocks)),
    })
}

/// Map a wire finish reason to our format
fn map_stop_reason(reason: &str) -> StopReason {
    match reason {
        "length" => StopReason::MaxTokens,
        "tool_calls" => StopReason::ToolUse,
        "stop" => StopReason::EndTurn,
        other => {
            debug!("Unknown finish reason: {}", other);
            StopReason::EndTurn
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ModelHandle, ProviderKind};
    use serde_json::json;

    fn deepseek_handle() -> ModelHandle {
        ModelHandle::resolve_provider_with(ProviderKind::DeepSeek, |name| match name {
            "DEEPSEEK_API_KEY" => Some("sk-test".to_string()),
            _ => None,
        })
        .unwrap()
    }

    #[test]
    fn test_provider_from_handle() {
        let provider = OpenAiProvider::from_handle(&deepseek_handle()).unwrap();
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.config().api_key, "sk-test");
        assert_eq!(provider.config().api_base, "https://api.deepseek.com");
        assert_eq!(provider.config().timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_config_with_timeout() {
        let config = OpenAiConfig::from_handle(&deepseek_handle()).with_timeout(180);
        assert_eq!(config.timeout_secs, 180);
    }

    #[test]
    fn test_simple_text_message_conversion() {
        let msgs = convert_message(Message::user("Hello"));

        assert_eq!(msgs.len(), 1);
        assert_eq!(msgs[0].role, "user");
        assert_eq!(msgs[0].content.as_deref(), Some("Hello"));
    }

    #[test]
    fn test_system_message_in_array() {
        let messages = build_wire_messages(Some("You are a financial analyst".to_string()), vec![]);

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content.as_deref(), Some("You are a financial analyst"));
    }

    #[test]
    fn test_tool_definition_conversion() {
        let tool = ToolDefinition {
            name: "search_web".to_string(),
            description: "Search the web".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {"type": "string"}
                }
            }),
        };

        let wire_tools = convert_tools(&[tool]);

        assert_eq!(wire_tools.len(), 1);
        assert_eq!(wire_tools[0].tool_type, "function");
        assert_eq!(wire_tools[0].function.name, "search_web");
    }

    #[test]
    fn test_tool_result_conversion() {
        let msg = Message::tool_result("call_123".to_string(), "quote data".to_string());
        let msgs = convert_message(msg);

        assert_eq!(msgs.len(), 1);
        assert_eq!(msgs[0].role, "tool");
        assert_eq!(msgs[0].tool_call_id, Some("call_123".to_string()));
        assert_eq!(msgs[0].content.as_deref(), Some("quote data"));
    }

    #[test]
    fn test_multiple_tool_results() {
        let msg = Message {
            role: Role::User,
            content: Some(MessageContent::Blocks(vec![
                ContentBlock::ToolResult {
                    tool_use_id: "call_1".to_string(),
                    content: "result 1".to_string(),
                    is_error: None,
                },
                ContentBlock::ToolResult {
                    tool_use_id: "call_2".to_string(),
                    content: "result 2".to_string(),
                    is_error: None,
                },
            ])),
        };

        let msgs = convert_message(msg);

        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[0].role, "tool");
        assert_eq!(msgs[0].tool_call_id, Some("call_1".to_string()));
        assert_eq!(msgs[1].tool_call_id, Some("call_2".to_string()));
    }

    #[test]
    fn test_assistant_tool_call_conversion() {
        let msg = Message {
            role: Role::Assistant,
            content: Some(MessageContent::Blocks(vec![
                ContentBlock::Text {
                    text: "Fetching the quote".to_string(),
                },
                ContentBlock::ToolUse {
                    id: "call_9".to_string(),
                    name: "stock_quote".to_string(),
                    input: json!({ "symbol": "600519" }),
                },
            ])),
        };

        let msgs = convert_message(msg);

        assert_eq!(msgs.len(), 1);
        assert_eq!(msgs[0].role, "assistant");
        assert_eq!(msgs[0].content.as_deref(), Some("Fetching the quote"));
        let calls = msgs[0].tool_calls.as_ref().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].function.name, "stock_quote");
    }

    #[test]
    fn test_response_with_tool_calls() {
        let wire_msg = WireResponseMessage {
            content: Some("Let me check".to_string()),
            tool_calls: Some(vec![WireResponseToolCall {
                id: "call_123".to_string(),
                function: WireResponseFunctionCall {
                    name: "search_web".to_string(),
                    arguments: r#"{"query":"贵州茅台 股价"}"#.to_string(),
                },
            }]),
        };

        let message = parse_wire_message(wire_msg).unwrap();

        assert_eq!(message.role, Role::Assistant);
        let uses = message.tool_uses();
        assert_eq!(uses.len(), 1);
        match uses[0] {
            ContentBlock::ToolUse { id, name, input } => {
                assert_eq!(id, "call_123");
                assert_eq!(name, "search_web");
                assert_eq!(input["query"], "贵州茅台 股价");
            }
            _ => panic!("Expected tool use"),
        }
    }

    #[test]
    fn test_stop_reason_mapping() {
        assert_eq!(map_stop_reason("stop"), StopReason::EndTurn);
        assert_eq!(map_stop_reason("length"), StopReason::MaxTokens);
        assert_eq!(map_stop_reason("tool_calls"), StopReason::ToolUse);
        assert_eq!(map_stop_reason("content_filter"), StopReason::EndTurn);
    }
}
