//! Single-agent mode: one generalist finance analyst

use crate::error::Result;
use crate::toolsets::FinanceToolsets;
use finchat_prompt::PromptRegistry;
use finchat_runtime::{LlmAgent, Runtime};
use finchat_tools::{CurrentTimeTool, Tool, builtin::current_time_report};
use serde_json::json;
use std::sync::Arc;

/// Create the root finance analysis agent
///
/// Carries every finance toolset plus web search and the clock, mirroring
/// a single expert with full data access.
pub fn create_finance_agent(
    runtime: &Arc<Runtime>,
    prompts: &PromptRegistry,
    toolsets: &FinanceToolsets,
    search: Arc<dyn Tool>,
) -> Result<LlmAgent> {
    let instruction = prompts.render(
        "chat.finance_analyst",
        &json!({ "current_time": current_time_report() }),
    )?;

    Ok(runtime
        .agent("金融分析专家")
        .description("专业的金融和投资分析专家，擅长股票、基金、债券等金融产品分析")
        .instruction(instruction)
        .tools(toolsets.all_tools())
        .tool(search)
        .tool(Arc::new(CurrentTimeTool::new()))
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::register_prompts;
    use finchat_core::Agent;
    use finchat_llm::model::{ModelHandle, ProviderKind};
    use finchat_prompt::Language;
    use finchat_runtime::RuntimeConfig;
    use finchat_tools::WebSearchTool;

    fn test_runtime() -> Arc<Runtime> {
        let handle =
            ModelHandle::resolve_provider_with(ProviderKind::DeepSeek, |name| match name {
                "DEEPSEEK_API_KEY" => Some("sk-test".to_string()),
                _ => None,
            })
            .unwrap();
        Arc::new(Runtime::from_handle(&handle, RuntimeConfig::default()).unwrap())
    }

    #[test]
    fn test_agent_construction() {
        let runtime = test_runtime();
        let prompts = PromptRegistry::with_language(Language::Chinese);
        register_prompts(&prompts).unwrap();
        let toolsets = FinanceToolsets::empty();
        let search: Arc<dyn Tool> = Arc::new(WebSearchTool::new("tvly-test").unwrap());

        let agent = create_finance_agent(&runtime, &prompts, &toolsets, search).unwrap();
        assert_eq!(agent.name(), "金融分析专家");
        assert!(agent.description().contains("金融"));
    }
}
