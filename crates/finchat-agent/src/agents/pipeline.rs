//! Research pipeline: sequential market research
//!
//! Four stages, each feeding the next: scan the market environment, find
//! opportunities inside it, assess their risks, write the report.

use crate::error::{ChatError, Result};
use crate::toolsets::FinanceToolsets;
use finchat_core::Agent;
use finchat_prompt::PromptRegistry;
use finchat_runtime::{Runtime, SequentialAgent};
use finchat_tools::{Tool, builtin::current_time_report};
use serde_json::json;
use std::sync::Arc;

/// Create the sequential research pipeline
pub fn create_research_pipeline(
    runtime: &Arc<Runtime>,
    prompts: &PromptRegistry,
    toolsets: &FinanceToolsets,
    search: Arc<dyn Tool>,
) -> Result<SequentialAgent> {
    let vars = json!({ "current_time": current_time_report() });

    let scanner = runtime
        .agent("市场环境扫描")
        .description("扫描当前市场环境和宏观因素")
        .instruction(prompts.render("chat.market_scanner", &vars)?)
        .tools(toolsets.finance_tools())
        .tool(Arc::clone(&search))
        .build();

    let opportunity_finder = runtime
        .agent("投资机会识别")
        .description("基于市场环境识别投资机会")
        .instruction(prompts.render("chat.opportunity_finder", &vars)?)
        .tools(toolsets.stock_tools())
        .tool(Arc::clone(&search))
        .build();

    let risk_assessor = runtime
        .agent("风险评估")
        .description("评估候选机会的风险")
        .instruction(prompts.render("chat.risk_assessor", &vars)?)
        .tools(toolsets.finance_tools())
        .tool(search)
        .build();

    // The report stage only synthesizes; it gets no tools
    let report_writer = runtime
        .agent("研究报告")
        .description("整合分析结果，输出最终研究报告")
        .instruction(prompts.render("chat.report_writer", &vars)?)
        .build();

    SequentialAgent::new(
        "市场研究流水线",
        "顺序执行市场研究：环境扫描、机会识别、风险评估、报告输出",
        vec![
            Arc::new(scanner) as Arc<dyn Agent>,
            Arc::new(opportunity_finder) as Arc<dyn Agent>,
            Arc::new(risk_assessor) as Arc<dyn Agent>,
            Arc::new(report_writer) as Arc<dyn Agent>,
        ],
    )
    .map_err(ChatError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::register_prompts;
    use finchat_llm::model::{ModelHandle, ProviderKind};
    use finchat_prompt::Language;
    use finchat_runtime::RuntimeConfig;
    use finchat_tools::WebSearchTool;

    #[test]
    fn test_pipeline_has_four_stages() {
        let handle =
            ModelHandle::resolve_provider_with(ProviderKind::DeepSeek, |name| match name {
                "DEEPSEEK_API_KEY" => Some("sk-test".to_string()),
                _ => None,
            })
            .unwrap();
        let runtime = Arc::new(Runtime::from_handle(&handle, RuntimeConfig::default()).unwrap());

        let prompts = PromptRegistry::with_language(Language::Chinese);
        register_prompts(&prompts).unwrap();

        let search: Arc<dyn Tool> = Arc::new(WebSearchTool::new("tvly-test").unwrap());
        let pipeline =
            create_research_pipeline(&runtime, &prompts, &FinanceToolsets::empty(), search)
                .unwrap();

        assert_eq!(pipeline.len(), 4);
        assert_eq!(pipeline.name(), "市场研究流水线");
    }
}
