//! Analysis team: four specialists behind a coordinator
//!
//! Mirrors a buy-side research desk: stock, fund, risk, and market
//! analysts, each with only the data tools their domain needs. The
//! coordinator routes by query intent; the full review runs everyone in
//! parallel and merges the sections.

use crate::error::{ChatError, Result};
use crate::router::QueryRouter;
use crate::toolsets::FinanceToolsets;
use finchat_core::Agent;
use finchat_prompt::PromptRegistry;
use finchat_runtime::{DelegatingAgent, LlmAgent, ParallelAgent, Runtime};
use finchat_tools::{Tool, builtin::current_time_report};
use serde_json::json;
use std::sync::Arc;

fn specialist(
    runtime: &Arc<Runtime>,
    prompts: &PromptRegistry,
    name: &str,
    description: &str,
    template: &str,
    tools: Vec<Arc<dyn Tool>>,
    search: &Arc<dyn Tool>,
) -> Result<LlmAgent> {
    let instruction =
        prompts.render(template, &json!({ "current_time": current_time_report() }))?;

    Ok(runtime
        .agent(name)
        .description(description)
        .instruction(instruction)
        .tools(tools)
        .tool(Arc::clone(search))
        .build())
}

fn build_specialists(
    runtime: &Arc<Runtime>,
    prompts: &PromptRegistry,
    toolsets: &FinanceToolsets,
    search: &Arc<dyn Tool>,
) -> Result<[LlmAgent; 4]> {
    let stock = specialist(
        runtime,
        prompts,
        "股票分析专家",
        "专门分析个股技术面、基本面和估值，提供买卖建议",
        "chat.stock_analyst",
        toolsets.stock_tools(),
        search,
    )?;

    let fund = specialist(
        runtime,
        prompts,
        "基金分析专家",
        "专门分析基金业绩、投资组合和基金经理，提供基金投资建议",
        "chat.fund_analyst",
        toolsets.fund_tools(),
        search,
    )?;

    // Risk work leans on financial statements for leverage and liquidity
    let risk = specialist(
        runtime,
        prompts,
        "风险评估专家",
        "专门进行投资风险评估、风险控制和资产配置建议",
        "chat.risk_analyst",
        toolsets.finance_tools(),
        search,
    )?;

    let market = specialist(
        runtime,
        prompts,
        "市场分析专家",
        "专门分析宏观经济、行业趋势和市场情绪",
        "chat.market_analyst",
        toolsets.all_tools(),
        search,
    )?;

    Ok([stock, fund, risk, market])
}

/// Create the analysis team coordinator
///
/// Queries are routed to one specialist by [`QueryRouter`] intent
/// classification.
pub fn create_analysis_team(
    runtime: &Arc<Runtime>,
    prompts: &PromptRegistry,
    toolsets: &FinanceToolsets,
    search: Arc<dyn Tool>,
) -> Result<DelegatingAgent> {
    let [stock, fund, risk, market] = build_specialists(runtime, prompts, toolsets, &search)?;

    DelegatingAgent::builder("金融分析团队")
        .description("协调金融分析团队，综合各专家意见提供投资决策")
        .add_agent("stock", Arc::new(stock) as Arc<dyn Agent>)
        .add_agent("fund", Arc::new(fund) as Arc<dyn Agent>)
        .add_agent("risk", Arc::new(risk) as Arc<dyn Agent>)
        .add_agent("market", Arc::new(market) as Arc<dyn Agent>)
        .router(|input, _ctx| QueryRouter::new().classify(input).agent_key().to_string())
        .build()
        .map_err(ChatError::from)
}

/// Create the full-review agent: all four specialists in parallel
///
/// Used for "给我一份全面分析" style queries where every angle matters and
/// the answers are independent.
pub fn create_full_review(
    runtime: &Arc<Runtime>,
    prompts: &PromptRegistry,
    toolsets: &FinanceToolsets,
    search: Arc<dyn Tool>,
) -> Result<ParallelAgent> {
    let [stock, fund, risk, market] = build_specialists(runtime, prompts, toolsets, &search)?;

    ParallelAgent::new(
        "全面分析",
        "并行运行全部专家，输出综合分析报告",
        vec![
            Arc::new(stock) as Arc<dyn Agent>,
            Arc::new(fund) as Arc<dyn Agent>,
            Arc::new(risk) as Arc<dyn Agent>,
            Arc::new(market) as Arc<dyn Agent>,
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

    fn fixtures() -> (Arc<Runtime>, PromptRegistry, FinanceToolsets, Arc<dyn Tool>) {
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

        (runtime, prompts, FinanceToolsets::empty(), search)
    }

    #[test]
    fn test_team_has_all_specialists() {
        let (runtime, prompts, toolsets, search) = fixtures();
        let team = create_analysis_team(&runtime, &prompts, &toolsets, search).unwrap();

        assert_eq!(team.agent_count(), 4);
        let mut keys = team.agent_keys();
        keys.sort_unstable();
        assert_eq!(keys, vec!["fund", "market", "risk", "stock"]);
    }

    #[test]
    fn test_full_review_has_four_branches() {
        let (runtime, prompts, toolsets, search) = fixtures();
        let review = create_full_review(&runtime, &prompts, &toolsets, search).unwrap();
        assert_eq!(review.len(), 4);
    }
}
