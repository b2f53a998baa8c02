//! Prompt templates for the finchat agents
//!
//! All instructions are bilingual and take the current Shanghai time as a
//! `current_time` variable so the model reasons against "today" instead of
//! its training cutoff.

mod system;

pub use system::*;

use finchat_prompt::{PromptRegistry, Result};

/// Register all finchat prompts with the given registry
pub fn register_prompts(registry: &PromptRegistry) -> Result<()> {
    // Single-agent mode
    registry.register(finance_analyst()?);

    // Analysis team
    registry.register(stock_analyst()?);
    registry.register(fund_analyst()?);
    registry.register(risk_analyst()?);
    registry.register(market_analyst()?);

    // Research pipeline stages
    registry.register(market_scanner()?);
    registry.register(opportunity_finder()?);
    registry.register(risk_assessor()?);
    registry.register(report_writer()?);

    // Prompt refinement
    registry.register(prompt_refiner()?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use finchat_prompt::Language;
    use serde_json::json;

    #[test]
    fn test_register_all_prompts() {
        let registry = PromptRegistry::with_language(Language::Chinese);
        register_prompts(&registry).unwrap();

        for name in [
            "chat.finance_analyst",
            "chat.stock_analyst",
            "chat.fund_analyst",
            "chat.risk_analyst",
            "chat.market_analyst",
            "chat.market_scanner",
            "chat.opportunity_finder",
            "chat.risk_assessor",
            "chat.report_writer",
            "chat.prompt_refiner",
        ] {
            assert!(registry.get(name).is_some(), "missing template {name}");
        }
    }

    #[test]
    fn test_current_time_interpolation() {
        let registry = PromptRegistry::with_language(Language::Chinese);
        register_prompts(&registry).unwrap();

        let rendered = registry
            .render(
                "chat.finance_analyst",
                &json!({ "current_time": "当前时间是 2025年08月06日 15:00:00 (上海时间)" }),
            )
            .unwrap();
        assert!(rendered.contains("2025年08月06日"));
        assert!(rendered.contains("金融"));
    }

    #[test]
    fn test_english_variants_render() {
        let registry = PromptRegistry::with_language(Language::English);
        register_prompts(&registry).unwrap();

        let rendered = registry
            .render("chat.stock_analyst", &json!({ "current_time": "2025-08-06" }))
            .unwrap();
        assert!(rendered.contains("stock"));
    }
}
