//! Prompt template trait and MiniJinja implementation

use crate::{Language, PromptError, Result};
use minijinja::Environment;
use std::collections::HashMap;

/// Trait for renderable prompt templates
pub trait PromptTemplate: Send + Sync {
    /// Template name (unique within a registry)
    fn name(&self) -> &str;

    /// Languages this template has variants for
    fn languages(&self) -> Vec<Language>;

    /// Render the template for a language with the given variables
    fn render(&self, lang: &Language, vars: &serde_json::Value) -> Result<String>;
}

/// A prompt template backed by MiniJinja
///
/// Uses standard Jinja2 syntax: `{{ variable }}`, `{% if %}`, `{% for %}`.
///
/// # Examples
///
/// ```
/// use finchat_prompt::{JinjaTemplate, Language, PromptTemplate};
/// use serde_json::json;
///
/// let template = JinjaTemplate::bilingual(
///     "analyst",
///     "Analyze {{ symbol }}.",
///     "分析 {{ symbol }}。",
/// ).unwrap();
///
/// let zh = template.render(&Language::Chinese, &json!({ "symbol": "600519" })).unwrap();
/// assert_eq!(zh, "分析 600519。");
/// ```
pub struct JinjaTemplate {
    name: String,
    templates: HashMap<Language, String>,
}

impl JinjaTemplate {
    /// Create a new template builder
    pub fn builder(name: impl Into<String>) -> JinjaTemplateBuilder {
        JinjaTemplateBuilder::new(name)
    }

    /// Create from a single template (language-agnostic, stored as English)
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Result<Self> {
        Self::builder(name).english(template).build()
    }

    /// Create with English and Chinese variants
    pub fn bilingual(
        name: impl Into<String>,
        english: impl Into<String>,
        chinese: impl Into<String>,
    ) -> Result<Self> {
        Self::builder(name).english(english).chinese(chinese).build()
    }
}

impl PromptTemplate for JinjaTemplate {
    fn name(&self) -> &str {
        &self.name
    }

    fn languages(&self) -> Vec<Language> {
        self.templates.keys().cloned().collect()
    }

    fn render(&self, lang: &Language, vars: &serde_json::Value) -> Result<String> {
        // Fall back to whichever variant exists when the requested language
        // is missing but the template is monolingual
        let source = self
            .templates
            .get(lang)
            .or_else(|| {
                if self.templates.len() == 1 {
                    self.templates.values().next()
                } else {
                    None
                }
            })
            .ok_or_else(|| PromptError::LanguageNotAvailable {
                name: self.name.clone(),
                language: lang.code().to_string(),
            })?;

        // A fresh environment per render keeps the template source borrowed
        // only for the duration of the call
        let mut env = Environment::new();
        env.add_template(&self.name, source)
            .map_err(|e| PromptError::RenderError {
                name: self.name.clone(),
                detail: e.to_string(),
            })?;

        let template = env
            .get_template(&self.name)
            .map_err(|e| PromptError::RenderError {
                name: self.name.clone(),
                detail: e.to_string(),
            })?;

        template.render(vars).map_err(|e| PromptError::RenderError {
            name: self.name.clone(),
            detail: e.to_string(),
        })
    }
}

/// Builder for [`JinjaTemplate`]
pub struct JinjaTemplateBuilder {
    name: String,
    templates: HashMap<Language, String>,
}

impl JinjaTemplateBuilder {
    /// Create a new builder
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            templates: HashMap::new(),
        }
    }

    /// Add the English variant
    pub fn english(mut self, template: impl Into<String>) -> Self {
        self.templates.insert(Language::English, template.into());
        self
    }

    /// Add the Chinese variant
    pub fn chinese(mut self, template: impl Into<String>) -> Self {
        self.templates.insert(Language::Chinese, template.into());
        self
    }

    /// Add a variant for an arbitrary language
    pub fn variant(mut self, lang: Language, template: impl Into<String>) -> Self {
        self.templates.insert(lang, template.into());
        self
    }

    /// Build the template
    pub fn build(self) -> Result<JinjaTemplate> {
        if self.templates.is_empty() {
            return Err(PromptError::NoTemplatesProvided(self.name));
        }

        Ok(JinjaTemplate {
            name: self.name,
            templates: self.templates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bilingual_render() {
        let template = JinjaTemplate::bilingual(
            "greeting",
            "Hello, {{ name }}!",
            "你好，{{ name }}！",
        )
        .unwrap();

        let en = template
            .render(&Language::English, &json!({ "name": "World" }))
            .unwrap();
        assert_eq!(en, "Hello, World!");

        let zh = template
            .render(&Language::Chinese, &json!({ "name": "世界" }))
            .unwrap();
        assert_eq!(zh, "你好，世界！");
    }

    #[test]
    fn test_monolingual_fallback() {
        let template = JinjaTemplate::new("single", "Only {{ what }}").unwrap();
        let rendered = template
            .render(&Language::Chinese, &json!({ "what": "English" }))
            .unwrap();
        assert_eq!(rendered, "Only English");
    }

    #[test]
    fn test_missing_language_errors_when_ambiguous() {
        let template = JinjaTemplate::bilingual("both", "en", "zh").unwrap();
        let err = template
            .render(&Language::Other("ja".to_string()), &json!({}))
            .unwrap_err();
        assert!(matches!(err, PromptError::LanguageNotAvailable { .. }));
    }

    #[test]
    fn test_empty_builder_fails() {
        let result = JinjaTemplate::builder("empty").build();
        assert!(matches!(result, Err(PromptError::NoTemplatesProvided(_))));
    }

    #[test]
    fn test_conditional_rendering() {
        let template = JinjaTemplate::new(
            "cond",
            "{% if symbol %}Analyze {{ symbol }}{% else %}Scan the market{% endif %}",
        )
        .unwrap();

        let with = template
            .render(&Language::English, &json!({ "symbol": "AAPL" }))
            .unwrap();
        assert_eq!(with, "Analyze AAPL");

        let without = template.render(&Language::English, &json!({})).unwrap();
        assert_eq!(without, "Scan the market");
    }
}
