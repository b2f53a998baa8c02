//! Prompt template registry

use crate::{Language, PromptError, PromptTemplate, Result};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// A thread-safe registry for managing prompt templates
///
/// One registry per process, configured with the deployment's default
/// language; agents render their instructions through it by name.
pub struct PromptRegistry {
    templates: RwLock<HashMap<String, Arc<dyn PromptTemplate>>>,
    default_language: RwLock<Language>,
}

impl Default for PromptRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptRegistry {
    /// Create a new empty registry with the default language
    pub fn new() -> Self {
        Self::with_language(Language::default())
    }

    /// Create a registry with a specific default language
    pub fn with_language(lang: Language) -> Self {
        Self {
            templates: RwLock::new(HashMap::new()),
            default_language: RwLock::new(lang),
        }
    }

    /// Set the default language
    pub fn set_default_language(&self, lang: Language) {
        if let Ok(mut default) = self.default_language.write() {
            *default = lang;
        }
    }

    /// Get the default language
    pub fn default_language(&self) -> Language {
        self.default_language
            .read()
            .map(|l| l.clone())
            .unwrap_or_default()
    }

    /// Register a template
    ///
    /// A template with the same name replaces the previous one.
    pub fn register(&self, template: impl PromptTemplate + 'static) {
        if let Ok(mut templates) = self.templates.write() {
            templates.insert(template.name().to_string(), Arc::new(template));
        }
    }

    /// Get a template by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn PromptTemplate>> {
        self.templates.read().ok()?.get(name).cloned()
    }

    /// Render a template using the default language
    pub fn render(&self, name: &str, vars: &serde_json::Value) -> Result<String> {
        self.render_in(name, &self.default_language(), vars)
    }

    /// Render a template in a specific language
    pub fn render_in(
        &self,
        name: &str,
        lang: &Language,
        vars: &serde_json::Value,
    ) -> Result<String> {
        let template = self
            .get(name)
            .ok_or_else(|| PromptError::TemplateNotRegistered(name.to_string()))?;
        template.render(lang, vars)
    }

    /// Number of registered templates
    pub fn len(&self) -> usize {
        self.templates.read().map(|t| t.len()).unwrap_or(0)
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
