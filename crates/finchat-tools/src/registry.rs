//! Tool registry for managing available tools

use crate::Tool;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Registry for managing tools
///
/// The registry holds every tool available to the process; individual
/// agents pick the subset they expose to the model.
pub struct ToolRegistry {
    tools: RwLock<HashMap<String, Arc<dyn Tool>>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self {
            tools: RwLock::new(HashMap::new()),
        }
    }
}

impl ToolRegistry {
    /// Create a new tool registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool
    pub fn register(&self, tool: Arc<dyn Tool>) {
        let mut tools = self.tools.write().unwrap();
        tools.insert(tool.name().to_string(), tool);
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        let tools = self.tools.read().unwrap();
        tools.get(name).cloned()
    }

    /// List all registered tools
    pub fn list_tools(&self) -> Vec<Arc<dyn Tool>> {
        let tools = self.tools.read().unwrap();
        tools.values().cloned().collect()
    }

    /// Select tools by name, skipping names that are not registered
    pub fn select(&self, names: &[&str]) -> Vec<Arc<dyn Tool>> {
        let tools = self.tools.read().unwrap();
        names
            .iter()
            .filter_map(|name| tools.get(*name).cloned())
            .collect()
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        let tools = self.tools.read().unwrap();
        tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        let tools = self.tools.read().unwrap();
        tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{Value, json};

    struct FakeQuote;

    #[async_trait]
    impl Tool for FakeQuote {
        async fn execute(&self, _params: Value) -> finchat_core::Result<Value> {
            Ok(json!({ "price": 1815.0 }))
        }

        fn name(&self) -> &str {
            "stock_quote"
        }

        fn description(&self) -> &str {
            "Get the latest quote for a stock"
        }

        fn input_schema(&self) -> Value {
            json!({ "type": "object", "properties": { "symbol": { "type": "string" } } })
        }
    }

    #[test]
    fn test_register_and_get() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());

        registry.register(Arc::new(FakeQuote));
        assert_eq!(registry.len(), 1);
        assert!(registry.get("stock_quote").is_some());
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_select_skips_unknown_names() {
        let registry = ToolRegistry::new();
        registry.register(Arc::new(FakeQuote));

        let selected = registry.select(&["stock_quote", "not_there"]);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name(), "stock_quote");
    }
}
