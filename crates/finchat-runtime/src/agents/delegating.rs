//! Delegating agent (routes to sub-agents)

use async_trait::async_trait;
use finchat_core::{Agent, Context, Error, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// An agent that delegates to sub-agents based on routing logic
///
/// The coordinator pattern: a routing function inspects the query and
/// returns the key of the specialist that should handle it.
///
/// # Example
///
/// ```ignore
/// let team = DelegatingAgent::builder("analysis-team")
///     .add_agent("stock", Arc::new(stock_analyst))
///     .add_agent("fund", Arc::new(fund_analyst))
///     .router(|input, _ctx| {
///         if input.contains("基金") { "fund".to_string() } else { "stock".to_string() }
///     })
///     .build()?;
/// ```
pub struct DelegatingAgent {
    name: String,
    description: String,
    sub_agents: HashMap<String, Arc<dyn Agent>>,
    router: Box<dyn Fn(&str, &Context) -> String + Send + Sync>,
}

impl DelegatingAgent {
    /// Create a new builder
    pub fn builder(name: impl Into<String>) -> DelegatingAgentBuilder {
        DelegatingAgentBuilder::new(name)
    }

    /// Get the number of sub-agents
    pub fn agent_count(&self) -> usize {
        self.sub_agents.len()
    }

    /// Get the list of available agent keys
    pub fn agent_keys(&self) -> Vec<&str> {
        self.sub_agents.keys().map(String::as_str).collect()
    }
}

#[async_trait]
impl Agent for DelegatingAgent {
    async fn process(&self, input: String, context: &mut Context) -> Result<String> {
        let key = (self.router)(&input, context);
        debug!(coordinator = %self.name, delegate = %key, "Routing query");

        let agent = self.sub_agents.get(&key).ok_or_else(|| {
            Error::ProcessingFailed(format!(
                "Agent '{}' not found. Available agents: {:?}",
                key,
                self.agent_keys()
            ))
        })?;

        agent.process(input, context).await
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Builder for [`DelegatingAgent`]
pub struct DelegatingAgentBuilder {
    name: String,
    description: String,
    sub_agents: HashMap<String, Arc<dyn Agent>>,
    router: Option<Box<dyn Fn(&str, &Context) -> String + Send + Sync>>,
}

impl DelegatingAgentBuilder {
    /// Create a new builder
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            sub_agents: HashMap::new(),
            router: None,
        }
    }

    /// Set the coordinator description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add a sub-agent under a routing key
    pub fn add_agent(mut self, key: impl Into<String>, agent: Arc<dyn Agent>) -> Self {
        self.sub_agents.insert(key.into(), agent);
        self
    }

    /// Set the routing function
    ///
    /// Receives the input and context, returns the key of the sub-agent
    /// that should handle the request.
    pub fn router<F>(mut self, router: F) -> Self
    where
        F: Fn(&str, &Context) -> String + Send + Sync + 'static,
    {
        self.router = Some(Box::new(router));
        self
    }

    /// Build the delegating agent
    ///
    /// # Errors
    ///
    /// Fails when no router is set or no sub-agents were added.
    pub fn build(self) -> Result<DelegatingAgent> {
        let router = self
            .router
            .ok_or_else(|| Error::ConstructionFailed("Router function not set".to_string()))?;

        if self.sub_agents.is_empty() {
            return Err(Error::ConstructionFailed(
                "Delegating agent needs at least one sub-agent".to_string(),
            ));
        }

        Ok(DelegatingAgent {
            name: self.name,
            description: self.description,
            sub_agents: self.sub_agents,
            router,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Canned(&'static str);

    #[async_trait]
    impl Agent for Canned {
        async fn process(&self, _input: String, _context: &mut Context) -> Result<String> {
            Ok(self.0.to_string())
        }

        fn name(&self) -> &str {
            self.0
        }
    }

    fn team() -> DelegatingAgent {
        DelegatingAgent::builder("team")
            .add_agent("stock", Arc::new(Canned("stock analysis")))
            .add_agent("fund", Arc::new(Canned("fund analysis")))
            .router(|input, _ctx| {
                if input.contains("基金") {
                    "fund".to_string()
                } else {
                    "stock".to_string()
                }
            })
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_routes_by_keyword() {
        let team = team();
        let mut ctx = Context::new();

        let fund = team.process("这只基金怎么样".to_string(), &mut ctx).await.unwrap();
        assert_eq!(fund, "fund analysis");

        let stock = team.process("600519 走势".to_string(), &mut ctx).await.unwrap();
        assert_eq!(stock, "stock analysis");
    }

    #[tokio::test]
    async fn test_unknown_route_is_an_error() {
        let team = DelegatingAgent::builder("team")
            .add_agent("stock", Arc::new(Canned("stock")))
            .router(|_, _| "missing".to_string())
            .build()
            .unwrap();

        let err = team
            .process("hello".to_string(), &mut Context::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ProcessingFailed(_)));
    }

    #[test]
    fn test_builder_requires_router_and_agents() {
        let no_router = DelegatingAgent::builder("t")
            .add_agent("a", Arc::new(Canned("a")))
            .build();
        assert!(no_router.is_err());

        let no_agents = DelegatingAgent::builder("t").router(|_, _| "a".to_string()).build();
        assert!(no_agents.is_err());
    }
}
