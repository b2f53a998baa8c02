//! Core Agent trait definition

use crate::{Context, Result};
use async_trait::async_trait;

/// Trait implemented by every agent in the workspace
///
/// Input and output are plain strings: user queries go in, rendered analysis
/// comes out. Structured data (tool results, intermediate state) travels
/// through [`Context`] or stays inside the concrete implementation.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Process input and return output
    async fn process(&self, input: String, context: &mut Context) -> Result<String>;

    /// Get the agent's name
    fn name(&self) -> &str;

    /// One-line description of what the agent specializes in
    ///
    /// Coordinator agents use this when deciding where to delegate, so it
    /// should state the agent's domain ("fund performance analysis"), not
    /// implementation details.
    fn description(&self) -> &str {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait]
    impl Agent for Echo {
        async fn process(&self, input: String, _context: &mut Context) -> Result<String> {
            Ok(input)
        }

        fn name(&self) -> &str {
            "echo"
        }
    }

    #[tokio::test]
    async fn test_default_description_is_empty() {
        let agent = Echo;
        assert_eq!(agent.description(), "");
        let mut ctx = Context::new();
        assert_eq!(
            agent.process("hi".to_string(), &mut ctx).await.unwrap(),
            "hi"
        );
    }
}
