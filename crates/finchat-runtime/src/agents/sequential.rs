//! Sequential agent (pipeline execution)

use async_trait::async_trait;
use finchat_core::{Agent, Context, Error, Result};
use std::sync::Arc;
use tracing::debug;

/// An agent that runs its steps in order, feeding each step's output into
/// the next
///
/// The final step's output is the pipeline's output. The shared context
/// travels through all steps, so earlier stages can leave state for later
/// ones.
pub struct SequentialAgent {
    name: String,
    description: String,
    steps: Vec<Arc<dyn Agent>>,
}

impl SequentialAgent {
    /// Create a sequential agent from its steps
    ///
    /// # Errors
    ///
    /// Fails when the step list is empty.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        steps: Vec<Arc<dyn Agent>>,
    ) -> Result<Self> {
        if steps.is_empty() {
            return Err(Error::ConstructionFailed(
                "Sequential agent needs at least one step".to_string(),
            ));
        }

        Ok(Self {
            name: name.into(),
            description: description.into(),
            steps,
        })
    }

    /// Number of steps in the pipeline
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the pipeline has no steps (never true after construction)
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[async_trait]
impl Agent for SequentialAgent {
    async fn process(&self, input: String, context: &mut Context) -> Result<String> {
        let mut current = input;

        for step in &self.steps {
            debug!(pipeline = %self.name, step = step.name(), "Running pipeline step");
            current = step.process(current, context).await?;
        }

        Ok(current)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }
}
