//! Parallel agent (fan-out execution)

use async_trait::async_trait;
use finchat_core::{Agent, Context, Error, Result};
use futures::future::join_all;
use std::sync::Arc;
use tracing::warn;

/// An agent that runs all branches concurrently on the same input and
/// merges their outputs into one report
///
/// Each branch gets its own copy of the context (branches must not race on
/// shared state). A failed branch is reported inside the merged output; the
/// fan-out only fails as a whole when every branch fails.
pub struct ParallelAgent {
    name: String,
    description: String,
    branches: Vec<Arc<dyn Agent>>,
}

impl ParallelAgent {
    /// Create a parallel agent from its branches
    ///
    /// # Errors
    ///
    /// Fails when the branch list is empty.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        branches: Vec<Arc<dyn Agent>>,
    ) -> Result<Self> {
        if branches.is_empty() {
            return Err(Error::ConstructionFailed(
                "Parallel agent needs at least one branch".to_string(),
            ));
        }

        Ok(Self {
            name: name.into(),
            description: description.into(),
            branches,
        })
    }

    /// Number of branches
    pub fn len(&self) -> usize {
        self.branches.len()
    }

    /// Whether there are no branches (never true after construction)
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }
}

#[async_trait]
impl Agent for ParallelAgent {
    async fn process(&self, input: String, context: &mut Context) -> Result<String> {
        let futures = self.branches.iter().map(|branch| {
            let input = input.clone();
            let mut branch_context = context.clone();
            async move {
                let result = branch.process(input, &mut branch_context).await;
                (branch.name().to_string(), result)
            }
        });

        let results = join_all(futures).await;

        let mut report = String::new();
        let mut failures = 0;

        for (branch_name, result) in &results {
            report.push_str(&format!("## {branch_name}\n\n"));
            match result {
                Ok(output) => {
                    report.push_str(output);
                }
                Err(e) => {
                    warn!(branch = %branch_name, error = %e, "Parallel branch failed");
                    failures += 1;
                    report.push_str(&format!("分析失败 (analysis failed): {e}"));
                }
            }
            report.push_str("\n\n");
        }

        if failures == results.len() {
            return Err(Error::ProcessingFailed(format!(
                "All {} branches of '{}' failed",
                results.len(),
                self.name
            )));
        }

        Ok(report)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Canned(&'static str, &'static str);

    #[async_trait]
    impl Agent for Canned {
        async fn process(&self, _input: String, _context: &mut Context) -> Result<String> {
            Ok(self.1.to_string())
        }

        fn name(&self) -> &str {
            self.0
        }
    }

    struct Failing;

    #[async_trait]
    impl Agent for Failing {
        async fn process(&self, _input: String, _context: &mut Context) -> Result<String> {
            Err(Error::ProcessingFailed("boom".to_string()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[tokio::test]
    async fn test_merges_branch_outputs() {
        let fan_out = ParallelAgent::new(
            "full-analysis",
            "",
            vec![
                Arc::new(Canned("technical", "RSI 55")),
                Arc::new(Canned("fundamental", "PE 28")),
            ],
        )
        .unwrap();

        let report = fan_out
            .process("600519".to_string(), &mut Context::new())
            .await
            .unwrap();

        assert!(report.contains("## technical"));
        assert!(report.contains("RSI 55"));
        assert!(report.contains("## fundamental"));
        assert!(report.contains("PE 28"));
    }

    #[tokio::test]
    async fn test_partial_failure_is_reported_inline() {
        let fan_out = ParallelAgent::new(
            "mixed",
            "",
            vec![Arc::new(Canned("ok", "fine")), Arc::new(Failing)],
        )
        .unwrap();

        let report = fan_out
            .process("x".to_string(), &mut Context::new())
            .await
            .unwrap();
        assert!(report.contains("fine"));
        assert!(report.contains("analysis failed"));
    }

    #[tokio::test]
    async fn test_total_failure_is_an_error() {
        let fan_out = ParallelAgent::new("broken", "", vec![Arc::new(Failing)]).unwrap();
        let err = fan_out
            .process("x".to_string(), &mut Context::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ProcessingFailed(_)));
    }
}
