//! Agent construction for the finchat application
//!
//! Each function wires prompts, tools, and the shared runtime into one of
//! the composition shapes from `finchat-runtime`:
//!
//! - [`create_finance_agent`]: one generalist with every tool
//! - [`create_analysis_team`]: four specialists behind a coordinator
//! - [`create_full_review`]: the specialists fanned out in parallel
//! - [`create_research_pipeline`]: a sequential market research pipeline
//! - [`PromptRefinerAgent`]: multi-turn prompt optimization with sessions

mod finance;
mod pipeline;
mod refiner;
mod team;

pub use finance::create_finance_agent;
pub use pipeline::create_research_pipeline;
pub use refiner::PromptRefinerAgent;
pub use team::{create_analysis_team, create_full_review};
