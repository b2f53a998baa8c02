//! Built-in tools
//!
//! Tools implemented directly in this workspace rather than discovered from
//! an MCP server: web search and the current-time report.

mod search;
mod time;

pub use search::WebSearchTool;
pub use time::{CurrentTimeTool, current_time_report};
