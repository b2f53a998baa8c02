//! Tool abstractions for finchat agents
//!
//! A tool is anything an agent can call during its reasoning loop: a remote
//! MCP service, a web search, a clock. This crate defines the [`Tool`]
//! trait, the [`ToolRegistry`] agents draw definitions from, and the two
//! built-in tools every finchat agent carries (web search, current time).

pub mod builtin;
pub mod registry;
pub mod tool;

pub use builtin::{CurrentTimeTool, WebSearchTool};
pub use registry::ToolRegistry;
pub use tool::Tool;
