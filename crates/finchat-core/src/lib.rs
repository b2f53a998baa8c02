//! Core abstractions for finchat agents
//!
//! This crate defines the fundamental traits and types shared by every agent
//! in the finchat workspace.

pub mod agent;
pub mod context;
pub mod error;

pub use agent::Agent;
pub use context::Context;
pub use error::{Error, Result};
