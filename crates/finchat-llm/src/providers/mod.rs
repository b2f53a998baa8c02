//! Concrete provider implementations
//!
//! Every backend the resolver knows about (SiliconFlow, DeepSeek, Tencent
//! Hunyuan) exposes an OpenAI-compatible chat-completions API, so a single
//! client implementation covers all of them.

mod openai;

pub use openai::{OpenAiConfig, OpenAiProvider};
