//! Prompt template management for finchat
//!
//! Agent instructions are bilingual (the product audience is
//! Chinese-first, the codebase English-first) and parameterized: the
//! current market time, the symbol under analysis, and similar values are
//! interpolated at render time with MiniJinja.
//!
//! # Quick Start
//!
//! ```
//! use finchat_prompt::{JinjaTemplate, Language, PromptRegistry, PromptTemplate};
//! use serde_json::json;
//!
//! let template = JinjaTemplate::bilingual(
//!     "greeting",
//!     "Hello, {{ name }}!",
//!     "你好，{{ name }}！",
//! ).unwrap();
//!
//! let en = template.render(&Language::English, &json!({ "name": "World" })).unwrap();
//! assert_eq!(en, "Hello, World!");
//!
//! let registry = PromptRegistry::with_language(Language::Chinese);
//! registry.register(template);
//! let zh = registry.render("greeting", &json!({ "name": "世界" })).unwrap();
//! assert_eq!(zh, "你好，世界！");
//! ```

mod error;
mod language;
mod registry;
mod template;

pub use error::{PromptError, Result};
pub use language::Language;
pub use registry::PromptRegistry;
pub use template::{JinjaTemplate, JinjaTemplateBuilder, PromptTemplate};
