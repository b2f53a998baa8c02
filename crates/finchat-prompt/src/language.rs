//! Language support for prompt templates

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported languages for prompts
///
/// # Examples
///
/// ```
/// use finchat_prompt::Language;
///
/// assert_eq!(Language::Chinese.code(), "zh");
/// assert_eq!(Language::from_code("english"), Language::English);
/// assert_eq!(Language::from_code("中文"), Language::Chinese);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Language {
    /// English
    English,
    /// Chinese (Simplified) - the product default
    #[default]
    Chinese,
    /// Other languages (ISO 639-1 code)
    Other(String),
}

impl Language {
    /// Get ISO 639-1 language code
    pub fn code(&self) -> &str {
        match self {
            Language::English => "en",
            Language::Chinese => "zh",
            Language::Other(code) => code,
        }
    }

    /// Parse from ISO 639-1 code or common name
    pub fn from_code(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "en" | "english" => Language::English,
            "zh" | "chinese" | "中文" | "zh-cn" | "zh-hans" => Language::Chinese,
            other => Language::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl From<&str> for Language {
    fn from(s: &str) -> Self {
        Language::from_code(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(Language::English.code(), "en");
        assert_eq!(Language::Chinese.code(), "zh");
        assert_eq!(Language::Other("ja".to_string()).code(), "ja");
    }

    #[test]
    fn test_from_code() {
        assert_eq!(Language::from_code("EN"), Language::English);
        assert_eq!(Language::from_code("zh-hans"), Language::Chinese);
        assert_eq!(Language::from_code("ja"), Language::Other("ja".to_string()));
    }

    #[test]
    fn test_default_is_chinese() {
        assert_eq!(Language::default(), Language::Chinese);
    }

    #[test]
    fn test_serde() {
        let lang = Language::Chinese;
        let json = serde_json::to_string(&lang).unwrap();
        let parsed: Language = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, lang);
    }
}
