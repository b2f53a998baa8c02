//! Model provider resolution
//!
//! A deployment selects its LLM backend with the `MODEL_PROVIDER`
//! environment variable; each backend has its own credential variable and
//! optional endpoint/model overrides. Resolution validates the selection,
//! applies per-provider defaults, and produces a [`ModelHandle`] that is
//! passed explicitly to the chat-completion client constructor. Nothing is
//! ever written back to the process environment, so resolving handles for
//! two different providers in one process is safe.
//!
//! Misconfiguration is terminal: an unknown selector or a missing
//! credential fails immediately at startup with no fallback.
//!
//! # Example
//!
//! ```no_run
//! use finchat_llm::{ModelHandle, OpenAiConfig};
//!
//! let handle = ModelHandle::from_env()?;
//! let config = OpenAiConfig::from_handle(&handle);
//! # Ok::<(), finchat_llm::ModelConfigError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Routing prefix on qualified model identifiers
///
/// All supported backends are OpenAI-compatible, so every resolved model id
/// is namespaced as `openai/<model-name>`; the client layer strips the
/// prefix before putting the name on the wire.
pub const ROUTE_PREFIX: &str = "openai";

/// Environment variable holding the provider selector
pub const PROVIDER_VAR: &str = "MODEL_PROVIDER";

/// Errors raised during model provider resolution
///
/// Both variants represent unrecoverable deployment misconfiguration: the
/// caller is expected to abort, not retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelConfigError {
    /// The selector does not name a supported provider (or is unset/empty)
    #[error("unknown model provider '{0}' (expected one of: siliconflow, deepseek, tencent)")]
    UnknownProvider(String),

    /// The selected provider's credential variable is unset or empty
    #[error("missing credential for provider '{provider}': set {var}")]
    MissingCredential {
        /// Provider the credential belongs to
        provider: ProviderKind,
        /// Name of the environment variable that must be set
        var: &'static str,
    },
}

/// Supported model providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// SiliconFlow hosted models
    SiliconFlow,
    /// DeepSeek platform
    DeepSeek,
    /// Tencent Hunyuan
    Tencent,
}

impl ProviderKind {
    /// All supported providers, in selector order
    pub const ALL: [ProviderKind; 3] = [
        ProviderKind::SiliconFlow,
        ProviderKind::DeepSeek,
        ProviderKind::Tencent,
    ];

    /// Canonical selector string for this provider
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderKind::SiliconFlow => "siliconflow",
            ProviderKind::DeepSeek => "deepseek",
            ProviderKind::Tencent => "tencent",
        }
    }

    /// Parse a selector string (case-insensitive, surrounding whitespace ignored)
    pub fn parse(selector: &str) -> Result<Self, ModelConfigError> {
        match selector.trim().to_lowercase().as_str() {
            "siliconflow" => Ok(ProviderKind::SiliconFlow),
            "deepseek" => Ok(ProviderKind::DeepSeek),
            "tencent" => Ok(ProviderKind::Tencent),
            other => Err(ModelConfigError::UnknownProvider(other.to_string())),
        }
    }

    /// Static configuration record for this provider
    pub fn profile(self) -> &'static ProviderProfile {
        match self {
            ProviderKind::SiliconFlow => &PROFILES[0],
            ProviderKind::DeepSeek => &PROFILES[1],
            ProviderKind::Tencent => &PROFILES[2],
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static per-provider configuration record
///
/// Adding a provider is a data change: add an enum variant, a row here, and
/// an arm in [`ProviderKind::parse`]/[`ProviderKind::profile`].
#[derive(Debug, Clone, Copy)]
pub struct ProviderProfile {
    /// Provider this profile belongs to
    pub kind: ProviderKind,
    /// Environment variable holding the API credential (required)
    pub credential_var: &'static str,
    /// Environment variable overriding the endpoint (optional)
    pub endpoint_var: &'static str,
    /// Endpoint used when no override is set
    pub default_endpoint: &'static str,
    /// Environment variable overriding the model name (optional)
    pub model_var: &'static str,
    /// Model name used when no override is set
    pub default_model: &'static str,
}

const PROFILES: [ProviderProfile; 3] = [
    ProviderProfile {
        kind: ProviderKind::SiliconFlow,
        credential_var: "SILICONFLOW_API_KEY",
        endpoint_var: "SILICONFLOW_BASE_URL",
        default_endpoint: "https://api.siliconflow.cn",
        model_var: "SILICONFLOW_MODEL",
        default_model: "Pro/deepseek-ai/DeepSeek-V3",
    },
    ProviderProfile {
        kind: ProviderKind::DeepSeek,
        credential_var: "DEEPSEEK_API_KEY",
        endpoint_var: "DEEPSEEK_BASE_URL",
        default_endpoint: "https://api.deepseek.com",
        model_var: "DEEPSEEK_MODEL",
        default_model: "deepseek-chat",
    },
    ProviderProfile {
        kind: ProviderKind::Tencent,
        credential_var: "TENCENT_API_KEY",
        endpoint_var: "TENCENT_BASE_URL",
        default_endpoint: "https://api.hunyuan.cloud.tencent.com/v1",
        model_var: "TENCENT_MODEL",
        default_model: "hunyuan-t1-latest",
    },
];

/// Resolved, ready-to-use bundle of credential, endpoint, and model id
///
/// Handles are immutable; construct a fresh one per process start or agent
/// construction. The model id is fully qualified (`openai/<name>`); use
/// [`ModelHandle::model_name`] for the wire-level name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelHandle {
    provider: ProviderKind,
    api_key: String,
    api_base: String,
    model: String,
}

impl ModelHandle {
    /// Resolve the provider selected by `MODEL_PROVIDER` from the process
    /// environment
    pub fn from_env() -> Result<Self, ModelConfigError> {
        Self::resolve_with(|name| std::env::var(name).ok())
    }

    /// Resolve a specific provider from the process environment
    pub fn for_provider(provider: ProviderKind) -> Result<Self, ModelConfigError> {
        Self::resolve_provider_with(provider, |name| std::env::var(name).ok())
    }

    /// Resolve using an arbitrary environment lookup
    ///
    /// The lookup is consulted for the selector and for the selected
    /// profile's credential/endpoint/model variables. Resolution is a pure
    /// function of the lookup, which keeps it deterministic and testable.
    pub fn resolve_with<F>(lookup: F) -> Result<Self, ModelConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let selector = non_empty(lookup(PROVIDER_VAR))
            .ok_or_else(|| ModelConfigError::UnknownProvider(String::new()))?;
        let provider = ProviderKind::parse(&selector)?;
        Self::resolve_provider_with(provider, lookup)
    }

    /// Resolve a specific provider using an arbitrary environment lookup
    pub fn resolve_provider_with<F>(
        provider: ProviderKind,
        lookup: F,
    ) -> Result<Self, ModelConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let profile = provider.profile();

        let api_key = non_empty(lookup(profile.credential_var)).ok_or(
            ModelConfigError::MissingCredential {
                provider,
                var: profile.credential_var,
            },
        )?;

        let api_base = non_empty(lookup(profile.endpoint_var))
            .unwrap_or_else(|| profile.default_endpoint.to_string());
        let model_name = non_empty(lookup(profile.model_var))
            .unwrap_or_else(|| profile.default_model.to_string());

        Ok(Self {
            provider,
            api_key,
            api_base,
            model: format!("{ROUTE_PREFIX}/{model_name}"),
        })
    }

    /// Provider this handle was resolved for
    pub fn provider(&self) -> ProviderKind {
        self.provider
    }

    /// API credential
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// API endpoint
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Fully-qualified model identifier, e.g. `openai/deepseek-chat`
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Wire-level model name with the routing prefix stripped
    ///
    /// Model names may themselves contain slashes
    /// (`Pro/deepseek-ai/DeepSeek-V3`), so only the leading prefix segment
    /// is removed.
    pub fn model_name(&self) -> &str {
        self.model
            .split_once('/')
            .map_or(self.model.as_str(), |(_, name)| name)
    }
}

/// Trim the value and discard it entirely when blank
///
/// An empty credential or override behaves the same as an unset one.
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
