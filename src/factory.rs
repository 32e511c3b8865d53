//! Builds providers from a vendor name.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ProviderConfig;
use crate::error::{ConfigError, LLMError};
use crate::http::DynHttpTransport;
use crate::http::reqwest::default_dyn_transport;
use crate::provider::claude::ClaudeProvider;
use crate::provider::gemini::GeminiProvider;
use crate::provider::openai::OpenAiProvider;
use crate::provider::{DynProvider, ProviderBinding};

/// Vendors the factory knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAi,
    Claude,
    Gemini,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 3] = [
        ProviderKind::OpenAi,
        ProviderKind::Claude,
        ProviderKind::Gemini,
    ];

    /// Lowercase names accepted by [`FromStr`].
    pub const NAMES: &'static [&'static str] = &[
        OpenAiProvider::NAME,
        ClaudeProvider::NAME,
        GeminiProvider::NAME,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProviderKind::OpenAi => OpenAiProvider::NAME,
            ProviderKind::Claude => ClaudeProvider::NAME,
            ProviderKind::Gemini => GeminiProvider::NAME,
        }
    }

    /// Environment variable holding this vendor's key.
    pub fn api_key_env(self) -> &'static str {
        match self {
            ProviderKind::OpenAi => OpenAiProvider::API_KEY_ENV,
            ProviderKind::Claude => ClaudeProvider::API_KEY_ENV,
            ProviderKind::Gemini => GeminiProvider::API_KEY_ENV,
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            ProviderKind::OpenAi => OpenAiProvider::DEFAULT_MODEL,
            ProviderKind::Claude => ClaudeProvider::DEFAULT_MODEL,
            ProviderKind::Gemini => GeminiProvider::DEFAULT_MODEL,
        }
    }

    /// Builds a new provider of this kind on its own HTTP client.
    pub fn create(self, config: ProviderConfig) -> Result<DynProvider, LLMError> {
        self.connect(config, default_dyn_transport)
    }

    /// Builds a new provider of this kind on the given transport.
    pub fn create_with_transport(
        self,
        config: ProviderConfig,
        transport: DynHttpTransport,
    ) -> Result<DynProvider, LLMError> {
        self.connect(config, move || Ok(transport))
    }

    fn connect<F>(self, config: ProviderConfig, transport: F) -> Result<DynProvider, LLMError>
    where
        F: FnOnce() -> Result<DynHttpTransport, LLMError>,
    {
        let provider: DynProvider = match self {
            ProviderKind::OpenAi => Arc::new(OpenAiProvider::connect(config, transport)?),
            ProviderKind::Claude => Arc::new(ClaudeProvider::connect(config, transport)?),
            ProviderKind::Gemini => Arc::new(GeminiProvider::connect(config, transport)?),
        };
        debug!(
            provider = provider.name(),
            model = provider.model_name(),
            "provider created"
        );
        Ok(provider)
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let folded = name.trim().to_ascii_lowercase();
        ProviderKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == folded)
            .ok_or_else(|| ConfigError::UnknownProvider {
                name: name.to_string(),
                known: ProviderKind::NAMES,
            })
    }
}

/// Creates a provider by vendor name (`openai`, `claude` or `gemini`, any case).
///
/// Every call returns a fresh instance with its own client handle; nothing is cached.
///
/// # Errors
///
/// [`LLMError::Config`] when the name is not recognized or no credential is available.
///
/// # Examples
///
/// ```
/// use tri_llm::LLMProvider;
/// use tri_llm::config::ProviderConfig;
/// use tri_llm::factory::create_provider;
///
/// let provider = create_provider("Claude", ProviderConfig::default().with_api_key("sk-test"))
///     .expect("claude provider");
/// assert_eq!(provider.model_name(), "claude-sonnet-4-5-20250929");
///
/// let Err(err) = create_provider("not-a-real-provider", ProviderConfig::default()) else {
///     panic!("unknown provider must be rejected");
/// };
/// assert!(err.is_config());
/// ```
pub fn create_provider(name: &str, config: ProviderConfig) -> Result<DynProvider, LLMError> {
    name.parse::<ProviderKind>()?.create(config)
}

/// Same as [`create_provider`] but on a caller-supplied transport.
pub fn create_provider_with_transport(
    name: &str,
    config: ProviderConfig,
    transport: DynHttpTransport,
) -> Result<DynProvider, LLMError> {
    name.parse::<ProviderKind>()?.create_with_transport(config, transport)
}
