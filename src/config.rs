use serde::{Deserialize, Serialize};

/// Construction-time configuration accepted by every binding.
///
/// Every field is optional: the credential falls back to the binding's environment
/// variable, the model to the binding's default, and the base URL to the vendor host.
///
/// # Examples
///
/// ```
/// use tri_llm::config::ProviderConfig;
///
/// let config = ProviderConfig::default().with_model("gpt-4o");
/// assert_eq!(config.model.as_deref(), Some("gpt-4o"));
/// assert!(config.api_key.is_none());
/// ```
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Explicit API key; blank values are treated as absent.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Model identifier used when a call does not override it.
    #[serde(default)]
    pub model: Option<String>,
    /// Alternate host, e.g. a proxy or a local test server.
    #[serde(default)]
    pub base_url: Option<String>,
}

impl ProviderConfig {
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}
