use std::collections::HashMap;
use std::env;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::ProviderConfig;
use crate::credential::{ApiKey, resolve_api_key_with};
use crate::error::LLMError;
use crate::http::DynHttpTransport;
use crate::types::{GenerateOptions, Message};

pub mod anthropic_messages;
pub mod claude;
pub mod gemini;
pub mod openai;
pub mod openai_chat;
mod retry;

/// Turns a conversation into a single text reply.
///
/// Every binding normalizes its vendor envelope to plain text, so callers never see
/// choice arrays or content blocks.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Sends `messages` (in order) to the vendor and returns the primary reply text.
    ///
    /// The model is [`LLMProvider::model_name`] unless `options.model` overrides it.
    /// Exactly one HTTP request is issued; its failures are returned without retry.
    async fn generate_response(
        &self,
        messages: &[Message],
        options: GenerateOptions,
    ) -> Result<String, LLMError>;

    /// Model identifier configured at construction.
    fn model_name(&self) -> &str;

    /// Binding name, such as `openai`.
    fn name(&self) -> &'static str;
}

/// Thread-safe provider handle returned by the factory.
pub type DynProvider = Arc<dyn LLMProvider>;

/// Construction protocol shared by the concrete bindings.
///
/// The credential is resolved before the client is built, so a missing key fails
/// before any HTTP client exists.
pub trait ProviderBinding: LLMProvider + Sized {
    /// Binding name, also used in error messages.
    const NAME: &'static str;
    /// Environment variable consulted when no explicit key is configured.
    const API_KEY_ENV: &'static str;
    /// Model used when the configuration does not name one.
    const DEFAULT_MODEL: &'static str;

    /// Builds the client handle around an already resolved credential.
    fn build(
        transport: DynHttpTransport,
        api_key: ApiKey,
        model: String,
        base_url: Option<String>,
    ) -> Self;

    /// Resolves the credential and model from `config`, then builds on `transport`.
    fn from_config(config: ProviderConfig, transport: DynHttpTransport) -> Result<Self, LLMError> {
        Self::connect(config, move || Ok(transport))
    }

    /// Like [`ProviderBinding::from_config`], but the transport is only created once the
    /// credential has been resolved.
    fn connect<F>(config: ProviderConfig, transport: F) -> Result<Self, LLMError>
    where
        F: FnOnce() -> Result<DynHttpTransport, LLMError>,
    {
        Self::connect_with_env(config, transport, |name| env::var(name).ok())
    }

    /// Same as [`ProviderBinding::connect`] with an injectable environment lookup.
    fn connect_with_env<F, L>(
        config: ProviderConfig,
        transport: F,
        lookup: L,
    ) -> Result<Self, LLMError>
    where
        F: FnOnce() -> Result<DynHttpTransport, LLMError>,
        L: FnOnce(&str) -> Option<String>,
    {
        let api_key = resolve_api_key_with(
            Self::NAME,
            config.api_key.as_deref(),
            Self::API_KEY_ENV,
            lookup,
        )?;
        let model = config
            .model
            .filter(|model| !model.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_MODEL.to_string());
        Ok(Self::build(transport()?, api_key, model, config.base_url))
    }
}

/// Combines caller headers with the client's fixed ones. Fixed headers win, compared
/// case-insensitively, so extra headers can never replace authentication.
pub(crate) fn merge_headers<const N: usize>(
    extra: &HashMap<String, String>,
    fixed: [(&str, String); N],
) -> HashMap<String, String> {
    let mut headers: HashMap<String, String> = extra
        .iter()
        .filter(|(name, _)| !fixed.iter().any(|(f, _)| f.eq_ignore_ascii_case(name)))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();
    headers.extend(fixed.map(|(name, value)| (name.to_string(), value)));
    headers
}
