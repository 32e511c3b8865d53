//! Gemini binding.
//!
//! Google exposes an OpenAI-compatible surface for Gemini, so this binding reuses the
//! chat-completions client and only swaps the host, the credential and the name of
//! the output-token parameter.

use async_trait::async_trait;

use crate::credential::ApiKey;
use crate::error::LLMError;
use crate::http::DynHttpTransport;
use crate::provider::openai_chat::{LEGACY_MAX_TOKENS_FIELD, OpenAiChatClient};
use crate::provider::{LLMProvider, ProviderBinding};
use crate::types::{GenerateOptions, Message};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai/";

#[derive(Debug)]
pub struct GeminiProvider {
    client: OpenAiChatClient,
    model: String,
}

impl ProviderBinding for GeminiProvider {
    const NAME: &'static str = "gemini";
    const API_KEY_ENV: &'static str = "GEMINI_API_KEY";
    const DEFAULT_MODEL: &'static str = "gemini-2.5-flash";

    fn build(
        transport: DynHttpTransport,
        api_key: ApiKey,
        model: String,
        base_url: Option<String>,
    ) -> Self {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let client = OpenAiChatClient::new(Self::NAME, transport, base_url, api_key)
            .with_max_tokens_field(LEGACY_MAX_TOKENS_FIELD);
        Self { client, model }
    }
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    async fn generate_response(
        &self,
        messages: &[Message],
        options: GenerateOptions,
    ) -> Result<String, LLMError> {
        let model = options.model_or(&self.model);
        self.client.complete(messages, model, &options).await
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}
