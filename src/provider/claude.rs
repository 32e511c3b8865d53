use async_trait::async_trait;

use crate::credential::ApiKey;
use crate::error::LLMError;
use crate::http::DynHttpTransport;
use crate::provider::anthropic_messages::AnthropicMessagesClient;
use crate::provider::{LLMProvider, ProviderBinding};
use crate::types::{GenerateOptions, Message};

pub use crate::provider::anthropic_messages::DEFAULT_MAX_TOKENS;

/// Claude binding over the Anthropic Messages API.
///
/// Every request carries `max_tokens`: the caller's
/// [`GenerateOptions::max_output_tokens`] or [`DEFAULT_MAX_TOKENS`].
#[derive(Debug)]
pub struct ClaudeProvider {
    client: AnthropicMessagesClient,
    model: String,
}

impl ProviderBinding for ClaudeProvider {
    const NAME: &'static str = "claude";
    const API_KEY_ENV: &'static str = "CLAUDE_API_KEY";
    const DEFAULT_MODEL: &'static str = "claude-sonnet-4-5-20250929";

    fn build(
        transport: DynHttpTransport,
        api_key: ApiKey,
        model: String,
        base_url: Option<String>,
    ) -> Self {
        let mut client = AnthropicMessagesClient::new(Self::NAME, transport, api_key);
        if let Some(base_url) = base_url {
            client = client.with_base_url(base_url);
        }
        Self { client, model }
    }
}

#[async_trait]
impl LLMProvider for ClaudeProvider {
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
