use async_trait::async_trait;

use crate::credential::ApiKey;
use crate::error::LLMError;
use crate::http::DynHttpTransport;
use crate::provider::openai_chat::OpenAiChatClient;
use crate::provider::{LLMProvider, ProviderBinding};
use crate::types::{GenerateOptions, Message};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI binding over the chat-completions API.
#[derive(Debug)]
pub struct OpenAiProvider {
    client: OpenAiChatClient,
    model: String,
}

impl ProviderBinding for OpenAiProvider {
    const NAME: &'static str = "openai";
    const API_KEY_ENV: &'static str = "OPENAI_API_KEY";
    const DEFAULT_MODEL: &'static str = "gpt-4o-mini";

    fn build(
        transport: DynHttpTransport,
        api_key: ApiKey,
        model: String,
        base_url: Option<String>,
    ) -> Self {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self {
            client: OpenAiChatClient::new(Self::NAME, transport, base_url, api_key),
            model,
        }
    }
}

#[async_trait]
impl LLMProvider for OpenAiProvider {
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
