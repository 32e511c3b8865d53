//! Client for the OpenAI "chat completions" wire protocol.
//!
//! Shared by the OpenAI binding and the Gemini binding, which only differ in host,
//! credential and the name of the max-token parameter.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::credential::ApiKey;
use crate::error::LLMError;
use crate::http::{DynHttpTransport, HttpResponse, post_json_with_headers};
use crate::types::{GenerateOptions, Message};

use super::merge_headers;
use super::retry::retry_after_from_headers;

mod error;
mod request;
mod response;
mod types;

use error::parse_openai_error;
use request::build_openai_body;
use response::extract_text;
use types::OpenAiChatResponse;

/// Request parameter OpenAI expects for the output-token bound.
pub const OPENAI_MAX_TOKENS_FIELD: &str = "max_completion_tokens";
/// Gemini's compatibility layer still uses the legacy parameter name.
pub const LEGACY_MAX_TOKENS_FIELD: &str = "max_tokens";

/// Chat-completions client handle owned by a single binding instance.
pub struct OpenAiChatClient {
    provider: &'static str,
    transport: DynHttpTransport,
    base_url: String,
    api_key: ApiKey,
    max_tokens_field: &'static str,
}

impl OpenAiChatClient {
    /// `base_url` is the API root, e.g. `https://api.openai.com/v1`; the client appends
    /// `/chat/completions`.
    pub fn new(
        provider: &'static str,
        transport: DynHttpTransport,
        base_url: impl Into<String>,
        api_key: ApiKey,
    ) -> Self {
        Self {
            provider,
            transport,
            base_url: base_url.into(),
            api_key,
            max_tokens_field: OPENAI_MAX_TOKENS_FIELD,
        }
    }

    pub fn with_max_tokens_field(mut self, field: &'static str) -> Self {
        self.max_tokens_field = field;
        self
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    fn build_headers(&self, extra: &HashMap<String, String>) -> HashMap<String, String> {
        merge_headers(
            extra,
            [
                ("Authorization", format!("Bearer {}", self.api_key.expose())),
                ("Content-Type", "application/json".to_string()),
                ("Accept", "application/json".to_string()),
            ],
        )
    }

    /// Sends one chat-completions request and returns the primary choice's text.
    pub async fn complete(
        &self,
        messages: &[Message],
        model: &str,
        options: &GenerateOptions,
    ) -> Result<String, LLMError> {
        let body = build_openai_body(messages, model, options, self.max_tokens_field);
        let endpoint = self.endpoint();
        debug!(
            provider = self.provider,
            model,
            endpoint = %endpoint,
            messages = messages.len(),
            "sending chat completion request"
        );
        let response = post_json_with_headers(
            self.transport.as_ref(),
            endpoint,
            self.build_headers(&options.extra_headers),
            &body,
        )
        .await?;
        let text = self.ensure_success(response)?;
        let parsed: OpenAiChatResponse = self.try_parse(&text)?;
        debug!(
            provider = self.provider,
            id = parsed.id.as_deref().unwrap_or_default(),
            model = parsed.model.as_deref().unwrap_or(model),
            finish_reason = parsed
                .choices
                .first()
                .and_then(|choice| choice.finish_reason.as_deref())
                .unwrap_or_default(),
            total_tokens = parsed.usage.as_ref().and_then(|usage| usage.total_tokens),
            prompt_tokens = parsed.usage.as_ref().and_then(|usage| usage.prompt_tokens),
            completion_tokens = parsed.usage.as_ref().and_then(|usage| usage.completion_tokens),
            "chat completion received"
        );
        extract_text(parsed, self.provider)
    }

    fn ensure_success(&self, response: HttpResponse) -> Result<String, LLMError> {
        let status = response.status;
        let retry_after = retry_after_from_headers(&response.headers);
        let success = response.is_success();
        let text = response.into_string()?;
        if success {
            Ok(text)
        } else {
            debug!(provider = self.provider, status, "chat completion failed");
            Err(parse_openai_error(self.provider, status, &text, retry_after))
        }
    }

    fn try_parse<T: DeserializeOwned>(&self, text: &str) -> Result<T, LLMError> {
        serde_json::from_str(text).map_err(|err| LLMError::Provider {
            provider: self.provider,
            message: format!("failed to parse chat completion response: {err}"),
        })
    }
}

impl std::fmt::Debug for OpenAiChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiChatClient")
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key)
            .field("max_tokens_field", &self.max_tokens_field)
            .finish()
    }
}
