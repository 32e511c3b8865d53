//! Client for the Anthropic Messages wire protocol.

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

use error::parse_anthropic_error;
use request::build_anthropic_body;
use response::extract_text;
use types::AnthropicMessageResponse;

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const API_VERSION: &str = "2023-06-01";
/// Output-token bound sent when the caller does not supply one.
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Messages client handle owned by a single binding instance.
pub struct AnthropicMessagesClient {
    provider: &'static str,
    transport: DynHttpTransport,
    base_url: String,
    api_key: ApiKey,
}

impl AnthropicMessagesClient {
    pub fn new(provider: &'static str, transport: DynHttpTransport, api_key: ApiKey) -> Self {
        Self {
            provider,
            transport,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
        }
    }

    /// Custom host, e.g. a proxy or compatibility layer.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn endpoint(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if base.ends_with("/v1") {
            format!("{base}/messages")
        } else {
            format!("{base}/v1/messages")
        }
    }

    fn build_headers(&self, extra: &HashMap<String, String>) -> HashMap<String, String> {
        merge_headers(
            extra,
            [
                ("x-api-key", self.api_key.expose().to_string()),
                ("anthropic-version", API_VERSION.to_string()),
                ("Content-Type", "application/json".to_string()),
                ("Accept", "application/json".to_string()),
            ],
        )
    }

    /// Sends one Messages request and returns the first text block.
    pub async fn complete(
        &self,
        messages: &[Message],
        model: &str,
        options: &GenerateOptions,
    ) -> Result<String, LLMError> {
        let body = build_anthropic_body(messages, model, options, DEFAULT_MAX_TOKENS)?;
        let endpoint = self.endpoint();
        debug!(
            provider = self.provider,
            model,
            endpoint = %endpoint,
            messages = messages.len(),
            max_tokens = options.max_output_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            "sending messages request"
        );
        let response = post_json_with_headers(
            self.transport.as_ref(),
            endpoint,
            self.build_headers(&options.extra_headers),
            &body,
        )
        .await?;
        let text = self.ensure_success(response)?;
        let parsed: AnthropicMessageResponse = self.try_parse(&text)?;
        debug!(
            provider = self.provider,
            id = parsed.id.as_deref().unwrap_or_default(),
            model = parsed.model.as_deref().unwrap_or(model),
            stop_reason = parsed.stop_reason.as_deref().unwrap_or_default(),
            input_tokens = parsed.usage.as_ref().and_then(|usage| usage.input_tokens),
            output_tokens = parsed.usage.as_ref().and_then(|usage| usage.output_tokens),
            "messages response received"
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
            debug!(provider = self.provider, status, "messages request failed");
            Err(parse_anthropic_error(self.provider, status, &text, retry_after))
        }
    }

    fn try_parse<T: DeserializeOwned>(&self, text: &str) -> Result<T, LLMError> {
        serde_json::from_str(text).map_err(|err| LLMError::Provider {
            provider: self.provider,
            message: format!("failed to parse Anthropic response: {err}"),
        })
    }
}

impl std::fmt::Debug for AnthropicMessagesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicMessagesClient")
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key)
            .finish()
    }
}
