use crate::error::LLMError;

use super::types::{OpenAiChatResponse, OpenAiMessageContent};

/// Pulls the text of the primary choice out of a chat-completions envelope.
///
/// A `null` content (e.g. a pure refusal or tool call) yields an empty string; an
/// envelope without choices is reported as a provider error.
pub(crate) fn extract_text(
    resp: OpenAiChatResponse,
    provider: &'static str,
) -> Result<String, LLMError> {
    let choice = resp
        .choices
        .into_iter()
        .min_by_key(|choice| choice.index)
        .ok_or_else(|| LLMError::provider(provider, "response contained no choices"))?;
    let Some(message) = choice.message else {
        return Err(LLMError::provider(provider, "primary choice carried no message"));
    };
    let text = match message.content {
        None => String::new(),
        Some(OpenAiMessageContent::Text(text)) => text,
        Some(OpenAiMessageContent::Parts(parts)) => parts
            .into_iter()
            .filter(|part| part.kind == "text")
            .filter_map(|part| part.text)
            .collect(),
    };
    Ok(text)
}
