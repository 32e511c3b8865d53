use crate::error::LLMError;

use super::types::AnthropicMessageResponse;

/// Returns the text of the first `text` content block.
pub(crate) fn extract_text(
    resp: AnthropicMessageResponse,
    provider: &'static str,
) -> Result<String, LLMError> {
    resp.content
        .into_iter()
        .find(|block| block.kind == "text")
        .map(|block| block.text.unwrap_or_default())
        .ok_or_else(|| LLMError::provider(provider, "response contained no text content block"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> AnthropicMessageResponse {
        serde_json::from_value(value).expect("envelope should deserialize")
    }

    #[test]
    fn extracts_first_text_block() {
        let resp = parse(json!({
            "id": "msg_01",
            "type": "message",
            "role": "assistant",
            "model": "claude-sonnet-4-5-20250929",
            "content": [
                {"type": "text", "text": "Gandhinagar"},
                {"type": "text", "text": "is the capital."}
            ],
            "stop_reason": "end_turn",
            "stop_sequence": null,
            "usage": {"input_tokens": 20, "output_tokens": 4}
        }));
        assert_eq!(extract_text(resp, "claude").expect("text"), "Gandhinagar");
    }

    #[test]
    fn skips_leading_thinking_block() {
        let resp = parse(json!({
            "model": "claude-sonnet-4-5-20250929",
            "content": [
                {"type": "thinking", "thinking": "Let me recall...", "signature": "sig"},
                {"type": "text", "text": "Gandhinagar"}
            ]
        }));
        assert_eq!(extract_text(resp, "claude").expect("text"), "Gandhinagar");
    }

    #[test]
    fn tool_only_reply_is_provider_error() {
        let resp = parse(json!({
            "model": "claude",
            "content": [
                {"type": "tool_use", "id": "toolu_1", "name": "get_weather", "input": {}}
            ],
            "stop_reason": "tool_use"
        }));
        match extract_text(resp, "claude") {
            Err(LLMError::Provider { provider, message }) => {
                assert_eq!(provider, "claude");
                assert!(message.contains("no text"), "{message}");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
