use std::time::Duration;

use serde::Deserialize;

use crate::error::{LLMError, extract_model_identifier, looks_like_token_limit_error};

/// Parses error responses returned by the Anthropic Messages API.
///
/// The body looks like `{"type": "error", "error": {"type": "...", "message": "..."}}`;
/// the inner `type` acts as the error code.
pub(crate) fn parse_anthropic_error(
    provider: &'static str,
    status: u16,
    body: &str,
    retry_after: Option<Duration>,
) -> LLMError {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: Option<InnerError>,
    }

    #[derive(Deserialize)]
    struct InnerError {
        message: Option<String>,
        r#type: Option<String>,
    }

    let Some(error) = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error)
    else {
        return LLMError::Provider {
            provider,
            message: format!("status {status}: {body}"),
        };
    };

    let mut message = error.message.unwrap_or_else(|| "unknown error".to_string());
    if let Some(kind) = &error.r#type {
        message = format!("{message} ({kind})");
    }
    let code_hint = error.r#type.as_deref();

    if looks_like_token_limit_error(code_hint, &message) {
        return LLMError::TokenLimitExceeded { message };
    }
    if status == 404 || matches!(code_hint, Some("not_found_error")) {
        return LLMError::ModelNotFound {
            model: extract_model_identifier(&message),
            message,
        };
    }

    match status {
        401 | 403 => LLMError::Auth { message },
        429 => LLMError::RateLimit {
            message,
            retry_after,
        },
        400 | 413 => LLMError::Validation { message },
        _ => LLMError::Provider { provider, message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_auth_and_rate_limit_errors() {
        let body = r#"{
  "type": "error",
  "error": {
    "type": "authentication_error",
    "message": "invalid x-api-key"
  }
}"#;
        match parse_anthropic_error("claude", 401, body, None) {
            LLMError::Auth { message } => {
                assert!(message.contains("invalid x-api-key"));
                assert!(message.contains("authentication_error"));
            }
            other => panic!("expected Auth error, got {other:?}"),
        }

        let body = r#"{"type": "error", "error": {"type": "rate_limit_error", "message": "Number of request tokens has exceeded your per-minute rate limit"}}"#;
        match parse_anthropic_error("claude", 429, body, Some(Duration::from_secs(2))) {
            LLMError::RateLimit {
                message,
                retry_after,
            } => {
                assert!(message.contains("rate_limit_error"));
                assert_eq!(retry_after, Some(Duration::from_secs(2)));
            }
            other => panic!("expected RateLimit error, got {other:?}"),
        }
    }

    #[test]
    fn parse_model_not_found_and_overload() {
        let body = r#"{"type": "error", "error": {"type": "not_found_error", "message": "model: claude-nope"}}"#;
        assert!(matches!(
            parse_anthropic_error("claude", 404, body, None),
            LLMError::ModelNotFound { .. }
        ));

        let body = r#"{"type": "error", "error": {"type": "overloaded_error", "message": "Overloaded"}}"#;
        match parse_anthropic_error("claude", 529, body, None) {
            LLMError::Provider { provider, message } => {
                assert_eq!(provider, "claude");
                assert!(message.contains("Overloaded"));
            }
            other => panic!("expected Provider error, got {other:?}"),
        }
    }

    #[test]
    fn parse_token_limit_and_raw_fallback() {
        let body = r#"{"type": "error", "error": {"type": "invalid_request_error", "message": "prompt is too long: 210000 tokens > 200000 maximum"}}"#;
        assert!(matches!(
            parse_anthropic_error("claude", 400, body, None),
            LLMError::TokenLimitExceeded { .. }
        ));

        match parse_anthropic_error("claude", 500, "not a json", None) {
            LLMError::Provider { message, .. } => {
                assert!(message.contains("status 500"));
                assert!(message.contains("not a json"));
            }
            other => panic!("expected Provider error, got {other:?}"),
        }
    }
}
