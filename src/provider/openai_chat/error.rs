use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{LLMError, extract_model_identifier, looks_like_token_limit_error};

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<InnerError>,
}

#[derive(Deserialize)]
struct InnerError {
    message: Option<String>,
    code: Option<Value>,
    /// Gemini reports e.g. `INVALID_ARGUMENT` here.
    status: Option<String>,
}

/// Maps a non-2xx chat-completions response onto [`LLMError`].
///
/// OpenAI answers with `{"error": {...}}`; Gemini's compatibility endpoint sometimes
/// wraps the same object in a one-element array.
pub(crate) fn parse_openai_error(
    provider: &'static str,
    status: u16,
    body: &str,
    retry_after: Option<Duration>,
) -> LLMError {
    let Some(error) = inner_error(body) else {
        return LLMError::Provider {
            provider,
            message: format!("status {status}: {body}"),
        };
    };

    let mut message = error.message.unwrap_or_else(|| "unknown error".to_string());
    let code = match error.code {
        Some(Value::String(code)) => Some(code),
        Some(Value::Null) | None => error.status,
        Some(other) => error.status.or_else(|| Some(other.to_string())),
    };
    if let Some(code) = &code {
        message = format!("{message} ({code})");
    }
    let code_hint = code.as_deref();

    if looks_like_token_limit_error(code_hint, &message) {
        return LLMError::TokenLimitExceeded { message };
    }
    if status == 404 || matches!(code_hint, Some("model_not_found")) {
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
        400 | 422 => LLMError::Validation { message },
        _ => LLMError::Provider { provider, message },
    }
}

/// Gemini may wrap the error object in an array; unwrap it before deserializing.
fn inner_error(body: &str) -> Option<InnerError> {
    let value = match serde_json::from_str::<Value>(body).ok()? {
        Value::Array(items) => items
            .into_iter()
            .find(|item| item.get("error").is_some())?,
        other => other,
    };
    serde_json::from_value::<ErrorBody>(value).ok()?.error
}
