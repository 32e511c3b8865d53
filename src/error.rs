use std::time::Duration;

use thiserror::Error;

/// Aggregates every failure mode exposed by the provider layer.
///
/// [`LLMError::Config`] is raised synchronously while building a provider and never
/// involves the network. Every other variant describes a failed API call; those are
/// propagated to the caller as-is, without retry or fallback.
#[derive(Debug, Error)]
pub enum LLMError {
    /// Provider construction failed before any request was issued.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Represents transport-layer or networking failures.
    #[error("transport error: {message}")]
    Transport { message: String },
    /// Reports credentials rejected by the vendor.
    #[error("auth failure: {message}")]
    Auth { message: String },
    /// Indicates that the provider throttled the request.
    #[error("rate limited: {message}")]
    RateLimit {
        /// Raw message returned by the upstream provider.
        message: String,
        /// Optional wait duration suggested by the provider before retrying.
        retry_after: Option<Duration>,
    },
    /// Indicates that the prompt or expected completion exceeds the allowed token budget.
    #[error("token limit exceeded: {message}")]
    TokenLimitExceeded { message: String },
    /// Signals validation failures in the request payload.
    #[error("invalid request: {message}")]
    Validation { message: String },
    /// Indicates that a requested model could not be resolved by the vendor.
    #[error("model not found: {message}")]
    ModelNotFound {
        /// Model identifier extracted from the error payload when available.
        model: Option<String>,
        /// Full error message returned by the provider for debugging.
        message: String,
    },
    /// Wraps provider-defined errors that cannot be normalized, including envelopes
    /// that do not carry any text.
    #[error("provider {provider} error: {message}")]
    Provider {
        /// Binding name, such as `claude`.
        provider: &'static str,
        /// Human-readable error message returned by the provider.
        message: String,
    },
}

/// Configuration failures detected while resolving or constructing a provider.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Neither the explicit argument nor the environment supplied a credential.
    #[error("credential not found for {provider}: pass an api key or set {env_var}")]
    MissingCredential {
        provider: &'static str,
        env_var: &'static str,
    },
    /// The factory was asked for a provider it does not know.
    #[error("unknown provider: {name:?}; choose from {known:?}")]
    UnknownProvider {
        name: String,
        known: &'static [&'static str],
    },
    /// The default HTTP client could not be created.
    #[error("failed to create http client: {reason}")]
    InvalidHttpClient { reason: String },
}

impl LLMError {
    /// Creates an [`LLMError::Transport`] from a textual description.
    ///
    /// # Examples
    ///
    /// ```
    /// use tri_llm::error::LLMError;
    ///
    /// let err = LLMError::transport("dns lookup failed");
    /// assert!(matches!(err, LLMError::Transport { .. }));
    /// ```
    pub fn transport<T: Into<String>>(message: T) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates an [`LLMError::Provider`] with the given binding name and message.
    ///
    /// # Examples
    ///
    /// ```
    /// use tri_llm::error::LLMError;
    ///
    /// let err = LLMError::provider("openai", "bad JSON payload");
    /// assert!(matches!(err, LLMError::Provider { provider: "openai", .. }));
    /// ```
    pub fn provider<T: Into<String>>(provider: &'static str, message: T) -> Self {
        Self::Provider {
            provider,
            message: message.into(),
        }
    }

    /// Returns `true` for failures raised while building a provider.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

/// Returns `true` when an error code or message suggests a context/window overflow.
pub(crate) fn looks_like_token_limit_error(code_hint: Option<&str>, message: &str) -> bool {
    if let Some(code) = code_hint {
        let lower = code.to_ascii_lowercase();
        if matches!(
            lower.as_str(),
            "context_length_exceeded"
                | "max_context_length_exceeded"
                | "prompt_tokens_exceeded"
                | "context_window_exceeded"
        ) {
            return true;
        }
    }

    let lower_message = message.to_ascii_lowercase();
    const HINTS: [&str; 5] = [
        "context length",
        "context window",
        "token limit",
        "maximum context",
        "prompt is too long",
    ];
    HINTS.iter().any(|needle| lower_message.contains(needle))
}

/// Attempts to extract a model identifier from an error message such as
/// ``The model `gpt-5-nano` does not exist`` or `models/gemini-9 is not found`.
pub(crate) fn extract_model_identifier(message: &str) -> Option<String> {
    ['`', '"', '\'']
        .into_iter()
        .filter_map(|delimiter| between_delimiters(message, delimiter))
        .chain(after_models_prefix(message))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

fn after_models_prefix(message: &str) -> Option<&str> {
    const PREFIX: &str = "models/";
    let start = message.find(PREFIX)? + PREFIX.len();
    let rest = &message[start..];
    let end = rest
        .find(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | ')'))
        .unwrap_or(rest.len());
    Some(rest[..end].trim_end_matches(['.', ':']))
}

fn between_delimiters(message: &str, delimiter: char) -> Option<&str> {
    let start = message.find(delimiter)? + delimiter.len_utf8();
    let rest = &message[start..];
    let end = rest.find(delimiter)?;
    Some(&rest[..end])
}
