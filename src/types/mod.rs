//! Conversation and generation-option types shared by every binding.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Chat role string compatible with provider-specific semantics.
///
/// OpenAI-compatible endpoints accept `developer` and `system` inline, while the
/// Claude binding lifts both into the top-level `system` field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(pub String);

impl Role {
    pub fn system() -> Self {
        Self("system".to_string())
    }

    pub fn developer() -> Self {
        Self("developer".to_string())
    }

    pub fn user() -> Self {
        Self("user".to_string())
    }

    pub fn assistant() -> Self {
        Self("assistant".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` for roles that carry instructions rather than a conversational turn.
    pub fn is_instruction(&self) -> bool {
        matches!(self.0.as_str(), "system" | "developer")
    }
}

/// One turn of a conversation.
///
/// # Examples
///
/// ```
/// use tri_llm::types::{Message, Role};
///
/// let msg = Message::user("What is the capital of Gujarat, India?");
/// assert_eq!(msg.role, Role::user());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::system(), content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::user(), content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::assistant(), content)
    }
}

/// Per-call generation options.
///
/// Named fields are normalized across vendors: each binding maps them onto its own wire
/// parameter names (for example `max_output_tokens` becomes `max_completion_tokens` for
/// OpenAI and `max_tokens` for Gemini and Claude). Anything else goes through
/// [`GenerateOptions::extra`], which is copied verbatim into the request body after the
/// named fields, so a key present in both places takes the `extra` value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Overrides the model the provider was constructed with, for this call only.
    pub model: Option<String>,
    /// Sampling temperature.
    pub temperature: Option<f64>,
    /// Nucleus sampling parameter.
    pub top_p: Option<f64>,
    /// Upper bound on generated tokens.
    pub max_output_tokens: Option<u32>,
    /// Stop sequences.
    #[serde(default)]
    pub stop: Vec<String>,
    /// Additional HTTP headers sent with the request. They never replace the
    /// authentication headers.
    #[serde(default)]
    pub extra_headers: HashMap<String, String>,
    /// Raw vendor parameters forwarded without validation.
    #[serde(default)]
    pub extra: Map<String, Value>,
}

impl GenerateOptions {
    /// Model for this call: the override when it is set and not blank, else `default`.
    pub fn model_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.model
            .as_deref()
            .filter(|model| !model.trim().is_empty())
            .unwrap_or(default)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    /// Adds a raw vendor parameter.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use tri_llm::types::GenerateOptions;
    ///
    /// let options = GenerateOptions::default().with_extra("seed", json!(7));
    /// assert_eq!(options.extra["seed"], json!(7));
    /// ```
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(name.into(), value.into());
        self
    }
}
