use serde_json::{Map, Value, json};

use crate::error::LLMError;
use crate::types::{GenerateOptions, Message};

/// Builds an Anthropic Messages request body.
///
/// `max_tokens` is mandatory on this wire, so the body always carries either the
/// caller's bound or `default_max_tokens`.
pub(crate) fn build_anthropic_body(
    messages: &[Message],
    model: &str,
    options: &GenerateOptions,
    default_max_tokens: u32,
) -> Result<Value, LLMError> {
    let mut body = Map::new();
    body.insert("model".to_string(), Value::String(model.to_string()));

    // system / developer turns are lifted into the top-level `system` field
    let mut system_texts = Vec::new();
    let mut turns = Vec::new();
    for message in messages {
        if message.role.is_instruction() {
            if !message.content.is_empty() {
                system_texts.push(message.content.as_str());
            }
        } else {
            turns.push(convert_message(message));
        }
    }

    if turns.is_empty() {
        return Err(LLMError::Validation {
            message: "Anthropic Messages request requires at least one user/assistant message"
                .to_string(),
        });
    }
    body.insert("messages".to_string(), Value::Array(turns));
    if !system_texts.is_empty() {
        body.insert(
            "system".to_string(),
            Value::String(system_texts.join("\n\n")),
        );
    }

    let max_tokens = options.max_output_tokens.unwrap_or(default_max_tokens);
    body.insert("max_tokens".to_string(), Value::from(max_tokens));
    if let Some(temperature) = options.temperature {
        body.insert("temperature".to_string(), Value::from(temperature));
    }
    if let Some(top_p) = options.top_p {
        body.insert("top_p".to_string(), Value::from(top_p));
    }
    if !options.stop.is_empty() {
        body.insert("stop_sequences".to_string(), json!(options.stop));
    }

    for (k, v) in &options.extra {
        body.insert(k.clone(), v.clone());
    }
    // an `extra` override must still leave a concrete bound on the wire
    if !body.get("max_tokens").is_some_and(Value::is_u64) {
        body.insert("max_tokens".to_string(), Value::from(max_tokens));
    }

    Ok(Value::Object(body))
}

fn convert_message(message: &Message) -> Value {
    // Anthropic only knows user / assistant; anything else is sent as user
    let role = match message.role.as_str() {
        "assistant" => "assistant",
        _ => "user",
    };
    json!({
        "role": role,
        "content": message.content,
    })
}
