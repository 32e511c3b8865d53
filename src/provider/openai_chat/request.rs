use serde_json::{Map, Value, json};

use crate::types::{GenerateOptions, Message};

/// Builds a chat-completions request body.
///
/// `max_tokens_field` names the wire parameter that receives
/// [`GenerateOptions::max_output_tokens`]; it differs between OpenAI and Gemini.
pub(crate) fn build_openai_body(
    messages: &[Message],
    model: &str,
    options: &GenerateOptions,
    max_tokens_field: &str,
) -> Value {
    let mut body = Map::new();
    body.insert("model".to_string(), Value::String(model.to_string()));
    body.insert(
        "messages".to_string(),
        Value::Array(messages.iter().map(convert_message).collect()),
    );
    if let Some(temperature) = options.temperature {
        body.insert("temperature".to_string(), Value::from(temperature));
    }
    if let Some(top_p) = options.top_p {
        body.insert("top_p".to_string(), Value::from(top_p));
    }
    if let Some(max_tokens) = options.max_output_tokens {
        body.insert(max_tokens_field.to_string(), Value::from(max_tokens));
    }
    if !options.stop.is_empty() {
        body.insert("stop".to_string(), json!(options.stop));
    }
    for (k, v) in &options.extra {
        body.insert(k.clone(), v.clone());
    }
    Value::Object(body)
}

fn convert_message(message: &Message) -> Value {
    json!({
        "role": message.role.as_str(),
        "content": message.content,
    })
}
