use anyhow::{anyhow, Result};
use serde_json::{json, Value};

use super::base::Usage;
use super::configs::GenerationConfig;
use crate::models::message::Message;

/// Build the chat completions request body
pub fn completion_payload(config: &GenerationConfig, messages: &[Message]) -> Value {
    json!({
        "model": config.model,
        "messages": messages,
        "temperature": config.temperature,
        "max_tokens": config.max_tokens,
    })
}

/// Pull the first choice's text out of a chat completions response
pub fn openai_response_to_text(response: &Value) -> Result<String> {
    let content = response["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| anyhow!("Response has no message content: {}", response))?;

    Ok(content.trim().to_string())
}

/// Read token usage; endpoints that omit it yield an empty `Usage`
pub fn openai_usage(response: &Value) -> Usage {
    let Some(usage) = response.get("usage") else {
        return Usage::default();
    };

    let read = |key: &str| {
        usage
            .get(key)
            .and_then(|v| v.as_i64())
            .and_then(|v| i32::try_from(v).ok())
    };

    let input_tokens = read("prompt_tokens");
    let output_tokens = read("completion_tokens");
    let total_tokens = read("total_tokens").or_else(|| match (input_tokens, output_tokens) {
        (Some(input), Some(output)) => input.checked_add(output),
        _ => None,
    });

    Usage::new(input_tokens, output_tokens, total_tokens)
}

#[derive(Debug, thiserror::Error)]
#[error("Context length exceeded. Message: {0}")]
pub struct ContextLengthExceededError(String);

pub fn check_openai_context_length_error(error: &Value) -> Option<ContextLengthExceededError> {
    let code = error.get("code")?.as_str()?;
    if code == "context_length_exceeded" || code == "string_above_max_length" {
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("Unknown error")
            .to_string();
        Some(ContextLengthExceededError(message))
    } else {
        None
    }
}
