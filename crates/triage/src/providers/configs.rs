use serde::{Deserialize, Serialize};

pub const GROQ_HOST: &str = "https://api.groq.com/openai";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_TEMPERATURE: f32 = 0.4;
pub const DEFAULT_MAX_TOKENS: i32 = 700;

/// Connection settings for an OpenAI compatible endpoint.
///
/// Deliberately holds no API key: credentials travel with each call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiProviderConfig {
    pub host: String,
}

impl Default for OpenAiProviderConfig {
    fn default() -> Self {
        Self {
            host: GROQ_HOST.to_string(),
        }
    }
}

/// Model and sampling parameters used for one completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: i32,
}

impl GenerationConfig {
    pub fn new<S: Into<String>>(model: S, temperature: f32, max_tokens: i32) -> Self {
        Self {
            model: model.into(),
            temperature,
            max_tokens,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL, DEFAULT_TEMPERATURE, DEFAULT_MAX_TOKENS)
    }
}
