use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::configs::GenerationConfig;
use crate::models::credential::Credential;
use crate::models::message::Message;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: Option<i32>,
    pub output_tokens: Option<i32>,
    pub total_tokens: Option<i32>,
}

impl Usage {
    pub fn new(
        input_tokens: Option<i32>,
        output_tokens: Option<i32>,
        total_tokens: Option<i32>,
    ) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens,
        }
    }
}

/// Base trait for chat completion backends
#[async_trait]
pub trait Provider: Send + Sync {
    /// Send one completion request and return the trimmed text of the first choice.
    ///
    /// Errors are returned as-is; providers never retry.
    async fn complete(
        &self,
        credential: &Credential,
        config: &GenerationConfig,
        messages: &[Message],
    ) -> Result<(String, Usage)>;
}
