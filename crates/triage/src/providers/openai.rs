use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;

use super::base::{Provider, Usage};
use super::configs::{GenerationConfig, OpenAiProviderConfig};
use super::utils::{
    check_openai_context_length_error, completion_payload, openai_response_to_text, openai_usage,
};
use crate::models::credential::Credential;
use crate::models::message::Message;

/// Chat completions client for OpenAI compatible endpoints (Groq, OpenAI, ...)
pub struct OpenAiProvider {
    client: Client,
    config: OpenAiProviderConfig,
}

impl OpenAiProvider {
    pub fn new(config: OpenAiProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(600)) // 10 minutes timeout
            .build()?;

        Ok(Self { client, config })
    }

    async fn post(&self, credential: &Credential, payload: Value) -> Result<Value> {
        let url = format!(
            "{}/v1/chat/completions",
            self.config.host.trim_end_matches('/')
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(credential.expose())
            .json(&payload)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            status if status == StatusCode::TOO_MANY_REQUESTS || status.as_u16() >= 500 => {
                Err(anyhow!("Server error: {}", status))
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(anyhow!("Request failed: {}\n{}", status, body))
            }
        }
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    async fn complete(
        &self,
        credential: &Credential,
        config: &GenerationConfig,
        messages: &[Message],
    ) -> Result<(String, Usage)> {
        let payload = completion_payload(config, messages);
        tracing::debug!(model = %config.model, messages = messages.len(), "sending completion request");

        let response = self.post(credential, payload).await?;

        // Raise specific error if context length is exceeded
        if let Some(error) = response.get("error") {
            if let Some(err) = check_openai_context_length_error(error) {
                return Err(err.into());
            }
            return Err(anyhow!("OpenAI API error: {}", error));
        }

        let text = openai_response_to_text(&response)?;
        let usage = openai_usage(&response);
        tracing::debug!(?usage, "completion received");

        Ok((text, usage))
    }
}
