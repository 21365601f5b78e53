use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::base::{Provider, Usage};
use super::configs::GenerationConfig;
use crate::models::credential::Credential;
use crate::models::message::Message;

/// A request captured by the mock provider
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub credential: String,
    pub config: GenerationConfig,
    pub messages: Vec<Message>,
}

/// A mock provider that returns pre-configured responses for testing
pub struct MockProvider {
    responses: Arc<Mutex<Vec<Result<String, String>>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockProvider {
    /// Create a new mock provider with a sequence of successful responses
    pub fn new<S: Into<String>>(responses: Vec<S>) -> Self {
        Self::with_results(responses.into_iter().map(|r| Ok(r.into())).collect())
    }

    /// Create a new mock provider where some responses are errors
    pub fn with_results(responses: Vec<Result<String, String>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(
        &self,
        credential: &Credential,
        config: &GenerationConfig,
        messages: &[Message],
    ) -> Result<(String, Usage)> {
        self.calls.lock().unwrap().push(RecordedCall {
            credential: credential.expose().to_string(),
            config: config.clone(),
            messages: messages.to_vec(),
        });

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Return empty response if no more pre-configured responses
            return Ok((String::new(), Usage::default()));
        }
        match responses.remove(0) {
            Ok(text) => Ok((text, Usage::default())),
            Err(message) => Err(anyhow!(message)),
        }
    }
}
