//! Compose the prompt, pick a specialist and ask it.

pub mod policy;

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use self::policy::{RoutingPolicy, SubstringPolicy};
use crate::errors::{RouteError, RouteResult};
use crate::extract::Extractor;
use crate::models::credential::Credential;
use crate::models::message::Message;
use crate::providers::base::Provider;
use crate::specialists::{Specialist, SpecialistRegistry};

pub const AUTO_MODE: &str = "auto";

/// Automatic routing or an explicitly chosen specialist
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Mode {
    #[default]
    Auto,
    Specialist(String),
}

impl From<&str> for Mode {
    fn from(s: &str) -> Self {
        let s = s.trim();
        if s.eq_ignore_ascii_case(AUTO_MODE) {
            Mode::Auto
        } else {
            Mode::Specialist(s.to_string())
        }
    }
}

impl From<String> for Mode {
    fn from(s: String) -> Self {
        Mode::from(s.as_str())
    }
}

impl FromStr for Mode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Mode::from(s))
    }
}

impl From<Mode> for String {
    fn from(mode: Mode) -> Self {
        mode.to_string()
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Auto => f.write_str(AUTO_MODE),
            Mode::Specialist(name) => f.write_str(name),
        }
    }
}

/// One user interaction. Built per request and dropped with the reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    pub query: String,
    /// Whitespace separated URLs, possibly empty
    pub urls: String,
    pub mode: Mode,
}

impl RouteRequest {
    pub fn new<Q: Into<String>, U: Into<String>>(query: Q, urls: U, mode: Mode) -> Self {
        Self {
            query: query.into(),
            urls: urls.into(),
            mode,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedReply {
    pub specialist: String,
    /// True when the manager picked the specialist
    pub routed: bool,
    pub reply: String,
    /// Raw manager output, only present for automatic routing
    pub classification: Option<String>,
    pub augmented_query: String,
}

impl fmt::Display for RoutedReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.routed {
            write!(f, "**Routed to {} Agent**\n\n{}", self.specialist, self.reply)
        } else {
            write!(f, "**{} Agent Reply**\n\n{}", self.specialist, self.reply)
        }
    }
}

pub struct Router {
    provider: Arc<dyn Provider>,
    registry: Arc<SpecialistRegistry>,
    extractor: Arc<Extractor>,
    policy: Box<dyn RoutingPolicy>,
}

impl Router {
    pub fn new(
        provider: Arc<dyn Provider>,
        registry: Arc<SpecialistRegistry>,
        extractor: Arc<Extractor>,
    ) -> Self {
        Self {
            provider,
            registry,
            extractor,
            policy: Box::new(SubstringPolicy),
        }
    }

    pub fn with_policy(mut self, policy: Box<dyn RoutingPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn registry(&self) -> &SpecialistRegistry {
        &self.registry
    }

    /// Answer `request` with the specialist chosen by its mode.
    ///
    /// Validation happens before any network access. Page fetch failures are
    /// embedded in the prompt; completion failures are returned.
    pub async fn route(
        &self,
        credential: &Credential,
        request: &RouteRequest,
    ) -> RouteResult<RoutedReply> {
        if request.query.trim().is_empty() {
            return Err(RouteError::EmptyQuery);
        }

        let explicit = match &request.mode {
            Mode::Auto => None,
            Mode::Specialist(name) => Some(
                self.registry
                    .get(name)
                    .ok_or_else(|| RouteError::UnknownSpecialist(name.clone()))?,
            ),
        };

        let augmented_query = self.augment(&request.query, &request.urls).await;

        let (specialist, classification) = match explicit {
            Some(specialist) => (specialist, None),
            None => {
                let classification = self
                    .ask(credential, self.registry.manager(), &augmented_query)
                    .await?;
                let specialist = self.choose(&classification);
                (specialist, Some(classification))
            }
        };

        let reply = self.ask(credential, specialist, &augmented_query).await?;

        Ok(RoutedReply {
            specialist: specialist.name.clone(),
            routed: classification.is_some(),
            reply,
            classification,
            augmented_query,
        })
    }

    /// Append the text of every URL, in order, to the query
    pub async fn augment(&self, query: &str, urls: &str) -> String {
        let mut augmented = query.to_string();
        for url in urls.split_whitespace() {
            let text = self.extractor.fetch(url, self.extractor.max_chars()).await;
            augmented.push_str(&format!("\n[From {}]: {}", url, text));
        }
        augmented
    }

    fn choose(&self, classification: &str) -> &Specialist {
        match self.policy.select(classification, &self.registry) {
            Some(specialist) => {
                tracing::info!(specialist = %specialist.name, "routed query");
                specialist
            }
            None => {
                let fallback = self.registry.default_specialist();
                tracing::warn!(
                    classification,
                    fallback = %fallback.name,
                    "classification matched no specialist, using default"
                );
                fallback
            }
        }
    }

    async fn ask(
        &self,
        credential: &Credential,
        specialist: &Specialist,
        query: &str,
    ) -> RouteResult<String> {
        let messages = vec![
            Message::system(specialist.instruction.clone()),
            Message::user(query),
        ];
        tracing::debug!(specialist = %specialist.name, "asking specialist");

        let (text, _usage) = self
            .provider
            .complete(credential, &specialist.config, &messages)
            .await
            .map_err(RouteError::Completion)?;
        Ok(text)
    }
}
