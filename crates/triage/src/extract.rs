//! Reduce a web page to plain text for prompt augmentation.
//!
//! Extraction never fails: any problem fetching or reading the page is turned
//! into a bracketed placeholder that is embedded in the prompt instead.

use anyhow::Result;
use reqwest::Client;
use scraper::{Html, Node};
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_MAX_CHARS: usize = 2000;

/// Elements whose text is never rendered
const SKIPPED_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    pub user_agent: String,
    pub timeout: Duration,
    pub max_chars: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

pub struct Extractor {
    client: Client,
    max_chars: usize,
}

impl Extractor {
    pub fn new(config: ExtractorConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            max_chars: config.max_chars,
        })
    }

    /// Character budget applied by the router to every fetched page
    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Fetch `url` and return at most `max_chars` characters of its visible text.
    pub async fn fetch(&self, url: &str, max_chars: usize) -> String {
        match self.fetch_text(url).await {
            Ok(text) => truncate_chars(&text, max_chars),
            Err(e) => {
                tracing::warn!(url, error = %e, "failed to extract page text");
                format!("[Error fetching {}: {}]", url, e)
            }
        }
    }

    async fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        tracing::debug!(url, status = %response.status(), "fetched page");

        let html = response.text().await?;
        Ok(html_to_text(&html))
    }
}

/// Visible text of an HTML document with whitespace runs collapsed
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut fragments = Vec::new();
    for node in document.root_element().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| SKIPPED_ELEMENTS.contains(&el.name()))
        });
        if !hidden {
            fragments.push(&**text);
        }
    }

    fragments
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
