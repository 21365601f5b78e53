use crate::error::ConfigError;
use config::{Config, Environment};
use serde::Deserialize;
use std::net::{AddrParseError, SocketAddr};
use std::time::Duration;
use triage::extract::{self, ExtractorConfig};
use triage::providers::configs::{self, GenerationConfig, OpenAiProviderConfig};
use triage::specialists::{self, SpecialistRegistry};

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

#[derive(Debug, Deserialize)]
pub struct ProviderSettings {
    pub host: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: i32,
}

#[derive(Debug, Deserialize)]
pub struct RouterSettings {
    pub default_specialist: String,
}

#[derive(Debug, Deserialize)]
pub struct ExtractSettings {
    pub max_chars: usize,
    pub timeout_secs: u64,
}

/// Server configuration. The API key is never part of it: clients send
/// their own with every request.
#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub provider: ProviderSettings,
    pub generation: GenerationSettings,
    pub router: RouterSettings,
    pub extract: ExtractSettings,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load_and_validate()
    }

    fn load_and_validate() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000_i64)?
            .set_default("provider.host", configs::GROQ_HOST)?
            .set_default("generation.model", configs::DEFAULT_MODEL)?
            .set_default("generation.temperature", configs::DEFAULT_TEMPERATURE as f64)?
            .set_default("generation.max_tokens", configs::DEFAULT_MAX_TOKENS as i64)?
            .set_default("router.default_specialist", specialists::DEFAULT_SPECIALIST)?
            .set_default("extract.max_chars", extract::DEFAULT_MAX_CHARS as i64)?
            .set_default("extract.timeout_secs", extract::DEFAULT_TIMEOUT_SECS as i64)?
            // Layer on the environment variables
            .add_source(
                Environment::with_prefix("TRIAGE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    pub fn provider_config(&self) -> OpenAiProviderConfig {
        OpenAiProviderConfig {
            host: self.provider.host.clone(),
        }
    }

    pub fn generation_config(&self) -> GenerationConfig {
        GenerationConfig::new(
            self.generation.model.clone(),
            self.generation.temperature,
            self.generation.max_tokens,
        )
    }

    pub fn extractor_config(&self) -> ExtractorConfig {
        ExtractorConfig {
            timeout: Duration::from_secs(self.extract.timeout_secs),
            max_chars: self.extract.max_chars,
            ..ExtractorConfig::default()
        }
    }

    /// The standard specialists with this configuration's generation settings and fallback
    pub fn registry(&self) -> Result<SpecialistRegistry, ConfigError> {
        let registry = SpecialistRegistry::standard(self.generation_config())
            .with_default(&self.router.default_specialist)?;
        Ok(registry)
    }
}
