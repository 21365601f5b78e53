mod inputs;

use anyhow::{Context, Result};
use bat::PrettyPrinter;
use clap::Parser;
use cliclack::spinner;
use console::style;
use std::sync::Arc;
use std::time::Duration;

use triage::extract::{self, Extractor, ExtractorConfig};
use triage::models::credential::Credential;
use triage::providers::configs::{self, GenerationConfig, OpenAiProviderConfig};
use triage::providers::openai::OpenAiProvider;
use triage::router::{Mode, RouteRequest, Router};
use triage::specialists::{self, SpecialistRegistry};

const API_KEY_ENV: &str = "GROQ_API_KEY";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// API key (can also be set via GROQ_API_KEY environment variable)
    #[arg(long)]
    api_key: Option<String>,

    /// Ask a single question and exit instead of starting a session
    #[arg(short, long)]
    query: Option<String>,

    /// Space separated URLs whose text is appended to the query
    #[arg(short, long, default_value = "")]
    urls: String,

    /// "auto" to let the manager decide, or a specialist name
    #[arg(long, default_value = "auto")]
    mode: Mode,

    /// Base URL of the OpenAI compatible endpoint
    #[arg(long, default_value = configs::GROQ_HOST)]
    host: String,

    /// Model to use
    #[arg(short, long, default_value = configs::DEFAULT_MODEL)]
    model: String,

    #[arg(long, default_value_t = configs::DEFAULT_TEMPERATURE)]
    temperature: f32,

    #[arg(long, default_value_t = configs::DEFAULT_MAX_TOKENS)]
    max_tokens: i32,

    /// Specialist used when the manager's answer names no known topic
    #[arg(long, default_value = specialists::DEFAULT_SPECIALIST)]
    default_specialist: String,

    /// Characters of page text kept per URL
    #[arg(long, default_value_t = extract::DEFAULT_MAX_CHARS)]
    max_chars: usize,

    /// Page fetch timeout in seconds
    #[arg(long, default_value_t = extract::DEFAULT_TIMEOUT_SECS)]
    fetch_timeout: u64,
}

impl Cli {
    fn registry(&self) -> Result<SpecialistRegistry> {
        let config = GenerationConfig::new(self.model.clone(), self.temperature, self.max_tokens);
        Ok(SpecialistRegistry::standard(config).with_default(&self.default_specialist)?)
    }

    fn extractor_config(&self) -> ExtractorConfig {
        ExtractorConfig {
            timeout: Duration::from_secs(self.fetch_timeout),
            max_chars: self.max_chars,
            ..ExtractorConfig::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::WARN)
        .init();

    let registry = Arc::new(cli.registry()?);
    let provider = OpenAiProvider::new(OpenAiProviderConfig {
        host: cli.host.clone(),
    })?;
    let extractor = Extractor::new(cli.extractor_config())?;
    let router = Router::new(Arc::new(provider), registry.clone(), Arc::new(extractor));

    let api_key = match &cli.api_key {
        Some(key) => key.clone(),
        None => inputs::get_env_value_or_secret(API_KEY_ENV, "Enter your API key")?,
    };
    let credential = Credential::new(api_key)
        .with_context(|| format!("Please provide an API key via --api-key or {}", API_KEY_ENV))?;

    if let Some(query) = &cli.query {
        let request = RouteRequest::new(query.clone(), cli.urls.clone(), cli.mode.clone());
        return answer(&router, &credential, &request).await;
    }

    println!(
        "Triage {}",
        style("- type \"exit\" to end the session").dim()
    );
    println!("\n");

    loop {
        let query = inputs::get_query()?;
        if query.trim().eq_ignore_ascii_case("exit") {
            break;
        }
        if query.trim().is_empty() {
            println!("{}", style("Please enter a query first.").yellow());
            continue;
        }

        let urls = inputs::get_urls()?;
        let mode = inputs::select_mode(&registry)?;
        let request = RouteRequest::new(query, urls, mode);

        if let Err(e) = answer(&router, &credential, &request).await {
            println!("{} {:#}", style("Something went wrong:").red(), e);
        }
        println!("\n");
    }
    Ok(())
}

async fn answer(router: &Router, credential: &Credential, request: &RouteRequest) -> Result<()> {
    let spin = spinner();
    spin.start("Thinking...");
    let result = router.route(credential, request).await;
    spin.stop("");

    let reply = result?;
    render(&reply.to_string())
}

fn render(content: &str) -> Result<()> {
    PrettyPrinter::new()
        .input_from_bytes(content.as_bytes())
        .language("markdown")
        .print()
        .map_err(|e| anyhow::anyhow!("Failed to render reply: {}", e))?;
    Ok(())
}
