mod configuration;
mod error;
mod routes;
mod state;

use anyhow::Result;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use triage::extract::Extractor;
use triage::providers::openai::OpenAiProvider;
use triage::router::Router;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let settings = configuration::Settings::new()?;

    let provider = OpenAiProvider::new(settings.provider_config())?;
    let registry = settings.registry()?;
    let extractor = Extractor::new(settings.extractor_config())?;
    info!(
        specialists = ?registry.names(),
        default = %registry.default_specialist().name,
        "loaded specialists"
    );

    let router = Router::new(Arc::new(provider), Arc::new(registry), Arc::new(extractor));
    let state = state::AppState::new(router);

    // Create router with CORS support
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::configure(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(settings.server.socket_addr()?).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
