use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct SpecialistsResponse {
    pub specialists: Vec<String>,
    pub manager: String,
    pub default: String,
}

async fn status() -> &'static str {
    "ok"
}

async fn specialists(State(state): State<AppState>) -> Json<SpecialistsResponse> {
    let registry = state.router.registry();
    Json(SpecialistsResponse {
        specialists: registry.names().into_iter().map(String::from).collect(),
        manager: registry.manager().name.clone(),
        default: registry.default_specialist().name.clone(),
    })
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/status", get(status))
        .route("/specialists", get(specialists))
        .with_state(state)
}
