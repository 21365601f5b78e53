use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, HeaderMap},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use triage::models::credential::Credential;
use triage::router::{Mode, RouteRequest};

const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Serialize, Deserialize)]
pub struct RouteBody {
    pub query: String,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub urls: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RouteResponse {
    pub specialist: String,
    pub routed: bool,
    pub reply: String,
    pub formatted: String,
}

/// Read the caller's API key from `X-Api-Key`, falling back to a bearer token.
/// Blank header values are ignored and the auth scheme is matched case-insensitively.
fn credential_from_headers(headers: &HeaderMap) -> Result<Credential, ApiError> {
    let key = headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
        .or_else(|| {
            headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().split_once(' '))
                .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
                .map(|(_, token)| token)
                .filter(|token| !token.trim().is_empty())
        })
        .ok_or(ApiError::MissingCredential)?;

    Ok(Credential::new(key)?)
}

async fn handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<RouteBody>,
) -> Result<Json<RouteResponse>, ApiError> {
    let credential = credential_from_headers(&headers)?;
    let request = RouteRequest::new(body.query, body.urls, body.mode);

    tracing::info!(mode = %request.mode, "routing request");
    let reply = state.router.route(&credential, &request).await?;

    Ok(Json(RouteResponse {
        formatted: reply.to_string(),
        specialist: reply.specialist,
        routed: reply.routed,
        reply: reply.reply,
    }))
}

// Configure routes for this module
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/route", post(handler))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{self, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;
    use triage::extract::{Extractor, ExtractorConfig};
    use triage::providers::configs::{GenerationConfig, OpenAiProviderConfig};
    use triage::providers::openai::OpenAiProvider;
    use triage::router::Router as TriageRouter;
    use triage::specialists::SpecialistRegistry;
    use wiremock::matchers::{body_partial_json, header as header_matcher, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn completion(text: &str) -> Value {
        json!({
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": text},
                "finish_reason": "stop"
            }]
        })
    }

    /// Answer any completion whose system prompt is `instruction` with `text`
    async fn mount_reply(server: &MockServer, instruction: &str, text: &str) {
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header_matcher("authorization", "Bearer gsk_test"))
            .and(body_partial_json(json!({
                "messages": [{"role": "system", "content": instruction}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(text)))
            .mount(server)
            .await;
    }

    fn app(server: &MockServer) -> Router {
        let provider = OpenAiProvider::new(OpenAiProviderConfig { host: server.uri() }).unwrap();
        let registry = SpecialistRegistry::standard(GenerationConfig::default());
        let extractor = Extractor::new(ExtractorConfig::default()).unwrap();
        let router = TriageRouter::new(Arc::new(provider), Arc::new(registry), Arc::new(extractor));
        routes(AppState::new(router))
    }

    fn route_request(body: Value, api_key: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .uri("/route")
            .method("POST")
            .header("content-type", "application/json");
        if let Some(key) = api_key {
            builder = builder.header("x-api-key", key);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let body = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_auto_route() {
        let server = MockServer::start().await;
        let registry = SpecialistRegistry::standard(GenerationConfig::default());
        mount_reply(&server, &registry.manager().instruction, "Finance").await;
        mount_reply(&server, "Provide budgeting & saving tips.", "Track every expense.").await;

        let request = route_request(
            json!({"query": "How do I save money each month?", "mode": "auto"}),
            Some("gsk_test"),
        );
        let response = app(&server).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: RouteResponse = serde_json::from_value(read_json(response).await).unwrap();
        assert_eq!(body.specialist, "Finance");
        assert!(body.routed);
        assert_eq!(body.reply, "Track every expense.");
        assert_eq!(
            body.formatted,
            "**Routed to Finance Agent**\n\nTrack every expense."
        );
    }

    #[tokio::test]
    async fn test_explicit_route_with_bearer_token() {
        let server = MockServer::start().await;
        mount_reply(
            &server,
            "Give general wellness and lifestyle advice (no medical diagnosis).",
            "Walk daily.",
        )
        .await;

        let request = Request::builder()
            .uri("/route")
            .method("POST")
            .header("content-type", "application/json")
            .header("authorization", "Bearer gsk_test")
            .body(Body::from(
                json!({"query": "Any tips?", "mode": "Health"}).to_string(),
            ))
            .unwrap();

        let response = app(&server).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: RouteResponse = serde_json::from_value(read_json(response).await).unwrap();
        assert_eq!(body.specialist, "Health");
        assert!(!body.routed);
        assert_eq!(body.formatted, "**Health Agent Reply**\n\nWalk daily.");
    }

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, value.parse().unwrap());
        }
        map
    }

    #[test]
    fn test_blank_api_key_header_falls_back_to_bearer() {
        let map = headers(&[("x-api-key", ""), ("authorization", "Bearer gsk_valid")]);
        let credential = credential_from_headers(&map).unwrap();
        assert_eq!(credential.expose(), "gsk_valid");

        let map = headers(&[("x-api-key", "   "), ("authorization", "Bearer gsk_valid")]);
        assert_eq!(credential_from_headers(&map).unwrap().expose(), "gsk_valid");
    }

    #[test]
    fn test_bearer_scheme_is_case_insensitive() {
        for value in ["bearer gsk_valid", "BEARER gsk_valid", "Bearer gsk_valid"] {
            let mut map = HeaderMap::new();
            map.insert("authorization", value.parse().unwrap());
            assert_eq!(credential_from_headers(&map).unwrap().expose(), "gsk_valid");
        }
    }

    #[test]
    fn test_api_key_header_wins_over_bearer() {
        let map = headers(&[("x-api-key", "gsk_header"), ("authorization", "Bearer gsk_other")]);
        assert_eq!(credential_from_headers(&map).unwrap().expose(), "gsk_header");
    }

    #[test]
    fn test_non_bearer_authorization_is_rejected() {
        for value in ["Basic dXNlcjpwYXNz", "Bearer", "Bearer    "] {
            let mut map = HeaderMap::new();
            map.insert("authorization", value.parse().unwrap());
            assert!(matches!(
                credential_from_headers(&map),
                Err(ApiError::MissingCredential)
            ));
        }
    }

    #[tokio::test]
    async fn test_lowercase_bearer_with_blank_api_key_routes() {
        let server = MockServer::start().await;
        mount_reply(&server, "Give strategy and growth ideas.", "Raise prices.").await;

        let request = Request::builder()
            .uri("/route")
            .method("POST")
            .header("content-type", "application/json")
            .header("x-api-key", "")
            .header("authorization", "bearer gsk_test")
            .body(Body::from(
                json!({"query": "Grow revenue?", "mode": "Business"}).to_string(),
            ))
            .unwrap();

        let response = app(&server).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: RouteResponse = serde_json::from_value(read_json(response).await).unwrap();
        assert_eq!(body.specialist, "Business");
        assert_eq!(body.reply, "Raise prices.");
    }

    #[tokio::test]
    async fn test_missing_credential() {
        let server = MockServer::start().await;

        let request = route_request(json!({"query": "hi"}), None);
        let response = app(&server).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let request = route_request(json!({"query": "hi"}), Some("  "));
        let response = app(&server).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_query() {
        let server = MockServer::start().await;

        let request = route_request(json!({"query": "   "}), Some("gsk_test"));
        let response = app(&server).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(body["error"], "Query must not be empty");
    }

    #[tokio::test]
    async fn test_unknown_specialist() {
        let server = MockServer::start().await;

        let request = route_request(
            json!({"query": "hi", "mode": "Astrology"}),
            Some("gsk_test"),
        );
        let response = app(&server).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = read_json(response).await;
        assert_eq!(body["error"], "Unknown specialist: Astrology");
    }

    #[tokio::test]
    async fn test_upstream_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let request = route_request(json!({"query": "hi"}), Some("gsk_test"));
        let response = app(&server).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = read_json(response).await;
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Completion request failed"));
    }
}
