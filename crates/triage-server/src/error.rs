use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use triage::errors::{CredentialError, RegistryError, RouteError};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid specialist configuration: {0}")]
    Registry(#[from] RegistryError),

    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

/// Errors surfaced to HTTP clients as `{"error": message}`
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Missing API key: send it in the X-Api-Key header or as a bearer token")]
    MissingCredential,

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Route(#[from] RouteError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingCredential | ApiError::Credential(_) => StatusCode::BAD_REQUEST,
            ApiError::Route(RouteError::EmptyQuery) => StatusCode::BAD_REQUEST,
            ApiError::Route(RouteError::UnknownSpecialist(_)) => StatusCode::NOT_FOUND,
            ApiError::Route(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
