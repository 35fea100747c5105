//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use klaxon_types::error::{EnrichmentError, ProviderError, RepositoryError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Enrichment-related errors.
    Enrichment(EnrichmentError),
    /// Provider-related errors.
    Provider(ProviderError),
    /// Repository-related errors.
    Repository(RepositoryError),
    /// Requested entity does not exist.
    NotFound(String),
    /// Authentication failure.
    Unauthorized(String),
    /// Generic internal error.
    Internal(String),
}

impl From<EnrichmentError> for AppError {
    fn from(e: EnrichmentError) -> Self {
        AppError::Enrichment(e)
    }
}

impl From<ProviderError> for AppError {
    fn from(e: ProviderError) -> Self {
        AppError::Provider(e)
    }
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        AppError::Repository(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Enrichment(EnrichmentError::AlertNotFound(fingerprint)) => (
                StatusCode::NOT_FOUND,
                "ALERT_NOT_FOUND",
                format!("No alert with fingerprint '{fingerprint}'"),
            ),
            AppError::Enrichment(EnrichmentError::Empty) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Enrichment payload must not be empty".to_string(),
            ),
            AppError::Enrichment(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "ENRICHMENT_ERROR",
                e.to_string(),
            ),
            AppError::Provider(ProviderError::UnknownProvider(name)) => (
                StatusCode::NOT_FOUND,
                "UNKNOWN_PROVIDER",
                format!("Unknown provider '{name}'"),
            ),
            AppError::Provider(ProviderError::MalformedPayload(msg)) => (
                StatusCode::BAD_REQUEST,
                "MALFORMED_PAYLOAD",
                msg.clone(),
            ),
            AppError::Provider(e) => (
                StatusCode::BAD_GATEWAY,
                "PROVIDER_ERROR",
                e.to_string(),
            ),
            AppError::Repository(RepositoryError::NotFound) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "Entity not found".to_string(),
            ),
            AppError::Repository(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORAGE_ERROR",
                e.to_string(),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
            }
            AppError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg.clone())
            }
        };

        let body = json!({
            "data": null,
            "meta": {
                "request_id": "",
                "timestamp": chrono::Utc::now().to_rfc3339(),
            },
            "errors": [{
                "code": code,
                "message": message,
            }]
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
