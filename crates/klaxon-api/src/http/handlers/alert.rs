//! Alert ingestion and listing handlers.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde_json::{json, Value};

use klaxon_core::provider::AlertProvider;
use klaxon_core::repository::AlertRepository;
use klaxon_infra::webhook::verify_ingest_auth;
use klaxon_types::alert::Alert;
use klaxon_types::error::ProviderError;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/alerts/event/{provider} - Ingest a pushed provider payload.
///
/// Verifies the configured ingest token (constant-time bearer comparison),
/// maps the payload through the named provider, and stores the resulting
/// alerts by fingerprint.
pub async fn ingest_alerts(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> Result<ApiResponse<Value>, AppError> {
    let auth_header = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok());
    verify_ingest_auth(state.ingest_token.as_deref(), auth_header)
        .map_err(|err| AppError::Unauthorized(err.to_string()))?;

    if provider != state.prometheus.provider_type() {
        return Err(ProviderError::UnknownProvider(provider).into());
    }

    let alerts = state.prometheus.map_event(&payload)?;
    for alert in &alerts {
        state.alerts.save_alert(alert).await?;
    }

    tracing::info!(provider = %provider, count = alerts.len(), "ingested alerts");

    Ok(ApiResponse::success(json!({
        "provider": provider,
        "ingested": alerts.len(),
    })))
}

/// GET /api/v1/alerts - List stored alerts with enrichments applied.
pub async fn list_alerts(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Alert>>, AppError> {
    let mut alerts = state.alerts.list_alerts().await?;
    for alert in &mut alerts {
        state.enrichment_service.apply(alert).await?;
    }
    Ok(ApiResponse::success(alerts))
}

/// GET /api/v1/alerts/{fingerprint} - Get one alert with enrichments applied.
pub async fn get_alert(
    State(state): State<AppState>,
    Path(fingerprint): Path<String>,
) -> Result<ApiResponse<Alert>, AppError> {
    let mut alert = state
        .alerts
        .get_alert(&fingerprint)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No alert with fingerprint '{fingerprint}'")))?;
    state.enrichment_service.apply(&mut alert).await?;
    Ok(ApiResponse::success(alert))
}
