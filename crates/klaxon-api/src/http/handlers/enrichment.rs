//! Alert enrichment handler.

use std::collections::HashMap;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for POST /api/v1/alerts/enrich.
#[derive(Debug, Deserialize)]
pub struct EnrichRequest {
    /// Fingerprint of the alert to enrich.
    pub fingerprint: String,
    /// Fields to overlay (e.g. `{"note": "restarted the pod"}`).
    pub enrichments: HashMap<String, Value>,
}

/// POST /api/v1/alerts/enrich - Attach enrichments to a stored alert.
///
/// 404 when the fingerprint is unknown, 400 on an empty payload.
pub async fn enrich_alert(
    State(state): State<AppState>,
    Json(request): Json<EnrichRequest>,
) -> Result<ApiResponse<Value>, AppError> {
    state
        .enrichment_service
        .enrich(&request.fingerprint, request.enrichments)
        .await?;

    Ok(ApiResponse::success(json!({
        "fingerprint": request.fingerprint,
        "status": "enriched",
    })))
}
