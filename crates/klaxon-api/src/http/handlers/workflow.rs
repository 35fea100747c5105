//! Workflow listing and relevance handlers.

use axum::extract::{Path, State};

use klaxon_core::repository::AlertRepository;
use klaxon_core::service::workflow::RelevantSet;
use klaxon_types::workflow::Workflow;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/workflows - List registered workflow definitions.
pub async fn list_workflows(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Workflow>>, AppError> {
    let workflows = state.workflow_service.list().await?;
    Ok(ApiResponse::success(workflows))
}

/// GET /api/v1/alerts/{fingerprint}/workflows - Workflows relevant to an
/// alert plus their aggregate execution summary.
///
/// Enrichments are applied before matching so enriched fields participate
/// in trigger filters. `summary` is omitted when the relevant set is empty.
pub async fn relevant_workflows(
    State(state): State<AppState>,
    Path(fingerprint): Path<String>,
) -> Result<ApiResponse<RelevantSet>, AppError> {
    let mut alert = state
        .alerts
        .get_alert(&fingerprint)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No alert with fingerprint '{fingerprint}'")))?;
    state.enrichment_service.apply(&mut alert).await?;

    let set = state.workflow_service.relevant_to(&alert).await?;
    Ok(ApiResponse::success(set))
}
