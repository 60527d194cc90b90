use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::Json;
use claimlens_core::{OrchestrationRequest, ResponseEnvelope};

use crate::error::AppError;
use crate::state::AppState;

/// POST /orchestrate: plan and execute one request.
///
/// A missing or unparseable body counts as empty input and is rejected with
/// the same 400 as blank fields.
pub async fn orchestrate(
    State(app): State<AppState>,
    body: Bytes,
) -> Result<Json<ResponseEnvelope>, AppError> {
    let request: OrchestrationRequest = serde_json::from_slice(&body).unwrap_or_default();
    request.validate()?;

    let orchestrator = app.orchestrator.clone();
    let envelope = tokio::task::spawn_blocking(move || orchestrator.run(&request))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(envelope))
}

#[derive(serde::Deserialize)]
pub struct PlanQuery {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub claim_id: String,
}

/// GET /plan: compile a request into its plan without executing it.
pub async fn plan(
    State(app): State<AppState>,
    Query(query): Query<PlanQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let request = OrchestrationRequest::new(query.prompt, query.claim_id);
    request.validate()?;

    let plan = app.orchestrator.plan(&request);
    Ok(Json(serde_json::json!({
        "prompt": request.prompt,
        "claim_id": request.claim_id,
        "actions": plan,
    })))
}
