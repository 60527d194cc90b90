use axum::extract::State;
use axum::Json;
use claimlens_core::Action;

use crate::state::AppState;

pub const SERVICE_NAME: &str = "claimlens-orchestrator";

/// GET /health: liveness probe.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": SERVICE_NAME,
    }))
}

/// GET /: service index: endpoints and the phrases the planner understands.
pub async fn index(State(app): State<AppState>) -> Json<serde_json::Value> {
    let actions: Vec<&str> = Action::all().iter().map(|a| a.as_str()).collect();
    Json(serde_json::json!({
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "orchestrate": "POST /orchestrate",
            "plan": "GET /plan?prompt={prompt}&claim_id={claim_id}",
            "health": "GET /health",
        },
        "trigger_phrases": app.orchestrator.planner().trigger_phrases(),
        "actions": actions,
    }))
}
