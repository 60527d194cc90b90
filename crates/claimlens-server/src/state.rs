use claimlens_core::{Orchestrator, ResourceClient};
use std::sync::Arc;

/// Shared application state passed to all route handlers.
///
/// Read-only after startup. Per-run state lives inside each orchestration
/// call, never here.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Orchestrator,
}

impl AppState {
    pub fn new(client: Arc<dyn ResourceClient>) -> Self {
        Self {
            orchestrator: Orchestrator::new(client),
        }
    }
}
