//! Orchestration entry point: validate, plan, execute, aggregate.

use crate::aggregator::{aggregate, ResponseEnvelope};
use crate::client::ResourceClient;
use crate::error::{ClaimLensError, Result};
use crate::executor::StepExecutor;
use crate::planner::{Plan, Planner};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrchestrationRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub claim_id: String,
}

impl OrchestrationRequest {
    pub fn new(prompt: impl Into<String>, claim_id: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            claim_id: claim_id.into(),
        }
    }

    /// Rejects empty input before any planning happens.
    pub fn validate(&self) -> Result<()> {
        if self.prompt.is_empty() || self.claim_id.is_empty() {
            return Err(ClaimLensError::MissingInput);
        }
        Ok(())
    }
}

/// Shared, read-only across runs. Every call to `run` gets its own context.
#[derive(Clone)]
pub struct Orchestrator {
    client: Arc<dyn ResourceClient>,
    planner: Arc<Planner>,
}

impl Orchestrator {
    pub fn new(client: Arc<dyn ResourceClient>) -> Self {
        Self {
            client,
            planner: Arc::new(Planner::default()),
        }
    }

    pub fn planner(&self) -> &Planner {
        &self.planner
    }

    pub fn plan(&self, request: &OrchestrationRequest) -> Plan {
        self.planner.plan(&request.prompt, &request.claim_id)
    }

    /// Run one request to completion, or fail on the first fatal error.
    ///
    /// Blocks on backend round-trips; async callers must run this on a
    /// blocking thread.
    pub fn run(&self, request: &OrchestrationRequest) -> Result<ResponseEnvelope> {
        run_request(self.client.as_ref(), &self.planner, request)
    }
}

/// One-shot orchestration against `client` with the default rule table.
pub fn orchestrate<C: ResourceClient + ?Sized>(
    client: &C,
    request: &OrchestrationRequest,
) -> Result<ResponseEnvelope> {
    run_request(client, &Planner::default(), request)
}

fn run_request<C: ResourceClient + ?Sized>(
    client: &C,
    planner: &Planner,
    request: &OrchestrationRequest,
) -> Result<ResponseEnvelope> {
    request.validate()?;

    let run_id = Uuid::new_v4();
    let span = tracing::info_span!("orchestrate", %run_id, claim_id = %request.claim_id);
    let _guard = span.enter();

    let plan = planner.plan(&request.prompt, &request.claim_id);
    tracing::info!(steps = plan.len(), unsupported = plan.is_unsupported(), "plan compiled");

    let outcomes = StepExecutor::new(client)
        .execute(&plan, &request.claim_id)
        .inspect_err(|e| tracing::error!(error = %e, "run aborted"))?;

    Ok(aggregate(&request.prompt, &request.claim_id, outcomes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::InMemoryResourceClient;
    use crate::model::{Claim, Policy};

    fn orchestrator() -> Orchestrator {
        let mut claim = Claim::new("claim_1");
        claim.policy_id = Some("policy_1".into());
        let client = InMemoryResourceClient::default()
            .with_claim(claim)
            .with_claim(Claim::new("claim_2"))
            .with_policy(Policy::new("policy_1"));
        Orchestrator::new(Arc::new(client))
    }

    #[test]
    fn empty_input_rejected_before_planning() {
        let o = orchestrator();
        for (prompt, claim_id) in [("", "claim_1"), ("premium", ""), ("", "")] {
            let err = o
                .run(&OrchestrationRequest::new(prompt, claim_id))
                .unwrap_err();
            assert!(matches!(err, ClaimLensError::MissingInput));
        }
    }

    #[test]
    fn whitespace_prompt_plans_unsupported() {
        let env = orchestrator()
            .run(&OrchestrationRequest::new("   ", "claim_1"))
            .unwrap();
        assert_eq!(env.step_labels, vec!["Unsupported prompt"]);
    }

    #[test]
    fn run_produces_envelope() {
        let env = orchestrator()
            .run(&OrchestrationRequest::new(
                "What are the coverages on this claim?",
                "claim_1",
            ))
            .unwrap();

        assert_eq!(env.request_text, "What are the coverages on this claim?");
        assert_eq!(env.entity_id, "claim_1");
        assert_eq!(
            env.step_labels,
            vec!["Claim retrieved", "Policy details fetched", "Policy coverages fetched"]
        );
    }

    #[test]
    fn fatal_error_returns_no_envelope() {
        let result = orchestrator().run(&OrchestrationRequest::new("claim info", "claim_9"));
        assert!(result.is_err());
    }

    #[test]
    fn runs_do_not_share_context() {
        let o = orchestrator();
        let first = o
            .run(&OrchestrationRequest::new("policy info", "claim_1"))
            .unwrap();
        assert_eq!(first.step_labels[1], "Policy details fetched");

        // claim_2 has no policy reference; the policy fetched above must not leak in.
        let second = o
            .run(&OrchestrationRequest::new("coverages", "claim_2"))
            .unwrap();
        assert_eq!(second.step_labels[1], "Policy lookup");
        assert_eq!(second.step_labels[2], "Coverage lookup failed");
    }

    #[test]
    fn one_shot_matches_orchestrator() {
        let mut claim = Claim::new("claim_1");
        claim.policy_id = Some("policy_1".into());
        let client = InMemoryResourceClient::default()
            .with_claim(claim)
            .with_policy(Policy::new("policy_1"));
        let req = OrchestrationRequest::new("policy details", "claim_1");

        let env = orchestrate(&client, &req).unwrap();
        assert_eq!(env.step_labels, vec!["Claim retrieved", "Policy details fetched"]);
    }

    #[test]
    fn entry_points_agree_on_fatal_run() {
        let mut claim = Claim::new("claim_1");
        claim.policy_id = Some("policy_1".into());
        let client = Arc::new(
            InMemoryResourceClient::default()
                .with_claim(claim)
                .with_policy(Policy::new("policy_1")),
        );
        let req = OrchestrationRequest::new("vehicle details", "claim_1");

        let one_shot = orchestrate(client.as_ref(), &req).unwrap_err();
        let shared = Orchestrator::new(client.clone()).run(&req).unwrap_err();

        assert!(matches!(one_shot, ClaimLensError::MissingVehicleDetails(_)));
        assert!(matches!(shared, ClaimLensError::MissingVehicleDetails(_)));
        assert_eq!(one_shot.to_string(), shared.to_string());
        assert_eq!(
            client.requests(),
            vec![
                "/claims/claim_1",
                "/policies/policy_1",
                "/policies/policy_1",
                "/claims/claim_1",
                "/policies/policy_1",
                "/policies/policy_1",
            ]
        );
    }

    #[test]
    fn request_defaults_missing_fields() {
        let req: OrchestrationRequest = serde_json::from_str(r#"{"prompt": "premium"}"#).unwrap();
        assert_eq!(req.claim_id, "");
        assert!(req.validate().is_err());
    }
}
