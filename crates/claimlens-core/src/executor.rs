//! Sequential step executor.
//!
//! Runs a plan head to tail against one `RequestContext`. Later steps read
//! what earlier steps fetched, so steps never run out of order or in
//! parallel. Missing dependencies become failure outcomes and the run goes
//! on; client errors and a policy without vehicle details abort the run.

use crate::client::ResourceClient;
use crate::error::{ClaimLensError, Result};
use crate::model::{Claim, Policy};
use crate::outcome::{format_currency, StepOutcome};
use crate::planner::{Plan, UNSUPPORTED_MESSAGE};
use crate::types::Action;
use serde_json::{json, Value};

pub const NO_POLICY_ID: &str = "No policy_id found.";
const NOT_FOUND: &str = "Not found";

// ---------------------------------------------------------------------------
// RequestContext
// ---------------------------------------------------------------------------

/// Scratch state for one run: the most recently fetched claim and policy.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub claim: Option<Claim>,
    pub policy: Option<Policy>,
}

impl RequestContext {
    fn claim_policy_ref(&self) -> Option<&str> {
        self.claim.as_ref().and_then(Claim::policy_ref)
    }

    fn policy_ref(&self) -> Option<&str> {
        self.policy.as_ref().and_then(Policy::policy_ref)
    }
}

// ---------------------------------------------------------------------------
// StepExecutor
// ---------------------------------------------------------------------------

pub struct StepExecutor<'a, C: ResourceClient + ?Sized> {
    client: &'a C,
    context: RequestContext,
}

impl<'a, C: ResourceClient + ?Sized> StepExecutor<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self {
            client,
            context: RequestContext::default(),
        }
    }

    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    /// Execute every action in plan order, one outcome per action.
    pub fn execute(&mut self, plan: &Plan, entity_id: &str) -> Result<Vec<StepOutcome>> {
        let mut outcomes = Vec::with_capacity(plan.len());
        for action in plan.iter() {
            tracing::debug!(%action, entity_id, "executing step");
            let outcome = self.step(action, entity_id)?;
            if let Some(message) = &outcome.message {
                tracing::warn!(%action, label = %outcome.label, reason = %message, "step failed");
            }
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }

    fn step(&mut self, action: Action, entity_id: &str) -> Result<StepOutcome> {
        match action {
            Action::GetClaim => {
                let claim = self.client.get_claim(entity_id)?;
                let data = serde_json::to_value(&claim)?;
                self.context.claim = Some(claim);
                Ok(StepOutcome::success(action, "Claim retrieved", data))
            }

            Action::GetPolicy => {
                let Some(policy_id) = self.context.claim_policy_ref().map(str::to_owned) else {
                    return Ok(StepOutcome::failure(action, "Policy lookup", NO_POLICY_ID));
                };
                let policy = self.client.get_policy(&policy_id)?;
                let data = serde_json::to_value(&policy)?;
                self.context.policy = Some(policy);
                Ok(StepOutcome::success(action, "Policy details fetched", data))
            }

            Action::GetPolicyCoverages => match self.context.policy_ref() {
                Some(policy_id) => {
                    let coverages = self.client.get_coverages(policy_id)?;
                    Ok(StepOutcome::success(
                        action,
                        "Policy coverages fetched",
                        serde_json::to_value(coverages)?,
                    ))
                }
                None => Ok(StepOutcome::failure(
                    action,
                    "Coverage lookup failed",
                    NO_POLICY_ID,
                )),
            },

            Action::GetPolicyEndorsements => match self.context.policy_ref() {
                Some(policy_id) => {
                    let endorsements = self.client.get_endorsements(policy_id)?;
                    Ok(StepOutcome::success(
                        action,
                        "Policy endorsements fetched",
                        serde_json::to_value(endorsements)?,
                    ))
                }
                None => Ok(StepOutcome::failure(
                    action,
                    "Endorsement lookup failed",
                    NO_POLICY_ID,
                )),
            },

            Action::GetDocuments => {
                let documents = self.client.get_documents(entity_id)?;
                Ok(StepOutcome::success(
                    action,
                    "Documents retrieved",
                    serde_json::to_value(documents)?,
                ))
            }

            Action::GetInjuries => {
                let injuries = self.client.get_injuries(entity_id)?;
                Ok(StepOutcome::success(
                    action,
                    "Injuries retrieved",
                    serde_json::to_value(injuries)?,
                ))
            }

            Action::GetLossDate => {
                let loss_date = self
                    .context
                    .claim
                    .as_ref()
                    .and_then(|c| c.loss_date.clone());
                Ok(StepOutcome::success(action, "Loss Date", or_not_found(loss_date)))
            }

            Action::GetAccidentLocation => {
                let location = self
                    .context
                    .claim
                    .as_ref()
                    .and_then(|c| c.accident_details.as_ref())
                    .and_then(|d| d.location.clone())
                    .unwrap_or_else(|| json!({}));
                Ok(StepOutcome::success(action, "Accident Location", location))
            }

            Action::GetAccidentInjuries => {
                let injuries = self
                    .context
                    .claim
                    .as_ref()
                    .and_then(|c| c.accident_details.as_ref())
                    .and_then(|d| d.injuries.clone())
                    .unwrap_or_default();
                Ok(StepOutcome::success(
                    action,
                    "Injury Details",
                    Value::Array(injuries),
                ))
            }

            Action::GetPolicyEffectiveDate => Ok(StepOutcome::success(
                action,
                "Policy Effective Date",
                or_not_found(self.policy_field(|p| p.effective_date.clone())),
            )),

            Action::GetPolicyExpirationDate => Ok(StepOutcome::success(
                action,
                "Policy Expiration Date",
                or_not_found(self.policy_field(|p| p.expiration_date.clone())),
            )),

            Action::GetPolicyPeriod => Ok(StepOutcome::success(
                action,
                "Policy Period",
                json!({
                    "effective_date": or_not_found(self.policy_field(|p| p.effective_date.clone())),
                    "expiration_date": or_not_found(self.policy_field(|p| p.expiration_date.clone())),
                }),
            )),

            Action::GetPolicyPremium => {
                let premium = self.policy_field(|p| p.premium).unwrap_or(0.0);
                Ok(StepOutcome::success(
                    action,
                    "Policy Premium",
                    Value::String(format_currency(premium)),
                ))
            }

            Action::GetVehicleDetails => {
                let Some(policy_id) = self.context.claim_policy_ref().map(str::to_owned) else {
                    return Ok(StepOutcome::failure(
                        action,
                        "Vehicle lookup failed",
                        NO_POLICY_ID,
                    ));
                };
                // Always a fresh fetch; the context copy is not consulted.
                let policy = self.client.get_policy(&policy_id)?;
                let vehicle = policy
                    .vehicle_details
                    .ok_or(ClaimLensError::MissingVehicleDetails(policy_id))?;
                Ok(StepOutcome::success(action, "Vehicle Details", vehicle))
            }

            Action::Unsupported => Ok(StepOutcome::unsupported(UNSUPPORTED_MESSAGE)),
        }
    }

    fn policy_field<T>(&self, f: impl FnOnce(&Policy) -> Option<T>) -> Option<T> {
        self.context.policy.as_ref().and_then(f)
    }
}

fn or_not_found(value: Option<String>) -> Value {
    Value::String(value.unwrap_or_else(|| NOT_FOUND.to_string()))
}

/// Execute `plan` with a fresh context.
pub fn execute<C: ResourceClient + ?Sized>(
    client: &C,
    plan: &Plan,
    entity_id: &str,
) -> Result<Vec<StepOutcome>> {
    StepExecutor::new(client).execute(plan, entity_id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
