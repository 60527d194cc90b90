use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// A single named unit of orchestration work: a backend fetch or a projection
/// over data fetched earlier in the same run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    GetClaim,
    GetPolicy,
    GetPolicyCoverages,
    GetPolicyEndorsements,
    GetDocuments,
    GetInjuries,
    GetLossDate,
    GetAccidentLocation,
    GetAccidentInjuries,
    GetPolicyEffectiveDate,
    GetPolicyExpirationDate,
    GetPolicyPeriod,
    GetPolicyPremium,
    GetVehicleDetails,
    Unsupported,
}

impl Action {
    pub fn all() -> &'static [Action] {
        &[
            Action::GetClaim,
            Action::GetPolicy,
            Action::GetPolicyCoverages,
            Action::GetPolicyEndorsements,
            Action::GetDocuments,
            Action::GetInjuries,
            Action::GetLossDate,
            Action::GetAccidentLocation,
            Action::GetAccidentInjuries,
            Action::GetPolicyEffectiveDate,
            Action::GetPolicyExpirationDate,
            Action::GetPolicyPeriod,
            Action::GetPolicyPremium,
            Action::GetVehicleDetails,
            Action::Unsupported,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Action::GetClaim => "get_claim",
            Action::GetPolicy => "get_policy",
            Action::GetPolicyCoverages => "get_policy_coverages",
            Action::GetPolicyEndorsements => "get_policy_endorsements",
            Action::GetDocuments => "get_documents",
            Action::GetInjuries => "get_injuries",
            Action::GetLossDate => "get_loss_date",
            Action::GetAccidentLocation => "get_accident_location",
            Action::GetAccidentInjuries => "get_accident_injuries",
            Action::GetPolicyEffectiveDate => "get_policy_effective_date",
            Action::GetPolicyExpirationDate => "get_policy_expiration_date",
            Action::GetPolicyPeriod => "get_policy_period",
            Action::GetPolicyPremium => "get_policy_premium",
            Action::GetVehicleDetails => "get_vehicle_details",
            Action::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
