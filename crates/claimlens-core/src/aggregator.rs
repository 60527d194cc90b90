use crate::outcome::StepOutcome;
use serde::{Deserialize, Serialize};

/// What one orchestration run returns to the presentation layer.
///
/// Wire keys follow the chat front-end's contract: `prompt`, `claim_id`,
/// `steps_executed`, `results`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(rename = "prompt")]
    pub request_text: String,
    #[serde(rename = "claim_id")]
    pub entity_id: String,
    #[serde(rename = "steps_executed")]
    pub step_labels: Vec<String>,
    pub results: Vec<StepOutcome>,
}

/// Package executed outcomes; payloads pass through untouched.
pub fn aggregate(request_text: &str, entity_id: &str, outcomes: Vec<StepOutcome>) -> ResponseEnvelope {
    let step_labels = outcomes.iter().map(|o| o.label.clone()).collect();
    ResponseEnvelope {
        request_text: request_text.to_string(),
        entity_id: entity_id.to_string(),
        step_labels,
        results: outcomes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Action;
    use serde_json::json;

    #[test]
    fn labels_follow_results() {
        let outcomes = vec![
            StepOutcome::success(Action::GetClaim, "Claim retrieved", json!({"claim_id": "c"})),
            StepOutcome::failure(Action::GetPolicy, "Policy lookup", "No policy_id found."),
            StepOutcome::success(Action::GetPolicyPremium, "Policy Premium", json!("$0.00")),
        ];
        let env = aggregate("premium", "c", outcomes.clone());

        assert_eq!(env.step_labels.len(), env.results.len());
        assert_eq!(
            env.step_labels,
            vec!["Claim retrieved", "Policy lookup", "Policy Premium"]
        );
        assert_eq!(env.results, outcomes);
    }

    #[test]
    fn envelope_wire_keys() {
        let env = aggregate("banana", "claim_1", vec![StepOutcome::unsupported("nope")]);
        let v = serde_json::to_value(&env).unwrap();

        assert_eq!(v["prompt"], "banana");
        assert_eq!(v["claim_id"], "claim_1");
        assert_eq!(v["steps_executed"], json!(["Unsupported prompt"]));
        assert_eq!(v["results"][0]["data"], "N/A");
    }

    #[test]
    fn empty_outcomes() {
        let env = aggregate("x", "y", Vec::new());
        assert!(env.step_labels.is_empty());
        assert!(env.results.is_empty());
    }
}
