use crate::types::Action;
use serde::{Serialize, Serializer};
use std::collections::HashSet;

pub const UNSUPPORTED_MESSAGE: &str = "I don't understand that yet.";

// ---------------------------------------------------------------------------
// Rule
// ---------------------------------------------------------------------------

/// Fires when any trigger phrase is a substring of the lowercased request.
pub struct IntentRule {
    pub id: &'static str,
    pub triggers: &'static [&'static str],
    /// Actions added when the rule fires, data dependencies first.
    pub chain: &'static [Action],
}

impl IntentRule {
    pub fn matches(&self, normalized: &str) -> bool {
        self.triggers.iter().any(|t| normalized.contains(t))
    }
}

// ---------------------------------------------------------------------------
// Default rules (evaluation order)
// ---------------------------------------------------------------------------

use Action::*;

static DEFAULT_RULES: &[IntentRule] = &[
    IntentRule {
        id: "claim",
        triggers: &["claim", "claim details", "claim info", "claim detail"],
        chain: &[GetClaim],
    },
    IntentRule {
        id: "policy_details",
        triggers: &["policy details", "policy info"],
        chain: &[GetClaim, GetPolicy],
    },
    IntentRule {
        id: "coverages",
        triggers: &["coverages", "coverage", "policy coverages", "coverage details"],
        chain: &[GetClaim, GetPolicy, GetPolicyCoverages],
    },
    IntentRule {
        id: "endorsements",
        triggers: &["endorsements", "policy endorsements"],
        chain: &[GetClaim, GetPolicy, GetPolicyEndorsements],
    },
    IntentRule {
        id: "injuries",
        triggers: &["injuries"],
        chain: &[GetClaim, GetPolicy, GetAccidentInjuries],
    },
    IntentRule {
        id: "documents",
        triggers: &["documents"],
        chain: &[GetDocuments],
    },
    IntentRule {
        id: "loss_date",
        triggers: &["date of loss", "loss date"],
        chain: &[GetClaim, GetLossDate],
    },
    IntentRule {
        id: "accident_location",
        triggers: &["accident occur", "accident location"],
        chain: &[GetClaim, GetAccidentLocation],
    },
    IntentRule {
        id: "effective_date",
        triggers: &["effective date"],
        chain: &[GetClaim, GetPolicy, GetPolicyEffectiveDate],
    },
    IntentRule {
        id: "expiration_date",
        triggers: &["expiration date", "expiry date"],
        chain: &[GetClaim, GetPolicy, GetPolicyExpirationDate],
    },
    IntentRule {
        id: "policy_period",
        triggers: &["policy period", "policy effective date"],
        chain: &[GetClaim, GetPolicy, GetPolicyPeriod],
    },
    IntentRule {
        id: "premium",
        triggers: &["premium"],
        chain: &[GetClaim, GetPolicy, GetPolicyPremium],
    },
    IntentRule {
        id: "vehicle",
        triggers: &["vehicle", "vehicle details", "vehicle info"],
        chain: &[GetClaim, GetPolicy, GetVehicleDetails],
    },
];

pub fn default_rules() -> &'static [IntentRule] {
    DEFAULT_RULES
}

// ---------------------------------------------------------------------------
// Plan
// ---------------------------------------------------------------------------

/// Ordered, duplicate-free list of actions for one request.
///
/// Backed by a sequence plus a membership index so that the first insertion
/// of an action fixes its position.
#[derive(Debug, Clone, Default)]
pub struct Plan {
    actions: Vec<Action>,
    seen: HashSet<Action>,
}

impl Plan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `action` unless already present. Returns true if it was added.
    pub fn push(&mut self, action: Action) -> bool {
        if self.seen.insert(action) {
            self.actions.push(action);
            true
        } else {
            false
        }
    }

    pub fn extend(&mut self, actions: &[Action]) {
        for action in actions {
            self.push(*action);
        }
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn contains(&self, action: Action) -> bool {
        self.seen.contains(&action)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn is_unsupported(&self) -> bool {
        self.actions == [Action::Unsupported]
    }

    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        self.actions.iter().copied()
    }
}

impl PartialEq for Plan {
    fn eq(&self, other: &Self) -> bool {
        self.actions == other.actions
    }
}

impl Eq for Plan {}

impl Serialize for Plan {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        self.actions.serialize(s)
    }
}

// ---------------------------------------------------------------------------
// Planner
// ---------------------------------------------------------------------------

pub struct Planner {
    rules: &'static [IntentRule],
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

impl Planner {
    pub fn new(rules: &'static [IntentRule]) -> Self {
        Self { rules }
    }

    /// Compile a free-text request into a plan.
    ///
    /// Every rule is evaluated; chains of all firing rules are unioned in
    /// table order. The entity id does not influence which actions are
    /// chosen, only what they are executed against.
    pub fn plan(&self, request_text: &str, _entity_id: &str) -> Plan {
        let normalized = request_text.to_lowercase();
        let mut plan = Plan::new();

        for rule in self.rules {
            if rule.matches(&normalized) {
                tracing::trace!(rule = rule.id, "intent rule fired");
                plan.extend(rule.chain);
            }
        }

        if plan.is_empty() {
            plan.push(Action::Unsupported);
        }
        plan
    }

    /// Every trigger phrase, in rule order. Used for service discovery.
    pub fn trigger_phrases(&self) -> Vec<&'static str> {
        self.rules
            .iter()
            .flat_map(|r| r.triggers.iter().copied())
            .collect()
    }
}

/// Plan with the default rule table.
pub fn plan(request_text: &str, entity_id: &str) -> Plan {
    Planner::default().plan(request_text, entity_id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
