//! Typed access to the claim/policy resource service.
//!
//! The executor only sees the `ResourceClient` trait. `HttpResourceClient`
//! talks to the real backend over blocking HTTP; `InMemoryResourceClient`
//! serves fixtures and records every request it answers.

use crate::error::{ClaimLensError, Result};
use crate::model::{Claim, Coverage, Document, Endorsement, InjuryIncident, Policy};
use reqwest::blocking::Client;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

// ---------------------------------------------------------------------------
// ResourceClient
// ---------------------------------------------------------------------------

/// One synchronous round-trip per call. Any error is fatal for the run.
pub trait ResourceClient: Send + Sync {
    fn get_claim(&self, claim_id: &str) -> Result<Claim>;
    fn get_policy(&self, policy_id: &str) -> Result<Policy>;
    fn get_coverages(&self, policy_id: &str) -> Result<Vec<Coverage>>;
    fn get_endorsements(&self, policy_id: &str) -> Result<Vec<Endorsement>>;
    fn get_documents(&self, claim_id: &str) -> Result<Vec<Document>>;
    fn get_injuries(&self, claim_id: &str) -> Result<Vec<InjuryIncident>>;
}

// ---------------------------------------------------------------------------
// HttpResourceClient
// ---------------------------------------------------------------------------

/// Blocking HTTP client for the resource service.
///
/// Must be constructed outside of an async runtime; the server builds it
/// before starting tokio and only calls it from `spawn_blocking`.
#[derive(Debug, Clone)]
pub struct HttpResourceClient {
    base_url: Url,
    http: Client,
}

impl HttpResourceClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let parsed =
            Url::parse(base_url).map_err(|_| ClaimLensError::InvalidBaseUrl(base_url.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(ClaimLensError::InvalidBaseUrl(base_url.to_string()));
        }
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ClaimLensError::Transport {
                resource: "http client".to_string(),
                source,
            })?;
        Ok(Self {
            base_url: parsed,
            http,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClaimLensError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn get_json<T: DeserializeOwned>(&self, resource: String, segments: &[&str]) -> Result<T> {
        let url = self.url(segments)?;
        tracing::debug!(%url, "backend request");

        let response = self
            .http
            .get(url)
            .send()
            .map_err(|source| ClaimLensError::Transport {
                resource: resource.clone(),
                source,
            })?;
        let status = response.status();
        let text = response.text().map_err(|source| ClaimLensError::Transport {
            resource: resource.clone(),
            source,
        })?;

        let body: Value = match serde_json::from_str(&text) {
            Ok(v) => v,
            Err(source) if status.is_success() => {
                return Err(ClaimLensError::MalformedPayload { resource, source })
            }
            Err(_) => {
                return Err(ClaimLensError::BackendStatus {
                    resource,
                    status: status.as_u16(),
                })
            }
        };

        if let Some(message) = error_message(&body) {
            return Err(ClaimLensError::BackendError { resource, message });
        }
        if !status.is_success() {
            return Err(ClaimLensError::BackendStatus {
                resource,
                status: status.as_u16(),
            });
        }

        serde_json::from_value(body)
            .map_err(|source| ClaimLensError::MalformedPayload { resource, source })
    }
}

/// The backend signals a missing entity with `{"error": "..."}`. A null
/// `error` field is not an error.
fn error_message(body: &Value) -> Option<String> {
    match body.get("error")? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

impl ResourceClient for HttpResourceClient {
    fn get_claim(&self, claim_id: &str) -> Result<Claim> {
        self.get_json(format!("claim '{claim_id}'"), &["claims", claim_id])
    }

    fn get_policy(&self, policy_id: &str) -> Result<Policy> {
        self.get_json(format!("policy '{policy_id}'"), &["policies", policy_id])
    }

    fn get_coverages(&self, policy_id: &str) -> Result<Vec<Coverage>> {
        self.get_json(
            format!("coverages for policy '{policy_id}'"),
            &["policies", policy_id, "coverages"],
        )
    }

    fn get_endorsements(&self, policy_id: &str) -> Result<Vec<Endorsement>> {
        self.get_json(
            format!("endorsements for policy '{policy_id}'"),
            &["policies", policy_id, "endorsements"],
        )
    }

    fn get_documents(&self, claim_id: &str) -> Result<Vec<Document>> {
        self.get_json(
            format!("documents for claim '{claim_id}'"),
            &["claims", claim_id, "documents"],
        )
    }

    fn get_injuries(&self, claim_id: &str) -> Result<Vec<InjuryIncident>> {
        self.get_json(
            format!("injuries for claim '{claim_id}'"),
            &["claims", claim_id, "injuries"],
        )
    }
}

// ---------------------------------------------------------------------------
// InMemoryResourceClient
// ---------------------------------------------------------------------------

/// Resource data keyed the same way the backend keys its data files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fixtures {
    #[serde(default)]
    pub claims: HashMap<String, Claim>,
    #[serde(default)]
    pub policies: HashMap<String, Policy>,
    /// Keyed by policy id.
    #[serde(default)]
    pub coverages: HashMap<String, Vec<Coverage>>,
    /// Keyed by policy id.
    #[serde(default)]
    pub endorsements: HashMap<String, Vec<Endorsement>>,
    /// Keyed by claim id.
    #[serde(default)]
    pub documents: HashMap<String, Vec<Document>>,
    /// Keyed by claim id.
    #[serde(default)]
    pub injuries: HashMap<String, Vec<InjuryIncident>>,
}

/// Fixture-backed client. Unknown claims and policies fail the same way the
/// backend does; unknown sub-resource lists are empty.
#[derive(Debug, Default)]
pub struct InMemoryResourceClient {
    fixtures: Fixtures,
    requests: Mutex<Vec<String>>,
}

impl InMemoryResourceClient {
    pub fn new(fixtures: Fixtures) -> Self {
        Self {
            fixtures,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Load fixtures from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let fixtures: Fixtures = serde_json::from_str(&data)?;
        Ok(Self::new(fixtures))
    }

    pub fn with_claim(mut self, claim: Claim) -> Self {
        self.fixtures.claims.insert(claim.claim_id.clone(), claim);
        self
    }

    pub fn with_policy(mut self, policy: Policy) -> Self {
        let id = policy.policy_id.clone().unwrap_or_default();
        self.fixtures.policies.insert(id, policy);
        self
    }

    pub fn with_coverages(mut self, policy_id: &str, coverages: Vec<Coverage>) -> Self {
        self.fixtures.coverages.insert(policy_id.to_string(), coverages);
        self
    }

    pub fn with_endorsements(mut self, policy_id: &str, endorsements: Vec<Endorsement>) -> Self {
        self.fixtures
            .endorsements
            .insert(policy_id.to_string(), endorsements);
        self
    }

    pub fn with_documents(mut self, claim_id: &str, documents: Vec<Document>) -> Self {
        self.fixtures.documents.insert(claim_id.to_string(), documents);
        self
    }

    pub fn with_injuries(mut self, claim_id: &str, injuries: Vec<InjuryIncident>) -> Self {
        self.fixtures.injuries.insert(claim_id.to_string(), injuries);
        self
    }

    /// Request paths answered so far, in call order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    fn record(&self, path: String) {
        if let Ok(mut r) = self.requests.lock() {
            r.push(path);
        }
    }
}

impl ResourceClient for InMemoryResourceClient {
    fn get_claim(&self, claim_id: &str) -> Result<Claim> {
        self.record(format!("/claims/{claim_id}"));
        self.fixtures
            .claims
            .get(claim_id)
            .cloned()
            .ok_or_else(|| ClaimLensError::BackendError {
                resource: format!("claim '{claim_id}'"),
                message: "Claim not found".to_string(),
            })
    }

    fn get_policy(&self, policy_id: &str) -> Result<Policy> {
        self.record(format!("/policies/{policy_id}"));
        self.fixtures
            .policies
            .get(policy_id)
            .cloned()
            .ok_or_else(|| ClaimLensError::BackendError {
                resource: format!("policy '{policy_id}'"),
                message: "Policy not found".to_string(),
            })
    }

    fn get_coverages(&self, policy_id: &str) -> Result<Vec<Coverage>> {
        self.record(format!("/policies/{policy_id}/coverages"));
        Ok(self
            .fixtures
            .coverages
            .get(policy_id)
            .cloned()
            .unwrap_or_default())
    }

    fn get_endorsements(&self, policy_id: &str) -> Result<Vec<Endorsement>> {
        self.record(format!("/policies/{policy_id}/endorsements"));
        Ok(self
            .fixtures
            .endorsements
            .get(policy_id)
            .cloned()
            .unwrap_or_default())
    }

    fn get_documents(&self, claim_id: &str) -> Result<Vec<Document>> {
        self.record(format!("/claims/{claim_id}/documents"));
        Ok(self
            .fixtures
            .documents
            .get(claim_id)
            .cloned()
            .unwrap_or_default())
    }

    fn get_injuries(&self, claim_id: &str) -> Result<Vec<InjuryIncident>> {
        self.record(format!("/claims/{claim_id}/injuries"));
        Ok(self
            .fixtures
            .injuries
            .get(claim_id)
            .cloned()
            .unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
