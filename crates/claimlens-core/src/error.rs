use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClaimLensError {
    #[error("Missing prompt or claim_id")]
    MissingInput,

    #[error("request to {resource} failed: {source}")]
    Transport {
        resource: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{resource} returned HTTP {status}")]
    BackendStatus { resource: String, status: u16 },

    #[error("{resource}: {message}")]
    BackendError { resource: String, message: String },

    #[error("malformed payload from {resource}: {source}")]
    MalformedPayload {
        resource: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid backend url '{0}'")]
    InvalidBaseUrl(String),

    #[error("vehicle details not found on policy '{0}'")]
    MissingVehicleDetails(String),

    #[error("config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ClaimLensError {
    /// True for errors caused by the caller's input rather than by the run.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ClaimLensError::MissingInput)
    }
}

pub type Result<T> = std::result::Result<T, ClaimLensError>;
