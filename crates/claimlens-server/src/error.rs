use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use claimlens_core::ClaimLensError;

// ---------------------------------------------------------------------------
// AppError: unified error type for HTTP responses
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses. The body is always
/// `{"error": <message>}`.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    /// The caller-facing validation failure.
    pub fn missing_input() -> Self {
        Self(ClaimLensError::MissingInput.into())
    }

    pub fn status(&self) -> StatusCode {
        match self.0.downcast_ref::<ClaimLensError>() {
            Some(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "orchestration failed");
        }
        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
