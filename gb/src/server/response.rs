//! JSON error bodies: every failure is `{"error": "<message>"}`.

use axum::Json;
use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::{info, warn};

use crate::planning::DecomposeError;

#[derive(Debug, Serialize)]
pub(crate) struct ErrorBody {
    pub(crate) error: String,
}

pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody { error: message.into() })).into_response()
}

impl IntoResponse for DecomposeError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if self.is_client_error() {
            info!(%status, error = %self, "Rejected goal");
        } else if self.is_auth_error() {
            warn!(%status, error = %self, "Provider rejected the API key");
        } else {
            warn!(%status, error = %self, "Goal breakdown failed");
        }
        error_response(status, self.client_message())
    }
}

/// Malformed form bodies are reported like validation failures
pub(crate) fn form_rejection(rejection: FormRejection) -> Response {
    info!(error = %rejection, "Rejected form body");
    error_response(StatusCode::BAD_REQUEST, rejection.body_text())
}

/// Unreadable multipart bodies get the same treatment
pub(crate) fn multipart_rejection(detail: String) -> Response {
    info!(error = %detail, "Rejected multipart body");
    error_response(StatusCode::BAD_REQUEST, detail)
}
