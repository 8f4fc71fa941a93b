//! API error type that maps [`FarelinkError`] variants to HTTP responses.
//!
//! Every failure leaves the gateway as
//! `{"error": {"status": u16, "type": kind, "detail": message}}`.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use farelink_types::FarelinkError;
use serde_json::json;

/// A classified error ready to be rendered.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    kind: &'static str,
    detail: String,
}

impl ApiError {
    /// The path named a provider this gateway does not know.
    pub fn unknown_provider(name: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            kind: "not_found",
            detail: format!("unknown provider: {name}"),
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<FarelinkError> for ApiError {
    fn from(e: FarelinkError) -> Self {
        let status =
            StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::BAD_GATEWAY);
        let kind = e.kind();
        // Provider bodies are forwarded untouched for diagnosis.
        let detail = match e {
            FarelinkError::Provider { body, .. } => body,
            other => other.to_string(),
        };
        Self {
            status,
            kind,
            detail,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        FarelinkError::Validation(rejection.body_text()).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = self.status.as_u16(), kind = self.kind, detail = %self.detail, "request failed");
        } else {
            tracing::warn!(status = self.status.as_u16(), kind = self.kind, "request rejected");
        }
        (
            self.status,
            Json(json!({
                "error": {
                    "status": self.status.as_u16(),
                    "type": self.kind,
                    "detail": self.detail,
                }
            })),
        )
            .into_response()
    }
}
