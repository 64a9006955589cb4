//! Error types for the booking desk service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::models::ValidationReport;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// The booking draft failed the validation gate; carries the full
    /// section-keyed error map so the desk can highlight every offending
    /// section at once.
    #[error("Booking draft is not ready to submit")]
    DraftInvalid(ValidationReport),

    /// Site-lock fee or estimated pricing in play without a resolvable
    /// approver. A deliberate hard stop, not retryable as-is.
    #[error("{0}")]
    OverrideApproval(String),

    /// Core API call failed; message is the upstream-provided one when
    /// available so the desk can surface it verbatim.
    #[error("Core API error: {0}")]
    Upstream(String),

    /// Core API answered with a shape we don't recognize
    #[error("Failed to decode {endpoint} response: {message}")]
    Decode { endpoint: String, message: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    /// Section-keyed messages, present for draft validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections: Option<BTreeMap<String, String>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message, sections) = match self {
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, "authentication", msg, None)
            }
            AppError::Authorization(msg) => (StatusCode::FORBIDDEN, "authorization", msg, None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "validation", msg, None),
            AppError::DraftInvalid(report) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "draft_invalid",
                "Booking draft is not ready to submit".to_string(),
                Some(report.errors),
            ),
            AppError::OverrideApproval(msg) => {
                (StatusCode::CONFLICT, "override_approval", msg, None)
            }
            AppError::Upstream(msg) => (StatusCode::BAD_GATEWAY, "upstream", msg, None),
            AppError::Decode { endpoint, message } => {
                tracing::error!(endpoint = %endpoint, "Decode error: {}", message);
                (
                    StatusCode::BAD_GATEWAY,
                    "decode",
                    format!("Unexpected response from the core API ({})", endpoint),
                    None,
                )
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            message,
            sections,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
