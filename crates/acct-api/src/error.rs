//! API error handling
//!
//! Every failure a caller can see is one of the `AppError` variants below.
//! Internal details are logged, never serialized.

use crate::auth::policy::PolicyViolation;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// API error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// Human-readable message
    pub message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn invalid_json() -> Self {
        Self::new("Invalid JSON")
    }

    pub fn credential_mismatch() -> Self {
        Self::new("Wrong combination phone number and password")
    }

    pub fn unauthorized() -> Self {
        Self::new("not authorized")
    }

    pub fn conflict() -> Self {
        Self::new("Cannot change phone number")
    }

    pub fn internal_error() -> Self {
        Self::new("Internal error")
    }
}

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Request body is not the expected JSON
    #[error("invalid JSON body: {0}")]
    InvalidJson(String),

    /// Registration input broke a policy rule
    #[error(transparent)]
    Policy(#[from] PolicyViolation),

    /// Login password does not match the stored hash
    #[error("credential mismatch")]
    CredentialMismatch,

    /// Missing, malformed, forged or unresolvable bearer token
    #[error("not authorized")]
    Unauthorized,

    /// Attempt to change an immutable field
    #[error("conflict: {0}")]
    Conflict(String),

    /// Store or crypto primitive failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidJson(_) | AppError::Policy(_) | AppError::CredentialMismatch => {
                StatusCode::BAD_REQUEST
            }
            AppError::Unauthorized => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error = match &self {
            AppError::InvalidJson(detail) => {
                tracing::debug!(%detail, "rejected request body");
                ApiError::invalid_json()
            }
            AppError::Policy(violation) => ApiError::new(violation.to_string()),
            AppError::CredentialMismatch => ApiError::credential_mismatch(),
            AppError::Unauthorized => ApiError::unauthorized(),
            AppError::Conflict(_) => ApiError::conflict(),
            AppError::Internal(detail) => {
                tracing::error!(%detail, "request failed");
                ApiError::internal_error()
            }
        };

        (status, Json(error)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_message(error: AppError) -> (StatusCode, String) {
        let response = error.into_response();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        (status, json["message"].as_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let cases = [
            (
                AppError::InvalidJson("eof".into()),
                StatusCode::BAD_REQUEST,
                "Invalid JSON",
            ),
            (
                AppError::Policy(PolicyViolation::PhoneTooShort),
                StatusCode::BAD_REQUEST,
                "phone number must be at least 10 characters",
            ),
            (
                AppError::CredentialMismatch,
                StatusCode::BAD_REQUEST,
                "Wrong combination phone number and password",
            ),
            (AppError::Unauthorized, StatusCode::FORBIDDEN, "not authorized"),
            (
                AppError::Conflict("phone_number".into()),
                StatusCode::CONFLICT,
                "Cannot change phone number",
            ),
            (
                AppError::Internal("db down".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal error",
            ),
        ];

        for (error, status, message) in cases {
            assert_eq!(body_message(error).await, (status, message.to_string()));
        }
    }

    #[tokio::test]
    async fn test_internal_detail_not_exposed() {
        let (_, message) =
            body_message(AppError::Internal("password_hash=$argon2id$...".into())).await;
        assert!(!message.contains("argon2"));
    }
}
