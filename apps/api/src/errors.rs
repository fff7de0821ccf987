use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::resumes::DeletionSummary;
use crate::resumes::store::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Delete found nothing to remove in either store.
    #[error("Resume not found")]
    ResumeNotFound(DeletionSummary),

    #[error("Policy denied: {0}")]
    PolicyDenied(String),

    #[error("Store error: {0}")]
    Store(StoreError),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::PolicyDenied(msg) => AppError::PolicyDenied(msg),
            other => AppError::Store(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut details = None;
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::InvalidIdentifier(msg) => {
                (StatusCode::NOT_FOUND, "INVALID_IDENTIFIER", msg.clone())
            }
            AppError::ResumeNotFound(summary) => {
                details = serde_json::to_value(summary).ok();
                (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    summary.message().to_string(),
                )
            }
            AppError::PolicyDenied(msg) => {
                tracing::warn!("Row-level policy denied write: {msg}");
                (
                    StatusCode::FORBIDDEN,
                    "POLICY_DENIED",
                    "Access denied by row-level policy".to_string(),
                )
            }
            AppError::Store(e) => {
                tracing::error!("Store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Upstream(msg) => {
                tracing::error!("Upstream error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "UPSTREAM_ERROR", msg.clone())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(details) = details {
            error["details"] = details;
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

/// Rejects absent or blank request fields with a 400.
pub fn require_field(value: Option<String>, name: &str) -> Result<String, AppError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::Validation(format!("{name} is required")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_denial_is_distinct_from_generic_failure() {
        let denied: AppError = StoreError::PolicyDenied("rls".into()).into();
        let generic: AppError = StoreError::Relational("boom".into()).into();

        assert_eq!(denied.into_response().status(), StatusCode::FORBIDDEN);
        assert_eq!(
            generic.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Validation("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidIdentifier("x".into())
                .into_response()
                .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::ResumeNotFound(DeletionSummary::default())
                .into_response()
                .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Upstream("x".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_require_field() {
        assert_eq!(require_field(Some("u1".into()), "user_id").unwrap(), "u1");
        assert!(require_field(None, "user_id").is_err());
        assert!(require_field(Some("  ".into()), "user_id").is_err());
    }
}
