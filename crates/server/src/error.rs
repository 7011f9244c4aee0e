//! Unified error handling with Sentry integration.
//!
//! The domain distinguishes three error kinds, mirroring the fault contract
//! of the household-data service:
//!
//! - **Business** - user-facing, safe to render
//! - **Repository** - remote/transport failures, carries the originating
//!   client method for diagnostics
//! - **System** - precondition violations inside conversion or claim logic
//!
//! Authorization failures are a distinct `Unauthorized` signal outside the
//! three kinds; nothing in-process catches it, it maps straight to a 401.
//! All route handlers return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::household::HouseholdDataError;

/// Application-level error type for the web service.
#[derive(Debug, Error)]
pub enum AppError {
    /// Household-data operation failed with a typed domain fault.
    #[error("Household data error: {0}")]
    HouseholdData(#[from] HouseholdDataError),

    /// Request carries no valid authenticated session, or the session lacks
    /// a required progression claim.
    #[error("Unauthorized")]
    Unauthorized,

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server-side error kinds to Sentry
        if matches!(
            self,
            Self::Internal(_)
                | Self::HouseholdData(
                    HouseholdDataError::Repository { .. } | HouseholdDataError::System(_)
                )
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::HouseholdData(err) => match err {
                HouseholdDataError::Business(_) => StatusCode::BAD_REQUEST,
                HouseholdDataError::Repository { .. } => StatusCode::BAD_GATEWAY,
                HouseholdDataError::System(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Business messages are user-facing; everything else is hidden
        let message = match &self {
            Self::HouseholdData(err) => match err {
                HouseholdDataError::Business(msg) => msg.clone(),
                HouseholdDataError::Repository { .. } => "External service error".to_string(),
                HouseholdDataError::System(_) => "Internal server error".to_string(),
            },
            Self::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from a mail address.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(mail_address: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            email: Some(mail_address.to_string()),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("household-123".to_string());
        assert_eq!(err.to_string(), "Not found: household-123");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(get_status(AppError::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_domain_fault_status_codes() {
        assert_eq!(
            get_status(AppError::HouseholdData(HouseholdDataError::Business(
                "no such member".to_string()
            ))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::HouseholdData(HouseholdDataError::Repository {
                method: "household_member_is_created",
                message: "connection refused".to_string(),
            })),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            get_status(AppError::HouseholdData(HouseholdDataError::System(
                "activation code missing".to_string()
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
