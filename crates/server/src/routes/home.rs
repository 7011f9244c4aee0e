//! Home page and health route handlers.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::middleware::auth::OptionalSession;
use crate::state::AppState;

/// Display home page data.
///
/// Anonymous visitors get a welcome payload; authenticated members also get
/// their progression state so the client can route them onwards.
pub async fn index(OptionalSession(session): OptionalSession) -> impl IntoResponse {
    session.map_or_else(
        || {
            Json(json!({
                "message": "Welcome to Reduce Food Waste",
                "authenticated": false,
            }))
        },
        |context| {
            Json(json!({
                "message": "Welcome to Reduce Food Waste",
                "authenticated": true,
                "mail_address": context.mail_address.as_str(),
                "is_created_household_member": context.claims.is_created_household_member(),
                "is_validated_household_member": context.claims.is_validated_household_member(),
            }))
        },
    )
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies household-data connectivity before returning OK.
/// Returns 503 Service Unavailable if the remote service is not reachable.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.household().ping().await {
        Ok(()) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
