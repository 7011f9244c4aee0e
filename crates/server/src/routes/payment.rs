//! Payment route handler.
//!
//! The payment flow is a stub: the original application never shipped it,
//! and callers must receive an explicit "not implemented" rather than a
//! silent success.

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::middleware::auth::RequireValidatedMember;

/// Stubbed payment endpoint. Always answers 501.
pub async fn pay(RequireValidatedMember(_session): RequireValidatedMember) -> impl IntoResponse {
    (
        StatusCode::NOT_IMPLEMENTED,
        Json(json!({ "error": "Payment is not implemented." })),
    )
}
