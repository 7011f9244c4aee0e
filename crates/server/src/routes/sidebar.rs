//! Sidebar route handler.

use axum::{Json, extract::State, response::IntoResponse};

use crate::error::Result;
use crate::middleware::auth::RequireValidatedMember;
use crate::state::AppState;

/// Display the sidebar household identification collection: the households
/// the validated member belongs to, as id/name pairs.
pub async fn household_identification_collection(
    State(state): State<AppState>,
    RequireValidatedMember(session): RequireValidatedMember,
) -> Result<impl IntoResponse> {
    let households = state
        .household()
        .household_identification_collection_get(&session.mail_address)
        .await?;
    Ok(Json(households))
}
