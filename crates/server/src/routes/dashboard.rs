//! Dashboard route handler.

use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;

use crate::error::Result;
use crate::middleware::auth::RequireValidatedMember;
use crate::state::AppState;

/// Display dashboard data for the validated member: their full member
/// record including memberships and households.
pub async fn dashboard(
    State(state): State<AppState>,
    RequireValidatedMember(session): RequireValidatedMember,
) -> Result<impl IntoResponse> {
    let member = state
        .household()
        .household_member_data_get(&session.mail_address)
        .await?;

    let membership_description = member
        .membership
        .as_ref()
        .and_then(crate::models::MembershipModel::description_display);

    Ok(Json(json!({
        "household_member": member,
        "membership_description": membership_description,
    })))
}
