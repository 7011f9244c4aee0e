//! Household management route handlers.
//!
//! All handlers require a validated household member.

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Deserialize;

use reduce_food_waste_core::{Email, HouseholdId};

use crate::error::{AppError, Result};
use crate::middleware::auth::RequireValidatedMember;
use crate::state::AppState;

/// Display manage page data for one household.
pub async fn manage(
    State(state): State<AppState>,
    RequireValidatedMember(session): RequireValidatedMember,
    Path(id): Path<HouseholdId>,
) -> Result<impl IntoResponse> {
    let household = state
        .household()
        .household_data_get(&session.mail_address, id)
        .await?;
    Ok(Json(household))
}

/// Create-household request body.
#[derive(Debug, Deserialize)]
pub struct CreateHouseholdRequest {
    pub name: String,
    pub description: Option<String>,
}

/// Create a household owned by the caller.
pub async fn create(
    State(state): State<AppState>,
    RequireValidatedMember(session): RequireValidatedMember,
    Json(request): Json<CreateHouseholdRequest>,
) -> Result<impl IntoResponse> {
    let household = state
        .household()
        .household_add(&session.mail_address, request.name, request.description)
        .await?;
    Ok(Json(household))
}

/// Update a household's name and description.
pub async fn update(
    State(state): State<AppState>,
    RequireValidatedMember(session): RequireValidatedMember,
    Path(id): Path<HouseholdId>,
    Json(request): Json<CreateHouseholdRequest>,
) -> Result<impl IntoResponse> {
    let household = state
        .household()
        .household_update(&session.mail_address, id, request.name, request.description)
        .await?;
    Ok(Json(household))
}

/// Add-member request body.
#[derive(Debug, Deserialize)]
pub struct AddMemberRequest {
    pub mail_address: String,
}

/// Add a member to a household by mail address.
pub async fn add_member(
    State(state): State<AppState>,
    RequireValidatedMember(session): RequireValidatedMember,
    Path(id): Path<HouseholdId>,
    Json(request): Json<AddMemberRequest>,
) -> Result<impl IntoResponse> {
    let new_member = Email::parse(&request.mail_address)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let household = state
        .household()
        .household_add_household_member(&session.mail_address, id, &new_member)
        .await?;
    Ok(Json(household))
}

/// Remove-member request body.
#[derive(Debug, Deserialize)]
pub struct RemoveMemberRequest {
    pub mail_address: String,
}

/// Remove a member from a household.
///
/// The membership is looked up in the household's current member list; its
/// `removable` flag decides whether the removal command may be built at all
/// (a member can never remove themselves).
pub async fn remove_member(
    State(state): State<AppState>,
    RequireValidatedMember(session): RequireValidatedMember,
    Path(id): Path<HouseholdId>,
    Json(request): Json<RemoveMemberRequest>,
) -> Result<impl IntoResponse> {
    let member_mail = Email::parse(&request.mail_address)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let household = state
        .household()
        .household_data_get(&session.mail_address, id)
        .await?;

    let member = household
        .household_members
        .unwrap_or_default()
        .into_iter()
        .find(|m| m.mail_address == member_mail)
        .ok_or_else(|| {
            AppError::NotFound(format!("{member_mail} is not a member of this household"))
        })?;

    let updated = state
        .household()
        .household_remove_household_member(&member)
        .await?;
    Ok(Json(updated))
}
