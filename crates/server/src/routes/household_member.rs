//! Household member onboarding route handlers.
//!
//! The onboarding flow advances the session's claim set step by step; every
//! successful command re-issues the auth cookie through
//! [`WithSession::issue`], which is how progression survives across
//! requests without server-side session state.

use axum::{Json, extract::State, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;

use crate::error::Result;
use crate::middleware::auth::{RequireAuthenticated, RequireCreatedMember};
use crate::middleware::session::WithSession;
use crate::services::ClaimService;
use crate::state::AppState;

/// Display create page data: the privacy policy the prospective member must
/// see before registering.
pub async fn create_page(
    State(state): State<AppState>,
    RequireAuthenticated(session): RequireAuthenticated,
) -> Result<impl IntoResponse> {
    let policy = state.household().privacy_policy_get().await?;
    Ok(Json(json!({
        "mail_address": session.mail_address.as_str(),
        "privacy_policy": policy,
    })))
}

/// Create the household member and append the Created claim.
pub async fn create(
    State(state): State<AppState>,
    RequireAuthenticated(session): RequireAuthenticated,
) -> Result<impl IntoResponse> {
    let member = state
        .household()
        .household_member_create(&session.mail_address)
        .await?;

    let advanced = ClaimService::after_creation(&session);
    tracing::info!(version = advanced.version, "household member created");

    Ok(WithSession::issue(advanced, Json(member)))
}

/// Display prepare page data: the member's current state plus the policy
/// still awaiting acceptance.
pub async fn prepare_page(
    State(state): State<AppState>,
    RequireCreatedMember(session): RequireCreatedMember,
) -> Result<impl IntoResponse> {
    let member = state
        .household()
        .household_member_data_get(&session.mail_address)
        .await?;
    let policy = state.household().privacy_policy_get().await?;

    Ok(Json(json!({
        "household_member": member,
        "privacy_policy": policy,
    })))
}

/// Activation request body.
#[derive(Debug, Deserialize)]
pub struct ActivateRequest {
    /// The activation code mailed to the member.
    pub activation_code: String,
}

/// Redeem the activation code and append the Activated claim (plus
/// Validated when the acceptance claim is already present).
pub async fn activate(
    State(state): State<AppState>,
    RequireCreatedMember(session): RequireCreatedMember,
    Json(request): Json<ActivateRequest>,
) -> Result<impl IntoResponse> {
    let mut member = state
        .household()
        .household_member_data_get(&session.mail_address)
        .await?;
    member.activation_code = Some(request.activation_code);

    let activated = state.household().household_member_activate(&member).await?;

    let advanced = ClaimService::after_activation(&session);
    tracing::info!(version = advanced.version, "household member activated");

    Ok(WithSession::issue(advanced, Json(activated)))
}

/// Accept the current privacy policy and append the acceptance claim (plus
/// Validated when the activation claim is already present).
pub async fn accept_privacy_policy(
    State(state): State<AppState>,
    RequireCreatedMember(session): RequireCreatedMember,
) -> Result<impl IntoResponse> {
    let mut policy = state.household().privacy_policy_get().await?;
    policy.is_accepted = true;

    let member = state
        .household()
        .privacy_policy_accept(&session.mail_address, &policy)
        .await?;

    let advanced = ClaimService::after_acceptance(&session);
    tracing::info!(version = advanced.version, "privacy policy accepted");

    Ok(WithSession::issue(advanced, Json(member)))
}
