//! Authentication route handlers.
//!
//! Login derives the progression claims from the household-data service and
//! issues the signed auth cookie; the account identity itself (OAuth
//! providers, password storage) lives outside this service.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};

use reduce_food_waste_core::Email;

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::session::WithSession;
use crate::session::SessionContext;
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Mail address of the authenticated identity.
    pub mail_address: String,
}

/// Session summary returned to the client.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub mail_address: String,
    pub version: u32,
    pub is_created_household_member: bool,
    pub is_activated_household_member: bool,
    pub has_accepted_privacy_policies: bool,
    pub is_validated_household_member: bool,
}

impl From<&SessionContext> for SessionView {
    fn from(context: &SessionContext) -> Self {
        Self {
            mail_address: context.mail_address.to_string(),
            version: context.version,
            is_created_household_member: context.claims.is_created_household_member(),
            is_activated_household_member: context.claims.is_activated_household_member(),
            has_accepted_privacy_policies: context.claims.has_accepted_privacy_policies(),
            is_validated_household_member: context.claims.is_validated_household_member(),
        }
    }
}

/// Authenticate a mail address and issue the auth cookie.
///
/// The claim set is derived fresh from the household-data service on every
/// login, so a member's progression is picked up even if their previous
/// cookie was stale.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    let mail_address = Email::parse(&request.mail_address)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let claims = state.claims().derive_claims(&mail_address).await?;
    let context = SessionContext::new(mail_address, claims);

    set_sentry_user(context.mail_address.as_str());
    tracing::info!(version = context.version, "session issued");

    let view = SessionView::from(&context);
    Ok(WithSession::issue(context, Json(view)))
}

/// Expire the auth cookie.
pub async fn logout() -> impl IntoResponse {
    clear_sentry_user();
    WithSession::clear(StatusCode::NO_CONTENT)
}
