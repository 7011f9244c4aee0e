//! Authorization extractors.
//!
//! Capability gates composed as axum extractors: each one is a predicate
//! over the decoded [`SessionContext`]. Because extractors run before the
//! handler body, a rejected request executes no action and renders no
//! result. Missing cookie, undecodable cookie, and absent extension all
//! reject identically with 401.
//!
//! # Example
//!
//! ```rust,ignore
//! async fn dashboard(
//!     RequireValidatedMember(session): RequireValidatedMember,
//! ) -> impl IntoResponse {
//!     format!("Hello, {}!", session.mail_address)
//! }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;
use crate::session::{SessionContext, SessionExtension};

fn session_from_parts(parts: &Parts) -> Option<SessionContext> {
    parts
        .extensions
        .get::<SessionExtension>()
        .and_then(|ext| ext.0.clone())
}

/// Requires an authenticated session.
pub struct RequireAuthenticated(pub SessionContext);

impl<S> FromRequestParts<S> for RequireAuthenticated
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        session_from_parts(parts)
            .map(Self)
            .ok_or(AppError::Unauthorized)
    }
}

/// Requires an authenticated session carrying the CreatedHouseholdMember
/// claim.
pub struct RequireCreatedMember(pub SessionContext);

impl<S> FromRequestParts<S> for RequireCreatedMember
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        session_from_parts(parts)
            .filter(|session| session.claims.is_created_household_member())
            .map(Self)
            .ok_or(AppError::Unauthorized)
    }
}

/// Requires an authenticated session carrying the ValidatedHouseholdMember
/// claim.
pub struct RequireValidatedMember(pub SessionContext);

impl<S> FromRequestParts<S> for RequireValidatedMember
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        session_from_parts(parts)
            .filter(|session| session.claims.is_validated_household_member())
            .map(Self)
            .ok_or(AppError::Unauthorized)
    }
}

/// Optionally gets the current session.
///
/// Unlike the gate extractors, this never rejects.
pub struct OptionalSession(pub Option<SessionContext>);

impl<S> FromRequestParts<S> for OptionalSession
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(session_from_parts(parts)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::Request;
    use reduce_food_waste_core::{Claim, ClaimSet, Email, claim_types};

    fn parts_with(extension: Option<SessionExtension>) -> Parts {
        let mut request = Request::builder().uri("/dashboard").body(()).unwrap();
        if let Some(ext) = extension {
            request.extensions_mut().insert(ext);
        }
        request.into_parts().0
    }

    fn created_only_session() -> SessionContext {
        SessionContext::new(
            Email::parse("member@osdevgrp.local").unwrap(),
            ClaimSet::new().with_claim(Claim::local(claim_types::CREATED_HOUSEHOLD_MEMBER)),
        )
    }

    fn validated_session() -> SessionContext {
        SessionContext::new(
            Email::parse("member@osdevgrp.local").unwrap(),
            ClaimSet::new()
                .with_claim(Claim::local(claim_types::CREATED_HOUSEHOLD_MEMBER))
                .with_claim(Claim::local(claim_types::ACTIVATED_HOUSEHOLD_MEMBER))
                .with_claim(Claim::local(claim_types::PRIVACY_POLICIES_ACCEPTED))
                .with_claim(Claim::local(claim_types::VALIDATED_HOUSEHOLD_MEMBER)),
        )
    }

    #[tokio::test]
    async fn test_missing_extension_and_empty_session_reject_identically() {
        // No middleware ran at all
        let mut no_extension = parts_with(None);
        // Middleware ran but found no cookie
        let mut no_session = parts_with(Some(SessionExtension(None)));

        let a = RequireAuthenticated::from_request_parts(&mut no_extension, &()).await;
        let b = RequireAuthenticated::from_request_parts(&mut no_session, &()).await;

        assert!(matches!(a, Err(AppError::Unauthorized)));
        assert!(matches!(b, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_authenticated_passes_base_gate() {
        let mut parts = parts_with(Some(SessionExtension(Some(created_only_session()))));
        let result = RequireAuthenticated::from_request_parts(&mut parts, &()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_created_only_session_fails_validated_gate() {
        let mut parts = parts_with(Some(SessionExtension(Some(created_only_session()))));
        let result = RequireValidatedMember::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_created_only_session_passes_created_gate() {
        let mut parts = parts_with(Some(SessionExtension(Some(created_only_session()))));
        let result = RequireCreatedMember::from_request_parts(&mut parts, &()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_validated_session_passes_all_gates() {
        let session = validated_session();

        let mut parts = parts_with(Some(SessionExtension(Some(session.clone()))));
        assert!(
            RequireAuthenticated::from_request_parts(&mut parts, &())
                .await
                .is_ok()
        );

        let mut parts = parts_with(Some(SessionExtension(Some(session.clone()))));
        assert!(
            RequireCreatedMember::from_request_parts(&mut parts, &())
                .await
                .is_ok()
        );

        let mut parts = parts_with(Some(SessionExtension(Some(session))));
        assert!(
            RequireValidatedMember::from_request_parts(&mut parts, &())
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_optional_session_never_rejects() {
        let mut parts = parts_with(None);
        let OptionalSession(session) = OptionalSession::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert!(session.is_none());

        let mut parts = parts_with(Some(SessionExtension(Some(created_only_session()))));
        let OptionalSession(session) = OptionalSession::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert!(session.is_some());
    }
}
