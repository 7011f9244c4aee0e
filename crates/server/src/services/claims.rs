//! Claims progression engine.
//!
//! Derives the four progression claims from the household-data service and
//! advances a session's claim set as the member moves through onboarding.
//!
//! INVARIANT: ValidatedHouseholdMember is synthesized only when both
//! ActivatedHouseholdMember and PrivacyPoliciesAccepted hold. Every path
//! that appends claims goes through this module, so the invariant holds for
//! every cookie this service ever issues.

use tracing::instrument;

use reduce_food_waste_core::{Claim, ClaimSet, Email, claim_types};

use crate::household::{HouseholdDataClient, HouseholdDataError};
use crate::session::SessionContext;

/// Derives and advances progression claims.
#[derive(Clone)]
pub struct ClaimService {
    client: HouseholdDataClient,
}

impl ClaimService {
    /// Create a service backed by the given client.
    #[must_use]
    pub const fn new(client: HouseholdDataClient) -> Self {
        Self { client }
    }

    /// Derive the full progression claim set for a mail address.
    ///
    /// The created check gates everything: when it answers false no further
    /// checks run and no claims are granted. When it answers true, the
    /// activation and acceptance checks are independent and dispatched
    /// concurrently.
    ///
    /// # Errors
    ///
    /// Domain errors from the remote checks pass through unchanged.
    #[instrument(skip(self))]
    pub async fn derive_claims(
        &self,
        mail_address: &Email,
    ) -> Result<ClaimSet, HouseholdDataError> {
        if !self.client.household_member_is_created(mail_address).await? {
            return Ok(ClaimSet::new());
        }

        let (activated, accepted) = tokio::join!(
            self.client.household_member_is_activated(mail_address),
            self.client
                .household_member_has_accepted_privacy_policy(mail_address),
        );
        let activated = activated?;
        let accepted = accepted?;

        Ok(Self::synthesize(true, activated, accepted))
    }

    /// Build a claim set from the three progression answers.
    fn synthesize(created: bool, activated: bool, accepted: bool) -> ClaimSet {
        if !created {
            return ClaimSet::new();
        }

        let mut claims =
            ClaimSet::new().with_claim(Claim::local(claim_types::CREATED_HOUSEHOLD_MEMBER));
        if activated {
            claims = claims.with_claim(Claim::local(claim_types::ACTIVATED_HOUSEHOLD_MEMBER));
        }
        if accepted {
            claims = claims.with_claim(Claim::local(claim_types::PRIVACY_POLICIES_ACCEPTED));
        }
        if activated && accepted {
            claims = claims.with_claim(Claim::local(claim_types::VALIDATED_HOUSEHOLD_MEMBER));
        }
        claims
    }

    /// Append a claim unless the set already grants it, keeping repeated
    /// commands from growing the cookie.
    fn append_missing(context: &SessionContext, claim_type: &'static str) -> SessionContext {
        if context.claims.has(claim_type) {
            context.clone()
        } else {
            context.with_claim(Claim::local(claim_type))
        }
    }

    /// Advance a session after the member was created.
    #[must_use]
    pub fn after_creation(context: &SessionContext) -> SessionContext {
        Self::append_missing(context, claim_types::CREATED_HOUSEHOLD_MEMBER)
    }

    /// Advance a session after a successful activation. Grants Validated
    /// when the acceptance claim is already present.
    #[must_use]
    pub fn after_activation(context: &SessionContext) -> SessionContext {
        let advanced = Self::append_missing(context, claim_types::ACTIVATED_HOUSEHOLD_MEMBER);
        if advanced.claims.has_accepted_privacy_policies() {
            Self::append_missing(&advanced, claim_types::VALIDATED_HOUSEHOLD_MEMBER)
        } else {
            advanced
        }
    }

    /// Advance a session after a successful privacy-policy acceptance.
    /// Grants Validated when the activation claim is already present.
    #[must_use]
    pub fn after_acceptance(context: &SessionContext) -> SessionContext {
        let advanced = Self::append_missing(context, claim_types::PRIVACY_POLICIES_ACCEPTED);
        if advanced.claims.is_activated_household_member() {
            Self::append_missing(&advanced, claim_types::VALIDATED_HOUSEHOLD_MEMBER)
        } else {
            advanced
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn context_with(claims: ClaimSet) -> SessionContext {
        SessionContext::new(Email::parse("member@osdevgrp.local").unwrap(), claims)
    }

    // Validated must never appear without both of its prerequisites, over
    // every combination of remote answers.
    #[test]
    fn test_synthesize_upholds_validation_invariant() {
        for created in [false, true] {
            for activated in [false, true] {
                for accepted in [false, true] {
                    let claims = ClaimService::synthesize(created, activated, accepted);

                    if claims.is_validated_household_member() {
                        assert!(
                            claims.is_activated_household_member()
                                && claims.has_accepted_privacy_policies(),
                            "Validated granted without prerequisites \
                             (created={created}, activated={activated}, accepted={accepted})"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_synthesize_not_created_short_circuits() {
        let claims = ClaimService::synthesize(false, true, true);
        assert!(claims.is_empty());
    }

    #[test]
    fn test_synthesize_created_only() {
        let claims = ClaimService::synthesize(true, false, false);
        assert!(claims.is_created_household_member());
        assert!(!claims.is_activated_household_member());
        assert!(!claims.has_accepted_privacy_policies());
        assert!(!claims.is_validated_household_member());
    }

    #[test]
    fn test_synthesize_fully_progressed() {
        let claims = ClaimService::synthesize(true, true, true);
        assert!(claims.is_validated_household_member());
        assert_eq!(claims.len(), 4);
    }

    #[test]
    fn test_after_activation_without_acceptance_withholds_validated() {
        let context = context_with(
            ClaimSet::new().with_claim(Claim::local(claim_types::CREATED_HOUSEHOLD_MEMBER)),
        );
        let advanced = ClaimService::after_activation(&context);

        assert!(advanced.claims.is_activated_household_member());
        assert!(!advanced.claims.is_validated_household_member());
    }

    #[test]
    fn test_after_activation_with_acceptance_grants_validated() {
        let context = context_with(
            ClaimSet::new()
                .with_claim(Claim::local(claim_types::CREATED_HOUSEHOLD_MEMBER))
                .with_claim(Claim::local(claim_types::PRIVACY_POLICIES_ACCEPTED)),
        );
        let advanced = ClaimService::after_activation(&context);

        assert!(advanced.claims.is_validated_household_member());
    }

    #[test]
    fn test_after_acceptance_with_activation_grants_validated() {
        let context = context_with(
            ClaimSet::new()
                .with_claim(Claim::local(claim_types::CREATED_HOUSEHOLD_MEMBER))
                .with_claim(Claim::local(claim_types::ACTIVATED_HOUSEHOLD_MEMBER)),
        );
        let advanced = ClaimService::after_acceptance(&context);

        assert!(advanced.claims.is_validated_household_member());
    }

    #[test]
    fn test_repeated_advancement_does_not_duplicate_claims() {
        let context = context_with(ClaimSet::new());
        let once = ClaimService::after_creation(&context);
        let twice = ClaimService::after_creation(&once);

        assert_eq!(twice.claims.len(), 1);
        assert_eq!(twice.version, once.version);
    }

    #[test]
    fn test_repeated_activation_keeps_cookie_canonical() {
        let context = context_with(
            ClaimSet::new()
                .with_claim(Claim::local(claim_types::CREATED_HOUSEHOLD_MEMBER))
                .with_claim(Claim::local(claim_types::PRIVACY_POLICIES_ACCEPTED)),
        );
        let once = ClaimService::after_activation(&context);
        let twice = ClaimService::after_activation(&once);

        assert!(twice.claims.is_validated_household_member());
        assert_eq!(twice.claims.len(), 4);
        assert_eq!(twice.version, once.version);
    }

    #[test]
    fn test_advancement_bumps_version_each_step() {
        let context = context_with(ClaimSet::new());
        let created = ClaimService::after_creation(&context);
        assert_eq!(created.version, 2);

        let activated = ClaimService::after_activation(&created);
        // One append (no Validated yet)
        assert_eq!(activated.version, 3);
    }
}
