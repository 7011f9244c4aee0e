//! Security claims and the household-member progression claim set.
//!
//! A household member advances through a strict progression:
//!
//! ```text
//! Created -> Activated & PrivacyPoliciesAccepted -> Validated
//! ```
//!
//! Each step is represented by a boolean claim with a fixed local issuer.
//! The [`ClaimSet`] is immutable: appending a claim yields a new set, so a
//! session context holding one can be shared freely across request handling.

use serde::{Deserialize, Serialize};

/// Claim type URIs issued locally by this service.
pub mod claim_types {
    /// The household member exists in the household-data service.
    pub const CREATED_HOUSEHOLD_MEMBER: &str =
        "http://osdevgrp.local/foodwaste/security/createdhouseholdmember";

    /// The household member has redeemed their activation code.
    pub const ACTIVATED_HOUSEHOLD_MEMBER: &str =
        "http://osdevgrp.local/foodwaste/security/activatedhouseholdmember";

    /// The household member has accepted the current privacy policies.
    pub const PRIVACY_POLICIES_ACCEPTED: &str =
        "http://osdevgrp.local/foodwaste/security/privacypoliciesaccepted";

    /// The household member is activated and has accepted the privacy
    /// policies - the gate for full application access.
    pub const VALIDATED_HOUSEHOLD_MEMBER: &str =
        "http://osdevgrp.local/foodwaste/security/validatedhouseholdmember";
}

/// Issuer string for locally generated claims.
pub const LOCAL_CLAIM_ISSUER: &str = "ReduceFoodWaste.WebApplication";

/// A typed key/value/issuer triple describing an attribute of an
/// authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// Claim type URI.
    pub claim_type: String,
    /// Claim value. Progression claims carry `"true"`.
    pub value: String,
    /// Who issued the claim.
    pub issuer: String,
}

impl Claim {
    /// Create a claim with an explicit issuer.
    #[must_use]
    pub fn new(
        claim_type: impl Into<String>,
        value: impl Into<String>,
        issuer: impl Into<String>,
    ) -> Self {
        Self {
            claim_type: claim_type.into(),
            value: value.into(),
            issuer: issuer.into(),
        }
    }

    /// Create a boolean `true` claim with the local issuer.
    #[must_use]
    pub fn local(claim_type: impl Into<String>) -> Self {
        Self::new(claim_type, "true", LOCAL_CLAIM_ISSUER)
    }
}

/// An immutable collection of [`Claim`]s.
///
/// Appending a claim produces a new set; existing sets are never mutated.
/// A claim type present with the value `"true"` is considered granted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSet {
    claims: Vec<Claim>,
}

impl ClaimSet {
    /// Create an empty claim set.
    #[must_use]
    pub const fn new() -> Self {
        Self { claims: Vec::new() }
    }

    /// Returns a new claim set with `claim` appended.
    ///
    /// A claim of the same type already present is left in place; readers
    /// only test for presence, so duplicates are harmless.
    #[must_use]
    pub fn with_claim(&self, claim: Claim) -> Self {
        let mut claims = self.claims.clone();
        claims.push(claim);
        Self { claims }
    }

    /// All claims in insertion order.
    #[must_use]
    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    /// Number of claims in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    /// Whether the set carries no claims.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Value of the first claim of the given type, if present.
    #[must_use]
    pub fn value_of(&self, claim_type: &str) -> Option<&str> {
        self.claims
            .iter()
            .find(|c| c.claim_type == claim_type)
            .map(|c| c.value.as_str())
    }

    /// Whether a claim of the given type is present with the value `"true"`.
    #[must_use]
    pub fn has(&self, claim_type: &str) -> bool {
        self.value_of(claim_type) == Some("true")
    }

    /// Whether the CreatedHouseholdMember claim is granted.
    #[must_use]
    pub fn is_created_household_member(&self) -> bool {
        self.has(claim_types::CREATED_HOUSEHOLD_MEMBER)
    }

    /// Whether the ActivatedHouseholdMember claim is granted.
    #[must_use]
    pub fn is_activated_household_member(&self) -> bool {
        self.has(claim_types::ACTIVATED_HOUSEHOLD_MEMBER)
    }

    /// Whether the PrivacyPoliciesAccepted claim is granted.
    #[must_use]
    pub fn has_accepted_privacy_policies(&self) -> bool {
        self.has(claim_types::PRIVACY_POLICIES_ACCEPTED)
    }

    /// Whether the ValidatedHouseholdMember claim is granted.
    #[must_use]
    pub fn is_validated_household_member(&self) -> bool {
        self.has(claim_types::VALIDATED_HOUSEHOLD_MEMBER)
    }
}

impl FromIterator<Claim> for ClaimSet {
    fn from_iter<T: IntoIterator<Item = Claim>>(iter: T) -> Self {
        Self {
            claims: iter.into_iter().collect(),
        }
    }
}
