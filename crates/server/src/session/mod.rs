//! Session context carried by the authentication cookie.
//!
//! There is no server-side session store: the signed cookie is the only
//! durable carrier of a session's claim set. The cookie is decoded into an
//! immutable [`SessionContext`] at the request boundary and re-encoded only
//! when a handler stages a replacement (see [`crate::middleware::session`]).
//!
//! Two concurrent requests from the same browser can race on the cookie;
//! the last writer wins and a claim append can be dropped. This mirrors the
//! versioned-cookie scheme the service replaces, which had no concurrency
//! control either.

pub mod cookie;

pub use cookie::{AUTH_COOKIE_NAME, AuthCookieCodec, CookieDecodeError, cookie_value};

use serde::{Deserialize, Serialize};

use reduce_food_waste_core::{Claim, ClaimSet, Email};

/// The authenticated session's identity and claim set.
///
/// Immutable: [`SessionContext::with_claim`] returns a new context with an
/// incremented version, leaving the original untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionContext {
    /// Mail address identifying the member.
    pub mail_address: Email,
    /// Claims granted to this session.
    pub claims: ClaimSet,
    /// Incremented on every claim append; diagnostic only.
    pub version: u32,
}

impl SessionContext {
    /// Create a first-version context for a freshly authenticated member.
    #[must_use]
    pub const fn new(mail_address: Email, claims: ClaimSet) -> Self {
        Self {
            mail_address,
            claims,
            version: 1,
        }
    }

    /// Returns a new context with `claim` appended and the version bumped.
    #[must_use]
    pub fn with_claim(&self, claim: Claim) -> Self {
        Self {
            mail_address: self.mail_address.clone(),
            claims: self.claims.with_claim(claim),
            version: self.version + 1,
        }
    }

    /// Returns a new context with the given claim set and the version bumped.
    #[must_use]
    pub fn with_claims(&self, claims: ClaimSet) -> Self {
        Self {
            mail_address: self.mail_address.clone(),
            claims,
            version: self.version + 1,
        }
    }
}

/// Request extension inserted by the session middleware.
///
/// `None` when the request carried no decodable auth cookie.
#[derive(Debug, Clone)]
pub struct SessionExtension(pub Option<SessionContext>);

/// Response extension staged by handlers to change the auth cookie.
#[derive(Debug, Clone)]
pub enum SessionUpdate {
    /// Re-issue the cookie with this context.
    Issue(SessionContext),
    /// Expire the cookie (logout).
    Clear,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use reduce_food_waste_core::claim_types;

    fn context() -> SessionContext {
        SessionContext::new(
            Email::parse("member@osdevgrp.local").unwrap(),
            ClaimSet::new().with_claim(Claim::local(claim_types::CREATED_HOUSEHOLD_MEMBER)),
        )
    }

    #[test]
    fn test_new_context_starts_at_version_one() {
        assert_eq!(context().version, 1);
    }

    #[test]
    fn test_with_claim_bumps_version_and_keeps_source() {
        let original = context();
        let extended =
            original.with_claim(Claim::local(claim_types::ACTIVATED_HOUSEHOLD_MEMBER));

        assert_eq!(original.version, 1);
        assert_eq!(original.claims.len(), 1);
        assert_eq!(extended.version, 2);
        assert_eq!(extended.claims.len(), 2);
        assert!(extended.claims.is_activated_household_member());
    }

    #[test]
    fn test_with_claims_replaces_set() {
        let original = context();
        let replaced = original.with_claims(ClaimSet::new());
        assert!(replaced.claims.is_empty());
        assert_eq!(replaced.version, 2);
    }
}
