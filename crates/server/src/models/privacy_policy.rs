//! Privacy policy model.

use serde::{Deserialize, Serialize};

use reduce_food_waste_core::PrivacyPolicyId;

/// The privacy policy a household member must accept to become validated.
///
/// `is_accepted` is per-presentation state: it records the member's consent
/// for the copy of the policy they were shown, which is why the [`Clone`]
/// implementation resets it.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrivacyPolicyModel {
    /// Policy identifier, versioned by the household-data service.
    pub identifier: PrivacyPolicyId,
    /// Policy headline.
    pub header: String,
    /// Policy body text.
    pub body: String,
    /// Whether the member has accepted this copy of the policy.
    pub is_accepted: bool,
}

// Acceptance is not transferable between copies: a cloned policy always
// starts out unaccepted, regardless of the source's state.
impl Clone for PrivacyPolicyModel {
    fn clone(&self) -> Self {
        Self {
            identifier: self.identifier,
            header: self.header.clone(),
            body: self.body.clone(),
            is_accepted: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accepted_policy() -> PrivacyPolicyModel {
        PrivacyPolicyModel {
            identifier: PrivacyPolicyId::random(),
            header: "Privacy policy".to_string(),
            body: "We store your household data.".to_string(),
            is_accepted: true,
        }
    }

    #[test]
    fn test_clone_always_resets_acceptance() {
        let accepted = accepted_policy();
        let copy = accepted.clone();

        assert!(accepted.is_accepted);
        assert!(!copy.is_accepted);
    }

    #[test]
    fn test_clone_preserves_all_other_fields() {
        let accepted = accepted_policy();
        let copy = accepted.clone();

        assert_eq!(copy.identifier, accepted.identifier);
        assert_eq!(copy.header, accepted.header);
        assert_eq!(copy.body, accepted.body);
    }

    #[test]
    fn test_clone_of_unaccepted_stays_unaccepted() {
        let mut policy = accepted_policy();
        policy.is_accepted = false;
        assert!(!policy.clone().is_accepted);
    }
}
