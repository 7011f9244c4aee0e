//! Household member model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use reduce_food_waste_core::{Email, HouseholdMemberId};

use super::household::HouseholdModel;
use super::payment::MembershipModel;
use super::privacy_policy::PrivacyPolicyModel;

/// An end user who has registered and may belong to one or more households.
///
/// Constructed empty by handlers and populated from household-data calls;
/// never persisted locally. The activation and privacy-policy timestamps are
/// the source of truth, `is_activated`/`has_accepted_privacy_policy` derive
/// from their presence.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HouseholdMemberModel {
    /// Member identifier.
    pub identifier: Option<HouseholdMemberId>,
    /// Display name.
    pub name: Option<String>,
    /// Mail address identifying the member towards the household-data
    /// service.
    pub mail_address: Option<Email>,
    /// Activation code mailed to the member on creation.
    pub activation_code: Option<String>,
    /// When the member redeemed their activation code.
    pub activated_time: Option<DateTime<Utc>>,
    /// The member's current membership, if any.
    pub membership: Option<MembershipModel>,
    /// When the member accepted the current privacy policy.
    pub privacy_policy_accepted_time: Option<DateTime<Utc>>,
    /// Privacy policy presented to the member.
    pub privacy_policy: Option<PrivacyPolicyModel>,
    /// When the member was created.
    pub creation_time: Option<DateTime<Utc>>,
    /// Households the member belongs to.
    pub households: Vec<HouseholdModel>,
}

impl HouseholdMemberModel {
    /// Whether the member has redeemed their activation code.
    #[must_use]
    pub const fn is_activated(&self) -> bool {
        self.activated_time.is_some()
    }

    /// Whether the member has accepted the current privacy policy.
    #[must_use]
    pub const fn has_accepted_privacy_policy(&self) -> bool {
        self.privacy_policy_accepted_time.is_some()
    }
}
