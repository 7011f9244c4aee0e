//! Household models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use reduce_food_waste_core::{Email, HouseholdId, HouseholdMemberId};

use super::privacy_policy::PrivacyPolicyModel;

/// A household with its membership list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseholdModel {
    /// Household identifier.
    pub identifier: HouseholdId,
    /// Household name.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Privacy policy in force for the household, when supplied.
    pub privacy_policy: Option<PrivacyPolicyModel>,
    /// When the household was created.
    pub creation_time: DateTime<Utc>,
    /// Members of the household. Absent means "not loaded", never an empty
    /// collection.
    pub household_members: Option<Vec<MemberOfHouseholdModel>>,
}

/// A household member as seen from a household's membership list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemberOfHouseholdModel {
    /// Identifier of the household member.
    pub household_member_identifier: HouseholdMemberId,
    /// Identifier of the household the membership belongs to.
    pub household_identifier: HouseholdId,
    /// Mail address of the member.
    pub mail_address: Email,
    /// Whether the caller may remove this membership. The caller's own
    /// membership is never removable.
    pub removable: bool,
}

/// Lightweight household identification for the sidebar listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HouseholdIdentificationModel {
    /// Household identifier.
    pub identifier: HouseholdId,
    /// Household name.
    pub name: String,
}
