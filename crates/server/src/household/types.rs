//! Wire types for the household-data service.
//!
//! These mirror the service's JSON contract exactly (camelCase fields) and
//! stay inside this module; handlers only see the domain models produced by
//! [`super::conversions`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use reduce_food_waste_core::{Email, HouseholdId, HouseholdMemberId, PrivacyPolicyId};

// =============================================================================
// Result and fault envelopes
// =============================================================================

/// Wrapper for boolean query results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BooleanResultView {
    /// The query answer.
    pub result: bool,
}

/// Discriminator carried by typed fault payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FaultType {
    /// A business rule rejected the request.
    BusinessFault,
    /// The service's own data layer failed.
    RepositoryFault,
    /// A programming error inside the service.
    SystemFault,
}

/// Typed fault payload returned on non-success responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaultView {
    /// Fault kind discriminator.
    pub fault_type: FaultType,
    /// Human-readable message.
    pub message: String,
    /// Optional diagnostic details.
    pub details: Option<String>,
}

// =============================================================================
// Query views
// =============================================================================

/// A household member as returned by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdMemberView {
    pub identifier: HouseholdMemberId,
    pub name: Option<String>,
    pub mail_address: Email,
    pub activation_code: Option<String>,
    pub activated_time: Option<DateTime<Utc>>,
    pub membership: Option<MembershipView>,
    pub privacy_policy_accepted_time: Option<DateTime<Utc>>,
    pub privacy_policy: Option<PrivacyPolicyView>,
    pub creation_time: DateTime<Utc>,
    #[serde(default)]
    pub households: Vec<HouseholdView>,
}

/// A household as returned by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdView {
    pub identifier: HouseholdId,
    pub name: String,
    pub description: Option<String>,
    pub privacy_policy: Option<PrivacyPolicyView>,
    pub creation_time: DateTime<Utc>,
    /// Absent when the membership list was not loaded.
    pub household_members: Option<Vec<MemberOfHouseholdView>>,
}

/// A membership entry inside a household's member list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberOfHouseholdView {
    pub household_member_identifier: HouseholdMemberId,
    pub household_identifier: HouseholdId,
    pub mail_address: Email,
    pub removable: bool,
}

/// A privacy policy as returned by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacyPolicyView {
    pub identifier: PrivacyPolicyId,
    pub header: String,
    /// Body text; may be wrapped in literal `<html>` tags by the service.
    pub body: String,
}

/// A membership as returned by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipView {
    pub name: String,
    pub description: Option<String>,
    pub billing_information: Option<String>,
    pub price: rust_decimal::Decimal,
    pub price_culture_name: String,
    pub expire_time: Option<DateTime<Utc>>,
}

/// Lightweight household identification for sidebar listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdIdentificationView {
    pub identifier: HouseholdId,
    pub name: String,
}

// =============================================================================
// Command payloads
// =============================================================================

/// Create a household member for a mail address.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdMemberCreateCommand {
    pub mail_address: Email,
}

/// Redeem an activation code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdMemberActivateCommand {
    pub mail_address: Email,
    pub activation_code: String,
}

/// Record acceptance of a privacy policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacyPolicyAcceptCommand {
    pub mail_address: Email,
    pub privacy_policy_identifier: PrivacyPolicyId,
}

/// Create a household owned by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdAddCommand {
    pub mail_address: Email,
    pub name: String,
    pub description: Option<String>,
}

/// Update a household's name and description.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdUpdateCommand {
    pub mail_address: Email,
    pub identifier: HouseholdId,
    pub name: String,
    pub description: Option<String>,
}

/// Add a member to a household by mail address.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdAddHouseholdMemberCommand {
    pub mail_address: Email,
    pub household_identifier: HouseholdId,
    pub new_member_mail_address: Email,
}

/// Remove a member from a household.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdRemoveHouseholdMemberCommand {
    pub household_identifier: HouseholdId,
    pub member_mail_address: Email,
}
