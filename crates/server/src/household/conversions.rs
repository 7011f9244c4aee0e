//! Conversions between household-data wire views and domain models.
//!
//! View-to-model conversions are straight field copies plus a few derived
//! fields. Model-to-command conversions guard their preconditions and fail
//! fast with [`HouseholdDataError::System`].

use reduce_food_waste_core::{Email, Price};

use crate::models::{
    HouseholdIdentificationModel, HouseholdMemberModel, HouseholdModel, MemberOfHouseholdModel,
    MembershipModel, PrivacyPolicyModel,
};

use super::HouseholdDataError;
use super::types::{
    HouseholdIdentificationView, HouseholdMemberActivateCommand, HouseholdMemberView,
    HouseholdRemoveHouseholdMemberCommand, HouseholdView, MemberOfHouseholdView, MembershipView,
    PrivacyPolicyAcceptCommand, PrivacyPolicyView,
};

/// Fixed message for refusing to remove a non-removable membership.
pub const CANNOT_REMOVE_YOURSELF: &str = "You cannot remove yourself as a household member.";

/// Strip literal `<html>`/`</html>` wrapper tags from policy body text.
///
/// This is the service's legacy framing, not HTML sanitization.
fn strip_html_tags(text: &str) -> String {
    text.replace("<html>", "").replace("</html>", "")
}

// =============================================================================
// View -> model
// =============================================================================

/// Convert a privacy policy view. The body is unwrapped from its `<html>`
/// framing; acceptance always starts out false.
#[must_use]
pub fn convert_privacy_policy(view: PrivacyPolicyView) -> PrivacyPolicyModel {
    PrivacyPolicyModel {
        identifier: view.identifier,
        header: view.header,
        body: strip_html_tags(&view.body),
        is_accepted: false,
    }
}

/// Convert a membership view, parsing its culture name.
#[must_use]
pub fn convert_membership(view: MembershipView) -> MembershipModel {
    MembershipModel {
        name: view.name,
        description: view.description,
        billing_information: view.billing_information,
        price: Price::new(
            view.price,
            reduce_food_waste_core::CurrencyCulture::from_culture_name(&view.price_culture_name),
        ),
        expire_time: view.expire_time,
    }
}

/// Convert a member-of-household view.
#[must_use]
pub fn convert_member_of_household(view: MemberOfHouseholdView) -> MemberOfHouseholdModel {
    MemberOfHouseholdModel {
        household_member_identifier: view.household_member_identifier,
        household_identifier: view.household_identifier,
        mail_address: view.mail_address,
        removable: view.removable,
    }
}

/// Convert a household view. An absent membership list stays absent.
#[must_use]
pub fn convert_household(view: HouseholdView) -> HouseholdModel {
    HouseholdModel {
        identifier: view.identifier,
        name: view.name,
        description: view.description,
        privacy_policy: view.privacy_policy.map(convert_privacy_policy),
        creation_time: view.creation_time,
        household_members: view
            .household_members
            .map(|members| members.into_iter().map(convert_member_of_household).collect()),
    }
}

/// Convert a household member view, deriving the activation and acceptance
/// flags from timestamp presence.
#[must_use]
pub fn convert_household_member(view: HouseholdMemberView) -> HouseholdMemberModel {
    HouseholdMemberModel {
        identifier: Some(view.identifier),
        name: view.name,
        mail_address: Some(view.mail_address),
        activation_code: view.activation_code,
        activated_time: view.activated_time,
        membership: view.membership.map(convert_membership),
        privacy_policy_accepted_time: view.privacy_policy_accepted_time,
        privacy_policy: view.privacy_policy.map(convert_privacy_policy),
        creation_time: Some(view.creation_time),
        households: view.households.into_iter().map(convert_household).collect(),
    }
}

/// Convert a household identification view.
#[must_use]
pub fn convert_household_identification(
    view: HouseholdIdentificationView,
) -> HouseholdIdentificationModel {
    HouseholdIdentificationModel {
        identifier: view.identifier,
        name: view.name,
    }
}

// =============================================================================
// Model -> command (guarded)
// =============================================================================

/// Build an activation command from a member model.
///
/// # Errors
///
/// Fails with `System` when the activation code is missing, empty, or
/// whitespace-only. Any non-blank code is copied verbatim.
pub fn to_activation_command(
    model: &HouseholdMemberModel,
) -> Result<HouseholdMemberActivateCommand, HouseholdDataError> {
    let mail_address = model
        .mail_address
        .clone()
        .ok_or_else(|| HouseholdDataError::System("Household member has no mail address.".to_string()))?;

    let activation_code = model
        .activation_code
        .as_deref()
        .filter(|code| !code.trim().is_empty())
        .ok_or_else(|| {
            HouseholdDataError::System(
                "Cannot activate a household member without an activation code.".to_string(),
            )
        })?;

    Ok(HouseholdMemberActivateCommand {
        mail_address,
        activation_code: activation_code.to_string(),
    })
}

/// Build a privacy-policy acceptance command.
///
/// # Errors
///
/// Fails with `System` when the policy has not been marked accepted:
/// acceptance must be explicit before a command is issued.
pub fn to_acceptance_command(
    mail_address: Email,
    policy: &PrivacyPolicyModel,
) -> Result<PrivacyPolicyAcceptCommand, HouseholdDataError> {
    if !policy.is_accepted {
        return Err(HouseholdDataError::System(
            "Cannot accept a privacy policy which has not been marked accepted.".to_string(),
        ));
    }

    Ok(PrivacyPolicyAcceptCommand {
        mail_address,
        privacy_policy_identifier: policy.identifier,
    })
}

/// Build a member-removal command.
///
/// # Errors
///
/// Fails with `System` carrying [`CANNOT_REMOVE_YOURSELF`] when the
/// membership is not removable. A removable membership preserves the
/// household identifier and mail address.
pub fn to_removal_command(
    model: &MemberOfHouseholdModel,
) -> Result<HouseholdRemoveHouseholdMemberCommand, HouseholdDataError> {
    if !model.removable {
        return Err(HouseholdDataError::System(CANNOT_REMOVE_YOURSELF.to_string()));
    }

    Ok(HouseholdRemoveHouseholdMemberCommand {
        household_identifier: model.household_identifier,
        member_mail_address: model.mail_address.clone(),
    })
}
