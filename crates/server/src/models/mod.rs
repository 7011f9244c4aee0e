//! Domain models presented by the web service.
//!
//! These are the UI-facing shapes produced from household-data wire views.
//! They are never persisted locally; household state lives in the remote
//! service, session state in the signed auth cookie.

pub mod household;
pub mod household_member;
pub mod payment;
pub mod privacy_policy;

pub use household::{HouseholdIdentificationModel, HouseholdModel, MemberOfHouseholdModel};
pub use household_member::HouseholdMemberModel;
pub use payment::MembershipModel;
pub use privacy_policy::PrivacyPolicyModel;
