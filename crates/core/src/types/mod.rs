//! Shared type definitions.
//!
//! - [`id`] - Type-safe entity IDs backed by UUIDs
//! - [`email`] - Validated mail addresses
//! - [`claim`] - Security claims and the membership progression claim set
//! - [`price`] - Prices with culture-aware formatting

pub mod claim;
pub mod email;
pub mod id;
pub mod price;

pub use claim::{Claim, ClaimSet, claim_types};
pub use email::{Email, EmailError};
pub use id::{HouseholdId, HouseholdMemberId, PrivacyPolicyId};
pub use price::{CurrencyCulture, Price};
