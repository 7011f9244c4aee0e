//! Household-data service client.
//!
//! # Architecture
//!
//! The remote household-data service is the source of truth for members,
//! households, and privacy policies. This module wraps it with:
//!
//! - a JSON-over-HTTP client ([`HouseholdDataClient`]) with no retries:
//!   a failed remote call is terminal for the request
//! - fault translation: the service's typed fault payloads (BusinessFault /
//!   RepositoryFault / SystemFault) map to [`HouseholdDataError`] kinds;
//!   untyped failures become `Repository` errors carrying the originating
//!   client method name
//! - guarded conversions between wire views and domain models
//!   ([`conversions`]), which fail fast with `System` errors on precondition
//!   violations
//! - `moka` caching for the rarely changing privacy policy

pub mod client;
pub mod conversions;
pub mod types;

pub use client::HouseholdDataClient;

use thiserror::Error;

use types::{FaultType, FaultView};

/// Errors surfaced by household-data operations.
///
/// Three kinds, per the service's fault contract. `Business` messages are
/// user-facing; the other two are internal.
#[derive(Debug, Error, Clone)]
pub enum HouseholdDataError {
    /// A business rule rejected the request (e.g. unknown member).
    #[error("{0}")]
    Business(String),

    /// The remote call itself failed. Carries the client method name for
    /// diagnostics.
    #[error("household-data call '{method}' failed: {message}")]
    Repository {
        /// Client method that issued the call.
        method: &'static str,
        /// What went wrong.
        message: String,
    },

    /// A programming or precondition violation, e.g. converting a model that
    /// does not satisfy a command's requirements.
    #[error("{0}")]
    System(String),
}

impl HouseholdDataError {
    /// Translate a typed fault, attributing repository faults to `method`.
    #[must_use]
    pub fn from_fault_in(fault: FaultView, method: &'static str) -> Self {
        match fault.fault_type {
            FaultType::BusinessFault => Self::Business(fault.message),
            FaultType::RepositoryFault => Self::Repository {
                method,
                message: fault.message,
            },
            FaultType::SystemFault => Self::System(fault.message),
        }
    }
}
