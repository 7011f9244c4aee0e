//! Request middleware.
//!
//! - [`session`] - decodes the auth cookie into a [`crate::session::SessionContext`]
//!   and re-issues it when a handler staged an update
//! - [`auth`] - extractors gating handlers on progression claims

pub mod auth;
pub mod session;

pub use auth::{OptionalSession, RequireAuthenticated, RequireCreatedMember, RequireValidatedMember};
pub use session::session_middleware;
