//! Application services.

pub mod claims;

pub use claims::ClaimService;
