//! Reduce Food Waste Core - Shared types library.
//!
//! This crate provides common types used across all Reduce Food Waste
//! components:
//! - `server` - The public web service
//! - `integration-tests` - End-to-end test harness
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. Household
//! state lives in the remote household-data service; the only client-side
//! state is the claim set carried by the authentication cookie, whose types
//! are defined here.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, mail addresses, claims, and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
