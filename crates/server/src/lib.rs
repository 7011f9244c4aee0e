//! Reduce Food Waste server library.
//!
//! This crate provides the web service as a library, allowing the router to
//! be assembled in-process for tests and reused by the binary.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod household;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;
