//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Home page data
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (pings household-data)
//!
//! # Auth
//! POST /auth/login              - Authenticate a mail address, issue cookie
//! POST /auth/logout             - Expire cookie
//!
//! # Household member onboarding (requires auth / created member)
//! GET  /household-members/create                 - Create page data
//! POST /household-members                        - Create the member
//! GET  /household-members/prepare                - Prepare page data
//! POST /household-members/activate               - Redeem activation code
//! POST /household-members/accept-privacy-policy  - Accept the policy
//!
//! # Households (requires validated member)
//! GET    /households/{id}          - Manage page data
//! POST   /households               - Create household
//! PUT    /households/{id}          - Update household
//! POST   /households/{id}/members  - Add a member
//! DELETE /households/{id}/members  - Remove a member
//!
//! # Dashboard & sidebar (requires validated member)
//! GET  /dashboard                                   - Member dashboard data
//! GET  /sidebar/household-identification-collection - Sidebar listing
//!
//! # Payment
//! POST /payments/pay            - Stub, always 501
//! ```

pub mod auth;
pub mod dashboard;
pub mod home;
pub mod household;
pub mod household_member;
pub mod payment;
pub mod sidebar;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::session::session_middleware;
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the household-member onboarding routes router.
pub fn household_member_routes() -> Router<AppState> {
    Router::new()
        .route("/create", get(household_member::create_page))
        .route("/", post(household_member::create))
        .route("/prepare", get(household_member::prepare_page))
        .route("/activate", post(household_member::activate))
        .route(
            "/accept-privacy-policy",
            post(household_member::accept_privacy_policy),
        )
}

/// Create the household management routes router.
pub fn household_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(household::create))
        .route("/{id}", get(household::manage).put(household::update))
        .route(
            "/{id}/members",
            post(household::add_member).delete(household::remove_member),
        )
}

/// Assemble the full application router with session middleware applied.
#[must_use]
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::index))
        .route("/health", get(home::health))
        .route("/health/ready", get(home::readiness))
        .nest("/auth", auth_routes())
        .nest("/household-members", household_member_routes())
        .nest("/households", household_routes())
        .route("/dashboard", get(dashboard::dashboard))
        .route(
            "/sidebar/household-identification-collection",
            get(sidebar::household_identification_collection),
        )
        .route("/payments/pay", post(payment::pay))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ))
        .with_state(state)
}
