//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::household::HouseholdDataClient;
use crate::services::ClaimService;
use crate::session::AuthCookieCodec;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; provides access to configuration, the
/// household-data client, the claim service, and the auth cookie codec.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    household: HouseholdDataClient,
    claims: ClaimService,
    cookies: AuthCookieCodec,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the household-data HTTP client cannot be built.
    pub fn new(config: ServerConfig) -> Result<Self, reqwest::Error> {
        let household = HouseholdDataClient::new(&config.household_data)?;
        let claims = ClaimService::new(household.clone());
        let cookies = AuthCookieCodec::new(config.auth_secret.clone());

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                household,
                claims,
                cookies,
            }),
        })
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the household-data client.
    #[must_use]
    pub fn household(&self) -> &HouseholdDataClient {
        &self.inner.household
    }

    /// Get a reference to the claim service.
    #[must_use]
    pub fn claims(&self) -> &ClaimService {
        &self.inner.claims
    }

    /// Get a reference to the auth cookie codec.
    #[must_use]
    pub fn cookies(&self) -> &AuthCookieCodec {
        &self.inner.cookies
    }
}
