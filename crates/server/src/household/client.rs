//! Household-data service client implementation.
//!
//! RPC-style JSON over HTTP: every operation is a POST to
//! `{base}/api/{operation}`. Successful responses decode to a wire view and
//! convert to a domain model; non-success responses decode to a typed fault
//! and translate to [`HouseholdDataError`]. The privacy policy is cached
//! with `moka` (5-minute TTL) since it changes rarely.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::ExposeSecret;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument};

use reduce_food_waste_core::{Email, HouseholdId};

use crate::config::HouseholdDataConfig;
use crate::models::{
    HouseholdIdentificationModel, HouseholdMemberModel, HouseholdModel, MemberOfHouseholdModel,
    PrivacyPolicyModel,
};

use super::HouseholdDataError;
use super::conversions::{
    convert_household, convert_household_identification, convert_household_member,
    convert_privacy_policy, to_acceptance_command, to_activation_command, to_removal_command,
};
use super::types::{
    BooleanResultView, FaultView, HouseholdAddCommand, HouseholdAddHouseholdMemberCommand,
    HouseholdIdentificationView, HouseholdMemberCreateCommand, HouseholdMemberView, HouseholdView,
    HouseholdUpdateCommand, PrivacyPolicyView,
};

/// How long a fetched privacy policy stays valid.
const POLICY_CACHE_TTL: Duration = Duration::from_secs(300);

/// Payload for queries keyed by mail address only.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MailAddressPayload<'a> {
    mail_address: &'a Email,
}

/// Payload for household queries.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HouseholdQueryPayload<'a> {
    mail_address: &'a Email,
    household_identifier: HouseholdId,
}

/// Client for the household-data service.
///
/// Cheaply cloneable; all remote calls are genuinely async and carry no
/// retry logic - a failed call surfaces immediately as a typed error.
#[derive(Clone)]
pub struct HouseholdDataClient {
    inner: Arc<HouseholdDataClientInner>,
}

struct HouseholdDataClientInner {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    policy_cache: Cache<&'static str, PrivacyPolicyView>,
}

impl HouseholdDataClient {
    /// Create a new client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &HouseholdDataConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let policy_cache = Cache::builder()
            .max_capacity(8)
            .time_to_live(POLICY_CACHE_TTL)
            .build();

        Ok(Self {
            inner: Arc::new(HouseholdDataClientInner {
                client,
                base_url: config.base_url.trim_end_matches('/').to_string(),
                api_key: config
                    .api_key
                    .as_ref()
                    .map(|key| key.expose_secret().to_string()),
                policy_cache,
            }),
        })
    }

    /// Issue one RPC call and decode the response.
    async fn post<Req, Res>(
        &self,
        method: &'static str,
        operation: &str,
        body: &Req,
    ) -> Result<Res, HouseholdDataError>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let url = format!("{}/api/{operation}", self.inner.base_url);

        let mut request = self.inner.client.post(&url).json(body);
        if let Some(api_key) = &self.inner.api_key {
            request = request.header("X-Api-Key", api_key);
        }

        let response = request.send().await.map_err(|e| {
            HouseholdDataError::Repository {
                method,
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| HouseholdDataError::Repository {
                method,
                message: e.to_string(),
            })?;

        if !status.is_success() {
            debug!(%status, %url, "household-data call failed");
            return Err(match serde_json::from_str::<FaultView>(&text) {
                Ok(fault) => HouseholdDataError::from_fault_in(fault, method),
                Err(_) => HouseholdDataError::Repository {
                    method,
                    message: format!("unexpected status {status}"),
                },
            });
        }

        serde_json::from_str(&text).map_err(|e| HouseholdDataError::Repository {
            method,
            message: format!("undecodable response: {e}"),
        })
    }

    // =========================================================================
    // Query operations
    // =========================================================================

    /// Whether a household member exists for the mail address.
    ///
    /// # Errors
    ///
    /// Returns a typed error when the remote call fails.
    #[instrument(skip(self))]
    pub async fn household_member_is_created(
        &self,
        mail_address: &Email,
    ) -> Result<bool, HouseholdDataError> {
        let result: BooleanResultView = self
            .post(
                "household_member_is_created",
                "household-member-is-created",
                &MailAddressPayload { mail_address },
            )
            .await?;
        Ok(result.result)
    }

    /// Whether the household member has redeemed their activation code.
    ///
    /// # Errors
    ///
    /// Returns a typed error when the remote call fails.
    #[instrument(skip(self))]
    pub async fn household_member_is_activated(
        &self,
        mail_address: &Email,
    ) -> Result<bool, HouseholdDataError> {
        let result: BooleanResultView = self
            .post(
                "household_member_is_activated",
                "household-member-is-activated",
                &MailAddressPayload { mail_address },
            )
            .await?;
        Ok(result.result)
    }

    /// Whether the household member has accepted the current privacy policy.
    ///
    /// # Errors
    ///
    /// Returns a typed error when the remote call fails.
    #[instrument(skip(self))]
    pub async fn household_member_has_accepted_privacy_policy(
        &self,
        mail_address: &Email,
    ) -> Result<bool, HouseholdDataError> {
        let result: BooleanResultView = self
            .post(
                "household_member_has_accepted_privacy_policy",
                "household-member-has-accepted-privacy-policy",
                &MailAddressPayload { mail_address },
            )
            .await?;
        Ok(result.result)
    }

    /// Fetch the household member's full data.
    ///
    /// # Errors
    ///
    /// Returns a typed error when the remote call fails.
    #[instrument(skip(self))]
    pub async fn household_member_data_get(
        &self,
        mail_address: &Email,
    ) -> Result<HouseholdMemberModel, HouseholdDataError> {
        let view: HouseholdMemberView = self
            .post(
                "household_member_data_get",
                "household-member-data-get",
                &MailAddressPayload { mail_address },
            )
            .await?;
        Ok(convert_household_member(view))
    }

    /// Fetch one household, including its membership list.
    ///
    /// # Errors
    ///
    /// Returns a typed error when the remote call fails.
    #[instrument(skip(self))]
    pub async fn household_data_get(
        &self,
        mail_address: &Email,
        household_identifier: HouseholdId,
    ) -> Result<HouseholdModel, HouseholdDataError> {
        let view: HouseholdView = self
            .post(
                "household_data_get",
                "household-data-get",
                &HouseholdQueryPayload {
                    mail_address,
                    household_identifier,
                },
            )
            .await?;
        Ok(convert_household(view))
    }

    /// Fetch the current privacy policy (cached).
    ///
    /// # Errors
    ///
    /// Returns a typed error when the remote call fails.
    #[instrument(skip(self))]
    pub async fn privacy_policy_get(&self) -> Result<PrivacyPolicyModel, HouseholdDataError> {
        if let Some(view) = self.inner.policy_cache.get("privacy-policy").await {
            return Ok(convert_privacy_policy(view));
        }

        let view: PrivacyPolicyView = self
            .post(
                "privacy_policy_get",
                "privacy-policy-get",
                &serde_json::json!({}),
            )
            .await?;

        self.inner
            .policy_cache
            .insert("privacy-policy", view.clone())
            .await;

        Ok(convert_privacy_policy(view))
    }

    /// Fetch the sidebar household identification collection.
    ///
    /// # Errors
    ///
    /// Returns a typed error when the remote call fails.
    #[instrument(skip(self))]
    pub async fn household_identification_collection_get(
        &self,
        mail_address: &Email,
    ) -> Result<Vec<HouseholdIdentificationModel>, HouseholdDataError> {
        let views: Vec<HouseholdIdentificationView> = self
            .post(
                "household_identification_collection_get",
                "household-identification-collection-get",
                &MailAddressPayload { mail_address },
            )
            .await?;
        Ok(views
            .into_iter()
            .map(convert_household_identification)
            .collect())
    }

    // =========================================================================
    // Command operations
    // =========================================================================

    /// Create a household member for the mail address.
    ///
    /// # Errors
    ///
    /// Returns a typed error when the remote call fails.
    #[instrument(skip(self))]
    pub async fn household_member_create(
        &self,
        mail_address: &Email,
    ) -> Result<HouseholdMemberModel, HouseholdDataError> {
        let view: HouseholdMemberView = self
            .post(
                "household_member_create",
                "household-member-create",
                &HouseholdMemberCreateCommand {
                    mail_address: mail_address.clone(),
                },
            )
            .await?;
        Ok(convert_household_member(view))
    }

    /// Redeem the activation code carried by `model`.
    ///
    /// # Errors
    ///
    /// Fails with `System` before any remote call when the model carries no
    /// usable activation code; otherwise returns a typed error when the
    /// remote call fails.
    #[instrument(skip(self, model))]
    pub async fn household_member_activate(
        &self,
        model: &HouseholdMemberModel,
    ) -> Result<HouseholdMemberModel, HouseholdDataError> {
        let command = to_activation_command(model)?;
        let view: HouseholdMemberView = self
            .post(
                "household_member_activate",
                "household-member-activate",
                &command,
            )
            .await?;
        Ok(convert_household_member(view))
    }

    /// Record the member's acceptance of `policy`.
    ///
    /// # Errors
    ///
    /// Fails with `System` before any remote call when the policy is not
    /// marked accepted; otherwise returns a typed error when the remote call
    /// fails.
    #[instrument(skip(self, policy))]
    pub async fn privacy_policy_accept(
        &self,
        mail_address: &Email,
        policy: &PrivacyPolicyModel,
    ) -> Result<HouseholdMemberModel, HouseholdDataError> {
        let command = to_acceptance_command(mail_address.clone(), policy)?;
        let view: HouseholdMemberView = self
            .post("privacy_policy_accept", "privacy-policy-accept", &command)
            .await?;
        Ok(convert_household_member(view))
    }

    /// Create a household owned by the caller.
    ///
    /// # Errors
    ///
    /// Returns a typed error when the remote call fails.
    #[instrument(skip(self))]
    pub async fn household_add(
        &self,
        mail_address: &Email,
        name: String,
        description: Option<String>,
    ) -> Result<HouseholdModel, HouseholdDataError> {
        let view: HouseholdView = self
            .post(
                "household_add",
                "household-add",
                &HouseholdAddCommand {
                    mail_address: mail_address.clone(),
                    name,
                    description,
                },
            )
            .await?;
        Ok(convert_household(view))
    }

    /// Update a household's name and description.
    ///
    /// # Errors
    ///
    /// Returns a typed error when the remote call fails.
    #[instrument(skip(self))]
    pub async fn household_update(
        &self,
        mail_address: &Email,
        identifier: HouseholdId,
        name: String,
        description: Option<String>,
    ) -> Result<HouseholdModel, HouseholdDataError> {
        let view: HouseholdView = self
            .post(
                "household_update",
                "household-update",
                &HouseholdUpdateCommand {
                    mail_address: mail_address.clone(),
                    identifier,
                    name,
                    description,
                },
            )
            .await?;
        Ok(convert_household(view))
    }

    /// Add a member to a household by mail address.
    ///
    /// # Errors
    ///
    /// Returns a typed error when the remote call fails.
    #[instrument(skip(self))]
    pub async fn household_add_household_member(
        &self,
        mail_address: &Email,
        household_identifier: HouseholdId,
        new_member_mail_address: &Email,
    ) -> Result<HouseholdModel, HouseholdDataError> {
        let view: HouseholdView = self
            .post(
                "household_add_household_member",
                "household-add-household-member",
                &HouseholdAddHouseholdMemberCommand {
                    mail_address: mail_address.clone(),
                    household_identifier,
                    new_member_mail_address: new_member_mail_address.clone(),
                },
            )
            .await?;
        Ok(convert_household(view))
    }

    /// Remove a membership from a household.
    ///
    /// # Errors
    ///
    /// Fails with `System` before any remote call when the membership is not
    /// removable; otherwise returns a typed error when the remote call fails.
    #[instrument(skip(self, member))]
    pub async fn household_remove_household_member(
        &self,
        member: &MemberOfHouseholdModel,
    ) -> Result<HouseholdModel, HouseholdDataError> {
        let command = to_removal_command(member)?;
        let view: HouseholdView = self
            .post(
                "household_remove_household_member",
                "household-remove-household-member",
                &command,
            )
            .await?;
        Ok(convert_household(view))
    }

    /// Liveness probe against the remote service.
    ///
    /// # Errors
    ///
    /// Returns a typed error when the service is unreachable.
    pub async fn ping(&self) -> Result<(), HouseholdDataError> {
        let url = format!("{}/health", self.inner.base_url);
        let response =
            self.inner.client.get(&url).send().await.map_err(|e| {
                HouseholdDataError::Repository {
                    method: "ping",
                    message: e.to_string(),
                }
            })?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(HouseholdDataError::Repository {
                method: "ping",
                message: format!("unexpected status {}", response.status()),
            })
        }
    }
}
