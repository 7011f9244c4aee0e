//! Test harness for end-to-end scenarios.
//!
//! Spawns the real application router on an ephemeral port, backed by a
//! stub household-data service (also in-process) whose member state each
//! test controls directly. Tests drive the stack with `reqwest` and a
//! cookie store, so the auth cookie flows exactly as it would in
//! production.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use secrecy::SecretString;
use serde_json::{Value, json};
use uuid::Uuid;

use reduce_food_waste_server::config::{HouseholdDataConfig, ServerConfig};
use reduce_food_waste_server::routes;
use reduce_food_waste_server::state::AppState;

/// Controllable state of the stub household-data service.
#[derive(Debug, Clone)]
pub struct StubState {
    /// Answer for the created check; commands flip this.
    pub created: bool,
    /// Answer for the activated check.
    pub activated: bool,
    /// Answer for the privacy-policy-accepted check.
    pub accepted: bool,
    /// Mail address of the member the stub knows about.
    pub member_mail: String,
    /// Identifier of that member.
    pub member_id: Uuid,
    /// Identifier of the stub's single household.
    pub household_id: Uuid,
    /// Mail address of a second, removable member of the household.
    pub other_member_mail: String,
    /// When set, the named operation fails with this fault payload and
    /// status.
    pub fault: Option<InjectedFault>,
}

/// A fault the stub injects for one operation.
#[derive(Debug, Clone)]
pub struct InjectedFault {
    /// Operation path segment, e.g. `household-member-is-created`.
    pub operation: String,
    /// HTTP status to answer with.
    pub status: u16,
    /// Fault payload body.
    pub body: Value,
}

impl Default for StubState {
    fn default() -> Self {
        Self {
            created: false,
            activated: false,
            accepted: false,
            member_mail: "member@osdevgrp.local".to_string(),
            member_id: Uuid::new_v4(),
            household_id: Uuid::new_v4(),
            other_member_mail: "other@osdevgrp.local".to_string(),
            fault: None,
        }
    }
}

impl StubState {
    /// A member who has completed the full progression.
    #[must_use]
    pub fn fully_progressed() -> Self {
        Self {
            created: true,
            activated: true,
            accepted: true,
            ..Self::default()
        }
    }

    /// A member who exists but has neither activated nor accepted.
    #[must_use]
    pub fn created_only() -> Self {
        Self {
            created: true,
            ..Self::default()
        }
    }

    fn member_view(&self) -> Value {
        json!({
            "identifier": self.member_id,
            "name": "Test Member",
            "mailAddress": self.member_mail,
            "activationCode": "ZX81",
            "activatedTime": self.activated.then(|| "2026-01-10T12:00:00Z"),
            "membership": {
                "name": "Basic",
                "description": "The [Name] membership costs [Price].",
                "billingInformation": null,
                "price": "0",
                "priceCultureName": "da-DK",
                "expireTime": null,
            },
            "privacyPolicyAcceptedTime": self.accepted.then(|| "2026-01-11T12:00:00Z"),
            "privacyPolicy": self.policy_view(),
            "creationTime": "2026-01-01T12:00:00Z",
            "households": [],
        })
    }

    fn policy_view(&self) -> Value {
        json!({
            "identifier": Uuid::from_u128(0x0f5c_47a1_9a2e_4b6d_8c31_7e54_d2aa_10be),
            "header": "Privacy policy",
            "body": "<html>We store your household data.</html>",
        })
    }

    fn household_view(&self) -> Value {
        json!({
            "identifier": self.household_id,
            "name": "Test Household",
            "description": "A household for testing",
            "privacyPolicy": null,
            "creationTime": "2026-01-01T12:00:00Z",
            "householdMembers": [
                {
                    "householdMemberIdentifier": self.member_id,
                    "householdIdentifier": self.household_id,
                    "mailAddress": self.member_mail,
                    "removable": false,
                },
                {
                    "householdMemberIdentifier": Uuid::new_v4(),
                    "householdIdentifier": self.household_id,
                    "mailAddress": self.other_member_mail,
                    "removable": true,
                },
            ],
        })
    }
}

type SharedStub = Arc<Mutex<StubState>>;

fn injected(stub: &SharedStub, operation: &str) -> Option<Response> {
    let state = stub.lock().expect("stub state poisoned");
    state.fault.as_ref().and_then(|fault| {
        (fault.operation == operation).then(|| {
            let status =
                StatusCode::from_u16(fault.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(fault.body.clone())).into_response()
        })
    })
}

fn stub_router(stub: SharedStub) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route(
            "/api/household-member-is-created",
            post(|State(stub): State<SharedStub>, _body: String| async move {
                injected(&stub, "household-member-is-created").unwrap_or_else(|| {
                    let created = stub.lock().expect("stub state poisoned").created;
                    Json(json!({ "result": created })).into_response()
                })
            }),
        )
        .route(
            "/api/household-member-is-activated",
            post(|State(stub): State<SharedStub>, _body: String| async move {
                injected(&stub, "household-member-is-activated").unwrap_or_else(|| {
                    let activated = stub.lock().expect("stub state poisoned").activated;
                    Json(json!({ "result": activated })).into_response()
                })
            }),
        )
        .route(
            "/api/household-member-has-accepted-privacy-policy",
            post(|State(stub): State<SharedStub>, _body: String| async move {
                injected(&stub, "household-member-has-accepted-privacy-policy").unwrap_or_else(
                    || {
                        let accepted = stub.lock().expect("stub state poisoned").accepted;
                        Json(json!({ "result": accepted })).into_response()
                    },
                )
            }),
        )
        .route(
            "/api/household-member-data-get",
            post(|State(stub): State<SharedStub>, _body: String| async move {
                injected(&stub, "household-member-data-get").unwrap_or_else(|| {
                    let view = stub.lock().expect("stub state poisoned").member_view();
                    Json(view).into_response()
                })
            }),
        )
        .route(
            "/api/household-member-create",
            post(|State(stub): State<SharedStub>, _body: String| async move {
                injected(&stub, "household-member-create").unwrap_or_else(|| {
                    let mut state = stub.lock().expect("stub state poisoned");
                    state.created = true;
                    Json(state.member_view()).into_response()
                })
            }),
        )
        .route(
            "/api/household-member-activate",
            post(|State(stub): State<SharedStub>, _body: String| async move {
                injected(&stub, "household-member-activate").unwrap_or_else(|| {
                    let mut state = stub.lock().expect("stub state poisoned");
                    state.activated = true;
                    Json(state.member_view()).into_response()
                })
            }),
        )
        .route(
            "/api/privacy-policy-get",
            post(|State(stub): State<SharedStub>, _body: String| async move {
                injected(&stub, "privacy-policy-get").unwrap_or_else(|| {
                    let view = stub.lock().expect("stub state poisoned").policy_view();
                    Json(view).into_response()
                })
            }),
        )
        .route(
            "/api/privacy-policy-accept",
            post(|State(stub): State<SharedStub>, _body: String| async move {
                injected(&stub, "privacy-policy-accept").unwrap_or_else(|| {
                    let mut state = stub.lock().expect("stub state poisoned");
                    state.accepted = true;
                    Json(state.member_view()).into_response()
                })
            }),
        )
        .route(
            "/api/household-data-get",
            post(|State(stub): State<SharedStub>, _body: String| async move {
                injected(&stub, "household-data-get").unwrap_or_else(|| {
                    let view = stub.lock().expect("stub state poisoned").household_view();
                    Json(view).into_response()
                })
            }),
        )
        .route(
            "/api/household-add",
            post(|State(stub): State<SharedStub>, _body: String| async move {
                injected(&stub, "household-add").unwrap_or_else(|| {
                    let view = stub.lock().expect("stub state poisoned").household_view();
                    Json(view).into_response()
                })
            }),
        )
        .route(
            "/api/household-update",
            post(|State(stub): State<SharedStub>, _body: String| async move {
                injected(&stub, "household-update").unwrap_or_else(|| {
                    let view = stub.lock().expect("stub state poisoned").household_view();
                    Json(view).into_response()
                })
            }),
        )
        .route(
            "/api/household-add-household-member",
            post(|State(stub): State<SharedStub>, _body: String| async move {
                injected(&stub, "household-add-household-member").unwrap_or_else(|| {
                    let view = stub.lock().expect("stub state poisoned").household_view();
                    Json(view).into_response()
                })
            }),
        )
        .route(
            "/api/household-remove-household-member",
            post(|State(stub): State<SharedStub>, _body: String| async move {
                injected(&stub, "household-remove-household-member").unwrap_or_else(|| {
                    let view = stub.lock().expect("stub state poisoned").household_view();
                    Json(view).into_response()
                })
            }),
        )
        .route(
            "/api/household-identification-collection-get",
            post(|State(stub): State<SharedStub>, _body: String| async move {
                injected(&stub, "household-identification-collection-get").unwrap_or_else(|| {
                    let state = stub.lock().expect("stub state poisoned");
                    Json(json!([
                        { "identifier": state.household_id, "name": "Test Household" },
                    ]))
                    .into_response()
                })
            }),
        )
        .with_state(stub)
}

/// A running application plus its stub backend.
pub struct TestApp {
    /// Base URL of the application under test.
    pub base_url: String,
    /// Handle to the stub's state; mutate it to steer remote answers.
    pub stub: SharedStub,
}

impl TestApp {
    /// Spawn the stub service and the application, both on ephemeral ports.
    ///
    /// # Panics
    ///
    /// Panics when a listener cannot be bound; tests cannot proceed without
    /// one.
    pub async fn spawn(initial: StubState) -> Self {
        let stub: SharedStub = Arc::new(Mutex::new(initial));

        let stub_addr = serve(stub_router(Arc::clone(&stub))).await;

        let config = ServerConfig {
            host: "127.0.0.1".parse().expect("valid IP"),
            port: 0,
            base_url: "http://127.0.0.1:0".to_string(),
            auth_secret: SecretString::from("kJ8#mQ2$vN5^xR1&wT9*bL4!cF7@dH3%"),
            household_data: HouseholdDataConfig {
                base_url: format!("http://{stub_addr}"),
                api_key: None,
                timeout_secs: 5,
            },
            sentry_dsn: None,
        };

        let state = AppState::new(config).expect("application state");
        let app_addr = serve(routes::app(state)).await;

        Self {
            base_url: format!("http://{app_addr}"),
            stub,
        }
    }

    /// HTTP client with a cookie store, so the auth cookie round-trips.
    ///
    /// # Panics
    ///
    /// Panics when the client cannot be built.
    #[must_use]
    pub fn client() -> reqwest::Client {
        reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("reqwest client")
    }

    /// Inject a fault for one stub operation.
    ///
    /// # Panics
    ///
    /// Panics when the stub state mutex is poisoned.
    pub fn inject_fault(&self, operation: &str, status: u16, body: Value) {
        let mut state = self.stub.lock().expect("stub state poisoned");
        state.fault = Some(InjectedFault {
            operation: operation.to_string(),
            status,
            body,
        });
    }
}

/// Bind an ephemeral port and serve the router in the background.
async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });

    addr
}
