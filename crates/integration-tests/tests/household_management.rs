//! End-to-end tests for household management, fault translation, and the
//! payment stub.

#![allow(clippy::unwrap_used)]

use reduce_food_waste_integration_tests::{StubState, TestApp};
use serde_json::{Value, json};

async fn logged_in_client(app: &TestApp) -> reqwest::Client {
    let client = TestApp::client();
    let response = client
        .post(format!("{}/auth/login", app.base_url))
        .json(&json!({ "mail_address": "member@osdevgrp.local" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    client
}

#[tokio::test]
async fn test_manage_returns_household_with_members() {
    let app = TestApp::spawn(StubState::fully_progressed()).await;
    let client = logged_in_client(&app).await;

    let household_id = app.stub.lock().unwrap().household_id;
    let response = client
        .get(format!("{}/households/{household_id}", app.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let household: Value = response.json().await.unwrap();
    assert_eq!(household["name"], "Test Household");
    let members = household["household_members"].as_array().unwrap();
    assert_eq!(members.len(), 2);
    // The caller's own membership is never removable.
    assert_eq!(members[0]["mail_address"], "member@osdevgrp.local");
    assert_eq!(members[0]["removable"], false);
    assert_eq!(members[1]["removable"], true);
}

#[tokio::test]
async fn test_create_and_update_household() {
    let app = TestApp::spawn(StubState::fully_progressed()).await;
    let client = logged_in_client(&app).await;

    let created = client
        .post(format!("{}/households", app.base_url))
        .json(&json!({ "name": "New Household", "description": null }))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), 200);

    let household_id = app.stub.lock().unwrap().household_id;
    let updated = client
        .put(format!("{}/households/{household_id}", app.base_url))
        .json(&json!({ "name": "Renamed", "description": "now with a description" }))
        .send()
        .await
        .unwrap();
    assert_eq!(updated.status(), 200);
}

#[tokio::test]
async fn test_remove_other_member_succeeds() {
    let app = TestApp::spawn(StubState::fully_progressed()).await;
    let client = logged_in_client(&app).await;

    let household_id = app.stub.lock().unwrap().household_id;
    let response = client
        .delete(format!(
            "{}/households/{household_id}/members",
            app.base_url
        ))
        .json(&json!({ "mail_address": "other@osdevgrp.local" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_remove_yourself_is_refused_before_any_remote_call() {
    let app = TestApp::spawn(StubState::fully_progressed()).await;
    let client = logged_in_client(&app).await;

    let household_id = app.stub.lock().unwrap().household_id;
    let response = client
        .delete(format!(
            "{}/households/{household_id}/members",
            app.base_url
        ))
        .json(&json!({ "mail_address": "member@osdevgrp.local" }))
        .send()
        .await
        .unwrap();

    // The guard refuses locally; the client never sees the rule's wording.
    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Internal server error");
}

#[tokio::test]
async fn test_remove_unknown_member_is_not_found() {
    let app = TestApp::spawn(StubState::fully_progressed()).await;
    let client = logged_in_client(&app).await;

    let household_id = app.stub.lock().unwrap().household_id;
    let response = client
        .delete(format!(
            "{}/households/{household_id}/members",
            app.base_url
        ))
        .json(&json!({ "mail_address": "stranger@osdevgrp.local" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_business_fault_surfaces_with_its_message() {
    let app = TestApp::spawn(StubState::fully_progressed()).await;
    let client = logged_in_client(&app).await;

    app.inject_fault(
        "household-add",
        400,
        json!({
            "faultType": "BusinessFault",
            "message": "A household with that name already exists.",
            "details": null,
        }),
    );

    let response = client
        .post(format!("{}/households", app.base_url))
        .json(&json!({ "name": "Duplicate", "description": null }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "A household with that name already exists.");
}

#[tokio::test]
async fn test_repository_fault_is_hidden_behind_a_generic_message() {
    let app = TestApp::spawn(StubState::fully_progressed()).await;
    let client = logged_in_client(&app).await;

    app.inject_fault(
        "household-data-get",
        500,
        json!({
            "faultType": "RepositoryFault",
            "message": "SELECT failed: deadlock on Households",
            "details": "stack trace here",
        }),
    );

    let household_id = app.stub.lock().unwrap().household_id;
    let response = client
        .get(format!("{}/households/{household_id}", app.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 502);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "External service error");
    assert!(!body["error"].as_str().unwrap().contains("deadlock"));
}

#[tokio::test]
async fn test_sidebar_lists_household_identifications() {
    let app = TestApp::spawn(StubState::fully_progressed()).await;
    let client = logged_in_client(&app).await;

    let response = client
        .get(format!(
            "{}/sidebar/household-identification-collection",
            app.base_url
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let households: Value = response.json().await.unwrap();
    let list = households.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], "Test Household");
}

#[tokio::test]
async fn test_payment_is_an_explicit_stub() {
    let app = TestApp::spawn(StubState::fully_progressed()).await;
    let client = logged_in_client(&app).await;

    let response = client
        .post(format!("{}/payments/pay", app.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 501);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Payment is not implemented.");
}

#[tokio::test]
async fn test_readiness_probes_the_remote_service() {
    let app = TestApp::spawn(StubState::fully_progressed()).await;
    let client = TestApp::client();

    let response = client
        .get(format!("{}/health/ready", app.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}
