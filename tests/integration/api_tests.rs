//! API integration tests
//!
//! These run against a live server with an empty database and the default
//! manager credentials.

use chrono::{Duration, Utc};
use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Unique suffix so repeated runs don't collide on usernames or dates
fn unique() -> i64 {
    Utc::now().timestamp_nanos_opt().unwrap_or_default() % 1_000_000_000
}

async fn create_visitor(client: &Client, username: &str, balance: &str) {
    let response = client
        .post(format!("{}/visitors", BASE_URL))
        .json(&json!({ "username": username, "balance": balance }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
}

async fn create_artefact(client: &Client, can_loan: bool) -> i64 {
    let response = client
        .post(format!("{}/artefacts", BASE_URL))
        .json(&json!({ "name": "Bronze mirror", "can_loan": can_loan }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No artefact ID")
}

async fn request_loan(client: &Client, username: &str, artefact_id: i64) -> reqwest::Response {
    client
        .post(format!("{}/loans", BASE_URL))
        .query(&[("username", username.to_string()), ("artefactId", artefact_id.to_string())])
        .send()
        .await
        .expect("Failed to send request")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_get_manager_hides_password() {
    let client = Client::new();

    let response = client
        .get(format!("{}/manager", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["username"].is_string());
    assert!(body.get("password").is_none());
}

#[tokio::test]
#[ignore]
async fn test_update_manager_password_wrong_old_password() {
    let client = Client::new();

    let response = client
        .put(format!("{}/manager", BASE_URL))
        .query(&[("oldPassword", "definitely-wrong"), ("newPassword", "another-password")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_loan_with_balance_rejected() {
    let client = Client::new();
    let username = format!("debtor{}", unique());
    create_visitor(&client, &username, "12.50").await;
    let artefact_id = create_artefact(&client, true).await;

    let response = request_loan(&client, &username, artefact_id).await;
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"]
        .as_str()
        .unwrap_or_default()
        .contains("outstanding balances"));
}

#[tokio::test]
#[ignore]
async fn test_sixth_loan_rejected() {
    let client = Client::new();
    let username = format!("collector{}", unique());
    create_visitor(&client, &username, "0").await;

    for _ in 0..5 {
        let artefact_id = create_artefact(&client, true).await;
        let response = request_loan(&client, &username, artefact_id).await;
        assert_eq!(response.status(), 201);
    }

    let artefact_id = create_artefact(&client, true).await;
    let response = request_loan(&client, &username, artefact_id).await;
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"]
        .as_str()
        .unwrap_or_default()
        .contains("more than 5 items"));
}

#[tokio::test]
#[ignore]
async fn test_approve_then_decline_lifecycle() {
    let client = Client::new();
    let username = format!("visitor{}", unique());
    create_visitor(&client, &username, "0").await;

    // Make sure an open day exists past the loan period
    let due = Utc::now().date_naive() + Duration::days(30 + unique() % 300);
    let _ = client
        .post(format!("{}/open-days", BASE_URL))
        .json(&json!({ "date": due }))
        .send()
        .await
        .expect("Failed to send request");

    // Approve a first loan
    let artefact_id = create_artefact(&client, true).await;
    let response = request_loan(&client, &username, artefact_id).await;
    assert_eq!(response.status(), 201);
    let loan: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(loan["status"], "Pending");
    let loan_id = loan["id"].as_i64().expect("No loan ID");

    let response = client
        .put(format!("{}/loans/{}", BASE_URL, loan_id))
        .query(&[("status", "Approved")])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);
    let approved: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(approved["status"], "Approved");
    assert!(approved["dueDate"].is_string());

    let response = client
        .get(format!("{}/loans", BASE_URL))
        .query(&[("status", "Approved")])
        .send()
        .await
        .expect("Failed to send request");
    let loans: Value = response.json().await.expect("Failed to parse response");
    assert!(loans
        .as_array()
        .expect("Expected an array")
        .iter()
        .any(|l| l["id"].as_i64() == Some(loan_id)));

    // Decline a second loan, which removes it
    let artefact_id = create_artefact(&client, true).await;
    let response = request_loan(&client, &username, artefact_id).await;
    let loan: Value = response.json().await.expect("Failed to parse response");
    let declined_id = loan["id"].as_i64().expect("No loan ID");

    let response = client
        .put(format!("{}/loans/{}", BASE_URL, declined_id))
        .query(&[("status", "Declined")])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    let response = client
        .get(format!("{}/loans/{}", BASE_URL, declined_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);

    // Only this visitor's loans come back
    let response = client
        .get(format!("{}/visitors/{}/loans", BASE_URL, username))
        .send()
        .await
        .expect("Failed to send request");
    let loans: Value = response.json().await.expect("Failed to parse response");
    let loans = loans.as_array().expect("Expected an array");
    assert_eq!(loans.len(), 1);
    assert_eq!(loans[0]["username"], username.as_str());
}

#[tokio::test]
#[ignore]
async fn test_pending_status_rejected() {
    let client = Client::new();
    let username = format!("pending{}", unique());
    create_visitor(&client, &username, "0").await;
    let artefact_id = create_artefact(&client, true).await;

    let response = request_loan(&client, &username, artefact_id).await;
    let loan: Value = response.json().await.expect("Failed to parse response");
    let loan_id = loan["id"].as_i64().expect("No loan ID");

    let response = client
        .put(format!("{}/loans/{}", BASE_URL, loan_id))
        .query(&[("status", "Pending")])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_multiple_loan_filters_rejected() {
    let client = Client::new();

    let response = client
        .get(format!("{}/loans", BASE_URL))
        .query(&[("status", "Approved"), ("username", "someone")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}
