//! Gift and tip integration tests.

mod common;

use axum::http::StatusCode;
use common::TestHarness;
use glint_coins_core::{GiftTypeId, UserId};
use serde_json::json;

// ============================================================================
// Catalog
// ============================================================================

#[tokio::test]
async fn catalog_lists_seeded_gift_types() {
    let harness = TestHarness::new();
    harness.seed_gift_type("Rose", 20).await;

    let response = harness
        .server
        .get("/v1/gifts/catalog")
        .add_header("authorization", harness.user_auth_header())
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let catalog = body.as_array().unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog[0]["name"], "Rose");
    assert_eq!(catalog[0]["coin_cost"], 20);
}

// ============================================================================
// Sending
// ============================================================================

#[tokio::test]
async fn send_gift_moves_coins_between_wallets() {
    let harness = TestHarness::new();
    let recipient = UserId::generate();
    let gift_type_id = harness.seed_gift_type("Rose", 20).await;

    harness.grant(&harness.test_user_id, 100).await;

    let response = harness
        .server
        .post("/v1/gifts/send")
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({
            "recipient_id": recipient.to_string(),
            "gift_type_id": gift_type_id,
            "quantity": 2,
            "message": "congrats!"
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["gift"]["total_coins"], 40);
    assert_eq!(body["gift"]["quantity"], 2);
    assert_eq!(body["coin_balance"], 60);

    // Recipient's wallet was credited.
    let response = harness
        .server
        .get("/v1/wallet")
        .add_header("authorization", TestHarness::auth_header_for(&recipient))
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["coin_balance"], 40);
}

#[tokio::test]
async fn send_gift_insufficient_coins_is_402() {
    let harness = TestHarness::new();
    let recipient = UserId::generate();
    let gift_type_id = harness.seed_gift_type("Diamond", 500).await;

    harness.grant(&harness.test_user_id, 100).await;

    let response = harness
        .server
        .post("/v1/gifts/send")
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({
            "recipient_id": recipient.to_string(),
            "gift_type_id": gift_type_id
        }))
        .await;

    response.assert_status(StatusCode::PAYMENT_REQUIRED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "insufficient_coins");
    assert_eq!(body["error"]["details"]["balance"], 100);
    assert_eq!(body["error"]["details"]["required"], 500);

    // Sender's balance untouched, recipient has no wallet activity.
    let response = harness
        .server
        .get("/v1/wallet")
        .add_header("authorization", harness.user_auth_header())
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["coin_balance"], 100);

    let response = harness
        .server
        .get("/v1/gifts/received")
        .add_header("authorization", TestHarness::auth_header_for(&recipient))
        .await;
    let body: serde_json::Value = response.json();
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn send_gift_unknown_type_is_404() {
    let harness = TestHarness::new();
    let recipient = UserId::generate();

    harness.grant(&harness.test_user_id, 100).await;

    let response = harness
        .server
        .post("/v1/gifts/send")
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({
            "recipient_id": recipient.to_string(),
            "gift_type_id": GiftTypeId::generate().to_string()
        }))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn send_gift_invalid_recipient_is_400() {
    let harness = TestHarness::new();
    let gift_type_id = harness.seed_gift_type("Rose", 20).await;

    let response = harness
        .server
        .post("/v1/gifts/send")
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({
            "recipient_id": "not-a-uuid",
            "gift_type_id": gift_type_id
        }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn send_gift_to_self_is_400() {
    let harness = TestHarness::new();
    let gift_type_id = harness.seed_gift_type("Rose", 20).await;

    harness.grant(&harness.test_user_id, 100).await;

    let response = harness
        .server
        .post("/v1/gifts/send")
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({
            "recipient_id": harness.test_user_id.to_string(),
            "gift_type_id": gift_type_id
        }))
        .await;

    response.assert_status_bad_request();
}

// ============================================================================
// Received view
// ============================================================================

#[tokio::test]
async fn received_gifts_are_joined_to_catalog() {
    let harness = TestHarness::new();
    let recipient = UserId::generate();
    let gift_type_id = harness.seed_gift_type("Rose", 20).await;

    harness.grant(&harness.test_user_id, 100).await;

    harness
        .server
        .post("/v1/gifts/send")
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({
            "recipient_id": recipient.to_string(),
            "gift_type_id": gift_type_id,
            "context_type": "stream",
            "context_id": "stream-1"
        }))
        .await
        .assert_status_ok();

    let response = harness
        .server
        .get("/v1/gifts/received")
        .add_header("authorization", TestHarness::auth_header_for(&recipient))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let received = body.as_array().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0]["gift_name"], "Rose");
    assert_eq!(received[0]["total_coins"], 20);
    assert_eq!(received[0]["sender_id"], harness.test_user_id.to_string());
}

// ============================================================================
// Tips
// ============================================================================

#[tokio::test]
async fn tip_moves_coins() {
    let harness = TestHarness::new();
    let recipient = UserId::generate();

    harness.grant(&harness.test_user_id, 100).await;

    let response = harness
        .server
        .post("/v1/tips/send")
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({
            "recipient_id": recipient.to_string(),
            "amount": 25,
            "context_type": "stream",
            "context_id": "stream-1"
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["amount"], 25);
    assert_eq!(body["coin_balance"], 75);

    let response = harness
        .server
        .get("/v1/wallet")
        .add_header("authorization", TestHarness::auth_header_for(&recipient))
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["coin_balance"], 25);
}

#[tokio::test]
async fn tip_rejects_non_positive_amount() {
    let harness = TestHarness::new();
    let recipient = UserId::generate();

    let response = harness
        .server
        .post("/v1/tips/send")
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({
            "recipient_id": recipient.to_string(),
            "amount": 0
        }))
        .await;

    response.assert_status_bad_request();
}
