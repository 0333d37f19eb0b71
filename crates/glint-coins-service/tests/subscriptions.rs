//! Subscription integration tests.

mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Duration, Utc};
use common::TestHarness;
use glint_coins_core::UserId;
use serde_json::json;

#[tokio::test]
async fn subscribe_moves_coins_and_records_period() {
    let harness = TestHarness::new();
    let creator = UserId::generate();
    let tier_id = harness.seed_tier(&creator, 50).await;

    harness.grant(&harness.test_user_id, 50).await;

    let response = harness
        .server
        .post("/v1/subscriptions/subscribe")
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({
            "creator_id": creator.to_string(),
            "tier_id": tier_id
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["coin_balance"], 0);
    assert_eq!(body["subscription"]["status"], "active");

    let start: DateTime<Utc> = body["subscription"]["current_period_start"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();
    let end: DateTime<Utc> = body["subscription"]["current_period_end"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();
    assert_eq!(end - start, Duration::days(30));

    // Creator got paid.
    let response = harness
        .server
        .get("/v1/wallet")
        .add_header("authorization", TestHarness::auth_header_for(&creator))
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["coin_balance"], 50);
}

#[tokio::test]
async fn check_subscription_flips_after_subscribe() {
    let harness = TestHarness::new();
    let creator = UserId::generate();
    let tier_id = harness.seed_tier(&creator, 50).await;

    harness.grant(&harness.test_user_id, 50).await;

    let check_url = format!("/v1/subscriptions/check/{creator}");

    let response = harness
        .server
        .get(&check_url)
        .add_header("authorization", harness.user_auth_header())
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["is_subscribed"], false);

    harness
        .server
        .post("/v1/subscriptions/subscribe")
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({
            "creator_id": creator.to_string(),
            "tier_id": tier_id
        }))
        .await
        .assert_status_ok();

    let response = harness
        .server
        .get(&check_url)
        .add_header("authorization", harness.user_auth_header())
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["is_subscribed"], true);
}

#[tokio::test]
async fn subscribe_insufficient_coins_is_402() {
    let harness = TestHarness::new();
    let creator = UserId::generate();
    let tier_id = harness.seed_tier(&creator, 50).await;

    harness.grant(&harness.test_user_id, 10).await;

    let response = harness
        .server
        .post("/v1/subscriptions/subscribe")
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({
            "creator_id": creator.to_string(),
            "tier_id": tier_id
        }))
        .await;

    response.assert_status(StatusCode::PAYMENT_REQUIRED);

    // Nothing moved.
    let response = harness
        .server
        .get("/v1/wallet")
        .add_header("authorization", harness.user_auth_header())
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["coin_balance"], 10);
}

#[tokio::test]
async fn subscribe_twice_is_conflict() {
    let harness = TestHarness::new();
    let creator = UserId::generate();
    let tier_id = harness.seed_tier(&creator, 50).await;

    harness.grant(&harness.test_user_id, 200).await;

    let request = json!({
        "creator_id": creator.to_string(),
        "tier_id": tier_id
    });

    harness
        .server
        .post("/v1/subscriptions/subscribe")
        .add_header("authorization", harness.user_auth_header())
        .json(&request)
        .await
        .assert_status_ok();

    let response = harness
        .server
        .post("/v1/subscriptions/subscribe")
        .add_header("authorization", harness.user_auth_header())
        .json(&request)
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn subscribe_unknown_tier_is_404() {
    let harness = TestHarness::new();
    let creator = UserId::generate();

    harness.grant(&harness.test_user_id, 200).await;

    let response = harness
        .server
        .post("/v1/subscriptions/subscribe")
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({
            "creator_id": creator.to_string(),
            "tier_id": glint_coins_core::TierId::generate().to_string()
        }))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn tiers_listed_for_creator() {
    let harness = TestHarness::new();
    let creator = UserId::generate();
    harness.seed_tier(&creator, 50).await;

    let response = harness
        .server
        .get(&format!("/v1/subscriptions/tiers/{creator}"))
        .add_header("authorization", harness.user_auth_header())
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let tiers = body.as_array().unwrap();
    assert_eq!(tiers.len(), 1);
    assert_eq!(tiers[0]["monthly_price_coins"], 50);
}
