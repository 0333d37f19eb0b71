//! Authentication integration tests for the JWT path.

mod common;

use chrono::{Duration, Utc};
use common::TestHarness;
use jsonwebtoken::{encode, EncodingKey, Header};

use glint_coins_core::UserId;
use glint_coins_service::auth::JwtClaims;

const SECRET: &str = "integration-test-secret";

fn mint_token(user_id: &UserId, audience: &str, secret: &str) -> String {
    let now = Utc::now();
    let claims = JwtClaims {
        sub: user_id.to_string(),
        aud: audience.to_string(),
        iss: "glint-id".to_string(),
        exp: (now + Duration::hours(1)).timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to encode token")
}

#[tokio::test]
async fn valid_jwt_is_accepted() {
    let harness = TestHarness::with_auth_secret(Some(SECRET.into()));
    let token = mint_token(&harness.test_user_id, "glint-coins", SECRET);

    let response = harness
        .server
        .get("/v1/wallet")
        .add_header("authorization", format!("Bearer {token}"))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["user_id"], harness.test_user_id.to_string());
}

#[tokio::test]
async fn jwt_with_wrong_secret_is_rejected() {
    let harness = TestHarness::with_auth_secret(Some(SECRET.into()));
    let token = mint_token(&harness.test_user_id, "glint-coins", "some-other-secret");

    let response = harness
        .server
        .get("/v1/wallet")
        .add_header("authorization", format!("Bearer {token}"))
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn jwt_with_wrong_audience_is_rejected() {
    let harness = TestHarness::with_auth_secret(Some(SECRET.into()));
    let token = mint_token(&harness.test_user_id, "some-other-service", SECRET);

    let response = harness
        .server
        .get("/v1/wallet")
        .add_header("authorization", format!("Bearer {token}"))
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_token_is_rejected_when_secret_configured() {
    let harness = TestHarness::with_auth_secret(Some(SECRET.into()));

    let response = harness
        .server
        .get("/v1/wallet")
        .add_header("authorization", harness.user_auth_header())
        .await;

    response.assert_status_unauthorized();
}
