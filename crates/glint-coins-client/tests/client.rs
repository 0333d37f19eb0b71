//! Client SDK integration tests against a mock server.

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use glint_coins_client::{ClientError, GlintCoinsClient, SendGiftRequest};

#[tokio::test]
async fn get_wallet_parses_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/wallet"))
        .and(header("authorization", "Bearer user-jwt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "user_id": "6a2f1c8e-0d4b-4f3a-9a61-2f9f65b3f111",
            "coin_balance": 250,
            "lifetime_earned": 300,
            "lifetime_spent": 50,
            "created_at": "2026-01-01T00:00:00Z"
        })))
        .mount(&server)
        .await;

    let client = GlintCoinsClient::new(server.uri(), "service-key");
    let wallet = client.get_wallet("user-jwt").await.unwrap();

    assert_eq!(wallet.coin_balance, 250);
    assert_eq!(wallet.lifetime_spent, 50);
}

#[tokio::test]
async fn grant_coins_sends_api_key() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/admin/grant"))
        .and(header("x-api-key", "service-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "coin_balance": 500,
            "transaction_id": "01JGQZV5M5T6Q0N3Y4W8R9XKAB"
        })))
        .mount(&server)
        .await;

    let client = GlintCoinsClient::new(server.uri(), "service-key");
    let response = client
        .grant_coins("6a2f1c8e-0d4b-4f3a-9a61-2f9f65b3f111", 500, "promo")
        .await
        .unwrap();

    assert_eq!(response.coin_balance, 500);
}

#[tokio::test]
async fn insufficient_coins_is_typed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/gifts/send"))
        .respond_with(ResponseTemplate::new(402).set_body_json(serde_json::json!({
            "error": {
                "code": "insufficient_coins",
                "message": "insufficient coins: balance=10, required=40",
                "details": { "balance": 10, "required": 40 }
            }
        })))
        .mount(&server)
        .await;

    let client = GlintCoinsClient::new(server.uri(), "service-key");
    let result = client
        .send_gift(
            "user-jwt",
            SendGiftRequest {
                recipient_id: "6a2f1c8e-0d4b-4f3a-9a61-2f9f65b3f111".into(),
                gift_type_id: "b55f6a97-4f3a-42e1-8f25-3f6f9a0c2222".into(),
                quantity: Some(2),
                context_type: None,
                context_id: None,
                message: None,
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(ClientError::InsufficientCoins {
            balance: 10,
            required: 40
        })
    ));
}

#[tokio::test]
async fn not_found_is_typed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/subscriptions/check/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "error": {
                "code": "not_found",
                "message": "tier not found: missing"
            }
        })))
        .mount(&server)
        .await;

    let client = GlintCoinsClient::new(server.uri(), "service-key");
    let result = client.check_subscription("user-jwt", "missing").await;

    assert!(matches!(result, Err(ClientError::NotFound { .. })));
}

#[tokio::test]
async fn unparseable_error_falls_back_to_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/wallet"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = GlintCoinsClient::new(server.uri(), "service-key");
    let result = client.get_wallet("user-jwt").await;

    match result {
        Err(ClientError::Api { code, status, .. }) => {
            assert_eq!(code, "unknown");
            assert_eq!(status, 500);
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}
