//! Common test utilities for coins-service integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use serde_json::json;
use tempfile::TempDir;

use glint_coins_core::UserId;
use glint_coins_service::{create_router, AppState, ServiceConfig};
use glint_coins_store::RocksStore;

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Temporary directory for the database (kept alive for test duration).
    pub _temp_dir: TempDir,
    /// A test user ID for authenticated requests.
    pub test_user_id: UserId,
    /// The service API key for admin requests.
    pub service_api_key: String,
}

impl TestHarness {
    /// Create a new test harness with a fresh database, in dev auth mode.
    pub fn new() -> Self {
        Self::with_auth_secret(None)
    }

    /// Create a harness with a configured JWT secret.
    pub fn with_auth_secret(auth_secret: Option<String>) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = RocksStore::open(temp_dir.path()).expect("Failed to open store");

        let service_api_key = "test-service-key".to_string();

        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            data_dir: temp_dir.path().to_string_lossy().to_string(),
            auth_secret,
            auth_audience: "glint-coins".into(),
            service_api_key: Some(service_api_key.clone()),
            push_api_url: None,
            push_api_key: None,
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
        };

        let state = AppState::new(Arc::new(store), config);
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");
        let test_user_id = UserId::generate();

        Self {
            server,
            _temp_dir: temp_dir,
            test_user_id,
            service_api_key,
        }
    }

    /// Get the authorization header for the default test user.
    pub fn user_auth_header(&self) -> String {
        format!("Bearer test-token:{}", self.test_user_id)
    }

    /// Get the authorization header for a specific user.
    pub fn auth_header_for(user_id: &UserId) -> String {
        format!("Bearer test-token:{user_id}")
    }

    /// Grant coins to a user through the admin endpoint.
    pub async fn grant(&self, user_id: &UserId, amount: i64) {
        self.server
            .post("/v1/admin/grant")
            .add_header("x-api-key", self.service_api_key.clone())
            .json(&json!({
                "user_id": user_id.to_string(),
                "amount": amount,
                "reason": "test grant"
            }))
            .await
            .assert_status_ok();
    }

    /// Create a gift catalog entry, returning its id.
    pub async fn seed_gift_type(&self, name: &str, coin_cost: i64) -> String {
        let response = self
            .server
            .post("/v1/admin/gift-types")
            .add_header("x-api-key", self.service_api_key.clone())
            .json(&json!({
                "name": name,
                "coin_cost": coin_cost,
                "category": "classic"
            }))
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        body["id"].as_str().expect("gift type id").to_string()
    }

    /// Create a subscription tier, returning its id.
    pub async fn seed_tier(&self, creator_id: &UserId, price: i64) -> String {
        let response = self
            .server
            .post("/v1/admin/tiers")
            .add_header("x-api-key", self.service_api_key.clone())
            .json(&json!({
                "creator_id": creator_id.to_string(),
                "name": "Supporter",
                "monthly_price_coins": price
            }))
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        body["id"].as_str().expect("tier id").to_string()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
