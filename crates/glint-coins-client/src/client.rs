//! Coins HTTP client implementation.

use reqwest::Client;
use std::time::Duration;

use crate::error::ClientError;
use crate::types::{
    ApiErrorResponse, CheckSubscriptionResponse, GiftTypeResponse, GrantCoinsResponse,
    ReceivedGiftResponse, SendGiftRequest, SendGiftResponse, SendTipRequest, SendTipResponse,
    SubscribeResponse, TransactionListResponse, WalletResponse,
};

/// Coins API client.
///
/// Service-authenticated methods (grants) use the configured API key;
/// user-scoped methods take the user's JWT per call.
#[derive(Debug, Clone)]
pub struct GlintCoinsClient {
    client: Client,
    base_url: String,
    api_key: String,
    service_name: String,
}

impl GlintCoinsClient {
    /// Create a new coins client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the coins service (e.g., `"http://glint-coins:8080"`)
    /// * `api_key` - Service API key for authentication
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_options(base_url, api_key, ClientOptions::default())
    }

    /// Create a new coins client with custom options.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built (should not happen with default settings).
    #[must_use]
    pub fn with_options(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        options: ClientOptions,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            service_name: options.service_name,
        }
    }

    /// Grant bonus coins to a user (service auth).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn grant_coins(
        &self,
        user_id: impl Into<String>,
        amount: i64,
        reason: impl Into<String>,
    ) -> Result<GrantCoinsResponse, ClientError> {
        let url = format!("{}/v1/admin/grant", self.base_url);
        let body = serde_json::json!({
            "user_id": user_id.into(),
            "amount": amount,
            "reason": reason.into(),
        });

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("x-service-name", &self.service_name)
            .json(&body)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Get a user's wallet (requires user JWT, not service API key).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn get_wallet(&self, user_jwt: &str) -> Result<WalletResponse, ClientError> {
        let url = format!("{}/v1/wallet", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("authorization", format!("Bearer {user_jwt}"))
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// List a user's ledger history, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn list_transactions(
        &self,
        user_jwt: &str,
        limit: usize,
        offset: usize,
    ) -> Result<TransactionListResponse, ClientError> {
        let url = format!(
            "{}/v1/wallet/transactions?limit={limit}&offset={offset}",
            self.base_url
        );

        let response = self
            .client
            .get(&url)
            .header("authorization", format!("Bearer {user_jwt}"))
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// List the active gift catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn list_gift_types(
        &self,
        user_jwt: &str,
    ) -> Result<Vec<GiftTypeResponse>, ClientError> {
        let url = format!("{}/v1/gifts/catalog", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("authorization", format!("Bearer {user_jwt}"))
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Send a gift on behalf of a user.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InsufficientCoins` if the user cannot pay, or
    /// another error if the request fails.
    pub async fn send_gift(
        &self,
        user_jwt: &str,
        request: SendGiftRequest,
    ) -> Result<SendGiftResponse, ClientError> {
        let url = format!("{}/v1/gifts/send", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("authorization", format!("Bearer {user_jwt}"))
            .json(&request)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// List gifts received by a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn list_received_gifts(
        &self,
        user_jwt: &str,
        limit: usize,
    ) -> Result<Vec<ReceivedGiftResponse>, ClientError> {
        let url = format!("{}/v1/gifts/received?limit={limit}", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("authorization", format!("Bearer {user_jwt}"))
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Send a tip on behalf of a user.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InsufficientCoins` if the user cannot pay, or
    /// another error if the request fails.
    pub async fn send_tip(
        &self,
        user_jwt: &str,
        request: SendTipRequest,
    ) -> Result<SendTipResponse, ClientError> {
        let url = format!("{}/v1/tips/send", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("authorization", format!("Bearer {user_jwt}"))
            .json(&request)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Purchase a subscription on behalf of a user.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InsufficientCoins` if the user cannot pay, or
    /// another error if the request fails.
    pub async fn subscribe(
        &self,
        user_jwt: &str,
        creator_id: impl Into<String>,
        tier_id: impl Into<String>,
    ) -> Result<SubscribeResponse, ClientError> {
        let url = format!("{}/v1/subscriptions/subscribe", self.base_url);
        let body = serde_json::json!({
            "creator_id": creator_id.into(),
            "tier_id": tier_id.into(),
        });

        let response = self
            .client
            .post(&url)
            .header("authorization", format!("Bearer {user_jwt}"))
            .json(&body)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Check whether a user has an active subscription to a creator.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn check_subscription(
        &self,
        user_jwt: &str,
        creator_id: &str,
    ) -> Result<CheckSubscriptionResponse, ClientError> {
        let url = format!("{}/v1/subscriptions/check/{creator_id}", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("authorization", format!("Bearer {user_jwt}"))
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        tracing::debug!(status = %status, "Coins API returned an error");

        // Try to parse error response
        let error_body: Result<ApiErrorResponse, _> = response.json().await;

        match error_body {
            Ok(api_error) => {
                let code = api_error.error.code.as_str();
                let message = api_error.error.message;

                // Map specific error codes to typed errors
                match code {
                    "insufficient_coins" => {
                        let balance = api_error
                            .error
                            .details
                            .as_ref()
                            .and_then(|d| d.get("balance"))
                            .and_then(serde_json::Value::as_i64)
                            .unwrap_or(0);
                        let required = api_error
                            .error
                            .details
                            .as_ref()
                            .and_then(|d| d.get("required"))
                            .and_then(serde_json::Value::as_i64)
                            .unwrap_or(0);

                        Err(ClientError::InsufficientCoins { balance, required })
                    }
                    "not_found" => Err(ClientError::NotFound { message }),
                    _ => Err(ClientError::Api {
                        code: code.to_string(),
                        message,
                        status: status.as_u16(),
                    }),
                }
            }
            Err(_) => Err(ClientError::Api {
                code: "unknown".to_string(),
                message: format!("HTTP {status}"),
                status: status.as_u16(),
            }),
        }
    }
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
    /// Service name to include in requests.
    pub service_name: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            service_name: "unknown".to_string(),
        }
    }
}

impl ClientOptions {
    /// Create options with a service name.
    #[must_use]
    pub fn with_service_name(name: impl Into<String>) -> Self {
        Self {
            service_name: name.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let client = GlintCoinsClient::new("http://localhost:8080", "test-api-key");
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn client_trims_trailing_slash() {
        let client = GlintCoinsClient::new("http://localhost:8080/", "test-api-key");
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn client_options() {
        let options = ClientOptions::with_service_name("glint-streaming");
        let client = GlintCoinsClient::with_options("http://localhost:8080", "key", options);
        assert_eq!(client.service_name, "glint-streaming");
    }
}
