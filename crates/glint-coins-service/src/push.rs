//! Push gateway client.
//!
//! A thin client for the platform's push-notification gateway. Exchange
//! handlers use it to notify recipients after a gift or tip commits; sends
//! are best-effort and never affect the exchange result.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;

use glint_coins_core::UserId;

/// Error type for push operations.
#[derive(Debug, thiserror::Error)]
pub enum PushError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway returned an error.
    #[error("push gateway error: {status} - {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },
}

/// Push notification payload.
#[derive(Debug, Serialize)]
struct PushMessage<'a> {
    to: String,
    title: &'a str,
    body: &'a str,
    data: serde_json::Value,
}

/// Push gateway API client.
#[derive(Debug, Clone)]
pub struct PushClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl PushClient {
    /// Create a new push client.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built (should not happen with
    /// default settings).
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Send a notification to a user.
    pub async fn notify(
        &self,
        to: &UserId,
        title: &str,
        body: &str,
        data: serde_json::Value,
    ) -> Result<(), PushError> {
        let url = format!("{}/v1/push/send", self.base_url);
        let message = PushMessage {
            to: to.to_string(),
            title,
            body,
            data,
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&message)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(PushError::Api { status, body });
        }

        Ok(())
    }
}
