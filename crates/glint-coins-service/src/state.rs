//! Application state.

use std::sync::Arc;

use glint_coins_store::RocksStore;

use crate::config::ServiceConfig;
use crate::push::PushClient;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The storage backend.
    pub store: Arc<RocksStore>,

    /// Service configuration.
    pub config: ServiceConfig,

    /// Push gateway client for recipient notifications (optional).
    pub push: Option<Arc<PushClient>>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(store: Arc<RocksStore>, config: ServiceConfig) -> Self {
        let push = config
            .push_api_url
            .as_ref()
            .zip(config.push_api_key.as_ref())
            .map(|(url, key)| {
                tracing::info!(push_url = %url, "Push gateway enabled");
                Arc::new(PushClient::new(url, key))
            });

        if push.is_none() {
            tracing::warn!("Push gateway not configured - recipients will not be notified");
        }

        if config.auth_secret.is_none() {
            tracing::warn!("AUTH_SECRET not set - accepting test tokens (dev mode)");
        }

        Self {
            store,
            config,
            push,
        }
    }

    /// Check if the push gateway is configured.
    #[must_use]
    pub fn has_push(&self) -> bool {
        self.push.is_some()
    }
}
