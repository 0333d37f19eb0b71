//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{admin, gifts, health, subscriptions, tips, wallet};
use crate::state::AppState;

// ============================================================================
// Concurrency Limiting Constants
// ============================================================================

/// Maximum concurrent requests for exchange endpoints (gifts, tips,
/// subscriptions). These mutate two wallets each and serialize inside the
/// store, so bounding admission keeps queueing out of the storage layer.
const EXCHANGE_MAX_CONCURRENT_REQUESTS: usize = 100;

/// Maximum concurrent requests for general API endpoints.
const API_MAX_CONCURRENT_REQUESTS: usize = 50;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
///
/// ## Wallet (JWT auth)
/// - `GET /v1/wallet` - Get (or lazily create) the caller's wallet
/// - `GET /v1/wallet/transactions` - List ledger history
/// - `POST /v1/wallet/add-coins` - Purchase coins
///
/// ## Gifts & tips (JWT auth)
/// - `GET /v1/gifts/catalog` - List active gift types
/// - `POST /v1/gifts/send` - Send a gift
/// - `GET /v1/gifts/received` - List received gifts
/// - `POST /v1/tips/send` - Send a tip
///
/// ## Subscriptions (JWT auth)
/// - `POST /v1/subscriptions/subscribe` - Purchase a subscription
/// - `GET /v1/subscriptions/check/:creator_id` - Check subscription status
/// - `GET /v1/subscriptions/tiers/:creator_id` - List a creator's tiers
///
/// ## Admin (Service API key auth)
/// - `POST /v1/admin/gift-types` - Create a gift catalog entry
/// - `POST /v1/admin/tiers` - Create a subscription tier
/// - `POST /v1/admin/grant` - Grant bonus coins
pub fn create_router(state: AppState) -> Router {
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    // Exchange endpoints get their own admission limit on top of the general
    // API limit.
    let exchange_routes = Router::new()
        .route("/gifts/send", post(gifts::send_gift))
        .route("/tips/send", post(tips::send_tip))
        .route("/subscriptions/subscribe", post(subscriptions::subscribe))
        .layer(ConcurrencyLimitLayer::new(EXCHANGE_MAX_CONCURRENT_REQUESTS));

    let api_routes = Router::new()
        // Wallet
        .route("/wallet", get(wallet::get_wallet))
        .route("/wallet/transactions", get(wallet::list_transactions))
        .route("/wallet/add-coins", post(wallet::add_coins))
        // Gifts
        .route("/gifts/catalog", get(gifts::list_catalog))
        .route("/gifts/received", get(gifts::list_received))
        // Subscriptions
        .route(
            "/subscriptions/check/:creator_id",
            get(subscriptions::check_subscription),
        )
        .route(
            "/subscriptions/tiers/:creator_id",
            get(subscriptions::list_tiers),
        )
        // Admin
        .route("/admin/gift-types", post(admin::create_gift_type))
        .route("/admin/tiers", post(admin::create_tier))
        .route("/admin/grant", post(admin::grant_coins))
        // Exchange routes (with their own concurrency limit)
        .merge(exchange_routes)
        .layer(ConcurrencyLimitLayer::new(API_MAX_CONCURRENT_REQUESTS));

    Router::new()
        // Health (public, no rate limit)
        .route("/health", get(health::health))
        // API v1 routes (rate limited)
        .nest("/v1", api_routes)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
