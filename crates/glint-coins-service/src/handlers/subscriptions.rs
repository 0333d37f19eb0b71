//! Subscription handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use glint_coins_core::{Subscription, SubscriptionStatus, SubscriptionTier, UserId};
use glint_coins_store::Store;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// Subscription tier response.
#[derive(Debug, Serialize)]
pub struct TierResponse {
    /// Tier ID.
    pub id: String,
    /// Creator user ID.
    pub creator_id: String,
    /// Display name.
    pub name: String,
    /// Price of one 30-day period in coins.
    pub monthly_price_coins: i64,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&SubscriptionTier> for TierResponse {
    fn from(tier: &SubscriptionTier) -> Self {
        Self {
            id: tier.id.to_string(),
            creator_id: tier.creator_id.to_string(),
            name: tier.name.clone(),
            monthly_price_coins: tier.monthly_price_coins,
            description: tier.description.clone(),
        }
    }
}

/// Subscription response.
#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    /// Subscription ID.
    pub id: String,
    /// Subscriber user ID.
    pub subscriber_id: String,
    /// Creator user ID.
    pub creator_id: String,
    /// Tier ID.
    pub tier_id: String,
    /// Status.
    pub status: SubscriptionStatus,
    /// Start of the paid period.
    pub current_period_start: String,
    /// End of the paid period.
    pub current_period_end: String,
}

impl From<&Subscription> for SubscriptionResponse {
    fn from(sub: &Subscription) -> Self {
        Self {
            id: sub.id.to_string(),
            subscriber_id: sub.subscriber_id.to_string(),
            creator_id: sub.creator_id.to_string(),
            tier_id: sub.tier_id.to_string(),
            status: sub.status,
            current_period_start: sub.current_period_start.to_rfc3339(),
            current_period_end: sub.current_period_end.to_rfc3339(),
        }
    }
}

/// Subscribe request.
#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    /// Creator to subscribe to.
    pub creator_id: String,
    /// Tier to purchase.
    pub tier_id: String,
}

/// Subscribe response.
#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    /// The recorded subscription.
    pub subscription: SubscriptionResponse,
    /// Subscriber's balance after payment.
    pub coin_balance: i64,
}

/// Purchase a subscription to a creator's tier.
pub async fn subscribe(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(body): Json<SubscribeRequest>,
) -> Result<Json<SubscribeResponse>, ApiError> {
    let creator_id: UserId = body
        .creator_id
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid creator ID".into()))?;
    let tier_id = body
        .tier_id
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid tier ID".into()))?;

    let exchange = state.store.subscribe(&auth.user_id, &creator_id, &tier_id)?;

    tracing::info!(
        subscription_id = %exchange.subscription.id,
        subscriber = %auth.user_id,
        creator = %creator_id,
        "Subscription purchased"
    );

    Ok(Json(SubscribeResponse {
        coin_balance: exchange.debit.balance_after,
        subscription: SubscriptionResponse::from(&exchange.subscription),
    }))
}

/// Subscription check response.
#[derive(Debug, Serialize)]
pub struct CheckSubscriptionResponse {
    /// Whether the caller has an active subscription to the creator.
    pub is_subscribed: bool,
}

/// Check whether the caller is subscribed to a creator.
///
/// "Subscribed" means the latest subscription's status is active; period
/// expiry is an administrative concern and is not evaluated here.
pub async fn check_subscription(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(creator_id): Path<String>,
) -> Result<Json<CheckSubscriptionResponse>, ApiError> {
    let creator_id: UserId = creator_id
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid creator ID".into()))?;

    let is_subscribed = state
        .store
        .get_subscription(&auth.user_id, &creator_id)?
        .is_some_and(|sub| sub.status == SubscriptionStatus::Active);

    Ok(Json(CheckSubscriptionResponse { is_subscribed }))
}

/// List a creator's active tiers, cheapest first.
pub async fn list_tiers(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    Path(creator_id): Path<String>,
) -> Result<Json<Vec<TierResponse>>, ApiError> {
    let creator_id: UserId = creator_id
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid creator ID".into()))?;

    let tiers = state.store.list_tiers_by_creator(&creator_id)?;
    Ok(Json(tiers.iter().map(TierResponse::from).collect()))
}
