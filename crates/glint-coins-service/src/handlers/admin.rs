//! Admin handlers: catalog management, tier management, and coin grants.
//!
//! All routes here require service API-key authentication.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use glint_coins_core::{GiftType, GiftTypeId, SubscriptionTier, TierId, TransactionKind, UserId};
use glint_coins_store::Store;

use crate::auth::ServiceAuth;
use crate::error::ApiError;
use crate::handlers::gifts::GiftTypeResponse;
use crate::handlers::subscriptions::TierResponse;
use crate::state::AppState;

/// Create gift type request.
#[derive(Debug, Deserialize)]
pub struct CreateGiftTypeRequest {
    /// Display name.
    pub name: String,
    /// Cost per unit in coins.
    pub coin_cost: i64,
    /// Catalog category.
    pub category: String,
    /// Icon asset reference.
    pub icon: Option<String>,
    /// Ordering within the catalog (default: 0).
    pub sort_order: Option<i32>,
}

/// Create a gift catalog entry.
pub async fn create_gift_type(
    State(state): State<Arc<AppState>>,
    auth: ServiceAuth,
    Json(body): Json<CreateGiftTypeRequest>,
) -> Result<Json<GiftTypeResponse>, ApiError> {
    if body.name.trim().is_empty() {
        return Err(ApiError::BadRequest("Name must not be empty".into()));
    }
    if body.coin_cost <= 0 {
        return Err(ApiError::BadRequest("Coin cost must be positive".into()));
    }

    let gift_type = GiftType {
        id: GiftTypeId::generate(),
        name: body.name,
        coin_cost: body.coin_cost,
        category: body.category,
        icon: body.icon,
        sort_order: body.sort_order.unwrap_or(0),
        is_active: true,
        created_at: Utc::now(),
    };

    state.store.put_gift_type(&gift_type)?;

    tracing::info!(
        service = %auth.service_name,
        gift_type_id = %gift_type.id,
        name = %gift_type.name,
        coin_cost = %gift_type.coin_cost,
        "Gift type created"
    );

    Ok(Json(GiftTypeResponse::from(&gift_type)))
}

/// Create tier request.
#[derive(Debug, Deserialize)]
pub struct CreateTierRequest {
    /// Creator the tier belongs to.
    pub creator_id: String,
    /// Display name.
    pub name: String,
    /// Price of one 30-day period in coins.
    pub monthly_price_coins: i64,
    /// Description shown to subscribers.
    pub description: Option<String>,
}

/// Create a subscription tier.
pub async fn create_tier(
    State(state): State<Arc<AppState>>,
    auth: ServiceAuth,
    Json(body): Json<CreateTierRequest>,
) -> Result<Json<TierResponse>, ApiError> {
    let creator_id: UserId = body
        .creator_id
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid creator ID".into()))?;

    if body.name.trim().is_empty() {
        return Err(ApiError::BadRequest("Name must not be empty".into()));
    }
    if body.monthly_price_coins <= 0 {
        return Err(ApiError::BadRequest("Price must be positive".into()));
    }

    let tier = SubscriptionTier {
        id: TierId::generate(),
        creator_id,
        name: body.name,
        monthly_price_coins: body.monthly_price_coins,
        description: body.description,
        is_active: true,
        created_at: Utc::now(),
    };

    state.store.put_tier(&tier)?;

    tracing::info!(
        service = %auth.service_name,
        tier_id = %tier.id,
        creator = %creator_id,
        price = %tier.monthly_price_coins,
        "Tier created"
    );

    Ok(Json(TierResponse::from(&tier)))
}

/// Grant coins request.
#[derive(Debug, Deserialize)]
pub struct GrantCoinsRequest {
    /// User ID to grant coins to.
    pub user_id: String,
    /// Amount of coins.
    pub amount: i64,
    /// Reason for the grant.
    pub reason: String,
}

/// Grant coins response.
#[derive(Debug, Serialize)]
pub struct GrantCoinsResponse {
    /// New balance.
    pub coin_balance: i64,
    /// Ledger transaction ID.
    pub transaction_id: String,
}

/// Grant bonus coins to a user (promos, support adjustments).
pub async fn grant_coins(
    State(state): State<Arc<AppState>>,
    auth: ServiceAuth,
    Json(body): Json<GrantCoinsRequest>,
) -> Result<Json<GrantCoinsResponse>, ApiError> {
    let user_id: UserId = body
        .user_id
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid user ID".into()))?;

    if body.amount <= 0 {
        return Err(ApiError::BadRequest("Amount must be positive".into()));
    }

    let tx = state.store.add_coins(
        &user_id,
        body.amount,
        TransactionKind::Bonus,
        Some(body.reason.clone()),
        None,
    )?;

    tracing::info!(
        service = %auth.service_name,
        user_id = %user_id,
        amount = %body.amount,
        reason = %body.reason,
        new_balance = %tx.balance_after,
        "Coins granted"
    );

    Ok(Json(GrantCoinsResponse {
        coin_balance: tx.balance_after,
        transaction_id: tx.id.to_string(),
    }))
}
