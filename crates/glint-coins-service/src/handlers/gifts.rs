//! Gift catalog, sending, and received-gift handlers.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use glint_coins_core::{GiftContext, GiftTransaction, GiftType, UserId};
use glint_coins_store::{ReceivedGift, Store};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// Gift catalog entry response.
#[derive(Debug, Serialize)]
pub struct GiftTypeResponse {
    /// Catalog entry ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Cost per unit in coins.
    pub coin_cost: i64,
    /// Catalog category.
    pub category: String,
    /// Icon asset reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Ordering within the catalog.
    pub sort_order: i32,
}

impl From<&GiftType> for GiftTypeResponse {
    fn from(gift_type: &GiftType) -> Self {
        Self {
            id: gift_type.id.to_string(),
            name: gift_type.name.clone(),
            coin_cost: gift_type.coin_cost,
            category: gift_type.category.clone(),
            icon: gift_type.icon.clone(),
            sort_order: gift_type.sort_order,
        }
    }
}

/// List the active gift catalog.
pub async fn list_catalog(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
) -> Result<Json<Vec<GiftTypeResponse>>, ApiError> {
    let catalog = state.store.list_gift_types()?;
    Ok(Json(catalog.iter().map(GiftTypeResponse::from).collect()))
}

/// Send gift request.
#[derive(Debug, Deserialize)]
pub struct SendGiftRequest {
    /// Recipient user ID.
    pub recipient_id: String,
    /// Gift catalog entry ID.
    pub gift_type_id: String,
    /// Number of units to send (default: 1).
    pub quantity: Option<u32>,
    /// Kind of target the gift is attached to ("post", "stream", ...).
    pub context_type: Option<String>,
    /// Id of the target.
    pub context_id: Option<String>,
    /// Optional message to the recipient.
    pub message: Option<String>,
}

/// Gift response.
#[derive(Debug, Serialize)]
pub struct GiftResponse {
    /// Gift event ID.
    pub id: String,
    /// Sender user ID.
    pub sender_id: String,
    /// Recipient user ID.
    pub recipient_id: String,
    /// Catalog entry ID.
    pub gift_type_id: String,
    /// Units sent.
    pub quantity: u32,
    /// Total coins moved.
    pub total_coins: i64,
    /// Message, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Timestamp.
    pub created_at: String,
}

impl From<&GiftTransaction> for GiftResponse {
    fn from(gift: &GiftTransaction) -> Self {
        Self {
            id: gift.id.to_string(),
            sender_id: gift.sender_id.to_string(),
            recipient_id: gift.recipient_id.to_string(),
            gift_type_id: gift.gift_type_id.to_string(),
            quantity: gift.quantity,
            total_coins: gift.total_coins,
            message: gift.message.clone(),
            created_at: gift.created_at.to_rfc3339(),
        }
    }
}

/// Send gift response.
#[derive(Debug, Serialize)]
pub struct SendGiftResponse {
    /// The recorded gift.
    pub gift: GiftResponse,
    /// Sender's balance after the exchange.
    pub coin_balance: i64,
}

/// Send a gift to another user.
pub async fn send_gift(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(body): Json<SendGiftRequest>,
) -> Result<Json<SendGiftResponse>, ApiError> {
    let recipient_id: UserId = body
        .recipient_id
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid recipient ID".into()))?;
    let gift_type_id = body
        .gift_type_id
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid gift type ID".into()))?;

    let quantity = body.quantity.unwrap_or(1);
    let context = build_context(body.context_type, body.context_id);

    let exchange = state.store.send_gift(
        &auth.user_id,
        &recipient_id,
        &gift_type_id,
        quantity,
        context,
        body.message,
    )?;

    tracing::info!(
        gift_id = %exchange.gift.id,
        sender = %auth.user_id,
        recipient = %recipient_id,
        total_coins = %exchange.gift.total_coins,
        "Gift sent"
    );

    // Notify the recipient (best-effort, non-blocking).
    if let Some(push) = &state.push {
        let push = push.clone();
        let gift = exchange.gift.clone();
        tokio::spawn(async move {
            let body = format!("You received a gift worth {} coins!", gift.total_coins);
            if let Err(e) = push
                .notify(
                    &gift.recipient_id,
                    "New gift",
                    &body,
                    serde_json::json!({ "type": "gift", "gift_id": gift.id.to_string() }),
                )
                .await
            {
                tracing::warn!(gift_id = %gift.id, error = %e, "Failed to send gift notification");
            }
        });
    }

    Ok(Json(SendGiftResponse {
        coin_balance: exchange.debit.balance_after,
        gift: GiftResponse::from(&exchange.gift),
    }))
}

/// Received gifts query parameters.
#[derive(Debug, Deserialize)]
pub struct ListReceivedQuery {
    /// Maximum number of gifts to return (default: 50, max: 100).
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    50
}

/// A received gift joined to its catalog entry.
#[derive(Debug, Serialize)]
pub struct ReceivedGiftResponse {
    /// The gift event.
    #[serde(flatten)]
    pub gift: GiftResponse,
    /// Catalog entry name.
    pub gift_name: String,
    /// Catalog entry icon.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gift_icon: Option<String>,
}

impl From<&ReceivedGift> for ReceivedGiftResponse {
    fn from(received: &ReceivedGift) -> Self {
        Self {
            gift: GiftResponse::from(&received.gift),
            gift_name: received.gift_type.name.clone(),
            gift_icon: received.gift_type.icon.clone(),
        }
    }
}

/// List gifts received by the caller, newest first.
pub async fn list_received(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Query(query): Query<ListReceivedQuery>,
) -> Result<Json<Vec<ReceivedGiftResponse>>, ApiError> {
    let limit = query.limit.min(100);
    let received = state.store.list_received_gifts(&auth.user_id, limit)?;

    Ok(Json(received.iter().map(ReceivedGiftResponse::from).collect()))
}

/// Build a gift context from the loose request fields, if both are present.
pub(crate) fn build_context(
    context_type: Option<String>,
    context_id: Option<String>,
) -> Option<GiftContext> {
    match (context_type, context_id) {
        (Some(kind), Some(id)) => Some(GiftContext { kind, id }),
        _ => None,
    }
}
