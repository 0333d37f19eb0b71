//! Tip handlers.
//!
//! Tips are the same debit/credit exchange as gifts, without a catalog
//! entry: the sender picks a free-form amount.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use glint_coins_core::UserId;
use glint_coins_store::Store;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::handlers::gifts::build_context;
use crate::state::AppState;

/// Send tip request.
#[derive(Debug, Deserialize)]
pub struct SendTipRequest {
    /// Recipient user ID.
    pub recipient_id: String,
    /// Tip amount in coins.
    pub amount: i64,
    /// Kind of target the tip is attached to ("post", "stream", ...).
    pub context_type: Option<String>,
    /// Id of the target.
    pub context_id: Option<String>,
    /// Optional message to the recipient.
    pub message: Option<String>,
}

/// Send tip response.
#[derive(Debug, Serialize)]
pub struct SendTipResponse {
    /// The debit transaction ID (also the tip's reference id).
    pub transaction_id: String,
    /// Amount tipped.
    pub amount: i64,
    /// Sender's balance after the tip.
    pub coin_balance: i64,
}

/// Send a tip to another user.
pub async fn send_tip(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(body): Json<SendTipRequest>,
) -> Result<Json<SendTipResponse>, ApiError> {
    let recipient_id: UserId = body
        .recipient_id
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid recipient ID".into()))?;

    if body.amount <= 0 {
        return Err(ApiError::BadRequest("Amount must be positive".into()));
    }

    let context = build_context(body.context_type, body.context_id);
    let exchange = state.store.send_tip(
        &auth.user_id,
        &recipient_id,
        body.amount,
        context,
        body.message,
    )?;

    tracing::info!(
        sender = %auth.user_id,
        recipient = %recipient_id,
        amount = %body.amount,
        "Tip sent"
    );

    if let Some(push) = &state.push {
        let push = push.clone();
        let amount = body.amount;
        let transaction_id = exchange.debit.id.to_string();
        tokio::spawn(async move {
            let message = format!("You received a {amount} coin tip!");
            if let Err(e) = push
                .notify(
                    &recipient_id,
                    "New tip",
                    &message,
                    serde_json::json!({ "type": "tip", "transaction_id": transaction_id }),
                )
                .await
            {
                tracing::warn!(recipient = %recipient_id, error = %e, "Failed to send tip notification");
            }
        });
    }

    Ok(Json(SendTipResponse {
        transaction_id: exchange.debit.id.to_string(),
        amount: body.amount,
        coin_balance: exchange.debit.balance_after,
    }))
}
