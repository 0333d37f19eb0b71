//! Wallet balance and transaction handlers.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use glint_coins_core::{CoinTransaction, Reference, TransactionKind, Wallet};
use glint_coins_store::Store;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// Wallet response.
#[derive(Debug, Serialize)]
pub struct WalletResponse {
    /// Owning user ID.
    pub user_id: String,
    /// Current coin balance.
    pub coin_balance: i64,
    /// Lifetime coins earned.
    pub lifetime_earned: i64,
    /// Lifetime coins spent.
    pub lifetime_spent: i64,
    /// Created timestamp.
    pub created_at: String,
}

impl From<&Wallet> for WalletResponse {
    fn from(wallet: &Wallet) -> Self {
        Self {
            user_id: wallet.user_id.to_string(),
            coin_balance: wallet.coin_balance,
            lifetime_earned: wallet.lifetime_earned,
            lifetime_spent: wallet.lifetime_spent,
            created_at: wallet.created_at.to_rfc3339(),
        }
    }
}

/// Get the caller's wallet, creating it on first access.
pub async fn get_wallet(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<WalletResponse>, ApiError> {
    let wallet = state.store.get_or_create_wallet(&auth.user_id)?;
    Ok(Json(WalletResponse::from(&wallet)))
}

/// Transaction list query parameters.
#[derive(Debug, Deserialize)]
pub struct ListTransactionsQuery {
    /// Maximum number of transactions to return (default: 50, max: 100).
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Offset for pagination (default: 0).
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    50
}

/// Transaction response.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// Transaction ID.
    pub id: String,
    /// Signed amount (positive = credit, negative = debit).
    pub amount: i64,
    /// Transaction kind.
    pub kind: TransactionKind,
    /// Balance after this transaction.
    pub balance_after: i64,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Originating record, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<Reference>,
    /// Timestamp.
    pub created_at: String,
}

impl From<&CoinTransaction> for TransactionResponse {
    fn from(tx: &CoinTransaction) -> Self {
        Self {
            id: tx.id.to_string(),
            amount: tx.amount,
            kind: tx.kind,
            balance_after: tx.balance_after,
            description: tx.description.clone(),
            reference: tx.reference.clone(),
            created_at: tx.created_at.to_rfc3339(),
        }
    }
}

/// List transactions response.
#[derive(Debug, Serialize)]
pub struct ListTransactionsResponse {
    /// Transactions (newest first).
    pub transactions: Vec<TransactionResponse>,
    /// Whether there are more transactions.
    pub has_more: bool,
}

/// List the caller's ledger history.
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Query(query): Query<ListTransactionsQuery>,
) -> Result<Json<ListTransactionsResponse>, ApiError> {
    // Fetch one more than requested to determine has_more
    let limit = query.limit.min(100);
    let transactions = state
        .store
        .list_transactions(&auth.user_id, limit + 1, query.offset)?;

    let has_more = transactions.len() > limit;
    let transactions: Vec<_> = transactions
        .iter()
        .take(limit)
        .map(TransactionResponse::from)
        .collect();

    Ok(Json(ListTransactionsResponse {
        transactions,
        has_more,
    }))
}

/// Add coins request.
#[derive(Debug, Deserialize)]
pub struct AddCoinsRequest {
    /// Amount of coins to add.
    pub amount: i64,
    /// Optional description for the ledger line.
    pub description: Option<String>,
}

/// Add coins response.
#[derive(Debug, Serialize)]
pub struct AddCoinsResponse {
    /// The recorded ledger line.
    pub transaction: TransactionResponse,
    /// New balance.
    pub coin_balance: i64,
}

/// Purchase coins for the caller's wallet.
///
/// Payment capture is handled upstream; this endpoint records the purchase
/// and credits the wallet.
pub async fn add_coins(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(body): Json<AddCoinsRequest>,
) -> Result<Json<AddCoinsResponse>, ApiError> {
    if body.amount <= 0 {
        return Err(ApiError::BadRequest("Amount must be positive".into()));
    }

    let tx = state.store.add_coins(
        &auth.user_id,
        body.amount,
        TransactionKind::Purchase,
        body.description,
        None,
    )?;

    tracing::info!(
        user_id = %auth.user_id,
        amount = %body.amount,
        new_balance = %tx.balance_after,
        "Coins purchased"
    );

    Ok(Json(AddCoinsResponse {
        coin_balance: tx.balance_after,
        transaction: TransactionResponse::from(&tx),
    }))
}
