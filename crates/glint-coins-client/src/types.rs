//! Request and response types for the coins client.

use serde::{Deserialize, Serialize};

/// Wallet response from the API.
#[derive(Debug, Clone, Deserialize)]
pub struct WalletResponse {
    /// Owning user ID.
    pub user_id: String,
    /// Current coin balance.
    pub coin_balance: i64,
    /// Lifetime coins earned.
    pub lifetime_earned: i64,
    /// Lifetime coins spent.
    pub lifetime_spent: i64,
    /// Created timestamp (RFC 3339).
    pub created_at: String,
}

/// A ledger transaction as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionResponse {
    /// Transaction ID.
    pub id: String,
    /// Signed amount (positive = credit, negative = debit).
    pub amount: i64,
    /// Transaction kind ("purchase", "gift_sent", ...).
    pub kind: String,
    /// Balance after this transaction.
    pub balance_after: i64,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Originating record, if any.
    #[serde(default)]
    pub reference: Option<ReferenceInfo>,
    /// Timestamp (RFC 3339).
    pub created_at: String,
}

/// A ledger line's pointer back to its originating record.
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceInfo {
    /// Kind of record ("gift", "subscription", "tip").
    pub kind: String,
    /// Record id.
    pub id: String,
}

/// Transaction list response.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionListResponse {
    /// Transactions, newest first.
    pub transactions: Vec<TransactionResponse>,
    /// Whether more transactions are available.
    pub has_more: bool,
}

/// Gift catalog entry response.
#[derive(Debug, Clone, Deserialize)]
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
    #[serde(default)]
    pub icon: Option<String>,
    /// Ordering within the catalog.
    pub sort_order: i32,
}

/// Send gift request.
#[derive(Debug, Clone, Serialize)]
pub struct SendGiftRequest {
    /// Recipient user ID.
    pub recipient_id: String,
    /// Gift catalog entry ID.
    pub gift_type_id: String,
    /// Number of units to send (default: 1).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    /// Kind of target the gift is attached to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_type: Option<String>,
    /// Id of the target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,
    /// Optional message to the recipient.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A recorded gift as returned by the API.
#[derive(Debug, Clone, Deserialize)]
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
    #[serde(default)]
    pub message: Option<String>,
    /// Timestamp (RFC 3339).
    pub created_at: String,
}

/// Send gift response.
#[derive(Debug, Clone, Deserialize)]
pub struct SendGiftResponse {
    /// The recorded gift.
    pub gift: GiftResponse,
    /// Sender's balance after the exchange.
    pub coin_balance: i64,
}

/// A received gift joined to its catalog entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ReceivedGiftResponse {
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
    #[serde(default)]
    pub message: Option<String>,
    /// Timestamp (RFC 3339).
    pub created_at: String,
    /// Catalog entry name.
    pub gift_name: String,
    /// Catalog entry icon.
    #[serde(default)]
    pub gift_icon: Option<String>,
}

/// Send tip request.
#[derive(Debug, Clone, Serialize)]
pub struct SendTipRequest {
    /// Recipient user ID.
    pub recipient_id: String,
    /// Tip amount in coins.
    pub amount: i64,
    /// Kind of target the tip is attached to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_type: Option<String>,
    /// Id of the target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,
    /// Optional message to the recipient.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Send tip response.
#[derive(Debug, Clone, Deserialize)]
pub struct SendTipResponse {
    /// The debit transaction ID.
    pub transaction_id: String,
    /// Amount tipped.
    pub amount: i64,
    /// Sender's balance after the tip.
    pub coin_balance: i64,
}

/// A subscription as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionResponse {
    /// Subscription ID.
    pub id: String,
    /// Subscriber user ID.
    pub subscriber_id: String,
    /// Creator user ID.
    pub creator_id: String,
    /// Tier ID.
    pub tier_id: String,
    /// Status ("active", "cancelled", "expired").
    pub status: String,
    /// Start of the paid period (RFC 3339).
    pub current_period_start: String,
    /// End of the paid period (RFC 3339).
    pub current_period_end: String,
}

/// Subscribe response.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscribeResponse {
    /// The recorded subscription.
    pub subscription: SubscriptionResponse,
    /// Subscriber's balance after payment.
    pub coin_balance: i64,
}

/// Subscription check response.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckSubscriptionResponse {
    /// Whether the user has an active subscription to the creator.
    pub is_subscribed: bool,
}

/// Grant coins response.
#[derive(Debug, Clone, Deserialize)]
pub struct GrantCoinsResponse {
    /// New balance.
    pub coin_balance: i64,
    /// Ledger transaction ID.
    pub transaction_id: String,
}

/// API error response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    /// The error body.
    pub error: ApiErrorBody,
}

/// API error body.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// Error code.
    pub code: String,
    /// Error message.
    pub message: String,
    /// Structured details, if any.
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}
