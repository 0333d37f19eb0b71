//! Error types for coins storage.

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Serialization/deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Record not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of record ("wallet", "gift type", "tier", ...).
        entity: &'static str,
        /// The id that was looked up.
        id: String,
    },

    /// Record exists but is inactive and cannot be used in an exchange.
    #[error("{entity} is inactive: {id}")]
    Inactive {
        /// The kind of record.
        entity: &'static str,
        /// The id that was looked up.
        id: String,
    },

    /// Insufficient coins for a deduction.
    #[error("insufficient coins: balance={balance}, required={required}")]
    InsufficientCoins {
        /// Current wallet balance.
        balance: i64,
        /// Required amount.
        required: i64,
    },

    /// A ledger mutation was given a non-positive amount.
    #[error("invalid amount: {0}")]
    InvalidAmount(i64),

    /// A gift was sent with a zero quantity.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// An exchange where sender and recipient are the same wallet.
    #[error("sender and recipient are the same user")]
    SelfExchange,

    /// The subscriber already has an active subscription to this creator.
    #[error("already subscribed: subscriber={subscriber}, creator={creator}")]
    AlreadySubscribed {
        /// The subscriber.
        subscriber: String,
        /// The creator.
        creator: String,
    },
}
