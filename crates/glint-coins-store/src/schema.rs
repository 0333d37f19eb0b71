//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Wallet records, keyed by `user_id`.
    pub const WALLETS: &str = "wallets";

    /// Ledger transactions, keyed by `transaction_id` (ULID).
    pub const TRANSACTIONS: &str = "transactions";

    /// Index: transactions by user, keyed by `user_id || transaction_id`.
    /// Value is empty (index only).
    pub const TRANSACTIONS_BY_USER: &str = "transactions_by_user";

    /// Gift catalog entries, keyed by `gift_type_id`.
    pub const GIFT_TYPES: &str = "gift_types";

    /// Gift-send records, keyed by `gift_id` (ULID).
    pub const GIFTS: &str = "gifts";

    /// Index: gifts by recipient, keyed by `recipient_id || gift_id`.
    /// Value is empty (index only).
    pub const GIFTS_BY_RECIPIENT: &str = "gifts_by_recipient";

    /// Subscription tiers, keyed by `tier_id`.
    pub const TIERS: &str = "tiers";

    /// Index: tiers by creator, keyed by `creator_id || tier_id`.
    /// Value is empty (index only).
    pub const TIERS_BY_CREATOR: &str = "tiers_by_creator";

    /// Subscriptions, keyed by `subscription_id` (ULID).
    pub const SUBSCRIPTIONS: &str = "subscriptions";

    /// Index: latest subscription per (subscriber, creator) pair, keyed by
    /// `subscriber_id || creator_id`. Value is the subscription id bytes.
    pub const SUBSCRIPTIONS_BY_PAIR: &str = "subscriptions_by_pair";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![
        cf::WALLETS,
        cf::TRANSACTIONS,
        cf::TRANSACTIONS_BY_USER,
        cf::GIFT_TYPES,
        cf::GIFTS,
        cf::GIFTS_BY_RECIPIENT,
        cf::TIERS,
        cf::TIERS_BY_CREATOR,
        cf::SUBSCRIPTIONS,
        cf::SUBSCRIPTIONS_BY_PAIR,
    ]
}
