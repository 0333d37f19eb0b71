//! `RocksDB` storage layer for the Glint coins service.
//!
//! This crate owns every rule-governed coin mutation on the platform:
//!
//! - the **ledger primitive** (`add_coins` / `deduct_coins`), which mutates
//!   a wallet and records the matching ledger line in one atomic batch;
//! - the **wallet accessor** (`get_or_create_wallet`) with lazy creation;
//! - the **exchange operations** (`send_gift`, `subscribe`, `send_tip`),
//!   each a paired debit-then-credit plus a domain record, committed
//!   all-or-nothing;
//! - the **read views** (transaction history, received gifts).
//!
//! # Architecture
//!
//! Storage uses `RocksDB` column families (see [`schema`]): primary records
//! keyed by id, plus `owner || ulid` index families whose key order doubles
//! as chronological order. Records are CBOR-encoded.
//!
//! Compound operations serialize their read-modify-write against an internal
//! write lock and commit every touched key in a single `WriteBatch`, so a
//! wallet balance always equals the sum of its ledger amounts and an
//! exchange can never debit one party without crediting the other.
//!
//! # Example
//!
//! ```no_run
//! use glint_coins_store::{RocksStore, Store};
//! use glint_coins_core::{TransactionKind, UserId};
//!
//! let store = RocksStore::open("/tmp/glint-coins-db").unwrap();
//!
//! let user_id = UserId::generate();
//! let tx = store
//!     .add_coins(&user_id, 100, TransactionKind::Purchase, None, None)
//!     .unwrap();
//! assert_eq!(tx.balance_after, 100);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod keys;
pub mod rocks;
pub mod schema;

pub use error::{Result, StoreError};
pub use rocks::RocksStore;

use glint_coins_core::{
    CoinTransaction, GiftContext, GiftId, GiftTransaction, GiftType, GiftTypeId, Reference,
    Subscription, SubscriptionTier, TierId, TransactionId, TransactionKind, UserId, Wallet,
};

/// The two ledger lines and domain record produced by a successful gift.
#[derive(Debug, Clone)]
pub struct GiftExchange {
    /// The gift-send record.
    pub gift: GiftTransaction,
    /// The sender's debit ledger line.
    pub debit: CoinTransaction,
    /// The recipient's credit ledger line.
    pub credit: CoinTransaction,
}

/// The two ledger lines and subscription produced by a successful purchase.
#[derive(Debug, Clone)]
pub struct SubscriptionExchange {
    /// The subscription record.
    pub subscription: Subscription,
    /// The subscriber's debit ledger line.
    pub debit: CoinTransaction,
    /// The creator's credit ledger line.
    pub credit: CoinTransaction,
}

/// The paired ledger lines produced by a successful tip.
#[derive(Debug, Clone)]
pub struct TipExchange {
    /// The sender's debit ledger line.
    pub debit: CoinTransaction,
    /// The recipient's credit ledger line.
    pub credit: CoinTransaction,
}

/// A received gift joined to its catalog entry for display.
#[derive(Debug, Clone)]
pub struct ReceivedGift {
    /// The gift-send record.
    pub gift: GiftTransaction,
    /// The catalog entry that was sent.
    pub gift_type: GiftType,
}

/// The storage trait defining all coin operations.
///
/// This trait abstracts the storage layer, allowing for different
/// implementations (e.g., `RocksDB`, in-memory for testing).
pub trait Store: Send + Sync {
    // =========================================================================
    // Wallet Accessor
    // =========================================================================

    /// Get a wallet by user ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_wallet(&self, user_id: &UserId) -> Result<Option<Wallet>>;

    /// Get a user's wallet, creating a zero-balance one on first access.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_or_create_wallet(&self, user_id: &UserId) -> Result<Wallet>;

    // =========================================================================
    // Ledger Primitive
    // =========================================================================

    /// Credit coins to a wallet and record the ledger line atomically.
    ///
    /// Creates the wallet if it does not exist and bumps `lifetime_earned`.
    /// Returns the inserted transaction, stamped with `balance_after`.
    ///
    /// # Errors
    ///
    /// - `StoreError::InvalidAmount` if `amount <= 0`.
    fn add_coins(
        &self,
        user_id: &UserId,
        amount: i64,
        kind: TransactionKind,
        description: Option<String>,
        reference: Option<Reference>,
    ) -> Result<CoinTransaction>;

    /// Debit coins from a wallet and record the ledger line atomically.
    ///
    /// Bumps `lifetime_spent`. Returns the inserted (negative-amount)
    /// transaction, stamped with `balance_after`.
    ///
    /// # Errors
    ///
    /// - `StoreError::InvalidAmount` if `amount <= 0`.
    /// - `StoreError::InsufficientCoins` if the balance cannot cover the
    ///   amount; the wallet is left untouched and no ledger line is written.
    fn deduct_coins(
        &self,
        user_id: &UserId,
        amount: i64,
        kind: TransactionKind,
        description: Option<String>,
        reference: Option<Reference>,
    ) -> Result<CoinTransaction>;

    // =========================================================================
    // Read Views
    // =========================================================================

    /// Get a ledger transaction by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_transaction(&self, transaction_id: &TransactionId) -> Result<Option<CoinTransaction>>;

    /// List a user's ledger transactions, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_transactions(
        &self,
        user_id: &UserId,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<CoinTransaction>>;

    /// List gifts received by a user, newest first, joined to their catalog
    /// entries. Catalog lookups are batched by distinct gift type.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_received_gifts(&self, user_id: &UserId, limit: usize) -> Result<Vec<ReceivedGift>>;

    // =========================================================================
    // Gift Catalog
    // =========================================================================

    /// Insert or update a gift catalog entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_gift_type(&self, gift_type: &GiftType) -> Result<()>;

    /// Get a gift catalog entry by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_gift_type(&self, gift_type_id: &GiftTypeId) -> Result<Option<GiftType>>;

    /// List active gift catalog entries, ordered by `sort_order`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_gift_types(&self) -> Result<Vec<GiftType>>;

    // =========================================================================
    // Exchange Operations
    // =========================================================================

    /// Send a gift: debit the sender, credit the recipient, and record the
    /// gift, all in one atomic batch. Both ledger lines carry the gift's id
    /// as their reference.
    ///
    /// # Errors
    ///
    /// - `StoreError::InvalidQuantity` if `quantity` is zero.
    /// - `StoreError::SelfExchange` if sender and recipient match.
    /// - `StoreError::NotFound` / `StoreError::Inactive` for the gift type.
    /// - `StoreError::InsufficientCoins` if the sender cannot pay; nothing
    ///   is written.
    fn send_gift(
        &self,
        sender_id: &UserId,
        recipient_id: &UserId,
        gift_type_id: &GiftTypeId,
        quantity: u32,
        context: Option<GiftContext>,
        message: Option<String>,
    ) -> Result<GiftExchange>;

    /// Get a gift-send record by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_gift(&self, gift_id: &GiftId) -> Result<Option<GiftTransaction>>;

    /// Send a tip: the same debit/credit shape as a gift, without a catalog
    /// entry. Both ledger lines share the debit transaction's id as their
    /// reference.
    ///
    /// # Errors
    ///
    /// - `StoreError::InvalidAmount` if `amount <= 0`.
    /// - `StoreError::SelfExchange` if sender and recipient match.
    /// - `StoreError::InsufficientCoins` if the sender cannot pay.
    fn send_tip(
        &self,
        sender_id: &UserId,
        recipient_id: &UserId,
        amount: i64,
        context: Option<GiftContext>,
        message: Option<String>,
    ) -> Result<TipExchange>;

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Insert or update a subscription tier.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_tier(&self, tier: &SubscriptionTier) -> Result<()>;

    /// Get a subscription tier by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_tier(&self, tier_id: &TierId) -> Result<Option<SubscriptionTier>>;

    /// List a creator's active tiers, ordered by price.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_tiers_by_creator(&self, creator_id: &UserId) -> Result<Vec<SubscriptionTier>>;

    /// Purchase a subscription: debit the subscriber one period's price,
    /// credit the creator, and record the subscription, all in one atomic
    /// batch.
    ///
    /// # Errors
    ///
    /// - `StoreError::SelfExchange` if subscriber and creator match.
    /// - `StoreError::NotFound` if the tier is missing or belongs to a
    ///   different creator.
    /// - `StoreError::Inactive` if the tier is disabled.
    /// - `StoreError::AlreadySubscribed` if an active subscription exists
    ///   for the (subscriber, creator) pair.
    /// - `StoreError::InsufficientCoins` if the subscriber cannot pay.
    fn subscribe(
        &self,
        subscriber_id: &UserId,
        creator_id: &UserId,
        tier_id: &TierId,
    ) -> Result<SubscriptionExchange>;

    /// Get the latest subscription for a (subscriber, creator) pair, if any.
    ///
    /// "Subscribed" means `status == Active`; the period window is recorded
    /// but not enforced here — status transitions are an administrative
    /// concern.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_subscription(
        &self,
        subscriber_id: &UserId,
        creator_id: &UserId,
    ) -> Result<Option<Subscription>>;
}
