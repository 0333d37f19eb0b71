//! Core types for the Glint coins service.
//!
//! This crate provides the foundational types used throughout the coins
//! platform:
//!
//! - **Identifiers**: `UserId`, `TransactionId`, `GiftTypeId`, `GiftId`,
//!   `TierId`, `SubscriptionId`
//! - **Wallets**: `Wallet`
//! - **Ledger**: `CoinTransaction`, `TransactionKind`, `Reference`
//! - **Gifts**: `GiftType`, `GiftTransaction`, `GiftContext`
//! - **Subscriptions**: `SubscriptionTier`, `Subscription`
//!
//! # Coins
//!
//! Coins are the platform's virtual currency, stored as `i64` whole units.
//! Every balance change is recorded as an immutable `CoinTransaction` that
//! snapshots the balance after the change, so a wallet's balance always
//! equals the sum of its transaction amounts.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod gift;
pub mod ids;
pub mod ledger;
pub mod subscription;
pub mod wallet;

pub use gift::{GiftContext, GiftTransaction, GiftType};
pub use ids::{GiftId, GiftTypeId, IdError, SubscriptionId, TierId, TransactionId, UserId};
pub use ledger::{CoinTransaction, Reference, ReferenceKind, TransactionKind};
pub use subscription::{Subscription, SubscriptionStatus, SubscriptionTier, SUBSCRIPTION_PERIOD_DAYS};
pub use wallet::Wallet;
