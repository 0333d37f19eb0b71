//! Wallet types.
//!
//! A wallet is the per-user coin balance record. It is created lazily on
//! first access and mutated only through the storage layer's ledger
//! operations, which keep the lifetime counters and the transaction log in
//! step with the balance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::UserId;

/// A per-user virtual-currency balance record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    /// The owning user.
    pub user_id: UserId,

    /// Current coin balance. Non-negative by policy: deductions are rejected
    /// rather than allowed to overdraw.
    pub coin_balance: i64,

    /// Lifetime coins credited to this wallet (monotonic).
    pub lifetime_earned: i64,

    /// Lifetime coins debited from this wallet (monotonic).
    pub lifetime_spent: i64,

    /// When the wallet was created.
    pub created_at: DateTime<Utc>,

    /// When the wallet was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Wallet {
    /// Create a new wallet with zero balance.
    #[must_use]
    pub fn new(user_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            coin_balance: 0,
            lifetime_earned: 0,
            lifetime_spent: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether the wallet can cover a deduction.
    #[must_use]
    pub fn has_sufficient_coins(&self, amount: i64) -> bool {
        self.coin_balance >= amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_wallet_is_empty() {
        let wallet = Wallet::new(UserId::generate());
        assert_eq!(wallet.coin_balance, 0);
        assert_eq!(wallet.lifetime_earned, 0);
        assert_eq!(wallet.lifetime_spent, 0);
    }

    #[test]
    fn sufficient_coins_boundary() {
        let mut wallet = Wallet::new(UserId::generate());
        wallet.coin_balance = 10;

        assert!(wallet.has_sufficient_coins(5));
        assert!(wallet.has_sufficient_coins(10));
        assert!(!wallet.has_sufficient_coins(11));
    }
}
