//! Ledger transaction types.
//!
//! Every balance change creates an immutable `CoinTransaction` recording the
//! signed amount, the reason, and a snapshot of the balance after the
//! change. Exchange operations (gifts, subscriptions, tips) produce a pair
//! of transactions — one debit, one credit — that share a `Reference` back
//! to the domain record that caused them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{TransactionId, UserId};

/// An immutable ledger line recording one balance change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinTransaction {
    /// Unique transaction ID (ULID for time-ordering).
    pub id: TransactionId,

    /// The user whose wallet was affected.
    pub user_id: UserId,

    /// Signed amount. Positive = credit, negative = debit.
    pub amount: i64,

    /// Why the balance changed.
    pub kind: TransactionKind,

    /// Wallet balance after this transaction was applied.
    pub balance_after: i64,

    /// Human-readable description.
    pub description: Option<String>,

    /// Pointer to the domain event that caused this change, if any.
    pub reference: Option<Reference>,

    /// When the transaction was created.
    pub created_at: DateTime<Utc>,
}

impl CoinTransaction {
    /// Create a credit (positive-amount) transaction.
    #[must_use]
    pub fn credit(
        user_id: UserId,
        amount: i64,
        kind: TransactionKind,
        balance_after: i64,
        description: Option<String>,
        reference: Option<Reference>,
    ) -> Self {
        Self {
            id: TransactionId::generate(),
            user_id,
            amount: amount.abs(),
            kind,
            balance_after,
            description,
            reference,
            created_at: Utc::now(),
        }
    }

    /// Create a debit (negative-amount) transaction.
    #[must_use]
    pub fn debit(
        user_id: UserId,
        amount: i64,
        kind: TransactionKind,
        balance_after: i64,
        description: Option<String>,
        reference: Option<Reference>,
    ) -> Self {
        Self {
            id: TransactionId::generate(),
            user_id,
            amount: -amount.abs(),
            kind,
            balance_after,
            description,
            reference,
            created_at: Utc::now(),
        }
    }
}

/// Reason for a balance change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// User purchased coins.
    Purchase,

    /// Coins spent sending a gift.
    GiftSent,

    /// Coins received from a gift.
    GiftReceived,

    /// Coins spent on a subscription.
    SubscriptionPayment,

    /// Coins earned from a subscriber.
    SubscriptionEarnings,

    /// Coins spent tipping.
    TipSent,

    /// Coins received as a tip.
    TipReceived,

    /// Promotional or administrative grant.
    Bonus,
}

impl TransactionKind {
    /// Whether this kind adds coins to a wallet.
    #[must_use]
    pub const fn is_credit(&self) -> bool {
        matches!(
            self,
            Self::Purchase
                | Self::GiftReceived
                | Self::SubscriptionEarnings
                | Self::TipReceived
                | Self::Bonus
        )
    }

    /// Whether this kind removes coins from a wallet.
    #[must_use]
    pub const fn is_debit(&self) -> bool {
        matches!(self, Self::GiftSent | Self::SubscriptionPayment | Self::TipSent)
    }
}

/// A loose pointer from a ledger line back to the domain event that caused
/// it. Not enforced by a storage constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// What kind of record the id points to.
    pub kind: ReferenceKind,

    /// The id of the originating record, as a string.
    pub id: String,
}

impl Reference {
    /// Create a reference to a gift transaction.
    #[must_use]
    pub fn gift(id: impl ToString) -> Self {
        Self {
            kind: ReferenceKind::Gift,
            id: id.to_string(),
        }
    }

    /// Create a reference to a subscription.
    #[must_use]
    pub fn subscription(id: impl ToString) -> Self {
        Self {
            kind: ReferenceKind::Subscription,
            id: id.to_string(),
        }
    }

    /// Create a reference to a tip.
    #[must_use]
    pub fn tip(id: impl ToString) -> Self {
        Self {
            kind: ReferenceKind::Tip,
            id: id.to_string(),
        }
    }
}

/// The kind of record a `Reference` points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    /// A `GiftTransaction`.
    Gift,

    /// A `Subscription`.
    Subscription,

    /// A tip (references the debit transaction id).
    Tip,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credit_is_positive() {
        let tx = CoinTransaction::credit(
            UserId::generate(),
            500,
            TransactionKind::Purchase,
            500,
            Some("Purchased 500 coins".into()),
            None,
        );

        assert_eq!(tx.amount, 500);
        assert_eq!(tx.kind, TransactionKind::Purchase);
        assert_eq!(tx.balance_after, 500);
    }

    #[test]
    fn debit_is_negative() {
        let gift_ref = Reference::gift("01H000000000000000000000000");
        let tx = CoinTransaction::debit(
            UserId::generate(),
            40,
            TransactionKind::GiftSent,
            60,
            None,
            Some(gift_ref.clone()),
        );

        assert_eq!(tx.amount, -40);
        assert_eq!(tx.reference, Some(gift_ref));
    }

    #[test]
    fn kind_credit_debit_split() {
        assert!(TransactionKind::Purchase.is_credit());
        assert!(TransactionKind::GiftReceived.is_credit());
        assert!(TransactionKind::SubscriptionEarnings.is_credit());
        assert!(TransactionKind::TipReceived.is_credit());
        assert!(TransactionKind::Bonus.is_credit());

        assert!(TransactionKind::GiftSent.is_debit());
        assert!(TransactionKind::SubscriptionPayment.is_debit());
        assert!(TransactionKind::TipSent.is_debit());

        assert!(!TransactionKind::GiftSent.is_credit());
        assert!(!TransactionKind::Purchase.is_debit());
    }

    #[test]
    fn transaction_serde_roundtrip() {
        let tx = CoinTransaction::credit(
            UserId::generate(),
            40,
            TransactionKind::GiftReceived,
            40,
            None,
            Some(Reference::gift(crate::GiftId::generate())),
        );

        let json = serde_json::to_string(&tx).unwrap();
        let parsed: CoinTransaction = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, tx.id);
        assert_eq!(parsed.amount, tx.amount);
        assert_eq!(parsed.reference, tx.reference);
    }
}
