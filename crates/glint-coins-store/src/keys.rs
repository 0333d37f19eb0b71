//! Key encoding utilities for `RocksDB`.
//!
//! UUID ids (users, gift types, tiers) and ULID ids (transactions, gifts,
//! subscriptions) are both 16 bytes, so composite index keys are always
//! `owner (16 bytes) || record (16 bytes)`. ULID record ids are
//! time-ordered, so index keys for one owner sort chronologically.

use glint_coins_core::{GiftId, GiftTypeId, SubscriptionId, TierId, TransactionId, UserId};

/// Create a wallet key from a user ID.
#[must_use]
pub fn wallet_key(user_id: &UserId) -> Vec<u8> {
    user_id.as_bytes().to_vec()
}

/// Create a transaction key from a transaction ID.
#[must_use]
pub fn transaction_key(transaction_id: &TransactionId) -> Vec<u8> {
    transaction_id.to_bytes().to_vec()
}

/// Create a user-transaction index key: `user_id || transaction_id`.
#[must_use]
pub fn user_transaction_key(user_id: &UserId, transaction_id: &TransactionId) -> Vec<u8> {
    let mut key = Vec::with_capacity(32);
    key.extend_from_slice(user_id.as_bytes());
    key.extend_from_slice(&transaction_id.to_bytes());
    key
}

/// Create a prefix for iterating all transactions for a user.
#[must_use]
pub fn user_transactions_prefix(user_id: &UserId) -> Vec<u8> {
    user_id.as_bytes().to_vec()
}

/// Extract the transaction ID from a user-transaction index key.
///
/// # Panics
///
/// Panics if the key is not at least 32 bytes.
#[must_use]
pub fn extract_transaction_id_from_user_key(key: &[u8]) -> TransactionId {
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&key[16..32]);
    TransactionId::from_bytes(bytes).expect("valid ULID bytes")
}

/// Create a gift type key from a gift type ID.
#[must_use]
pub fn gift_type_key(gift_type_id: &GiftTypeId) -> Vec<u8> {
    gift_type_id.as_bytes().to_vec()
}

/// Create a gift key from a gift ID.
#[must_use]
pub fn gift_key(gift_id: &GiftId) -> Vec<u8> {
    gift_id.to_bytes().to_vec()
}

/// Create a recipient-gift index key: `recipient_id || gift_id`.
#[must_use]
pub fn recipient_gift_key(recipient_id: &UserId, gift_id: &GiftId) -> Vec<u8> {
    let mut key = Vec::with_capacity(32);
    key.extend_from_slice(recipient_id.as_bytes());
    key.extend_from_slice(&gift_id.to_bytes());
    key
}

/// Create a prefix for iterating all gifts received by a user.
#[must_use]
pub fn recipient_gifts_prefix(recipient_id: &UserId) -> Vec<u8> {
    recipient_id.as_bytes().to_vec()
}

/// Extract the gift ID from a recipient-gift index key.
///
/// # Panics
///
/// Panics if the key is not at least 32 bytes.
#[must_use]
pub fn extract_gift_id_from_recipient_key(key: &[u8]) -> GiftId {
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&key[16..32]);
    GiftId::from_bytes(bytes).expect("valid ULID bytes")
}

/// Create a tier key from a tier ID.
#[must_use]
pub fn tier_key(tier_id: &TierId) -> Vec<u8> {
    tier_id.as_bytes().to_vec()
}

/// Create a creator-tier index key: `creator_id || tier_id`.
#[must_use]
pub fn creator_tier_key(creator_id: &UserId, tier_id: &TierId) -> Vec<u8> {
    let mut key = Vec::with_capacity(32);
    key.extend_from_slice(creator_id.as_bytes());
    key.extend_from_slice(tier_id.as_bytes());
    key
}

/// Create a prefix for iterating all tiers belonging to a creator.
#[must_use]
pub fn creator_tiers_prefix(creator_id: &UserId) -> Vec<u8> {
    creator_id.as_bytes().to_vec()
}

/// Extract the tier ID from a creator-tier index key.
///
/// # Panics
///
/// Panics if the key is not at least 32 bytes.
#[must_use]
pub fn extract_tier_id_from_creator_key(key: &[u8]) -> TierId {
    let bytes: [u8; 16] = key[16..32].try_into().expect("key at least 32 bytes");
    TierId::from_uuid(uuid::Uuid::from_bytes(bytes))
}

/// Create a subscription key from a subscription ID.
#[must_use]
pub fn subscription_key(subscription_id: &SubscriptionId) -> Vec<u8> {
    subscription_id.to_bytes().to_vec()
}

/// Create a (subscriber, creator) pair index key: `subscriber_id || creator_id`.
#[must_use]
pub fn subscription_pair_key(subscriber_id: &UserId, creator_id: &UserId) -> Vec<u8> {
    let mut key = Vec::with_capacity(32);
    key.extend_from_slice(subscriber_id.as_bytes());
    key.extend_from_slice(creator_id.as_bytes());
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wallet_key_length() {
        let user_id = UserId::generate();
        let key = wallet_key(&user_id);
        assert_eq!(key.len(), 16);
    }

    #[test]
    fn user_transaction_key_format() {
        let user_id = UserId::generate();
        let tx_id = TransactionId::generate();
        let key = user_transaction_key(&user_id, &tx_id);

        assert_eq!(key.len(), 32);
        assert_eq!(&key[..16], user_id.as_bytes());
        assert_eq!(&key[16..], tx_id.to_bytes());
    }

    #[test]
    fn extract_transaction_id_roundtrip() {
        let user_id = UserId::generate();
        let tx_id = TransactionId::generate();
        let key = user_transaction_key(&user_id, &tx_id);

        let extracted = extract_transaction_id_from_user_key(&key);
        assert_eq!(extracted, tx_id);
    }

    #[test]
    fn extract_gift_id_roundtrip() {
        let recipient = UserId::generate();
        let gift_id = GiftId::generate();
        let key = recipient_gift_key(&recipient, &gift_id);

        let extracted = extract_gift_id_from_recipient_key(&key);
        assert_eq!(extracted, gift_id);
    }

    #[test]
    fn extract_tier_id_roundtrip() {
        let creator = UserId::generate();
        let tier_id = TierId::generate();
        let key = creator_tier_key(&creator, &tier_id);

        let extracted = extract_tier_id_from_creator_key(&key);
        assert_eq!(extracted, tier_id);
    }

    #[test]
    fn pair_key_is_directional() {
        let a = UserId::generate();
        let b = UserId::generate();
        assert_ne!(subscription_pair_key(&a, &b), subscription_pair_key(&b, &a));
    }
}
