//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `Store` trait.
//!
//! Compound operations (ledger mutations and exchanges) hold the store's
//! write lock across their read-modify-write so balance updates for a wallet
//! are serializable, and commit every touched key in one `WriteBatch` so an
//! exchange is all-or-nothing. Plain reads take no lock.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, IteratorMode, MultiThreaded,
    Options, WriteBatch,
};

use glint_coins_core::{
    CoinTransaction, GiftContext, GiftId, GiftTransaction, GiftType, GiftTypeId, Reference,
    Subscription, SubscriptionId, SubscriptionStatus, SubscriptionTier, TierId, TransactionId,
    TransactionKind, UserId, Wallet,
};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::{GiftExchange, ReceivedGift, Store, SubscriptionExchange, TipExchange};

/// RocksDB-backed storage implementation.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
    /// Serializes compound read-modify-write operations per store.
    write_lock: Mutex<()>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Self {
            db: Arc::new(db),
            write_lock: Mutex::new(()),
        })
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn lock_writes(&self) -> std::sync::MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn commit(&self, batch: WriteBatch) -> Result<()> {
        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    /// Stage a wallet write into a batch.
    fn stage_wallet(&self, batch: &mut WriteBatch, wallet: &Wallet) -> Result<()> {
        let cf_wallets = self.cf(cf::WALLETS)?;
        let value = Self::serialize(wallet)?;
        batch.put_cf(&cf_wallets, keys::wallet_key(&wallet.user_id), value);
        Ok(())
    }

    /// Stage a ledger transaction write (record + user index) into a batch.
    fn stage_transaction(&self, batch: &mut WriteBatch, tx: &CoinTransaction) -> Result<()> {
        let cf_tx = self.cf(cf::TRANSACTIONS)?;
        let cf_by_user = self.cf(cf::TRANSACTIONS_BY_USER)?;
        let value = Self::serialize(tx)?;

        batch.put_cf(&cf_tx, keys::transaction_key(&tx.id), value);
        batch.put_cf(
            &cf_by_user,
            keys::user_transaction_key(&tx.user_id, &tx.id),
            [],
        );
        Ok(())
    }

    /// Apply a credit to an in-memory wallet.
    fn apply_credit(wallet: &mut Wallet, amount: i64) {
        wallet.coin_balance += amount;
        wallet.lifetime_earned += amount;
        wallet.updated_at = chrono::Utc::now();
    }

    /// Apply a debit to an in-memory wallet. Caller has verified the balance.
    fn apply_debit(wallet: &mut Wallet, amount: i64) {
        wallet.coin_balance -= amount;
        wallet.lifetime_spent += amount;
        wallet.updated_at = chrono::Utc::now();
    }

    /// Load the sender's wallet for a debit, mapping a missing wallet to an
    /// insufficient-balance failure so nothing is created on a failed spend.
    fn debitable_wallet(&self, user_id: &UserId, required: i64) -> Result<Wallet> {
        let wallet = self
            .get_wallet(user_id)?
            .ok_or(StoreError::InsufficientCoins {
                balance: 0,
                required,
            })?;

        if !wallet.has_sufficient_coins(required) {
            return Err(StoreError::InsufficientCoins {
                balance: wallet.coin_balance,
                required,
            });
        }

        Ok(wallet)
    }

    /// Collect index keys under a prefix, newest first.
    fn index_keys_newest_first(&self, cf_name: &str, prefix: &[u8]) -> Result<Vec<Vec<u8>>> {
        let cf_index = self.cf(cf_name)?;
        let iter = self.db.iterator_cf(
            &cf_index,
            IteratorMode::From(prefix, rocksdb::Direction::Forward),
        );

        // ULID suffixes are time-ordered, so key order is chronological;
        // collect forward then reverse for newest-first.
        let mut all_keys: Vec<Vec<u8>> = Vec::new();
        for item in iter {
            let (key, _) = item.map_err(|e| StoreError::Database(e.to_string()))?;

            if !key.starts_with(prefix) {
                break;
            }

            all_keys.push(key.to_vec());
        }

        all_keys.reverse();
        Ok(all_keys)
    }
}

impl Store for RocksStore {
    // =========================================================================
    // Wallet Accessor
    // =========================================================================

    fn get_wallet(&self, user_id: &UserId) -> Result<Option<Wallet>> {
        let cf_wallets = self.cf(cf::WALLETS)?;

        self.db
            .get_cf(&cf_wallets, keys::wallet_key(user_id))
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn get_or_create_wallet(&self, user_id: &UserId) -> Result<Wallet> {
        let _guard = self.lock_writes();

        if let Some(wallet) = self.get_wallet(user_id)? {
            return Ok(wallet);
        }

        let wallet = Wallet::new(*user_id);
        let mut batch = WriteBatch::default();
        self.stage_wallet(&mut batch, &wallet)?;
        self.commit(batch)?;

        tracing::debug!(user_id = %user_id, "Wallet created");
        Ok(wallet)
    }

    // =========================================================================
    // Ledger Primitive
    // =========================================================================

    fn add_coins(
        &self,
        user_id: &UserId,
        amount: i64,
        kind: TransactionKind,
        description: Option<String>,
        reference: Option<Reference>,
    ) -> Result<CoinTransaction> {
        if amount <= 0 {
            return Err(StoreError::InvalidAmount(amount));
        }

        let _guard = self.lock_writes();

        let mut wallet = self
            .get_wallet(user_id)?
            .unwrap_or_else(|| Wallet::new(*user_id));
        Self::apply_credit(&mut wallet, amount);

        let tx = CoinTransaction::credit(
            *user_id,
            amount,
            kind,
            wallet.coin_balance,
            description,
            reference,
        );

        let mut batch = WriteBatch::default();
        self.stage_wallet(&mut batch, &wallet)?;
        self.stage_transaction(&mut batch, &tx)?;
        self.commit(batch)?;

        Ok(tx)
    }

    fn deduct_coins(
        &self,
        user_id: &UserId,
        amount: i64,
        kind: TransactionKind,
        description: Option<String>,
        reference: Option<Reference>,
    ) -> Result<CoinTransaction> {
        if amount <= 0 {
            return Err(StoreError::InvalidAmount(amount));
        }

        let _guard = self.lock_writes();

        let mut wallet = self.debitable_wallet(user_id, amount)?;
        Self::apply_debit(&mut wallet, amount);

        let tx = CoinTransaction::debit(
            *user_id,
            amount,
            kind,
            wallet.coin_balance,
            description,
            reference,
        );

        let mut batch = WriteBatch::default();
        self.stage_wallet(&mut batch, &wallet)?;
        self.stage_transaction(&mut batch, &tx)?;
        self.commit(batch)?;

        Ok(tx)
    }

    // =========================================================================
    // Read Views
    // =========================================================================

    fn get_transaction(&self, transaction_id: &TransactionId) -> Result<Option<CoinTransaction>> {
        let cf_tx = self.cf(cf::TRANSACTIONS)?;

        self.db
            .get_cf(&cf_tx, keys::transaction_key(transaction_id))
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn list_transactions(
        &self,
        user_id: &UserId,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<CoinTransaction>> {
        let prefix = keys::user_transactions_prefix(user_id);
        let all_keys =
            self.index_keys_newest_first(cf::TRANSACTIONS_BY_USER, &prefix)?;

        let mut transactions = Vec::new();
        for key in all_keys.into_iter().skip(offset) {
            if transactions.len() >= limit {
                break;
            }

            let tx_id = keys::extract_transaction_id_from_user_key(&key);
            if let Some(tx) = self.get_transaction(&tx_id)? {
                transactions.push(tx);
            }
        }

        Ok(transactions)
    }

    fn list_received_gifts(&self, user_id: &UserId, limit: usize) -> Result<Vec<ReceivedGift>> {
        let prefix = keys::recipient_gifts_prefix(user_id);
        let all_keys = self.index_keys_newest_first(cf::GIFTS_BY_RECIPIENT, &prefix)?;

        let mut gifts = Vec::new();
        for key in all_keys {
            if gifts.len() >= limit {
                break;
            }

            let gift_id = keys::extract_gift_id_from_recipient_key(&key);
            if let Some(gift) = self.get_gift(&gift_id)? {
                gifts.push(gift);
            }
        }

        // One catalog lookup per distinct gift type, not per gift.
        let mut types: HashMap<GiftTypeId, GiftType> = HashMap::new();
        for gift in &gifts {
            if !types.contains_key(&gift.gift_type_id) {
                if let Some(gift_type) = self.get_gift_type(&gift.gift_type_id)? {
                    types.insert(gift.gift_type_id, gift_type);
                }
            }
        }

        Ok(gifts
            .into_iter()
            .filter_map(|gift| {
                let Some(gift_type) = types.get(&gift.gift_type_id).cloned() else {
                    tracing::warn!(
                        gift_id = %gift.id,
                        gift_type_id = %gift.gift_type_id,
                        "Gift references a missing catalog entry; skipping"
                    );
                    return None;
                };
                Some(ReceivedGift { gift, gift_type })
            })
            .collect())
    }

    // =========================================================================
    // Gift Catalog
    // =========================================================================

    fn put_gift_type(&self, gift_type: &GiftType) -> Result<()> {
        let cf_types = self.cf(cf::GIFT_TYPES)?;
        let value = Self::serialize(gift_type)?;

        self.db
            .put_cf(&cf_types, keys::gift_type_key(&gift_type.id), value)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn get_gift_type(&self, gift_type_id: &GiftTypeId) -> Result<Option<GiftType>> {
        let cf_types = self.cf(cf::GIFT_TYPES)?;

        self.db
            .get_cf(&cf_types, keys::gift_type_key(gift_type_id))
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn list_gift_types(&self) -> Result<Vec<GiftType>> {
        let cf_types = self.cf(cf::GIFT_TYPES)?;

        let mut gift_types = Vec::new();
        for item in self.db.iterator_cf(&cf_types, IteratorMode::Start) {
            let (_, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            let gift_type: GiftType = Self::deserialize(&value)?;
            if gift_type.is_active {
                gift_types.push(gift_type);
            }
        }

        gift_types.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(gift_types)
    }

    // =========================================================================
    // Exchange Operations
    // =========================================================================

    fn send_gift(
        &self,
        sender_id: &UserId,
        recipient_id: &UserId,
        gift_type_id: &GiftTypeId,
        quantity: u32,
        context: Option<GiftContext>,
        message: Option<String>,
    ) -> Result<GiftExchange> {
        if quantity == 0 {
            return Err(StoreError::InvalidQuantity(quantity));
        }
        if sender_id == recipient_id {
            return Err(StoreError::SelfExchange);
        }

        let _guard = self.lock_writes();

        let gift_type = self
            .get_gift_type(gift_type_id)?
            .ok_or_else(|| StoreError::NotFound {
                entity: "gift type",
                id: gift_type_id.to_string(),
            })?;
        if !gift_type.is_active {
            return Err(StoreError::Inactive {
                entity: "gift type",
                id: gift_type_id.to_string(),
            });
        }

        let total_coins = gift_type.coin_cost * i64::from(quantity);
        if total_coins <= 0 {
            return Err(StoreError::InvalidAmount(total_coins));
        }

        let mut sender = self.debitable_wallet(sender_id, total_coins)?;
        let mut recipient = self
            .get_wallet(recipient_id)?
            .unwrap_or_else(|| Wallet::new(*recipient_id));

        let gift = GiftTransaction::new(
            *sender_id,
            *recipient_id,
            &gift_type,
            quantity,
            context,
            message,
        );
        let gift_ref = Reference::gift(gift.id);

        Self::apply_debit(&mut sender, total_coins);
        Self::apply_credit(&mut recipient, total_coins);

        let description = if quantity == 1 {
            format!("Gift: {}", gift_type.name)
        } else {
            format!("Gift: {} x{quantity}", gift_type.name)
        };
        let debit = CoinTransaction::debit(
            *sender_id,
            total_coins,
            TransactionKind::GiftSent,
            sender.coin_balance,
            Some(description.clone()),
            Some(gift_ref.clone()),
        );
        let credit = CoinTransaction::credit(
            *recipient_id,
            total_coins,
            TransactionKind::GiftReceived,
            recipient.coin_balance,
            Some(description),
            Some(gift_ref),
        );

        let cf_gifts = self.cf(cf::GIFTS)?;
        let cf_by_recipient = self.cf(cf::GIFTS_BY_RECIPIENT)?;
        let gift_value = Self::serialize(&gift)?;

        let mut batch = WriteBatch::default();
        self.stage_wallet(&mut batch, &sender)?;
        self.stage_wallet(&mut batch, &recipient)?;
        self.stage_transaction(&mut batch, &debit)?;
        self.stage_transaction(&mut batch, &credit)?;
        batch.put_cf(&cf_gifts, keys::gift_key(&gift.id), gift_value);
        batch.put_cf(
            &cf_by_recipient,
            keys::recipient_gift_key(recipient_id, &gift.id),
            [],
        );
        self.commit(batch)?;

        tracing::debug!(
            gift_id = %gift.id,
            sender = %sender_id,
            recipient = %recipient_id,
            total_coins = %total_coins,
            "Gift exchanged"
        );

        Ok(GiftExchange {
            gift,
            debit,
            credit,
        })
    }

    fn get_gift(&self, gift_id: &GiftId) -> Result<Option<GiftTransaction>> {
        let cf_gifts = self.cf(cf::GIFTS)?;

        self.db
            .get_cf(&cf_gifts, keys::gift_key(gift_id))
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn send_tip(
        &self,
        sender_id: &UserId,
        recipient_id: &UserId,
        amount: i64,
        context: Option<GiftContext>,
        message: Option<String>,
    ) -> Result<TipExchange> {
        if amount <= 0 {
            return Err(StoreError::InvalidAmount(amount));
        }
        if sender_id == recipient_id {
            return Err(StoreError::SelfExchange);
        }

        let _guard = self.lock_writes();

        let mut sender = self.debitable_wallet(sender_id, amount)?;
        let mut recipient = self
            .get_wallet(recipient_id)?
            .unwrap_or_else(|| Wallet::new(*recipient_id));

        Self::apply_debit(&mut sender, amount);
        Self::apply_credit(&mut recipient, amount);

        let description = message.or_else(|| {
            context
                .as_ref()
                .map(|c| format!("Tip on {} {}", c.kind, c.id))
        });

        // Both ledger lines share the debit transaction's id as reference.
        let mut debit = CoinTransaction::debit(
            *sender_id,
            amount,
            TransactionKind::TipSent,
            sender.coin_balance,
            description.clone(),
            None,
        );
        let tip_ref = Reference::tip(debit.id);
        debit.reference = Some(tip_ref.clone());

        let credit = CoinTransaction::credit(
            *recipient_id,
            amount,
            TransactionKind::TipReceived,
            recipient.coin_balance,
            description,
            Some(tip_ref),
        );

        let mut batch = WriteBatch::default();
        self.stage_wallet(&mut batch, &sender)?;
        self.stage_wallet(&mut batch, &recipient)?;
        self.stage_transaction(&mut batch, &debit)?;
        self.stage_transaction(&mut batch, &credit)?;
        self.commit(batch)?;

        Ok(TipExchange { debit, credit })
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    fn put_tier(&self, tier: &SubscriptionTier) -> Result<()> {
        let cf_tiers = self.cf(cf::TIERS)?;
        let cf_by_creator = self.cf(cf::TIERS_BY_CREATOR)?;
        let value = Self::serialize(tier)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_tiers, keys::tier_key(&tier.id), value);
        batch.put_cf(
            &cf_by_creator,
            keys::creator_tier_key(&tier.creator_id, &tier.id),
            [],
        );
        self.commit(batch)
    }

    fn get_tier(&self, tier_id: &TierId) -> Result<Option<SubscriptionTier>> {
        let cf_tiers = self.cf(cf::TIERS)?;

        self.db
            .get_cf(&cf_tiers, keys::tier_key(tier_id))
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn list_tiers_by_creator(&self, creator_id: &UserId) -> Result<Vec<SubscriptionTier>> {
        let cf_by_creator = self.cf(cf::TIERS_BY_CREATOR)?;
        let prefix = keys::creator_tiers_prefix(creator_id);

        let iter = self.db.iterator_cf(
            &cf_by_creator,
            IteratorMode::From(&prefix, rocksdb::Direction::Forward),
        );

        let mut tiers = Vec::new();
        for item in iter {
            let (key, _) = item.map_err(|e| StoreError::Database(e.to_string()))?;

            if !key.starts_with(&prefix) {
                break;
            }

            let tier_id = keys::extract_tier_id_from_creator_key(&key);
            if let Some(tier) = self.get_tier(&tier_id)? {
                if tier.is_active {
                    tiers.push(tier);
                }
            }
        }

        tiers.sort_by_key(|t| t.monthly_price_coins);
        Ok(tiers)
    }

    fn subscribe(
        &self,
        subscriber_id: &UserId,
        creator_id: &UserId,
        tier_id: &TierId,
    ) -> Result<SubscriptionExchange> {
        if subscriber_id == creator_id {
            return Err(StoreError::SelfExchange);
        }

        let _guard = self.lock_writes();

        // A tier belonging to a different creator does not exist for this one.
        let tier = self
            .get_tier(tier_id)?
            .filter(|t| t.creator_id == *creator_id)
            .ok_or_else(|| StoreError::NotFound {
                entity: "tier",
                id: tier_id.to_string(),
            })?;
        if !tier.is_active {
            return Err(StoreError::Inactive {
                entity: "tier",
                id: tier_id.to_string(),
            });
        }

        if let Some(existing) = self.get_subscription(subscriber_id, creator_id)? {
            if existing.status == SubscriptionStatus::Active {
                return Err(StoreError::AlreadySubscribed {
                    subscriber: subscriber_id.to_string(),
                    creator: creator_id.to_string(),
                });
            }
        }

        let price = tier.monthly_price_coins;
        if price <= 0 {
            return Err(StoreError::InvalidAmount(price));
        }

        let mut subscriber = self.debitable_wallet(subscriber_id, price)?;
        let mut creator = self
            .get_wallet(creator_id)?
            .unwrap_or_else(|| Wallet::new(*creator_id));

        let subscription = Subscription::new(*subscriber_id, *creator_id, *tier_id);
        let sub_ref = Reference::subscription(subscription.id);

        Self::apply_debit(&mut subscriber, price);
        Self::apply_credit(&mut creator, price);

        let description = format!("Subscription: {}", tier.name);
        let debit = CoinTransaction::debit(
            *subscriber_id,
            price,
            TransactionKind::SubscriptionPayment,
            subscriber.coin_balance,
            Some(description.clone()),
            Some(sub_ref.clone()),
        );
        let credit = CoinTransaction::credit(
            *creator_id,
            price,
            TransactionKind::SubscriptionEarnings,
            creator.coin_balance,
            Some(description),
            Some(sub_ref),
        );

        let cf_subs = self.cf(cf::SUBSCRIPTIONS)?;
        let cf_by_pair = self.cf(cf::SUBSCRIPTIONS_BY_PAIR)?;
        let sub_value = Self::serialize(&subscription)?;

        let mut batch = WriteBatch::default();
        self.stage_wallet(&mut batch, &subscriber)?;
        self.stage_wallet(&mut batch, &creator)?;
        self.stage_transaction(&mut batch, &debit)?;
        self.stage_transaction(&mut batch, &credit)?;
        batch.put_cf(&cf_subs, keys::subscription_key(&subscription.id), sub_value);
        batch.put_cf(
            &cf_by_pair,
            keys::subscription_pair_key(subscriber_id, creator_id),
            subscription.id.to_bytes(),
        );
        self.commit(batch)?;

        tracing::debug!(
            subscription_id = %subscription.id,
            subscriber = %subscriber_id,
            creator = %creator_id,
            price = %price,
            "Subscription purchased"
        );

        Ok(SubscriptionExchange {
            subscription,
            debit,
            credit,
        })
    }

    fn get_subscription(
        &self,
        subscriber_id: &UserId,
        creator_id: &UserId,
    ) -> Result<Option<Subscription>> {
        let cf_by_pair = self.cf(cf::SUBSCRIPTIONS_BY_PAIR)?;
        let cf_subs = self.cf(cf::SUBSCRIPTIONS)?;

        let Some(id_bytes) = self
            .db
            .get_cf(
                &cf_by_pair,
                keys::subscription_pair_key(subscriber_id, creator_id),
            )
            .map_err(|e| StoreError::Database(e.to_string()))?
        else {
            return Ok(None);
        };

        let bytes: [u8; 16] = id_bytes
            .as_slice()
            .try_into()
            .map_err(|_| StoreError::Serialization("invalid subscription id bytes".into()))?;
        let subscription_id = SubscriptionId::from_bytes(bytes)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        self.db
            .get_cf(&cf_subs, keys::subscription_key(&subscription_id))
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }
}
