//! Gift catalog and gift-send types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{GiftId, GiftTypeId, UserId};

/// A gift catalog entry.
///
/// Catalog entries are written by admin tooling and read-only from the
/// exchange's perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GiftType {
    /// Catalog entry id.
    pub id: GiftTypeId,

    /// Display name ("Rose", "Diamond", ...).
    pub name: String,

    /// Cost of one unit, in coins.
    pub coin_cost: i64,

    /// Catalog category ("classic", "premium", "seasonal", ...).
    pub category: String,

    /// Icon asset reference, if any.
    pub icon: Option<String>,

    /// Ordering within the catalog UI.
    pub sort_order: i32,

    /// Inactive entries are hidden and cannot be sent.
    pub is_active: bool,

    /// When the entry was created.
    pub created_at: DateTime<Utc>,
}

/// One gift-send event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GiftTransaction {
    /// Gift event id (ULID, time-ordered).
    pub id: GiftId,

    /// Who sent the gift.
    pub sender_id: UserId,

    /// Who received the gift.
    pub recipient_id: UserId,

    /// The catalog entry that was sent.
    pub gift_type_id: GiftTypeId,

    /// How many units were sent.
    pub quantity: u32,

    /// Total coins moved: `coin_cost × quantity`.
    pub total_coins: i64,

    /// Where the gift was attached (a post, a stream, ...), if anywhere.
    pub context: Option<GiftContext>,

    /// Optional message from the sender.
    pub message: Option<String>,

    /// When the gift was sent.
    pub created_at: DateTime<Utc>,
}

impl GiftTransaction {
    /// Create a new gift-send record.
    #[must_use]
    pub fn new(
        sender_id: UserId,
        recipient_id: UserId,
        gift_type: &GiftType,
        quantity: u32,
        context: Option<GiftContext>,
        message: Option<String>,
    ) -> Self {
        Self {
            id: GiftId::generate(),
            sender_id,
            recipient_id,
            gift_type_id: gift_type.id,
            quantity,
            total_coins: gift_type.coin_cost * i64::from(quantity),
            context,
            message,
            created_at: Utc::now(),
        }
    }
}

/// Where a gift or tip was attached.
///
/// A loose pointer (post, stream, story, ...); the target is owned by
/// another service and not validated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftContext {
    /// The kind of target ("post", "stream", "story", ...).
    pub kind: String,

    /// The target's id in its owning service.
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rose() -> GiftType {
        GiftType {
            id: GiftTypeId::generate(),
            name: "Rose".into(),
            coin_cost: 20,
            category: "classic".into(),
            icon: None,
            sort_order: 1,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn total_coins_is_cost_times_quantity() {
        let gift = GiftTransaction::new(
            UserId::generate(),
            UserId::generate(),
            &rose(),
            2,
            None,
            Some("congrats!".into()),
        );

        assert_eq!(gift.total_coins, 40);
        assert_eq!(gift.quantity, 2);
    }

    #[test]
    fn gift_serde_roundtrip() {
        let gift = GiftTransaction::new(
            UserId::generate(),
            UserId::generate(),
            &rose(),
            1,
            Some(GiftContext {
                kind: "stream".into(),
                id: "stream-123".into(),
            }),
            None,
        );

        let json = serde_json::to_string(&gift).unwrap();
        let parsed: GiftTransaction = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, gift.id);
        assert_eq!(parsed.context, gift.context);
        assert_eq!(parsed.total_coins, 20);
    }
}
