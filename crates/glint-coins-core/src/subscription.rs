//! Creator subscription types.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{SubscriptionId, TierId, UserId};

/// Length of one subscription billing period, in days.
///
/// There is no renewal engine: a subscription is paid for one period up
/// front and its status is changed by administrative tooling, not by this
/// service.
pub const SUBSCRIPTION_PERIOD_DAYS: i64 = 30;

/// A creator-defined subscription tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionTier {
    /// Tier id.
    pub id: TierId,

    /// The creator this tier belongs to.
    pub creator_id: UserId,

    /// Display name ("Supporter", "VIP", ...).
    pub name: String,

    /// Price of one 30-day period, in coins.
    pub monthly_price_coins: i64,

    /// Optional description shown to subscribers.
    pub description: Option<String>,

    /// Inactive tiers cannot be subscribed to.
    pub is_active: bool,

    /// When the tier was created.
    pub created_at: DateTime<Utc>,
}

/// A subscriber's paid period on a creator's tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    /// Subscription id (ULID, time-ordered).
    pub id: SubscriptionId,

    /// Who subscribed.
    pub subscriber_id: UserId,

    /// The creator being subscribed to.
    pub creator_id: UserId,

    /// The tier that was purchased.
    pub tier_id: TierId,

    /// Current status. Transitions happen outside this service.
    pub status: SubscriptionStatus,

    /// Start of the paid period.
    pub current_period_start: DateTime<Utc>,

    /// End of the paid period (`start + SUBSCRIPTION_PERIOD_DAYS`).
    pub current_period_end: DateTime<Utc>,

    /// When the subscription was created.
    pub created_at: DateTime<Utc>,
}

impl Subscription {
    /// Create a new active subscription starting now.
    #[must_use]
    pub fn new(subscriber_id: UserId, creator_id: UserId, tier_id: TierId) -> Self {
        let now = Utc::now();
        Self {
            id: SubscriptionId::generate(),
            subscriber_id,
            creator_id,
            tier_id,
            status: SubscriptionStatus::Active,
            current_period_start: now,
            current_period_end: now + Duration::days(SUBSCRIPTION_PERIOD_DAYS),
            created_at: now,
        }
    }
}

/// Status of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Subscription is active.
    Active,

    /// Subscriber cancelled (remains usable until period end).
    Cancelled,

    /// Period lapsed and was marked expired by administrative tooling.
    Expired,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_subscription_is_active_for_thirty_days() {
        let sub = Subscription::new(UserId::generate(), UserId::generate(), TierId::generate());

        assert_eq!(sub.status, SubscriptionStatus::Active);
        assert_eq!(
            sub.current_period_end - sub.current_period_start,
            Duration::days(SUBSCRIPTION_PERIOD_DAYS)
        );
    }

    #[test]
    fn subscription_serde_roundtrip() {
        let sub = Subscription::new(UserId::generate(), UserId::generate(), TierId::generate());
        let json = serde_json::to_string(&sub).unwrap();
        let parsed: Subscription = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, sub.id);
        assert_eq!(parsed.status, SubscriptionStatus::Active);
    }
}
