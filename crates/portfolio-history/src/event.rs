//! Activity events normalized for replay.

use chrono::{DateTime, Utc};
use polymarket_core::types::{ActivityEntry, ActivityType, TradeSide};
use serde::{Deserialize, Serialize};

/// One wallet activity with the fields replay needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEvent {
    /// Token identifier.
    pub asset: String,
    pub occurred_at: DateTime<Utc>,
    pub kind: ActivityType,
    /// Only consulted for trades.
    pub side: Option<TradeSide>,
    /// Magnitude of the event; absent sizes decode as zero.
    pub quantity: f64,
    /// Unit price observed with the event, if any.
    pub price: Option<f64>,
}

impl ActivityEvent {
    /// Decode an upstream entry. Returns `None` for entries without an asset
    /// or with a timestamp outside the representable range.
    pub fn from_entry(entry: &ActivityEntry) -> Option<Self> {
        let asset = entry.asset_id()?.to_string();
        let occurred_at = entry.occurred_at()?;
        Some(Self {
            asset,
            occurred_at,
            kind: entry.activity_type,
            side: entry.side,
            quantity: entry.size.filter(|q| q.is_finite()).unwrap_or(0.0),
            price: entry.price.filter(|p| p.is_finite()),
        })
    }

    /// Decode entries in order, skipping the ones [`from_entry`](Self::from_entry) rejects.
    pub fn from_entries(entries: &[ActivityEntry]) -> Vec<Self> {
        entries.iter().filter_map(Self::from_entry).collect()
    }

    /// Change in held quantity caused by this event.
    pub fn signed_delta(&self) -> f64 {
        signed_delta(self.kind, self.side, self.quantity)
    }
}

/// Quantity change for an event of `kind`.
///
/// Trades add on BUY and subtract otherwise; merges and redemptions consume the
/// position; splits create it. Rewards, conversions and unknown kinds leave
/// holdings untouched. `side` is ignored for everything but trades.
pub fn signed_delta(kind: ActivityType, side: Option<TradeSide>, quantity: f64) -> f64 {
    if quantity == 0.0 {
        return 0.0;
    }
    match kind {
        ActivityType::Trade => match side {
            Some(TradeSide::Buy) => quantity,
            _ => -quantity,
        },
        ActivityType::Merge | ActivityType::Redeem => -quantity,
        ActivityType::Split => quantity,
        ActivityType::Reward | ActivityType::Conversion | ActivityType::Other => 0.0,
    }
}
