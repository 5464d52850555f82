//! Wallet activity entries from the Data API `/activity` endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Kind of on-chain activity recorded for a wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    Trade,
    Split,
    Merge,
    Redeem,
    Reward,
    Conversion,
    /// Any type this service does not model.
    #[serde(other)]
    Other,
}

/// Trade direction. Only meaningful for [`ActivityType::Trade`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeSide {
    Buy,
    Sell,
    #[serde(other)]
    Unknown,
}

/// A single entry from the Data API `/activity` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub proxy_wallet: String,
    /// Unix timestamp (seconds).
    pub timestamp: i64,
    #[serde(default)]
    pub condition_id: Option<String>,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    /// Quantity / shares.
    #[serde(default)]
    pub size: Option<f64>,
    #[serde(default)]
    pub usdc_size: Option<f64>,
    #[serde(default)]
    pub transaction_hash: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    /// Asset / token ID.
    #[serde(default)]
    pub asset: Option<String>,
    #[serde(default)]
    pub side: Option<TradeSide>,
    #[serde(default)]
    pub outcome_index: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub event_slug: Option<String>,
    #[serde(default)]
    pub outcome: Option<String>,
}

impl ActivityEntry {
    /// Timestamp as a UTC instant. `None` if the epoch value is out of range.
    pub fn occurred_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }

    /// Asset identifier, treating an empty string as absent.
    pub fn asset_id(&self) -> Option<&str> {
        self.asset.as_deref().filter(|a| !a.is_empty())
    }

    /// Identity used to drop rows repeated across offset pages.
    pub(crate) fn dedup_key(&self) -> Option<ActivityKey> {
        let hash = self.transaction_hash.as_deref().filter(|h| !h.is_empty())?;
        Some(ActivityKey {
            transaction_hash: hash.to_string(),
            asset: self.asset.clone().unwrap_or_default(),
            activity_type: self.activity_type,
            side: self.side,
            timestamp: self.timestamp,
            size_bits: self.size.map(f64::to_bits),
            price_bits: self.price.map(f64::to_bits),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct ActivityKey {
    transaction_hash: String,
    asset: String,
    activity_type: ActivityType,
    side: Option<TradeSide>,
    timestamp: i64,
    size_bits: Option<u64>,
    price_bits: Option<u64>,
}
