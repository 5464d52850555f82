//! Wallet snapshot assembly.
//!
//! Fetches positions and activity for one wallet, replays the activity, and
//! bundles the per-horizon history with aggregate stats.

use chrono::{DateTime, Utc};
use polymarket_core::api::WalletDataSource;
use polymarket_core::config::WalletConfig;
use polymarket_core::types::{ClosedPosition, Position};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;

use crate::event::ActivityEvent;
use crate::history::{build_history, days_before, validate_horizons};
use crate::horizon::HorizonSeries;
use crate::stats::{compute_stats, WalletStats};
use crate::Result;

/// Everything reported for one wallet.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WalletSnapshot {
    pub user: String,
    /// Evaluation instant shared by every horizon (ISO-8601).
    pub fetched_at: String,
    pub open_positions: Vec<Position>,
    pub closed_positions: Vec<ClosedPosition>,
    #[schema(value_type = std::collections::BTreeMap<String, Vec<crate::replay::TimelinePoint>>)]
    pub history: HorizonSeries,
    pub stats: WalletStats,
}

/// Builds [`WalletSnapshot`]s from a [`WalletDataSource`].
#[derive(Clone)]
pub struct WalletService {
    source: Arc<dyn WalletDataSource>,
    config: WalletConfig,
    closed_positions_limit: u32,
}

impl WalletService {
    pub fn new(
        source: Arc<dyn WalletDataSource>,
        config: WalletConfig,
        closed_positions_limit: u32,
    ) -> Self {
        Self {
            source,
            config,
            closed_positions_limit,
        }
    }

    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    /// Snapshot `user` (or the default wallet) over `horizons` (or the
    /// default horizons when empty), evaluated now.
    pub async fn get_wallet_snapshot(
        &self,
        user: Option<&str>,
        horizons: &[u32],
    ) -> Result<WalletSnapshot> {
        self.get_wallet_snapshot_at(user, horizons, Utc::now()).await
    }

    /// Same as [`get_wallet_snapshot`](Self::get_wallet_snapshot) with an
    /// explicit evaluation instant.
    ///
    /// Horizons are validated before anything is fetched.
    pub async fn get_wallet_snapshot_at(
        &self,
        user: Option<&str>,
        horizons: &[u32],
        now: DateTime<Utc>,
    ) -> Result<WalletSnapshot> {
        let user = user
            .filter(|u| !u.is_empty())
            .unwrap_or(self.config.default_user.as_str())
            .to_string();
        let horizons = validate_horizons(if horizons.is_empty() {
            self.config.default_horizons.as_slice()
        } else {
            horizons
        })?;

        let max_horizon = horizons.last().copied().unwrap_or(1);
        let window_start = days_before(now, max_horizon)?;
        let activity_start = days_before(window_start, self.config.seed_buffer_days)?;

        let (open_positions, closed_positions, activity) = tokio::try_join!(
            self.source.fetch_open_positions(&user),
            self.source
                .fetch_closed_positions(&user, self.closed_positions_limit),
            self.source.fetch_activity(&user, now, Some(activity_start)),
        )?;

        // Sources are not required to return activity in time order.
        let mut events = ActivityEvent::from_entries(&activity);
        events.sort_by_key(|event| event.occurred_at);
        let history = build_history(&events, now, &horizons)?;
        let stats = compute_stats(&open_positions, &closed_positions, window_start, now);

        info!(
            wallet = %user,
            open = open_positions.len(),
            closed = closed_positions.len(),
            events = events.len(),
            horizons = ?horizons,
            "Built wallet snapshot"
        );

        Ok(WalletSnapshot {
            user,
            fetched_at: now.to_rfc3339(),
            open_positions,
            closed_positions,
            history,
            stats,
        })
    }
}
