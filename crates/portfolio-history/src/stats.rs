//! Aggregate totals over position summaries.

use chrono::{DateTime, Utc};
use polymarket_core::types::{ClosedPosition, Position};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Wallet-level totals reported alongside the history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WalletStats {
    pub total_open_value: f64,
    pub total_initial_value: f64,
    pub total_unrealized_pnl: f64,
    pub total_realized_pnl: f64,
    pub open_positions_count: usize,
    pub closed_positions_count: usize,
    /// Start of the reported activity window (ISO-8601).
    pub activity_start: String,
    /// End of the reported activity window (ISO-8601).
    pub activity_end: String,
}

fn sum<T>(items: &[T], field: impl Fn(&T) -> Option<f64>) -> f64 {
    items.iter().map(|item| field(item).unwrap_or(0.0)).sum()
}

/// Fold open and closed positions into totals. Absent fields count as zero.
pub fn compute_stats(
    open_positions: &[Position],
    closed_positions: &[ClosedPosition],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> WalletStats {
    WalletStats {
        total_open_value: sum(open_positions, |p| p.current_value),
        total_initial_value: sum(open_positions, |p| p.initial_value),
        total_unrealized_pnl: sum(open_positions, |p| p.cash_pnl),
        total_realized_pnl: sum(closed_positions, |p| p.realized_pnl),
        open_positions_count: open_positions.len(),
        closed_positions_count: closed_positions.len(),
        activity_start: start.to_rfc3339(),
        activity_end: end.to_rfc3339(),
    }
}
