//! Per-horizon trimming of a replayed value series.

use chrono::{DateTime, TimeDelta, Utc};
use std::collections::BTreeMap;

use crate::replay::TimelinePoint;

/// Horizon label (whole days, as a decimal string) to its value series.
pub type HorizonSeries = BTreeMap<String, Vec<TimelinePoint>>;

/// Points of `series` no older than `horizon_days` before `end`.
///
/// If the cutoff excludes everything but `series` has data, the last point is
/// returned on its own so the horizon never reports an empty series. A cutoff
/// before the earliest representable instant keeps every point.
pub fn trim_to_horizon(
    series: &[TimelinePoint],
    end: DateTime<Utc>,
    horizon_days: u32,
) -> Vec<TimelinePoint> {
    let cutoff = TimeDelta::try_days(i64::from(horizon_days))
        .and_then(|delta| end.checked_sub_signed(delta));
    let trimmed: Vec<TimelinePoint> = series
        .iter()
        .filter(|point| cutoff.is_none_or(|cutoff| point.timestamp >= cutoff))
        .copied()
        .collect();

    match series.last() {
        Some(last) if trimmed.is_empty() => vec![*last],
        _ => trimmed,
    }
}

/// Trim one full series for every horizon, all anchored at `end`.
pub fn window_horizons(
    series: &[TimelinePoint],
    end: DateTime<Utc>,
    horizons: &[u32],
) -> HorizonSeries {
    horizons
        .iter()
        .map(|&days| (days.to_string(), trim_to_horizon(series, end, days)))
        .collect()
}
