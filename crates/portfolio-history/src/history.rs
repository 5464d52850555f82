//! Multi-horizon portfolio history.

use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

use crate::event::ActivityEvent;
use crate::horizon::{window_horizons, HorizonSeries};
use crate::replay::replay;
use crate::timeline::sample_instants;
use crate::{HistoryError, Result};

/// Sorted, de-duplicated horizons. Every horizon must be a positive day count.
pub fn validate_horizons(horizons: &[u32]) -> Result<Vec<u32>> {
    if horizons.contains(&0) {
        return Err(HistoryError::InvalidHorizon(
            "horizons must be positive day counts".to_string(),
        ));
    }
    let mut horizons = horizons.to_vec();
    horizons.sort_unstable();
    horizons.dedup();
    Ok(horizons)
}

/// `end` minus `days` whole days, or `InvalidHorizon` when the result falls
/// outside the representable date range.
pub fn days_before(end: DateTime<Utc>, days: u32) -> Result<DateTime<Utc>> {
    TimeDelta::try_days(i64::from(days))
        .and_then(|delta| end.checked_sub_signed(delta))
        .ok_or_else(|| {
            HistoryError::InvalidHorizon(format!("{} days before {} is out of range", days, end))
        })
}

/// Build one value series per horizon from a single replay.
///
/// `events` must be ascending by time and may start before the window; the
/// window is `[end - max(horizons) days, end]`. Horizons are de-duplicated.
/// An empty horizon set yields an empty map.
pub fn build_history(
    events: &[ActivityEvent],
    end: DateTime<Utc>,
    horizons: &[u32],
) -> Result<HorizonSeries> {
    if horizons.is_empty() {
        return Ok(HorizonSeries::new());
    }
    let horizons = validate_horizons(horizons)?;
    let max_horizon = horizons[horizons.len() - 1];

    let start = days_before(end, max_horizon)?;
    let instants = sample_instants(start, end, events)?;
    let series = replay(events, &instants);

    debug!(
        events = events.len(),
        samples = series.len(),
        horizons = ?horizons,
        "Replayed portfolio timeline"
    );

    Ok(window_horizons(&series, end, &horizons))
}
