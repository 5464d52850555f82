//! Sample instants for a replay window.

use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

use crate::event::ActivityEvent;
use crate::{HistoryError, Result};

/// Instants at which portfolio value is sampled over `[start, end]`.
///
/// Value only changes at events, so the window bounds plus every event
/// instant inside the window is exactly enough. The result is strictly
/// ascending with duplicates collapsed.
pub fn sample_instants(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    events: &[ActivityEvent],
) -> Result<Vec<DateTime<Utc>>> {
    if start >= end {
        return Err(HistoryError::InvalidWindow { start, end });
    }

    let mut instants = BTreeSet::new();
    instants.insert(start);
    instants.insert(end);
    instants.extend(
        events
            .iter()
            .map(|event| event.occurred_at)
            .filter(|at| *at >= start && *at <= end),
    );

    Ok(instants.into_iter().collect())
}
