//! Event replay over a sampled timeline.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::event::ActivityEvent;

/// Holdings smaller than this are dropped to avoid float dust.
pub const HOLDING_EPSILON: f64 = 1e-9;

/// Portfolio value at one sample instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct TimelinePoint {
    #[serde(rename = "date", serialize_with = "serialize_iso")]
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

fn serialize_iso<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&at.to_rfc3339())
}

/// Quantities held and last observed prices, per asset.
///
/// Ordered maps keep the valuation sum in a fixed order so identical inputs
/// give bit-identical values.
#[derive(Debug, Clone, Default)]
pub struct HoldingsState {
    quantities: BTreeMap<String, f64>,
    last_prices: BTreeMap<String, f64>,
}

impl HoldingsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event: adjust the held quantity and record its price.
    pub fn apply(&mut self, event: &ActivityEvent) {
        let delta = event.signed_delta();
        if delta != 0.0 {
            let held = self.quantities.entry(event.asset.clone()).or_insert(0.0);
            *held += delta;
            if held.abs() < HOLDING_EPSILON {
                self.quantities.remove(&event.asset);
            }
        }
        if let Some(price) = event.price {
            self.last_prices.insert(event.asset.clone(), price);
        }
    }

    pub fn quantity(&self, asset: &str) -> Option<f64> {
        self.quantities.get(asset).copied()
    }

    pub fn last_price(&self, asset: &str) -> Option<f64> {
        self.last_prices.get(asset).copied()
    }

    /// Mark-to-last-price value, rounded to 6 decimal places. Assets never
    /// seen with a price contribute nothing.
    pub fn portfolio_value(&self) -> f64 {
        let total: f64 = self
            .quantities
            .iter()
            .filter_map(|(asset, qty)| self.last_prices.get(asset).map(|price| qty * price))
            .sum();
        round6(total)
    }
}

/// Round to 6 decimal places, half away from zero.
///
/// Approximate: scaling by 1e6 can itself round, so values within an ulp of a
/// half-way point may land on the neighbouring micro-unit.
pub(crate) fn round6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}

/// Replay `events` and value the portfolio at each of `instants`.
///
/// Both inputs must be ascending. Events before the first instant seed the
/// starting holdings; then each instant absorbs every remaining event at or
/// before it. Events sharing a timestamp apply in input order.
pub fn replay(events: &[ActivityEvent], instants: &[DateTime<Utc>]) -> Vec<TimelinePoint> {
    debug_assert!(events
        .windows(2)
        .all(|w| w[0].occurred_at <= w[1].occurred_at));
    debug_assert!(instants.windows(2).all(|w| w[0] <= w[1]));

    let mut state = HoldingsState::new();
    let mut points = Vec::with_capacity(instants.len());
    let mut next = 0;

    if let Some(first) = instants.first() {
        while next < events.len() && events[next].occurred_at < *first {
            state.apply(&events[next]);
            next += 1;
        }
    }

    for &instant in instants {
        while next < events.len() && events[next].occurred_at <= instant {
            state.apply(&events[next]);
            next += 1;
        }
        points.push(TimelinePoint {
            timestamp: instant,
            value: state.portfolio_value(),
        });
    }

    points
}
