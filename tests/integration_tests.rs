//! Integration tests for component interactions.
//!
//! These tests push raw Data API payloads through activity preparation,
//! replay, horizon windowing, and stats the way the API server does.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use polymarket_core::api::{prepare_activity, WalletDataSource};
use polymarket_core::config::WalletConfig;
use polymarket_core::types::{ActivityEntry, ClosedPosition, Position};
use portfolio_history::{build_history, compute_stats, ActivityEvent, HistoryError, WalletService};
use serde_json::{json, Value};
use std::sync::Arc;

const DAY: i64 = 86_400;

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap()
}

fn entries(raw: Value) -> Vec<ActivityEntry> {
    serde_json::from_value(raw).unwrap()
}

fn values(points: &[portfolio_history::TimelinePoint]) -> Vec<f64> {
    points.iter().map(|p| p.value).collect()
}

/// Activity as the Data API pages it: newest first, with a row repeated
/// across a page boundary, a row older than the window, and an asset-less row.
fn raw_activity() -> Value {
    json!([
        {"proxyWallet": "0xw", "timestamp": 95 * DAY, "type": "REDEEM", "size": 4.0,
         "asset": "A", "transactionHash": "0x4"},
        {"proxyWallet": "0xw", "timestamp": 90 * DAY, "type": "TRADE", "side": "SELL",
         "size": 6.0, "price": 0.8, "asset": "A", "transactionHash": "0x3"},
        {"proxyWallet": "0xw", "timestamp": 90 * DAY, "type": "TRADE", "side": "SELL",
         "size": 6.0, "price": 0.8, "asset": "A", "transactionHash": "0x3"},
        {"proxyWallet": "0xw", "timestamp": 85 * DAY, "type": "REWARD", "usdcSize": 1.5,
         "asset": ""},
        {"proxyWallet": "0xw", "timestamp": 80 * DAY, "type": "TRADE", "side": "BUY",
         "size": 10.0, "price": 0.5, "asset": "A", "transactionHash": "0x2"},
        {"proxyWallet": "0xw", "timestamp": 10 * DAY, "type": "TRADE", "side": "BUY",
         "size": 99.0, "price": 0.1, "asset": "B", "transactionHash": "0x1"}
    ])
}

/// Test the full pipeline from raw payload to per-horizon series.
#[test]
fn test_raw_activity_to_history() {
    let end = at(100 * DAY);
    let activity = prepare_activity(entries(raw_activity()), Some(end - Duration::days(60)));

    // Old, duplicated and asset-less rows are gone; the rest is ascending.
    let timestamps: Vec<i64> = activity.iter().map(|e| e.timestamp).collect();
    assert_eq!(timestamps, vec![80 * DAY, 90 * DAY, 95 * DAY]);

    let events = ActivityEvent::from_entries(&activity);
    let history = build_history(&events, end, &[7, 30]).unwrap();

    // Window [70d, 100d]: 0 before the buy, 10 @ 0.5, 4 @ 0.8, redeemed to 0.
    let thirty = &history["30"];
    assert_eq!(values(thirty), vec![0.0, 5.0, 3.2, 0.0, 0.0]);
    assert_eq!(thirty.first().unwrap().timestamp, at(70 * DAY));
    assert_eq!(thirty.last().unwrap().timestamp, end);

    // The 7-day series keeps only the redeem and the end point.
    let seven = &history["7"];
    assert_eq!(values(seven), vec![0.0, 0.0]);
    assert_eq!(seven[0].timestamp, at(95 * DAY));
}

/// Test that replay seeds holdings from activity before the window.
#[test]
fn test_pre_window_activity_seeds_holdings() {
    let end = at(100 * DAY);
    let activity = prepare_activity(entries(raw_activity()), Some(at(80 * DAY)));
    let events = ActivityEvent::from_entries(&activity);

    let history = build_history(&events, end, &[1]).unwrap();

    // Only the window bounds fall inside [99d, 100d]; A was redeemed at 95d.
    assert_eq!(values(&history["1"]), vec![0.0, 0.0]);

    let seeded = build_history(&events[..2], end, &[1]).unwrap();
    assert_eq!(values(&seeded["1"]), vec![3.2, 3.2]);
}

/// Test that repeated builds over the same input are bit-identical.
#[test]
fn test_history_is_deterministic() {
    let end = at(100 * DAY);
    let events = ActivityEvent::from_entries(&prepare_activity(entries(raw_activity()), None));

    let first = build_history(&events, end, &[1, 7, 30]).unwrap();
    let second = build_history(&events, end, &[30, 7, 1, 7]).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

/// Test that horizon labels and point shapes serialize as the API returns them.
#[test]
fn test_history_json_shape() {
    let end = at(100 * DAY);
    let history = build_history(&[], end, &[1, 7]).unwrap();
    let json = serde_json::to_value(&history).unwrap();

    // Window [93d, 100d] samples only its bounds; the 1-day cutoff keeps the end.
    assert_eq!(json["1"].as_array().unwrap().len(), 1);
    assert_eq!(json["1"][0]["date"], at(100 * DAY).to_rfc3339());
    assert_eq!(json["1"][0]["value"], 0.0);
    assert_eq!(json["7"].as_array().unwrap().len(), 2);
    assert_eq!(json["7"][0]["date"], at(93 * DAY).to_rfc3339());
}

/// Test stats over decoded position payloads with missing fields.
#[test]
fn test_stats_from_position_payloads() {
    let open: Vec<Position> = serde_json::from_value(json!([
        {"proxyWallet": "0xw", "asset": "A", "conditionId": "0xc", "size": 10.0,
         "currentValue": 7.5, "initialValue": 5.0, "cashPnl": 2.5},
        {"proxyWallet": "0xw", "asset": "B", "conditionId": "0xd", "currentValue": 1.0}
    ]))
    .unwrap();
    let closed: Vec<ClosedPosition> = serde_json::from_value(json!([
        {"proxyWallet": "0xw", "asset": "C", "conditionId": "0xe", "realizedPnl": -3.0},
        {"proxyWallet": "0xw", "asset": "D", "conditionId": "0xf", "realizedPnl": 4.5}
    ]))
    .unwrap();

    let stats = compute_stats(&open, &closed, at(70 * DAY), at(100 * DAY));

    assert_eq!(stats.total_open_value, 8.5);
    assert_eq!(stats.total_initial_value, 5.0);
    assert_eq!(stats.total_unrealized_pnl, 2.5);
    assert_eq!(stats.total_realized_pnl, 1.5);
    assert_eq!(stats.open_positions_count, 2);
    assert_eq!(stats.closed_positions_count, 2);
}

/// Data source serving fixed payloads, unordered.
struct FixtureSource;

#[async_trait]
impl WalletDataSource for FixtureSource {
    async fn fetch_open_positions(&self, _user: &str) -> polymarket_core::Result<Vec<Position>> {
        Ok(Vec::new())
    }

    async fn fetch_closed_positions(
        &self,
        _user: &str,
        _limit: u32,
    ) -> polymarket_core::Result<Vec<ClosedPosition>> {
        Ok(Vec::new())
    }

    async fn fetch_activity(
        &self,
        _user: &str,
        _end: DateTime<Utc>,
        start: Option<DateTime<Utc>>,
    ) -> polymarket_core::Result<Vec<ActivityEntry>> {
        let mut activity = prepare_activity(entries(raw_activity()), start);
        activity.reverse();
        Ok(activity)
    }
}

/// Test the service end to end against an in-memory source.
#[tokio::test]
async fn test_service_snapshot_from_fixture() {
    let service = WalletService::new(Arc::new(FixtureSource), WalletConfig::default(), 50);
    let now = at(100 * DAY);

    let snapshot = service
        .get_wallet_snapshot_at(Some("0xw"), &[30], now)
        .await
        .unwrap();

    assert_eq!(values(&snapshot.history["30"]), vec![0.0, 5.0, 3.2, 0.0, 0.0]);
    assert_eq!(snapshot.stats.activity_start, at(70 * DAY).to_rfc3339());
}

/// Test that a zero horizon is rejected by the engine.
#[test]
fn test_zero_horizon_rejected() {
    let err = build_history(&[], at(100 * DAY), &[0, 7]).unwrap_err();
    assert!(matches!(err, HistoryError::InvalidHorizon(_)));
}
