//! API route definitions.

use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{health, wallet};
use crate::state::AppState;

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Polymarket Wallet API",
        version = "0.1.0",
        description = "Wallet positions, stats, and portfolio history rebuilt from activity"
    ),
    paths(health::health_check, wallet::get_wallet),
    components(
        schemas(
            crate::error::ErrorResponse,
            health::HealthResponse,
            portfolio_history::WalletSnapshot,
            portfolio_history::WalletStats,
            portfolio_history::TimelinePoint,
            polymarket_core::types::Position,
            polymarket_core::types::ClosedPosition,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "wallet", description = "Wallet snapshot and history"),
    )
)]
pub struct ApiDoc;

/// Create the main router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/wallet", get(wallet::get_wallet))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use chrono::{DateTime, Utc};
    use polymarket_core::api::WalletDataSource;
    use polymarket_core::config::Config;
    use polymarket_core::types::{ActivityEntry, ActivityType, ClosedPosition, Position, TradeSide};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    struct StaticSource {
        activity: Vec<ActivityEntry>,
        fail: bool,
        calls: AtomicUsize,
    }

    impl StaticSource {
        fn new(activity: Vec<ActivityEntry>) -> Self {
            Self {
                activity,
                fail: false,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new(Vec::new())
            }
        }

        fn check(&self) -> polymarket_core::Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(polymarket_core::Error::UnexpectedShape {
                    endpoint: "/positions".to_string(),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl WalletDataSource for StaticSource {
        async fn fetch_open_positions(&self, user: &str) -> polymarket_core::Result<Vec<Position>> {
            self.check()?;
            Ok(vec![serde_json::from_value(json!({
                "proxyWallet": user,
                "asset": "A",
                "conditionId": "0xc",
                "currentValue": 4.0,
                "initialValue": 3.0,
                "cashPnl": 1.0
            }))?])
        }

        async fn fetch_closed_positions(
            &self,
            _user: &str,
            _limit: u32,
        ) -> polymarket_core::Result<Vec<ClosedPosition>> {
            self.check()?;
            Ok(Vec::new())
        }

        async fn fetch_activity(
            &self,
            _user: &str,
            _end: DateTime<Utc>,
            _start: Option<DateTime<Utc>>,
        ) -> polymarket_core::Result<Vec<ActivityEntry>> {
            self.check()?;
            Ok(self.activity.clone())
        }
    }

    fn recent_buy() -> ActivityEntry {
        ActivityEntry {
            proxy_wallet: "0xwallet".to_string(),
            timestamp: Utc::now().timestamp() - 3_600,
            condition_id: None,
            activity_type: ActivityType::Trade,
            size: Some(10.0),
            usdc_size: None,
            transaction_hash: Some("0xhash".to_string()),
            price: Some(0.4),
            asset: Some("A".to_string()),
            side: Some(TradeSide::Buy),
            outcome_index: None,
            title: None,
            slug: None,
            icon: None,
            event_slug: None,
            outcome: None,
        }
    }

    fn app(source: Arc<StaticSource>) -> Router {
        let state = AppState::with_source(source, &Config::default());
        create_router(Arc::new(state))
    }

    async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_route() {
        let (status, body) = get_json(app(Arc::new(StaticSource::new(Vec::new()))), "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_wallet_route_returns_snapshot() {
        let source = Arc::new(StaticSource::new(vec![recent_buy()]));
        let (status, body) = get_json(app(source), "/api/wallet?user=0xabc&horizons=1,7").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"], "0xabc");
        assert_eq!(body["open_positions"][0]["proxyWallet"], "0xabc");
        assert_eq!(body["stats"]["total_open_value"], 4.0);
        assert_eq!(body["stats"]["closed_positions_count"], 0);

        // The window spans 7 days; the 1-day series starts at the buy.
        let seven_day = body["history"]["7"].as_array().unwrap();
        assert_eq!(seven_day.len(), 3);
        assert_eq!(seven_day[0]["value"], 0.0);
        assert_eq!(seven_day[1]["value"], 4.0);
        assert_eq!(seven_day[2]["value"], 4.0);

        let one_day = body["history"]["1"].as_array().unwrap();
        assert_eq!(one_day.len(), 2);
        assert_eq!(one_day[..], seven_day[1..]);
        assert!(body["history"].get("30").is_none());
    }

    #[tokio::test]
    async fn test_wallet_route_defaults() {
        let source = Arc::new(StaticSource::new(Vec::new()));
        let (status, body) = get_json(app(source), "/api/wallet").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"], polymarket_core::config::WalletConfig::DEFAULT_USER);
        let mut labels: Vec<&str> = body["history"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        labels.sort_unstable();
        assert_eq!(labels, vec!["1", "30", "7"]);
    }

    #[tokio::test]
    async fn test_invalid_horizons_rejected_before_fetch() {
        let source = Arc::new(StaticSource::new(Vec::new()));
        let (status, body) = get_json(app(source.clone()), "/api/wallet?horizons=1,zero").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid horizons parameter");
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_out_of_range_horizon_is_bad_request() {
        let source = Arc::new(StaticSource::new(Vec::new()));
        let (status, body) =
            get_json(app(source.clone()), "/api/wallet?horizons=1,100000000").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_bad_gateway() {
        let (status, body) = get_json(app(Arc::new(StaticSource::failing())), "/api/wallet").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["code"], "UPSTREAM_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_openapi_document_served() {
        let (status, body) = get_json(
            app(Arc::new(StaticSource::new(Vec::new()))),
            "/api-docs/openapi.json",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"].get("/api/wallet").is_some());
    }
}
