//! Wallet snapshot handler.

use axum::extract::{Query, State};
use axum::Json;
use portfolio_history::WalletSnapshot;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Query parameters for a wallet snapshot.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WalletQuery {
    /// Wallet address. Defaults to the configured wallet.
    pub user: Option<String>,
    /// Comma-separated lookback horizons in days, e.g. `1,7,30`.
    pub horizons: Option<String>,
}

/// Parse a comma-separated horizon list.
///
/// Blank entries are skipped. Returns an empty list when nothing remains,
/// which the service reads as "use the defaults".
pub fn parse_horizons(raw: Option<&str>) -> ApiResult<Vec<u32>> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| match part.parse::<u32>() {
            Ok(days) if days > 0 => Ok(days),
            _ => Err(ApiError::BadRequest("Invalid horizons parameter".to_string())),
        })
        .collect()
}

/// Get a wallet's positions, stats, and per-horizon portfolio history.
#[utoipa::path(
    get,
    path = "/api/wallet",
    tag = "wallet",
    params(WalletQuery),
    responses(
        (status = 200, description = "Wallet snapshot", body = WalletSnapshot),
        (status = 400, description = "Invalid horizons parameter", body = crate::error::ErrorResponse),
        (status = 502, description = "Upstream Data API unavailable", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_wallet(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WalletQuery>,
) -> ApiResult<Json<WalletSnapshot>> {
    let horizons = parse_horizons(query.horizons.as_deref())?;

    let snapshot = state
        .wallet_service
        .get_wallet_snapshot(query.user.as_deref(), &horizons)
        .await?;

    Ok(Json(snapshot))
}
