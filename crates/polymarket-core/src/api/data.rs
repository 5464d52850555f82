//! Polymarket Data API client.
//!
//! Read-only access to a wallet's open positions, closed positions, and
//! activity log. Every endpoint returns a top-level JSON array; anything else
//! is treated as an upstream failure.

use crate::config::DataApiConfig;
use crate::types::{ActivityEntry, ClosedPosition, Position};
use crate::{Error, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashSet;
use std::time::Duration as StdDuration;
use tracing::{debug, info, warn};

/// Source of wallet positions and activity.
#[async_trait]
pub trait WalletDataSource: Send + Sync {
    /// Currently open positions for `user`.
    async fn fetch_open_positions(&self, user: &str) -> Result<Vec<Position>>;

    /// Up to `limit` closed positions for `user`.
    async fn fetch_closed_positions(&self, user: &str, limit: u32) -> Result<Vec<ClosedPosition>>;

    /// Activity up to `end`, ascending by timestamp, restricted to entries at or
    /// after `start` when given. Entries without an asset are excluded.
    async fn fetch_activity(
        &self,
        user: &str,
        end: DateTime<Utc>,
        start: Option<DateTime<Utc>>,
    ) -> Result<Vec<ActivityEntry>>;
}

/// HTTP client for the Polymarket Data API.
pub struct DataApiClient {
    base_url: String,
    config: DataApiConfig,
    http_client: reqwest::Client,
}

impl DataApiClient {
    pub fn new(config: DataApiConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(StdDuration::from_secs(config.request_timeout_secs))
            .connect_timeout(StdDuration::from_secs(config.connect_timeout_secs))
            .build()
            .expect("Failed to build HTTP client");
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            config,
            http_client,
        }
    }

    pub fn config(&self) -> &DataApiConfig {
        &self.config
    }

    /// Execute an HTTP GET, retrying 429/5xx and transport failures while
    /// attempts remain. With the default of one attempt this never retries.
    async fn get_with_retry(&self, path: &str, query: &[(&str, String)]) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        let attempts = self.config.max_attempts.max(1);
        let mut last_error = None;

        for attempt in 0..attempts {
            match self.http_client.get(&url).query(query).send().await {
                Ok(response) if response.status().is_success() => return Ok(response),
                Ok(response)
                    if response.status().as_u16() == 429 || response.status().is_server_error() =>
                {
                    let status = response.status();
                    warn!(
                        attempt = attempt + 1,
                        status = %status,
                        url = %url,
                        "Retryable Data API error"
                    );
                    last_error = Some(Error::Api {
                        message: format!("Data API error: {}", status),
                        status: Some(status.as_u16()),
                    });
                }
                Ok(response) => {
                    return Err(Error::Api {
                        message: format!("Data API error: {}", response.status()),
                        status: Some(response.status().as_u16()),
                    });
                }
                Err(e) => {
                    warn!(
                        attempt = attempt + 1,
                        error = %e,
                        url = %url,
                        timeout = e.is_timeout(),
                        "Data API request failed"
                    );
                    last_error = Some(Error::Http(e));
                }
            }

            if attempt + 1 < attempts {
                let backoff = StdDuration::from_millis(500 * 2u64.pow(attempt));
                tokio::time::sleep(backoff).await;
            }
        }

        Err(last_error.unwrap_or(Error::Api {
            message: "Max retries exceeded".to_string(),
            status: None,
        }))
    }

    /// GET an endpoint that must answer with a JSON array.
    async fn get_list(&self, path: &str, query: &[(&str, String)]) -> Result<Vec<Value>> {
        let response = self.get_with_retry(path, query).await?;
        let text = response.text().await?;

        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Array(items)) => Ok(items),
            Ok(_) => {
                warn!(endpoint = path, "Data API returned a non-list payload");
                Err(Error::UnexpectedShape {
                    endpoint: path.to_string(),
                })
            }
            Err(e) => {
                let preview: String = text.chars().take(500).collect();
                warn!(
                    error = %e,
                    endpoint = path,
                    response_preview = %preview,
                    "Could not parse Data API response"
                );
                Err(Error::Json(e))
            }
        }
    }

    async fn get_typed<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        self.get_list(path, query)
            .await?
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(Error::from))
            .collect()
    }
}

#[async_trait]
impl WalletDataSource for DataApiClient {
    async fn fetch_open_positions(&self, user: &str) -> Result<Vec<Position>> {
        let query = [
            ("user", user.to_string()),
            ("limit", self.config.positions_limit.to_string()),
            ("sizeThreshold", "0".to_string()),
        ];
        let positions: Vec<Position> = self.get_typed("/positions", &query).await?;
        debug!(wallet = %user, count = positions.len(), "Fetched open positions");
        Ok(positions)
    }

    async fn fetch_closed_positions(&self, user: &str, limit: u32) -> Result<Vec<ClosedPosition>> {
        let query = [("user", user.to_string()), ("limit", limit.to_string())];
        let positions: Vec<ClosedPosition> = self.get_typed("/closed-positions", &query).await?;
        debug!(wallet = %user, count = positions.len(), "Fetched closed positions");
        Ok(positions)
    }

    /// Walks `/activity` newest-first with offset pagination, for at most
    /// `max_activity_pages` pages.
    async fn fetch_activity(
        &self,
        user: &str,
        end: DateTime<Utc>,
        start: Option<DateTime<Utc>>,
    ) -> Result<Vec<ActivityEntry>> {
        let limit = self.config.page_size.max(1);
        let max_pages = self.config.max_activity_pages;
        let mut entries = Vec::new();
        let mut offset: u64 = 0;
        let mut pages = 0u32;
        let mut exhausted = false;

        for page in 0..max_pages {
            let query = [
                ("user", user.to_string()),
                ("limit", limit.to_string()),
                ("sortBy", "TIMESTAMP".to_string()),
                ("sortDirection", "DESC".to_string()),
                ("end", end.timestamp().to_string()),
                ("offset", offset.to_string()),
            ];

            let items = self.get_list("/activity", &query).await?;
            pages += 1;
            if items.is_empty() {
                exhausted = true;
                break;
            }

            let page_len = items.len();
            for item in items.into_iter().filter(has_asset) {
                entries.push(serde_json::from_value::<ActivityEntry>(item)?);
            }
            debug!(wallet = %user, page, page_len, "Fetched activity page");

            if page_len < limit as usize {
                exhausted = true;
                break;
            }
            offset += limit as u64;
        }

        if !exhausted {
            warn!(
                wallet = %user,
                pages,
                "Activity pagination page cap reached; older activity not fetched"
            );
        }

        let fetched = entries.len();
        let entries = prepare_activity(entries, start);
        info!(
            wallet = %user,
            pages,
            fetched,
            kept = entries.len(),
            "Fetched wallet activity"
        );
        Ok(entries)
    }
}

fn has_asset(item: &Value) -> bool {
    item.get("asset")
        .and_then(Value::as_str)
        .is_some_and(|asset| !asset.is_empty())
}

/// Window-filter, de-duplicate, and stable-sort activity ascending by time.
///
/// Entries sharing a timestamp keep their fetched relative order.
pub fn prepare_activity(
    entries: Vec<ActivityEntry>,
    start: Option<DateTime<Utc>>,
) -> Vec<ActivityEntry> {
    let mut seen = HashSet::new();
    let mut kept: Vec<ActivityEntry> = entries
        .into_iter()
        .filter(|entry| entry.asset_id().is_some())
        .filter(|entry| match (entry.occurred_at(), start) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(at), Some(start)) => at >= start,
        })
        .filter(|entry| match entry.dedup_key() {
            Some(key) => seen.insert(key),
            None => true,
        })
        .collect();
    kept.sort_by_key(|entry| entry.timestamp);
    kept
}
