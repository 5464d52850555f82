//! Application state shared across handlers.

use polymarket_core::api::{DataApiClient, WalletDataSource};
use polymarket_core::config::Config;
use portfolio_history::WalletService;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Builds wallet snapshots from upstream data.
    pub wallet_service: WalletService,
}

impl AppState {
    /// State backed by the live Data API.
    pub fn new(config: &Config) -> Self {
        let client = DataApiClient::new(config.data_api.clone());
        Self::with_source(Arc::new(client), config)
    }

    /// State backed by an arbitrary data source.
    pub fn with_source(source: Arc<dyn WalletDataSource>, config: &Config) -> Self {
        Self {
            wallet_service: WalletService::new(
                source,
                config.wallet.clone(),
                config.data_api.closed_positions_limit,
            ),
        }
    }
}
