//! Configuration management for the wallet history service.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_api: DataApiConfig,
    pub wallet: WalletConfig,
}

/// Data API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataApiConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Page size for paginated endpoints (`limit` query parameter).
    pub page_size: u32,
    /// Hard cap on activity pages fetched per request.
    pub max_activity_pages: u32,
    pub positions_limit: u32,
    pub closed_positions_limit: u32,
    /// Attempts per upstream call. 1 means no retry.
    pub max_attempts: u32,
}

impl DataApiConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://data-api.polymarket.com";
    pub const MAX_ACTIVITY_PAGES: u32 = 200;
}

impl Default for DataApiConfig {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 20,
            connect_timeout_secs: 10,
            page_size: 500,
            max_activity_pages: Self::MAX_ACTIVITY_PAGES,
            positions_limit: 500,
            closed_positions_limit: 50,
            max_attempts: 1,
        }
    }
}

/// Defaults applied when a request leaves wallet or horizons unspecified.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    pub default_user: String,
    pub default_horizons: Vec<u32>,
    /// Extra days of activity fetched before the largest horizon so holdings
    /// opened earlier are present at the window start. Older activity is not
    /// seen, so positions opened before this buffer are missing from the
    /// reconstructed history.
    pub seed_buffer_days: u32,
}

impl WalletConfig {
    pub const DEFAULT_USER: &'static str = "0x006BCFa7486Cbe8f85b516Ff559a65E667a4B411";
    pub const DEFAULT_HORIZONS: [u32; 3] = [1, 7, 30];
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            default_user: Self::DEFAULT_USER.to_string(),
            default_horizons: Self::DEFAULT_HORIZONS.to_vec(),
            seed_buffer_days: 30,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn parse_horizon_list(raw: &str) -> Option<Vec<u32>> {
    let horizons: Vec<u32> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<u32>().ok().filter(|h| *h > 0))
        .collect::<Option<_>>()?;
    (!horizons.is_empty()).then_some(horizons)
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let data_defaults = DataApiConfig::default();
        let wallet_defaults = WalletConfig::default();

        Self {
            data_api: DataApiConfig {
                base_url: env::var("DATA_API_URL").unwrap_or(data_defaults.base_url),
                request_timeout_secs: env_parse(
                    "DATA_API_TIMEOUT_SECS",
                    data_defaults.request_timeout_secs,
                ),
                connect_timeout_secs: env_parse(
                    "DATA_API_CONNECT_TIMEOUT_SECS",
                    data_defaults.connect_timeout_secs,
                ),
                page_size: env_parse("DATA_API_PAGE_SIZE", data_defaults.page_size),
                max_activity_pages: env_parse(
                    "MAX_ACTIVITY_PAGES",
                    data_defaults.max_activity_pages,
                ),
                positions_limit: env_parse("POSITIONS_LIMIT", data_defaults.positions_limit),
                closed_positions_limit: env_parse(
                    "CLOSED_POSITIONS_LIMIT",
                    data_defaults.closed_positions_limit,
                ),
                max_attempts: env_parse("DATA_API_MAX_ATTEMPTS", data_defaults.max_attempts),
            },
            wallet: WalletConfig {
                default_user: env::var("DEFAULT_WALLET").unwrap_or(wallet_defaults.default_user),
                default_horizons: env::var("DEFAULT_HORIZONS")
                    .ok()
                    .and_then(|raw| parse_horizon_list(&raw))
                    .unwrap_or(wallet_defaults.default_horizons),
                seed_buffer_days: env_parse("SEED_BUFFER_DAYS", wallet_defaults.seed_buffer_days),
            },
        }
    }

    /// Load configuration from a TOML file, overridden by `WALLET_HISTORY__*`
    /// environment variables (e.g. `WALLET_HISTORY__DATA_API__PAGE_SIZE`).
    pub fn from_file(path: &Path) -> Result<Self> {
        dotenvy::dotenv().ok();

        let settings = ::config::Config::builder()
            .add_source(::config::Config::try_from(&Config::default())?)
            .add_source(::config::File::from(path).required(true))
            .add_source(
                ::config::Environment::with_prefix("WALLET_HISTORY")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("wallet.default_horizons")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the service cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.data_api.page_size == 0 {
            return Err(Error::Config {
                message: "data_api.page_size must be positive".to_string(),
            });
        }
        if self.data_api.max_activity_pages == 0 {
            return Err(Error::Config {
                message: "data_api.max_activity_pages must be positive".to_string(),
            });
        }
        if self.wallet.default_horizons.is_empty() || self.wallet.default_horizons.contains(&0) {
            return Err(Error::Config {
                message: "wallet.default_horizons must be non-empty positive day counts"
                    .to_string(),
            });
        }
        Ok(())
    }

    /// Load configuration for testing (with defaults).
    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            data_api: DataApiConfig {
                base_url: "http://127.0.0.1:9".to_string(),
                request_timeout_secs: 2,
                connect_timeout_secs: 1,
                ..DataApiConfig::default()
            },
            wallet: WalletConfig::default(),
        }
    }
}
