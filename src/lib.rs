//! Wallet History: Polymarket wallet portfolio history
//!
//! This is the root crate that provides benchmark and integration-test access
//! to the internal crates. For actual functionality, use them directly:
//!
//! - `polymarket-core`: Data API client, activity and position types, configuration
//! - `portfolio-history`: Event replay, timeline sampling, horizon windows, stats
//! - `api-server`: REST API server

// Re-export for benchmarks
pub use polymarket_core as core;
pub use portfolio_history as history;
