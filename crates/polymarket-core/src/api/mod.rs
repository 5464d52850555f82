//! API clients for external services.

pub mod data;

pub use data::{prepare_activity, DataApiClient, WalletDataSource};
