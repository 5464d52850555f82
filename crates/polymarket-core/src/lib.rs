//! Polymarket Core Library
//!
//! Upstream payload types, the Data API client, and configuration shared by
//! the wallet history service.

pub mod api;
pub mod config;
pub mod error;
pub mod types;

pub use error::{Error, Result};
