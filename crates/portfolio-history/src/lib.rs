//! Portfolio History
//!
//! Reconstructs a wallet's historical portfolio value by replaying its
//! activity log.
//!
//! # Pipeline
//!
//! - **Events**: activity entries normalized into signed quantity deltas
//! - **Timeline**: sample instants at window bounds and every event inside it
//! - **Replay**: holdings and last-seen prices applied in time order, valued
//!   at each sample instant
//! - **Horizons**: one trimmed series per lookback horizon, all anchored at
//!   the same end time
//! - **Stats**: totals folded from open and closed position summaries
//!
//! # Example
//!
//! ```ignore
//! use portfolio_history::{build_history, ActivityEvent};
//!
//! let events = ActivityEvent::from_entries(&entries);
//! let history = build_history(&events, Utc::now(), &[1, 7, 30])?;
//! for (label, points) in &history {
//!     println!("{}d: {} points", label, points.len());
//! }
//! ```

pub mod error;
pub mod event;
pub mod history;
pub mod horizon;
pub mod replay;
pub mod service;
pub mod stats;
pub mod timeline;

pub use error::{HistoryError, Result};
pub use event::{signed_delta, ActivityEvent};
pub use history::{build_history, days_before, validate_horizons};
pub use horizon::{window_horizons, HorizonSeries};
pub use replay::{replay, HoldingsState, TimelinePoint};
pub use service::{WalletService, WalletSnapshot};
pub use stats::{compute_stats, WalletStats};
pub use timeline::sample_instants;
