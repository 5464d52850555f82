//! Upstream payload types returned by the Polymarket Data API.

pub mod activity;
pub mod position;

pub use activity::*;
pub use position::*;
