//! Tracker controller module
//!
//! Owns the single `TrackerState`, drives periodic and manual refreshes and
//! publishes a `TrackerView` for the presentation layer.

mod service;
mod state;
mod ticker;

pub use service::{Command, TrackerError, TrackerHandle, TrackerService};
pub use state::{TrackerState, TrackerView};
pub use ticker::{ChannelTicker, IntervalTicker, Ticker};
