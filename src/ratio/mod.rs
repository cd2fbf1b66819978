//! Ratio engine module
//!
//! Market cap arithmetic and the rolling history used by the trend chart

mod engine;
mod history;
mod types;

pub use engine::{compute_ratio, multiple_to_parity, parity_price};
pub use history::{append_to_history, HistoryBuffer, HistoryEntry, HISTORY_CAPACITY};
pub use types::{DerivedRatio, Parity, RatioError, SupplyConstants};
